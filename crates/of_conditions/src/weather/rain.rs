//! Rain: pitch moisture accumulation
//!
//! ```text
//! moisture' = 1 - (1 - moisture) * decay^dt
//! friction  = base_friction * (1 - moisture * damping)
//! ```
//!
//! 수분은 경기 중 단조 증가하고 1.0으로 수렴한다. 마찰은 `base * (1 - damping)`로 수렴.

use serde::{Deserialize, Serialize};

use crate::config::RainConfig;

/// 비 상태
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainState {
    base_visibility: f32,
    base_friction: f32,
    initial_moisture: f32,
    moisture_decay: f32,
    damping_factor: f32,
    moisture: f32,
    friction: f32,
}

impl RainState {
    pub fn new(cfg: &RainConfig) -> Self {
        Self::with_moisture(cfg, cfg.initial_moisture)
    }

    /// 특정 수분에서 시작 (CLI 조회 / 테스트용)
    pub fn with_moisture(cfg: &RainConfig, moisture: f32) -> Self {
        let initial = clamp_unit(moisture);
        let mut state = Self {
            base_visibility: clamp_unit(cfg.base_visibility),
            base_friction: clamp_unit(cfg.base_friction),
            initial_moisture: initial,
            moisture_decay: cfg.moisture_decay,
            damping_factor: clamp_unit(cfg.damping_factor),
            moisture: initial,
            friction: 0.0,
        };
        state.recompute_friction();
        state
    }

    // Reads clamp: a deserialized state may carry any value.
    pub fn moisture_level(&self) -> f32 {
        clamp_unit(self.moisture)
    }

    pub fn visibility(&self) -> f32 {
        clamp_unit(self.base_visibility)
    }

    pub fn friction(&self) -> f32 {
        clamp_unit(self.friction)
    }

    /// Friction once moisture reaches 1.0.
    pub fn friction_floor(&self) -> f32 {
        clamp_unit(self.base_friction * (1.0 - self.damping_factor))
    }

    /// 수분 누적. 음수/NaN dt는 무시 (수분 감소 금지)
    pub fn advance(&mut self, delta_time: f32) {
        if !delta_time.is_finite() || delta_time <= 0.0 {
            return;
        }
        let current = clamp_unit(self.moisture);
        let remaining = (1.0 - current) * self.moisture_decay.powf(delta_time);
        let next = clamp_unit(1.0 - remaining);
        // Rounding can never pull moisture backwards.
        self.moisture = next.max(current);
        self.recompute_friction();
    }

    /// 경기 사이 초기화
    pub fn reset(&mut self) {
        self.moisture = self.initial_moisture;
        self.recompute_friction();
    }

    fn recompute_friction(&mut self) {
        let moisture = clamp_unit(self.moisture);
        self.friction = clamp_unit(
            clamp_unit(self.base_friction) * (1.0 - moisture * clamp_unit(self.damping_factor)),
        );
    }
}

#[inline]
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_pitch_uses_base_friction() {
        let rain = RainState::new(&RainConfig::default());
        assert_eq!(rain.moisture_level(), 0.0);
        assert!((rain.friction() - 0.8).abs() < 1e-6);
        assert!((rain.visibility() - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_advance_follows_saturating_curve() {
        let cfg = RainConfig::default();
        let mut rain = RainState::new(&cfg);
        rain.advance(10.0);
        let expected = 1.0 - 0.999f32.powf(10.0);
        assert!((rain.moisture_level() - expected).abs() < 1e-5);
        let expected_friction = 0.8 * (1.0 - expected * 0.5);
        assert!((rain.friction() - expected_friction).abs() < 1e-5);
    }

    #[test]
    fn test_friction_non_increasing_and_converges() {
        let mut rain = RainState::new(&RainConfig::default());
        let mut last = rain.friction();
        for _ in 0..20_000 {
            rain.advance(1.0);
            assert!(rain.friction() <= last);
            assert!(rain.moisture_level() <= 1.0);
            last = rain.friction();
        }
        assert!(rain.moisture_level() > 0.99);
        assert!((rain.friction() - rain.friction_floor()).abs() < 0.01);
    }

    #[test]
    fn test_non_positive_delta_is_ignored() {
        let mut rain = RainState::with_moisture(&RainConfig::default(), 0.4);
        let before = rain.clone();
        rain.advance(0.0);
        rain.advance(-5.0);
        rain.advance(f32::NAN);
        assert_eq!(rain, before);
    }

    #[test]
    fn test_unit_decay_keeps_pitch_dry() {
        let cfg = RainConfig { moisture_decay: 1.0, ..Default::default() };
        let mut rain = RainState::new(&cfg);
        rain.advance(1000.0);
        assert_eq!(rain.moisture_level(), 0.0);
    }

    #[test]
    fn test_reset_restores_initial_moisture() {
        let cfg = RainConfig { initial_moisture: 0.2, ..Default::default() };
        let mut rain = RainState::new(&cfg);
        rain.advance(600.0);
        assert!(rain.moisture_level() > 0.2);
        rain.reset();
        assert!((rain.moisture_level() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_deserialized_state_reads_in_unit_range() {
        let json = r#"{
            "base_visibility": 1.4,
            "base_friction": -0.3,
            "initial_moisture": 0.0,
            "moisture_decay": 0.999,
            "damping_factor": 0.5,
            "moisture": 2.5,
            "friction": 3.0
        }"#;
        let mut rain: RainState = serde_json::from_str(json).unwrap();
        assert_eq!(rain.visibility(), 1.0);
        assert_eq!(rain.friction(), 1.0);
        assert_eq!(rain.moisture_level(), 1.0);

        rain.advance(1.0);
        assert_eq!(rain.friction(), 0.0);
        assert_eq!(rain.moisture_level(), 1.0);
    }

    #[test]
    fn test_with_moisture_clamps_input() {
        let rain = RainState::with_moisture(&RainConfig::default(), 3.0);
        assert_eq!(rain.moisture_level(), 1.0);
        assert!((rain.friction() - rain.friction_floor()).abs() < 1e-6);
    }
}
