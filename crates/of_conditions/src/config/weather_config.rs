//! Weather baseline constants

use serde::{Deserialize, Serialize};

use crate::error::{ensure_unit, ConditionError, Result};

/// 날씨 변형별 기본값
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WeatherConfig {
    #[serde(default)]
    pub rain: RainConfig,
    #[serde(default)]
    pub fog: FogConfig,
}

/// 비 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainConfig {
    /// 시야 (기본: 0.85)
    pub base_visibility: f32,
    /// 수분 0일 때 마찰 (기본: 0.80)
    pub base_friction: f32,
    /// 킥오프 시 수분 (기본: 0.0)
    pub initial_moisture: f32,
    /// 초당 건조 잔량 `decay^dt` (기본: 0.999)
    pub moisture_decay: f32,
    /// 수분 1.0에서 마찰 감소 비율 (기본: 0.5)
    pub damping_factor: f32,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            base_visibility: 0.85,
            base_friction: 0.80,
            initial_moisture: 0.0,
            moisture_decay: 0.999,
            damping_factor: 0.5,
        }
    }
}

impl RainConfig {
    /// Friction once the pitch is fully saturated.
    pub fn friction_floor(&self) -> f32 {
        (self.base_friction * (1.0 - self.damping_factor)).clamp(0.0, 1.0)
    }

    pub fn validate(&self) -> Result<()> {
        ensure_unit("rain.base_visibility", self.base_visibility)?;
        ensure_unit("rain.base_friction", self.base_friction)?;
        ensure_unit("rain.initial_moisture", self.initial_moisture)?;
        ensure_unit("rain.damping_factor", self.damping_factor)?;
        if self.base_visibility >= 1.0 {
            return Err(ConditionError::NotDegraded {
                field: "rain.base_visibility",
                value: self.base_visibility,
            });
        }
        if self.base_friction >= 1.0 {
            return Err(ConditionError::NotDegraded {
                field: "rain.base_friction",
                value: self.base_friction,
            });
        }
        if !(self.moisture_decay > 0.0 && self.moisture_decay <= 1.0) {
            return Err(ConditionError::InvalidDecay(self.moisture_decay));
        }
        Ok(())
    }
}

/// 안개 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    /// 시야 (기본: 0.60)
    pub visibility: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self { visibility: 0.60 }
    }
}

impl FogConfig {
    pub fn validate(&self) -> Result<()> {
        ensure_unit("fog.visibility", self.visibility)?;
        if self.visibility >= 1.0 {
            return Err(ConditionError::NotDegraded {
                field: "fog.visibility",
                value: self.visibility,
            });
        }
        Ok(())
    }
}

impl WeatherConfig {
    pub fn validate(&self) -> Result<()> {
        self.rain.validate()?;
        self.fog.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rain_is_valid() {
        let rain = RainConfig::default();
        assert!(rain.validate().is_ok());
        assert!((rain.friction_floor() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_rain_rejects_bad_decay() {
        for decay in [0.0, -0.5, 1.5, f32::NAN] {
            let rain = RainConfig { moisture_decay: decay, ..Default::default() };
            assert!(
                matches!(rain.validate(), Err(ConditionError::InvalidDecay(_))),
                "decay {} accepted",
                decay
            );
        }
        let still = RainConfig { moisture_decay: 1.0, ..Default::default() };
        assert!(still.validate().is_ok());
    }

    #[test]
    fn test_rain_must_degrade_grip() {
        let rain = RainConfig { base_friction: 1.0, ..Default::default() };
        assert!(matches!(rain.validate(), Err(ConditionError::NotDegraded { .. })));
    }

    #[test]
    fn test_fog_must_reduce_visibility() {
        assert!(FogConfig::default().validate().is_ok());
        assert!(FogConfig { visibility: 1.0 }.validate().is_err());
        assert!(FogConfig { visibility: -0.1 }.validate().is_err());
    }
}
