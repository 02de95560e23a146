//! # Match Conditions Configuration
//!
//! 날씨/사고 튜닝 상수를 한 곳에서 관리한다.
//!
//! 변형별 기본값(비의 마찰, 안개 시야, 미끄러짐 확률 등)은 고정 계약이 아니라
//! 튜닝 대상이다. 프리셋: Realistic, Arcade, Simulation, Deterministic.
//!
//! ## 사용법
//! ```rust
//! use of_conditions::config::ConditionsConfig;
//!
//! let config = ConditionsConfig::default();
//! let arcade = ConditionsConfig::arcade();
//! assert!(arcade.validate().is_ok());
//! ```

mod accident_config;
mod weather_config;

pub use accident_config::{AccidentBaseline, AccidentConfig};
pub use weather_config::{FogConfig, RainConfig, WeatherConfig};

use serde::{Deserialize, Serialize};

use crate::error::{ConditionError, Result};

/// 날씨 + 사고 전체 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConditionsConfig {
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub accidents: AccidentConfig,
}

impl ConditionsConfig {
    /// 현실적인 시뮬레이션 (기본)
    pub fn realistic() -> Self {
        Self::default()
    }

    /// 아케이드 스타일 (사고 적음, 날씨 영향 약함)
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.weather.rain.base_visibility = 0.92;
        cfg.weather.rain.base_friction = 0.90;
        cfg.weather.rain.damping_factor = 0.25;
        cfg.weather.fog.visibility = 0.80;
        cfg.accidents = cfg.accidents.scaled(0.5);
        cfg.accidents.weather_sensitivity = 0.5;
        cfg
    }

    /// 시뮬레이션 스타일 (거친 날씨, 사고 많음)
    pub fn simulation() -> Self {
        let mut cfg = Self::default();
        cfg.weather.rain.base_visibility = 0.75;
        cfg.weather.rain.base_friction = 0.70;
        cfg.weather.rain.moisture_decay = 0.998;
        cfg.weather.rain.damping_factor = 0.6;
        cfg.weather.fog.visibility = 0.45;
        cfg.accidents = cfg.accidents.scaled(2.0);
        cfg.accidents.weather_sensitivity = 1.5;
        cfg
    }

    /// 테스트용 (사고 없음, 날씨는 유지)
    pub fn deterministic() -> Self {
        let mut cfg = Self::default();
        cfg.accidents = cfg.accidents.scaled(0.0);
        cfg
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "realistic" | "default" => Ok(Self::realistic()),
            "arcade" => Ok(Self::arcade()),
            "simulation" => Ok(Self::simulation()),
            "deterministic" => Ok(Self::deterministic()),
            other => Err(ConditionError::UnknownPreset(other.to_string())),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.weather.validate()?;
        self.accidents.validate()
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_presets_valid() {
        for name in ["realistic", "arcade", "simulation", "deterministic"] {
            let cfg = ConditionsConfig::preset(name).unwrap();
            assert!(cfg.validate().is_ok(), "preset {} invalid", name);
        }
        assert!(ConditionsConfig::preset("blizzard").is_err());
    }

    #[test]
    fn test_arcade_is_milder() {
        let realistic = ConditionsConfig::realistic();
        let arcade = ConditionsConfig::arcade();

        assert!(arcade.weather.fog.visibility > realistic.weather.fog.visibility);
        assert!(arcade.weather.rain.friction_floor() > realistic.weather.rain.friction_floor());
        assert!(
            arcade.accidents.player_slips.injury_probability
                < realistic.accidents.player_slips.injury_probability
        );
    }

    #[test]
    fn test_simulation_is_harsher() {
        let realistic = ConditionsConfig::realistic();
        let simulation = ConditionsConfig::simulation();

        assert!(simulation.weather.fog.visibility < realistic.weather.fog.visibility);
        assert!(
            simulation.weather.rain.friction_floor() < realistic.weather.rain.friction_floor()
        );
        assert!(
            simulation.accidents.ball_drops.fatigue_level
                > realistic.accidents.ball_drops.fatigue_level
        );
    }

    #[test]
    fn test_deterministic_has_no_incidents() {
        let det = ConditionsConfig::deterministic();
        assert_eq!(det.accidents.player_slips.injury_probability, 0.0);
        assert_eq!(det.accidents.ball_drops.fatigue_level, 0.0);
        assert_eq!(det.weather, WeatherConfig::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg = ConditionsConfig::from_json_str(r#"{"weather": {"fog": {"visibility": 0.3}}}"#)
            .unwrap();
        assert!((cfg.weather.fog.visibility - 0.3).abs() < 1e-6);
        assert_eq!(cfg.weather.rain, RainConfig::default());
        assert_eq!(cfg.accidents, AccidentConfig::default());
    }

    #[test]
    fn test_json_rejects_invalid_values() {
        let err = ConditionsConfig::from_json_str(
            r#"{"weather": {"rain": {"moisture_decay": -0.2}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConditionError::InvalidDecay(_)));

        let err = ConditionsConfig::from_json_str("{ not json").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_yaml_round_trip() {
        let yaml = serde_yaml::to_string(&ConditionsConfig::simulation()).unwrap();
        let cfg = ConditionsConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(cfg, ConditionsConfig::simulation());
    }
}
