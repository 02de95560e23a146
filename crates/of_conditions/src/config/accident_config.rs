//! Accident baseline constants

use serde::{Deserialize, Serialize};

use crate::error::{ensure_unit, ConditionError, Result};

/// 사고 유형 하나의 기본 확률
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccidentBaseline {
    /// 틱당 선수당 부상 확률
    pub injury_probability: f32,
    /// 사고 유형의 피로 기준치
    pub fatigue_level: f32,
}

impl AccidentBaseline {
    fn validate(&self, injury_field: &'static str, fatigue_field: &'static str) -> Result<()> {
        ensure_unit(injury_field, self.injury_probability)?;
        ensure_unit(fatigue_field, self.fatigue_level)
    }
}

/// 사고 시스템 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccidentConfig {
    /// 미끄러짐 (기본: 부상 0.00005, 피로 0.10)
    pub player_slips: AccidentBaseline,
    /// 볼 놓침 (기본: 부상 0.0, 피로 0.0001)
    pub ball_drops: AccidentBaseline,
    /// 날씨 결손 가중치 (기본: 1.0)
    pub weather_sensitivity: f32,
}

impl Default for AccidentConfig {
    fn default() -> Self {
        Self {
            player_slips: AccidentBaseline { injury_probability: 0.00005, fatigue_level: 0.10 },
            ball_drops: AccidentBaseline { injury_probability: 0.0, fatigue_level: 0.0001 },
            weather_sensitivity: 1.0,
        }
    }
}

impl AccidentConfig {
    pub fn validate(&self) -> Result<()> {
        self.player_slips
            .validate("player_slips.injury_probability", "player_slips.fatigue_level")?;
        self.ball_drops.validate("ball_drops.injury_probability", "ball_drops.fatigue_level")?;
        if self.ball_drops.injury_probability != 0.0 {
            return Err(ConditionError::NonZeroDropInjury(self.ball_drops.injury_probability));
        }
        // 0이면 날씨가 사고에 영향을 주지 못한다
        if !self.weather_sensitivity.is_finite() || self.weather_sensitivity <= 0.0 {
            return Err(ConditionError::InvalidSensitivity(self.weather_sensitivity));
        }
        Ok(())
    }

    /// Scale both incident baselines, keeping them inside [0,1].
    pub(crate) fn scaled(mut self, factor: f32) -> Self {
        self.player_slips.injury_probability =
            (self.player_slips.injury_probability * factor).clamp(0.0, 1.0);
        self.ball_drops.fatigue_level = (self.ball_drops.fatigue_level * factor).clamp(0.0, 1.0);
        self
    }
}
