//! Player Accidents
//!
//! 선수 사고 유형별 기본 확률. 경기 동안 유형당 하나씩 존재하며 읽기 전용이다.
//! 선수 피로 누적은 매치 엔진 소관이고, 실제 틱 확률은 evaluator가 매번 계산한다.
//!
//! - `PlayerSlips`: 마찰 결손에 민감, 부상 유발
//! - `BallDrops`: 시야 결손 + 피로에 민감, 부상 없음 (injury = 0)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{AccidentBaseline, AccidentConfig};
use crate::error::ConditionError;

/// Read-only accident baselines consumed by the evaluator.
pub trait AccidentProfile {
    fn injury_probability(&self) -> f32;
    fn fatigue_level(&self) -> f32;
}

/// 사고 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccidentKind {
    PlayerSlips,
    BallDrops,
}

impl AccidentKind {
    /// Band order used when sampling.
    pub const ALL: [AccidentKind; 2] = [AccidentKind::PlayerSlips, AccidentKind::BallDrops];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccidentKind::PlayerSlips => "player_slips",
            AccidentKind::BallDrops => "ball_drops",
        }
    }

    /// Dropping the ball is a handling error, not an injury.
    pub fn is_injury(&self) -> bool {
        matches!(self, AccidentKind::PlayerSlips)
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            AccidentKind::PlayerSlips => 0,
            AccidentKind::BallDrops => 1,
        }
    }
}

impl fmt::Display for AccidentKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccidentKind {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "player_slips" | "slips" | "slip" => Ok(AccidentKind::PlayerSlips),
            "ball_drops" | "drops" | "drop" => Ok(AccidentKind::BallDrops),
            _ => Err(ConditionError::UnknownAccident(s.to_string())),
        }
    }
}

/// 사고 모델
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccidentModel {
    PlayerSlips { injury_probability: f32, fatigue_level: f32 },
    BallDrops { fatigue_level: f32 },
}

impl AccidentModel {
    pub fn player_slips(baseline: &AccidentBaseline) -> Self {
        AccidentModel::PlayerSlips {
            injury_probability: baseline.injury_probability.clamp(0.0, 1.0),
            fatigue_level: baseline.fatigue_level.clamp(0.0, 1.0),
        }
    }

    /// Any injury baseline on the input is dropped.
    pub fn ball_drops(baseline: &AccidentBaseline) -> Self {
        AccidentModel::BallDrops { fatigue_level: baseline.fatigue_level.clamp(0.0, 1.0) }
    }

    pub fn from_kind(kind: AccidentKind, cfg: &AccidentConfig) -> Self {
        match kind {
            AccidentKind::PlayerSlips => Self::player_slips(&cfg.player_slips),
            AccidentKind::BallDrops => Self::ball_drops(&cfg.ball_drops),
        }
    }

    /// 유형별 모델 한 세트 (`AccidentKind::ALL` 순서)
    pub fn all(cfg: &AccidentConfig) -> [AccidentModel; 2] {
        AccidentKind::ALL.map(|kind| Self::from_kind(kind, cfg))
    }

    pub fn kind(&self) -> AccidentKind {
        match self {
            AccidentModel::PlayerSlips { .. } => AccidentKind::PlayerSlips,
            AccidentModel::BallDrops { .. } => AccidentKind::BallDrops,
        }
    }
}

impl AccidentProfile for AccidentModel {
    fn injury_probability(&self) -> f32 {
        match self {
            AccidentModel::PlayerSlips { injury_probability, .. } => *injury_probability,
            AccidentModel::BallDrops { .. } => 0.0,
        }
    }

    fn fatigue_level(&self) -> f32 {
        match self {
            AccidentModel::PlayerSlips { fatigue_level, .. }
            | AccidentModel::BallDrops { fatigue_level } => *fatigue_level,
        }
    }
}
