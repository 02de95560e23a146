//! Weather State
//!
//! 경기 날씨: 시야(visibility)와 마찰(friction) 두 개의 [0,1] 모디파이어.
//!
//! | Variant | visibility | friction |
//! |---------|------------|----------|
//! | Normal  | 1.0        | 1.0      |
//! | Rain    | < 1.0      | < 1.0, 수분에 따라 감소 |
//! | Fog     | < 1.0      | 1.0      |
//!
//! 경기 시작 시 하나 생성, Rain만 틱마다 `advance`로 변화한다.

mod rain;

pub use rain::RainState;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::WeatherConfig;
use crate::error::ConditionError;

/// Read-only weather capabilities consumed by the evaluator.
pub trait WeatherEffect {
    /// Perception/targeting scale, 1.0 = perfect visibility.
    fn visibility_modifier(&self) -> f32;
    /// Grip scale, 1.0 = maximum grip, 0.0 = frictionless.
    fn friction_coefficient(&self) -> f32;
}

/// 날씨 종류 (경기 설정에서 선택)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherKind {
    #[default]
    Normal,
    Rain,
    Fog,
}

impl WeatherKind {
    pub const ALL: [WeatherKind; 3] = [WeatherKind::Normal, WeatherKind::Rain, WeatherKind::Fog];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherKind::Normal => "normal",
            WeatherKind::Rain => "rain",
            WeatherKind::Fog => "fog",
        }
    }
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeatherKind {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "clear" => Ok(WeatherKind::Normal),
            "rain" => Ok(WeatherKind::Rain),
            "fog" => Ok(WeatherKind::Fog),
            _ => Err(ConditionError::UnknownWeather(s.to_string())),
        }
    }
}

/// 현재 날씨 상태
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeatherState {
    #[default]
    Normal,
    Rain(RainState),
    Fog { visibility: f32 },
}

impl WeatherState {
    pub fn from_kind(kind: WeatherKind, cfg: &WeatherConfig) -> Self {
        match kind {
            WeatherKind::Normal => WeatherState::Normal,
            WeatherKind::Rain => WeatherState::Rain(RainState::new(&cfg.rain)),
            WeatherKind::Fog => WeatherState::Fog { visibility: cfg.fog.visibility.clamp(0.0, 1.0) },
        }
    }

    pub fn kind(&self) -> WeatherKind {
        match self {
            WeatherState::Normal => WeatherKind::Normal,
            WeatherState::Rain(_) => WeatherKind::Rain,
            WeatherState::Fog { .. } => WeatherKind::Fog,
        }
    }

    /// 수분 (Rain만)
    pub fn moisture_level(&self) -> Option<f32> {
        match self {
            WeatherState::Rain(rain) => Some(rain.moisture_level()),
            _ => None,
        }
    }

    /// Per-tick update. Only Rain changes; Normal and Fog ignore it.
    pub fn advance(&mut self, delta_time: f32) {
        if let WeatherState::Rain(rain) = self {
            rain.advance(delta_time);
        }
    }

    /// 경기 사이 초기화
    pub fn reset(&mut self) {
        if let WeatherState::Rain(rain) = self {
            rain.reset();
        }
    }
}

impl WeatherEffect for WeatherState {
    fn visibility_modifier(&self) -> f32 {
        match self {
            WeatherState::Normal => 1.0,
            WeatherState::Rain(rain) => rain.visibility(),
            WeatherState::Fog { visibility } => {
                if visibility.is_nan() {
                    0.0
                } else {
                    visibility.clamp(0.0, 1.0)
                }
            }
        }
    }

    fn friction_coefficient(&self) -> f32 {
        match self {
            WeatherState::Normal | WeatherState::Fog { .. } => 1.0,
            WeatherState::Rain(rain) => rain.friction(),
        }
    }
}


#[cfg(all(test, feature = "proptest"))]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: rain friction never rises while the match runs
        #[test]
        fn prop_rain_friction_monotone(steps in proptest::collection::vec(0.0f32..120.0, 1..200)) {
            let mut rain = WeatherState::from_kind(WeatherKind::Rain, &WeatherConfig::default());
            let mut last = rain.friction_coefficient();
            for dt in steps {
                rain.advance(dt);
                let now = rain.friction_coefficient();
                prop_assert!(now <= last);
                prop_assert!((0.0..=1.0).contains(&now));
                last = now;
            }
        }
    }
}
