//! Modifier Evaluator
//!
//! 날씨 + 선수 피로 → 틱당 수치 효과와 사고 확률.
//!
//! All functions are pure apart from the single random draw in
//! [`ModifierEvaluator::sample_accident`]. Inputs outside [0,1] come from a
//! broken collaborator and are clamped, never propagated.
//!
//! ```text
//! PlayerSlips: p = injury  * (1 + s * (1 - friction))   * (1 + fatigue)
//! BallDrops:   p = fatigue * (1 + s * (1 - visibility)) * (1 + player_fatigue)
//! ```
//!
//! Normal weather with zero player fatigue yields the model baseline exactly.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::accident::{AccidentKind, AccidentModel, AccidentProfile};
use crate::config::AccidentConfig;
use crate::weather::WeatherEffect;

/// 키네마틱 단계에 전달되는 스케일
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsModifier {
    /// 감속/그립 스케일 (= friction)
    pub speed_scale: f32,
    /// 퍼셉션/타겟팅 스케일 (= visibility)
    pub control_scale: f32,
}

/// 선수 한 명의 틱당 사고 확률 (`AccidentKind::ALL` 순서)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccidentProbabilities {
    pub player_slips: f32,
    pub ball_drops: f32,
}

impl AccidentProbabilities {
    pub fn get(&self, kind: AccidentKind) -> f32 {
        match kind {
            AccidentKind::PlayerSlips => self.player_slips,
            AccidentKind::BallDrops => self.ball_drops,
        }
    }

    pub fn set(&mut self, kind: AccidentKind, probability: f32) {
        let p = clamp_probability("accident probability", probability);
        match kind {
            AccidentKind::PlayerSlips => self.player_slips = p,
            AccidentKind::BallDrops => self.ball_drops = p,
        }
    }

    /// Chance that any accident fires this tick.
    pub fn total(&self) -> f32 {
        self.bands().last().map(|(_, _, end)| *end).unwrap_or(0.0)
    }

    /// Cumulative `[start, end)` bands, capped at 1.0.
    pub fn bands(&self) -> [(AccidentKind, f32, f32); 2] {
        let mut start = 0.0f32;
        AccidentKind::ALL.map(|kind| {
            let end = (start + self.get(kind).clamp(0.0, 1.0)).min(1.0);
            let band = (kind, start, end);
            start = end;
            band
        })
    }
}

/// 날씨/사고 모디파이어 평가기
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModifierEvaluator {
    weather_sensitivity: f32,
}

impl Default for ModifierEvaluator {
    fn default() -> Self {
        Self { weather_sensitivity: 1.0 }
    }
}

impl ModifierEvaluator {
    pub fn new(weather_sensitivity: f32) -> Self {
        let weather_sensitivity =
            if weather_sensitivity.is_finite() { weather_sensitivity.max(0.0) } else { 1.0 };
        Self { weather_sensitivity }
    }

    pub fn from_config(cfg: &AccidentConfig) -> Self {
        Self::new(cfg.weather_sensitivity)
    }

    pub fn weather_sensitivity(&self) -> f32 {
        self.weather_sensitivity
    }

    /// Weather scales passed straight to the kinematics step.
    pub fn physics_modifier<W: WeatherEffect + ?Sized>(&self, weather: &W) -> PhysicsModifier {
        PhysicsModifier {
            speed_scale: weather.friction_coefficient(),
            control_scale: weather.visibility_modifier(),
        }
    }

    /// 틱당 사고 확률 (단일 유형)
    pub fn accident_probability<W: WeatherEffect + ?Sized>(
        &self,
        weather: &W,
        model: &AccidentModel,
        player_fatigue: f32,
    ) -> f32 {
        let fatigue = clamp_probability("player fatigue", player_fatigue);
        let (base, modifier) = match model.kind() {
            AccidentKind::PlayerSlips => {
                (model.injury_probability(), weather.friction_coefficient())
            }
            AccidentKind::BallDrops => (model.fatigue_level(), weather.visibility_modifier()),
        };
        let base = clamp_probability("accident baseline", base);
        let deficit = 1.0 - clamp_probability("weather modifier", modifier);

        let p = base * (1.0 + self.weather_sensitivity * deficit) * (1.0 + fatigue);
        p.clamp(0.0, 1.0)
    }

    /// 모든 사고 유형 확률
    pub fn probabilities<W: WeatherEffect + ?Sized>(
        &self,
        weather: &W,
        models: &[AccidentModel],
        player_fatigue: f32,
    ) -> AccidentProbabilities {
        let mut out = AccidentProbabilities::default();
        for model in models {
            out.set(model.kind(), self.accident_probability(weather, model, player_fatigue));
        }
        out
    }

    /// One uniform draw, at most one accident.
    pub fn sample_accident<R: Rng + ?Sized>(
        probabilities: &AccidentProbabilities,
        rng: &mut R,
    ) -> Option<AccidentKind> {
        let draw: f32 = rng.gen();
        Self::select_accident(probabilities, draw)
    }

    /// 누적 확률 구간에서 draw가 속한 첫 번째 유형
    pub fn select_accident(probabilities: &AccidentProbabilities, draw: f32) -> Option<AccidentKind> {
        probabilities
            .bands()
            .into_iter()
            .find(|(_, start, end)| draw >= *start && draw < *end)
            .map(|(kind, _, _)| kind)
    }
}

fn clamp_probability(what: &'static str, value: f32) -> f32 {
    if value.is_nan() {
        debug!(input = what, "NaN input clamped to 0.0");
        return 0.0;
    }
    if !(0.0..=1.0).contains(&value) {
        debug!(input = what, value = value, "out-of-range input clamped");
    }
    value.clamp(0.0, 1.0)
}
