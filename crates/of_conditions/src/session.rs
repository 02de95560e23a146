//! Match Conditions Session
//!
//! 한 경기 동안 날씨와 사고 모델을 소유하고, 매 틱 매치 엔진이 호출한다.
//!
//! ## 틱 순서
//! ```text
//! advance(dt) → physics_modifier() → 선수별 probabilities → 1회 draw → 최대 1개 사고
//! ```
//!
//! 피로는 매치 엔진이 소유한다. 여기서는 읽기만 한다.
//! 동일 seed = 동일 사고 시퀀스.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::accident::{AccidentKind, AccidentModel};
use crate::config::ConditionsConfig;
use crate::error::Result;
use crate::evaluator::{AccidentProbabilities, ModifierEvaluator, PhysicsModifier};
use crate::weather::{WeatherEffect, WeatherKind, WeatherState};

/// 발생한 사고 기록
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccidentEvent {
    pub tick: u64,
    pub player_index: usize,
    pub kind: AccidentKind,
    /// 발생 시점의 틱 확률
    pub probability: f32,
    pub injury: bool,
}

/// 경기 누적 사고 집계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccidentTally {
    pub player_slips: u32,
    pub ball_drops: u32,
    pub injuries: u32,
}

impl AccidentTally {
    pub fn record(&mut self, event: &AccidentEvent) {
        match event.kind {
            AccidentKind::PlayerSlips => self.player_slips += 1,
            AccidentKind::BallDrops => self.ball_drops += 1,
        }
        if event.injury {
            self.injuries += 1;
        }
    }

    pub fn count(&self, kind: AccidentKind) -> u32 {
        match kind {
            AccidentKind::PlayerSlips => self.player_slips,
            AccidentKind::BallDrops => self.ball_drops,
        }
    }

    pub fn total(&self) -> u32 {
        self.player_slips + self.ball_drops
    }

    /// Observed per-player-tick rate.
    pub fn rate(&self, kind: AccidentKind, player_ticks: u64) -> f64 {
        if player_ticks == 0 {
            return 0.0;
        }
        self.count(kind) as f64 / player_ticks as f64
    }
}

/// 경기 세션의 날씨/사고 상태
#[derive(Debug, Clone)]
pub struct MatchConditions {
    weather: WeatherState,
    models: [AccidentModel; 2],
    evaluator: ModifierEvaluator,
    rng: ChaCha8Rng,
    tick: u64,
    player_ticks: u64,
    tally: AccidentTally,
    /// 범위 밖 피로 입력을 이미 경고했는지 (경기당 1회)
    fatigue_warned: bool,
}

impl MatchConditions {
    /// 경기 시작. 설정은 여기서 검증된다.
    pub fn new(config: &ConditionsConfig, weather: WeatherKind, seed: u64) -> Result<Self> {
        config.validate()?;
        info!(weather = %weather, seed = seed, "match conditions created");
        Ok(Self {
            weather: WeatherState::from_kind(weather, &config.weather),
            models: AccidentModel::all(&config.accidents),
            evaluator: ModifierEvaluator::from_config(&config.accidents),
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick: 0,
            player_ticks: 0,
            tally: AccidentTally::default(),
            fatigue_warned: false,
        })
    }

    /// Start from an already-built weather state (e.g. rain at a given moisture).
    ///
    /// The state is taken as-is: build it from `config.weather` to keep the
    /// two consistent. Out-of-range modifiers in a deserialized state are
    /// clamped when read.
    pub fn with_weather(config: &ConditionsConfig, weather: WeatherState, seed: u64) -> Result<Self> {
        let mut session = Self::new(config, weather.kind(), seed)?;
        session.weather = weather;
        Ok(session)
    }

    pub fn weather(&self) -> &WeatherState {
        &self.weather
    }

    pub fn models(&self) -> &[AccidentModel] {
        &self.models
    }

    pub fn evaluator(&self) -> &ModifierEvaluator {
        &self.evaluator
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn player_ticks(&self) -> u64 {
        self.player_ticks
    }

    pub fn tally(&self) -> &AccidentTally {
        &self.tally
    }

    /// 이번 경기에서 범위 밖 피로 입력이 들어왔는지
    pub fn fatigue_warned(&self) -> bool {
        self.fatigue_warned
    }

    pub fn advance(&mut self, delta_time: f32) {
        self.weather.advance(delta_time);
    }

    pub fn physics_modifier(&self) -> PhysicsModifier {
        self.evaluator.physics_modifier(&self.weather)
    }

    pub fn probabilities_for(&self, player_fatigue: f32) -> AccidentProbabilities {
        self.evaluator.probabilities(&self.weather, &self.models, player_fatigue)
    }

    /// 선수별 확률을 병렬 계산 (샘플링 없음, 순서 유지)
    pub fn probabilities_par(&self, fatigue: &[f32]) -> Vec<AccidentProbabilities> {
        fatigue.par_iter().map(|f| self.probabilities_for(*f)).collect()
    }

    /// 한 틱 진행: 날씨 갱신 후 선수 순서대로 한 번씩 샘플링.
    ///
    /// `fatigue[i]` is player `i`'s current fatigue in [0,1].
    pub fn evaluate_tick(&mut self, delta_time: f32, fatigue: &[f32]) -> Vec<AccidentEvent> {
        self.advance(delta_time);
        self.tick += 1;

        if !self.fatigue_warned {
            if let Some((player, value)) =
                fatigue.iter().enumerate().find(|(_, f)| !(0.0..=1.0).contains(*f))
            {
                warn!(
                    tick = self.tick,
                    player = player,
                    value = *value,
                    "fatigue outside [0,1] clamped; further occurrences this match not reported"
                );
                self.fatigue_warned = true;
            }
        }

        let mut events = Vec::new();
        for (player_index, player_fatigue) in fatigue.iter().enumerate() {
            let probs = self.probabilities_for(*player_fatigue);
            if let Some(kind) = ModifierEvaluator::sample_accident(&probs, &mut self.rng) {
                let event = AccidentEvent {
                    tick: self.tick,
                    player_index,
                    kind,
                    probability: probs.get(kind),
                    injury: kind.is_injury(),
                };
                debug!(
                    tick = event.tick,
                    player = player_index,
                    kind = %kind,
                    probability = event.probability,
                    "accident"
                );
                self.tally.record(&event);
                events.push(event);
            }
        }
        self.player_ticks += fatigue.len() as u64;

        trace!(
            tick = self.tick,
            friction = self.weather.friction_coefficient(),
            visibility = self.weather.visibility_modifier(),
            accidents = events.len(),
            "tick evaluated"
        );
        events
    }

    /// 다음 경기 준비: 수분, 틱, 집계, RNG 초기화
    pub fn reset(&mut self, seed: u64) {
        self.weather.reset();
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.tick = 0;
        self.player_ticks = 0;
        self.tally = AccidentTally::default();
        self.fatigue_warned = false;
        info!(weather = %self.weather.kind(), seed = seed, "match conditions reset");
    }
}
