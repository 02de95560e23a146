//! # of_conditions - Match Conditions for Football Simulation
//!
//! 경기 환경 모디파이어 (날씨)와 확률적 사고 (선수 사고) 시스템.
//!
//! ## Features
//! - Weather variants (Normal, Rain, Fog) exposing visibility/friction in [0,1]
//! - Rain moisture that builds up over the match and erodes grip
//! - Accident models (PlayerSlips, BallDrops) with tunable baselines
//! - Per-tick evaluator: physics scales + per-player accident probabilities
//! - Deterministic sampling (same seed = same incidents)
//! - JSON API for game-engine hosts
//!
//! The crate only reports numbers and events. What the match engine does with a
//! slip or a dropped ball is up to the engine.

pub mod accident;
pub mod api;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod session;
pub mod weather;

pub use accident::{AccidentKind, AccidentModel, AccidentProfile};
pub use api::{evaluate_conditions, evaluate_conditions_json, ConditionsRequest, ConditionsResponse};
pub use config::ConditionsConfig;
pub use error::{ConditionError, Result};
pub use evaluator::{AccidentProbabilities, ModifierEvaluator, PhysicsModifier};
pub use session::{AccidentEvent, AccidentTally, MatchConditions};
pub use weather::{RainState, WeatherEffect, WeatherKind, WeatherState};
