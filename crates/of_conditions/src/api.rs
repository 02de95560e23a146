// 경기 환경 JSON API
//
// 게임 엔진(Godot 등)에서 JSON 문자열 하나로 세션을 돌리고 결과를 받는다.
// 오류는 응답 안에 `success: false`로 담긴다.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::ConditionsConfig;
use crate::error::{ConditionError, Result};
use crate::evaluator::{AccidentProbabilities, PhysicsModifier};
use crate::session::{AccidentEvent, AccidentTally, MatchConditions};
use crate::weather::{WeatherEffect, WeatherKind};

pub const SCHEMA_VERSION: u8 = 1;

fn default_tick_seconds() -> f32 {
    1.0
}

/// 환경 평가 요청
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConditionsRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub weather: WeatherKind,
    /// "realistic", "arcade", "simulation", "deterministic"
    #[serde(default)]
    pub preset: Option<String>,
    /// 프리셋 대신 직접 지정 (우선)
    #[serde(default)]
    pub config: Option<ConditionsConfig>,
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: f32,
    #[serde(default)]
    pub ticks: u32,
    pub player_fatigue: Vec<f32>,
}

/// 마지막 틱 기준 상태
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionsSnapshot {
    pub weather: WeatherKind,
    pub visibility: f32,
    pub friction: f32,
    pub moisture: Option<f32>,
    pub physics: PhysicsModifier,
    pub probabilities: Vec<AccidentProbabilities>,
    pub tally: AccidentTally,
    pub ticks: u64,
}

/// 환경 평가 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionsResponse {
    pub schema_version: u8,
    pub success: bool,
    pub error_message: Option<String>,
    pub snapshot: Option<ConditionsSnapshot>,
    pub events: Vec<AccidentEvent>,
}

impl ConditionsResponse {
    fn failure(err: &ConditionError) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            success: false,
            error_message: Some(err.to_string()),
            snapshot: None,
            events: Vec::new(),
        }
    }
}

/// Run a request and return the typed response.
pub fn evaluate_conditions(request: &ConditionsRequest) -> Result<ConditionsResponse> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(ConditionError::UnsupportedSchema(request.schema_version));
    }
    let config = match (&request.config, &request.preset) {
        (Some(cfg), _) => cfg.clone(),
        (None, Some(name)) => ConditionsConfig::preset(name)?,
        (None, None) => ConditionsConfig::default(),
    };

    let mut session = MatchConditions::new(&config, request.weather, request.seed)?;
    let mut events = Vec::new();
    for _ in 0..request.ticks {
        events.extend(session.evaluate_tick(request.tick_seconds, &request.player_fatigue));
    }

    let weather = session.weather();
    let snapshot = ConditionsSnapshot {
        weather: weather.kind(),
        visibility: weather.visibility_modifier(),
        friction: weather.friction_coefficient(),
        moisture: weather.moisture_level(),
        physics: session.physics_modifier(),
        probabilities: session.probabilities_par(&request.player_fatigue),
        tally: *session.tally(),
        ticks: session.tick(),
    };
    info!(
        weather = %snapshot.weather,
        ticks = snapshot.ticks,
        accidents = events.len(),
        "conditions evaluated"
    );

    Ok(ConditionsResponse {
        schema_version: SCHEMA_VERSION,
        success: true,
        error_message: None,
        snapshot: Some(snapshot),
        events,
    })
}

/// JSON in, JSON out. Never fails; errors are reported in the response body.
pub fn evaluate_conditions_json(request_json: &str) -> String {
    let response = serde_json::from_str::<ConditionsRequest>(request_json)
        .map_err(ConditionError::from)
        .and_then(|req| evaluate_conditions(&req))
        .unwrap_or_else(|err| {
            error!(error = %err, "conditions request failed");
            ConditionsResponse::failure(&err)
        });

    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(
            r#"{{"schema_version":{},"success":false,"error_message":"{}","snapshot":null,"events":[]}}"#,
            SCHEMA_VERSION,
            e.to_string().replace('"', "'")
        )
    })
}
