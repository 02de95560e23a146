// 매치 엔진 대역: 선형 피로 누적 + 틱 루프
//
// 실제 엔진은 피로를 자체적으로 관리한다. 여기서는 분당 일정량씩 쌓는다.

use std::path::Path;

use anyhow::{Context, Result};
use of_conditions::{
    AccidentEvent, AccidentKind, AccidentTally, ConditionsConfig, MatchConditions, WeatherKind,
};
use serde::Serialize;
use tracing::info;

/// 선수별 피로 누적기 (단조 증가, 경기 시작 시 0)
#[derive(Debug, Clone)]
pub struct FatigueTrack {
    levels: Vec<f32>,
    per_second: f32,
}

impl FatigueTrack {
    pub fn new(players: usize, per_minute: f32) -> Self {
        Self { levels: vec![0.0; players], per_second: (per_minute / 60.0).max(0.0) }
    }

    pub fn levels(&self) -> &[f32] {
        &self.levels
    }

    pub fn accumulate(&mut self, delta_time: f32) {
        let step = self.per_second * delta_time.max(0.0);
        for level in &mut self.levels {
            *level = (*level + step).min(1.0);
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulationSettings {
    pub weather: WeatherKind,
    pub players: usize,
    pub minutes: u32,
    pub tick_seconds: f32,
    pub fatigue_per_minute: f32,
    pub seed: u64,
}

/// 한 경기 결과
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub weather: WeatherKind,
    pub seed: u64,
    pub ticks: u64,
    pub player_ticks: u64,
    pub final_friction: f32,
    pub final_visibility: f32,
    pub final_moisture: Option<f32>,
    pub tally: AccidentTally,
    pub slip_rate: f64,
    pub drop_rate: f64,
    pub events: Vec<AccidentEvent>,
}

pub fn load_config(path: &Path) -> Result<ConditionsConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let config = if is_yaml {
        ConditionsConfig::from_yaml_str(&text)
    } else {
        ConditionsConfig::from_json_str(&text)
    };
    config.with_context(|| format!("invalid config {}", path.display()))
}

pub fn run_match(config: &ConditionsConfig, settings: &SimulationSettings) -> Result<MatchReport> {
    anyhow::ensure!(settings.tick_seconds > 0.0, "tick length must be positive");

    let mut session = MatchConditions::new(config, settings.weather, settings.seed)?;
    let mut fatigue = FatigueTrack::new(settings.players, settings.fatigue_per_minute);
    let total_ticks = ((settings.minutes as f32 * 60.0) / settings.tick_seconds).ceil() as u64;

    let mut events = Vec::new();
    for _ in 0..total_ticks {
        fatigue.accumulate(settings.tick_seconds);
        events.extend(session.evaluate_tick(settings.tick_seconds, fatigue.levels()));
    }

    info!(
        weather = %settings.weather,
        ticks = session.tick(),
        accidents = events.len(),
        "match finished"
    );

    let weather = session.weather();
    let modifier = session.physics_modifier();
    let tally = *session.tally();
    Ok(MatchReport {
        weather: weather.kind(),
        seed: settings.seed,
        ticks: session.tick(),
        player_ticks: session.player_ticks(),
        final_friction: modifier.speed_scale,
        final_visibility: modifier.control_scale,
        final_moisture: weather.moisture_level(),
        tally,
        slip_rate: tally.rate(AccidentKind::PlayerSlips, session.player_ticks()),
        drop_rate: tally.rate(AccidentKind::BallDrops, session.player_ticks()),
        events,
    })
}

/// `--json` 출력. 로그는 stderr로 가므로 stdout에는 이 문서만 남는다.
pub fn render_json(report: &MatchReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize match report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn settings(weather: WeatherKind) -> SimulationSettings {
        SimulationSettings {
            weather,
            players: 22,
            minutes: 90,
            tick_seconds: 1.0,
            fatigue_per_minute: 0.008,
            seed: 42,
        }
    }

    #[test]
    fn test_fatigue_is_monotone_and_capped() {
        let mut track = FatigueTrack::new(2, 6.0);
        let mut last = 0.0;
        for _ in 0..20 {
            track.accumulate(1.0);
            assert!(track.levels()[0] >= last);
            last = track.levels()[0];
        }
        assert_eq!(last, 1.0);
        track.accumulate(-10.0);
        assert_eq!(track.levels()[1], 1.0);
    }

    #[test]
    fn test_full_match_report() {
        let report = run_match(&ConditionsConfig::default(), &settings(WeatherKind::Rain)).unwrap();
        assert_eq!(report.ticks, 5400);
        assert_eq!(report.player_ticks, 5400 * 22);
        assert!(report.final_moisture.unwrap() > 0.99);
        assert_eq!(report.tally.total() as usize, report.events.len());
    }

    #[test]
    fn test_json_report_is_a_single_document() {
        let report = run_match(&ConditionsConfig::default(), &settings(WeatherKind::Fog)).unwrap();
        let rendered = render_json(&report).unwrap();
        assert!(rendered.trim_start().starts_with('{'));
        assert!(rendered.trim_end().ends_with('}'));
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["weather"], "fog");
        assert_eq!(value["ticks"], 5400);
    }

    #[test]
    fn test_deterministic_preset_has_no_events() {
        let report =
            run_match(&ConditionsConfig::deterministic(), &settings(WeatherKind::Fog)).unwrap();
        assert!(report.events.is_empty());
        assert!(report.final_visibility < 1.0);
    }

    #[test]
    fn test_rejects_zero_tick() {
        let mut s = settings(WeatherKind::Normal);
        s.tick_seconds = 0.0;
        assert!(run_match(&ConditionsConfig::default(), &s).is_err());
    }

    #[test]
    fn test_load_yaml_and_json_configs() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("conditions.yaml");
        let mut f = std::fs::File::create(&yaml_path).unwrap();
        writeln!(f, "weather:\n  fog:\n    visibility: 0.5").unwrap();
        let cfg = load_config(&yaml_path).unwrap();
        assert!((cfg.weather.fog.visibility - 0.5).abs() < 1e-6);

        let json_path = dir.path().join("conditions.json");
        std::fs::write(&json_path, r#"{"accidents": {"weather_sensitivity": -1.0}}"#).unwrap();
        assert!(load_config(&json_path).is_err());

        assert!(load_config(&dir.path().join("missing.json")).is_err());
    }
}
