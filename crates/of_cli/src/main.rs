// Match conditions simulator
// Run with: cargo run -p of_cli -- simulate --weather rain
//
// 목적: 날씨/사고 튜닝 값이 한 경기 동안 어떤 사고 빈도를 만드는지 확인

mod harness;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use of_conditions::{
    AccidentKind, ConditionsConfig, MatchConditions, RainState, WeatherKind, WeatherState,
};
use tracing_subscriber::EnvFilter;

use harness::{load_config, render_json, run_match, SimulationSettings};

#[derive(Parser)]
#[command(name = "of_cli")]
#[command(about = "Simulate weather and player accidents for a football match", long_about = None)]
struct Cli {
    /// Tuning preset (realistic, arcade, simulation, deterministic)
    #[arg(long, global = true, default_value = "realistic")]
    preset: String,

    /// JSON or YAML config file (overrides --preset)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full match and report accident counts
    Simulate {
        /// Weather (normal, rain, fog)
        #[arg(long, default_value = "normal")]
        weather: WeatherKind,

        /// Players on the pitch
        #[arg(long, default_value = "22")]
        players: usize,

        /// Match length in minutes
        #[arg(long, default_value = "90")]
        minutes: u32,

        /// Seconds per tick
        #[arg(long, default_value = "1.0")]
        tick_seconds: f32,

        /// Fatigue gained per player per minute
        #[arg(long, default_value = "0.008")]
        fatigue_per_minute: f32,

        #[arg(long, default_value = "42")]
        seed: u64,

        /// Print the full report as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print modifiers and accident probabilities for one situation
    Inspect {
        #[arg(long, default_value = "normal")]
        weather: WeatherKind,

        /// Pitch moisture (rain only)
        #[arg(long)]
        moisture: Option<f32>,

        /// Player fatigue
        #[arg(long, default_value = "0.0")]
        fatigue: f32,
    },
}

fn main() -> Result<()> {
    // stdout carries the report only
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ConditionsConfig::preset(&cli.preset)?,
    };

    match cli.command {
        Commands::Simulate {
            weather,
            players,
            minutes,
            tick_seconds,
            fatigue_per_minute,
            seed,
            json,
        } => {
            let settings = SimulationSettings {
                weather,
                players,
                minutes,
                tick_seconds,
                fatigue_per_minute,
                seed,
            };
            let report = run_match(&config, &settings)?;

            if json {
                println!("{}", render_json(&report)?);
                return Ok(());
            }

            println!("Match conditions: {} (seed {})", report.weather, report.seed);
            println!("   Ticks:        {} ({} player-ticks)", report.ticks, report.player_ticks);
            println!("   Friction:     {:.3}", report.final_friction);
            println!("   Visibility:   {:.3}", report.final_visibility);
            if let Some(moisture) = report.final_moisture {
                println!("   Moisture:     {:.3}", moisture);
            }
            println!(
                "   Slips:        {} ({:.6}/player-tick)",
                report.tally.player_slips, report.slip_rate
            );
            println!(
                "   Ball drops:   {} ({:.6}/player-tick)",
                report.tally.ball_drops, report.drop_rate
            );
            println!("   Injuries:     {}", report.tally.injuries);
        }

        Commands::Inspect { weather, moisture, fatigue } => {
            let state = match (weather, moisture) {
                (WeatherKind::Rain, Some(m)) => {
                    WeatherState::Rain(RainState::with_moisture(&config.weather.rain, m))
                }
                (kind, _) => WeatherState::from_kind(kind, &config.weather),
            };
            let session = MatchConditions::with_weather(&config, state, 0)?;
            let physics = session.physics_modifier();
            let probs = session.probabilities_for(fatigue);

            println!("Weather: {}", weather);
            println!("   speed_scale:   {:.4}", physics.speed_scale);
            println!("   control_scale: {:.4}", physics.control_scale);
            for kind in AccidentKind::ALL {
                println!("   p({}): {:.6}", kind, probs.get(kind));
            }
        }
    }

    Ok(())
}
