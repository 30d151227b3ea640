//! Cosmic Cow headless runner
//!
//! Plays autopilot runs through the same driver, input and frame-building
//! path a windowed host would use, then prints a leaderboard.

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use cosmic_cow::consts::SIM_DT;
use cosmic_cow::driver::FrameDriver;
use cosmic_cow::highscores::RunRecord;
use cosmic_cow::hud::{Hud, run_achievements};
use cosmic_cow::input::InputState;
use cosmic_cow::renderer::{Assets, build_frame};
use cosmic_cow::sim::{DeathCause, GameEvent, GamePhase, GameState, start};
use cosmic_cow::{HighScores, Settings, Tuning};

#[derive(Parser, Debug)]
#[command(name = "cosmic-cow", about = "Headless Cosmic Cow runs driven by the autopilot")]
struct Cli {
    /// Seed of the first run; later runs use seed+1, seed+2, ...
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Number of runs to play
    #[arg(long, default_value_t = 5)]
    runs: u32,

    /// Stop a run after this many ticks even if the cow is still alive
    #[arg(long, default_value_t = 36_000)]
    max_ticks: u64,

    /// JSON file overriding game balance
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// JSON settings file (quality, trails, particles, ...)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    distance: u64,
    tokens: u32,
    jumps: u32,
    pickups: u32,
    cause: Option<DeathCause>,
    rank: Option<usize>,
    achievements: Vec<&'static str>,
    last_frame_vertices: usize,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    runs: &'a [RunSummary],
    leaderboard: &'a HighScores,
}

fn play_run(
    seed: u64,
    max_ticks: u64,
    tuning: &Tuning,
    settings: &Settings,
    leaderboard: &mut HighScores,
) -> RunSummary {
    let mut state = GameState::with_tuning(seed, tuning.clone());
    let mut input = InputState::new();
    input.set_autopilot(true);
    let mut driver = FrameDriver::new();

    start(&mut state);

    let mut jumps = 0;
    let mut pickups = 0;
    let mut cause = None;
    while state.phase == GamePhase::Playing && driver.ticks() < max_ticks {
        driver.advance(&mut state, &mut input, SIM_DT);
        for event in state.drain_events() {
            match event {
                GameEvent::Jumped => jumps += 1,
                GameEvent::Collected { .. } => pickups += 1,
                GameEvent::GameOver { cause: c } => cause = Some(c),
                GameEvent::PowerupExpired => log::trace!("Power-up expired"),
                GameEvent::Started | GameEvent::ReturnedToMenu => {}
            }
        }
    }

    let frame = build_frame(&state, settings, &Assets::default(), driver.ticks() as f32 * SIM_DT);
    let hud = Hud::from_state(&state);
    let achievements = run_achievements(&state)
        .iter()
        .map(|a| a.label())
        .collect();

    let rank = leaderboard.add_run(RunRecord {
        distance: hud.distance,
        tokens: hud.tokens,
        ticks: state.score,
        seed,
    });

    RunSummary {
        seed,
        ticks: driver.ticks(),
        distance: hud.distance,
        tokens: hud.tokens,
        jumps,
        pickups,
        cause,
        rank,
        achievements,
        last_frame_vertices: frame.vertices.len(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.runs == 0 {
        bail!("--runs must be > 0");
    }
    if cli.max_ticks == 0 {
        bail!("--max-ticks must be > 0");
    }

    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let settings = match &cli.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    log::info!(
        "Playing {} run(s) from seed {} (quality {})",
        cli.runs,
        cli.seed,
        settings.quality.as_str()
    );

    let mut leaderboard = HighScores::new();
    let runs: Vec<RunSummary> = (0..cli.runs)
        .map(|i| {
            play_run(
                cli.seed.wrapping_add(u64::from(i)),
                cli.max_ticks,
                &tuning,
                &settings,
                &mut leaderboard,
            )
        })
        .collect();

    if cli.json {
        let report = Report {
            runs: &runs,
            leaderboard: &leaderboard,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("serializing report")?
        );
        return Ok(());
    }

    for run in &runs {
        let ending = match run.cause {
            Some(DeathCause::Hazard) => "hit a hazard",
            Some(DeathCause::Floor) => "fell out",
            None => "still flying",
        };
        println!(
            "seed {:>6}  distance {:>6}  tokens {:>4}  jumps {:>5}  {}",
            run.seed, run.distance, run.tokens, run.jumps, ending
        );
        if !run.achievements.is_empty() {
            println!("             {}", run.achievements.join("  "));
        }
    }

    println!("\nLeaderboard");
    for (i, entry) in leaderboard.entries.iter().enumerate() {
        println!(
            "{:>2}. {:>6}m  {:>4} tokens  (seed {})",
            i + 1,
            entry.distance,
            entry.tokens,
            entry.seed
        );
    }

    Ok(())
}
