use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chase_core::{
    Action, GameState, PlanStop, ReplayResult, RunOutcome, decode, encode, load_map, plan_with,
    replay,
};
use clap::Parser;
use serde::Serialize;
use tracing::subscriber;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod config;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the map text file
    #[arg(short, long)]
    map: PathBuf,
    /// Optional planner configuration in TOML
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Print a JSON report instead of plain text
    #[arg(long)]
    json: bool,
    /// Skip verifying the plan by replaying it
    #[arg(long)]
    no_replay: bool,
    /// Replay a saved encoded plan instead of planning
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,
}

#[derive(Serialize)]
struct PlanReport {
    map: String,
    encoded: String,
    actions: Vec<Action>,
    plies: usize,
    legs: u32,
    stop: PlanStop,
    elapsed_ms: u128,
    outcome: Option<RunOutcome>,
    snapshot_hash: Option<u64>,
}

#[derive(Serialize)]
struct ReplayReport {
    map: String,
    applied: usize,
    steps: u32,
    outcome: Option<RunOutcome>,
    snapshot_hash: u64,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tools=info,chase_core=info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    if subscriber::set_global_default(subscriber).is_err() {
        eprintln!("A global tracing subscriber was already installed");
    }
}

fn replay_checked(state: &GameState, actions: &[Action]) -> Result<ReplayResult> {
    replay(state, actions).context("Replay rejected an action")
}

fn run_plan(args: &Args, state: &GameState) -> Result<()> {
    let config = config::runtime_planner_config(args.config.as_deref())?;

    let started = Instant::now();
    let outcome = plan_with(state, &config);
    let elapsed = started.elapsed();
    tracing::info!(
        plies = outcome.actions.len(),
        legs = outcome.legs,
        stop = ?outcome.stop,
        elapsed_ms = elapsed.as_millis() as u64,
        "Planning finished"
    );

    let verified =
        if args.no_replay { None } else { Some(replay_checked(state, &outcome.actions)?) };

    let report = PlanReport {
        map: args.map.display().to_string(),
        encoded: encode(&outcome.actions),
        plies: outcome.actions.len(),
        actions: outcome.actions,
        legs: outcome.legs,
        stop: outcome.stop,
        elapsed_ms: elapsed.as_millis(),
        outcome: verified.as_ref().and_then(|result| result.outcome),
        snapshot_hash: verified.as_ref().map(|result| result.final_snapshot_hash),
    };

    if args.json {
        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize plan report")?;
        println!("{json}");
        return Ok(());
    }

    println!("Path: {}", report.encoded);
    println!("Steps: {}", report.plies);
    println!("Legs: {}", report.legs);
    println!("Stop: {:?}", report.stop);
    println!("Planning time: {:.3}s", elapsed.as_secs_f64());
    if let Some(result) = &verified {
        println!("Outcome: {:?}", result.outcome);
        println!("Snapshot Hash: {}", result.final_snapshot_hash);
    }
    Ok(())
}

fn run_replay(args: &Args, state: &GameState, plan_path: &Path) -> Result<()> {
    let text = fs::read_to_string(plan_path)
        .with_context(|| format!("Failed to read plan file: {}", plan_path.display()))?;
    let actions = decode(&text).context("Failed to decode plan file")?;
    let result = replay_checked(state, &actions)?;

    let report = ReplayReport {
        map: args.map.display().to_string(),
        applied: result.applied,
        steps: result.steps,
        outcome: result.outcome,
        snapshot_hash: result.final_snapshot_hash,
    };
    if args.json {
        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize replay report")?;
        println!("{json}");
        return Ok(());
    }

    println!("Replay complete.");
    println!("Applied: {} of {}", report.applied, actions.len());
    println!("Steps: {}", report.steps);
    println!("Outcome: {:?}", report.outcome);
    println!("Snapshot Hash: {}", report.snapshot_hash);
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let state = load_map(&args.map)
        .with_context(|| format!("Failed to load map: {}", args.map.display()))?;

    match &args.replay {
        Some(plan_path) => run_replay(&args, &state, plan_path),
        None => run_plan(&args, &state),
    }
}
