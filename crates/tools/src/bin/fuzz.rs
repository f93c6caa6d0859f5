use std::path::PathBuf;

use anyhow::{Context, Result, bail, ensure};
use chase_core::{Action, load_map};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "maps/classic.txt")]
    map: PathBuf,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 1000)]
    steps: u32,
}

fn choose(rng: &mut ChaCha8Rng, actions: &[Action]) -> Action {
    let p = rng.next_u64() as usize % actions.len();
    actions[p]
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut state = load_map(&args.map)
        .with_context(|| format!("Failed to load map: {}", args.map.display()))?;
    let adversaries = state.adversaries.len();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    println!("Starting Fuzz harness on seed {} for max {} steps...", args.seed, args.steps);
    for _ in 0..args.steps {
        if let Some(outcome) = state.outcome() {
            println!("Finished with outcome {:?} after {} steps", outcome, state.steps);
            break;
        }
        let actions: Vec<Action> = state.legal_moves().actions().collect();
        ensure!(!actions.is_empty(), "Invariant failed: no legal moves at step {}", state.steps);

        let action = choose(&mut rng, &actions);
        state = state
            .apply_action(action)
            .with_context(|| format!("Legal action {action} was rejected"))?;

        if let Some(violation) = state.invariant_violation() {
            bail!("Invariant failed: {violation} at step {}", state.steps);
        }
        ensure!(
            state.adversaries.len() == adversaries,
            "Invariant failed: adversary count changed"
        );
    }

    println!("Fuzzing completed successfully.");
    println!("Snapshot Hash: {}", state.snapshot_hash());
    Ok(())
}
