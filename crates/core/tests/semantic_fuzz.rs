use chase_core::{Action, GameState};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

const MAPS: [&str; 2] =
    [include_str!("../../../maps/classic.txt"), include_str!("../../../maps/open.txt")];

fn choose(rng: &mut ChaCha8Rng, actions: &[Action]) -> Action {
    let p = rng.next_u64() as usize % actions.len();
    actions[p]
}

fn run_random_walk(map_index: usize, seed: u64, max_plies: u32) -> Result<(), String> {
    let mut state = GameState::parse(MAPS[map_index]).map_err(|e| e.to_string())?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let adversaries = state.adversaries.len();
    let area = state.width * state.height;

    for ply in 0..max_plies {
        if state.outcome().is_some() {
            break;
        }
        let actions: Vec<Action> = state.legal_moves().actions().collect();
        if actions.is_empty() {
            return Err(format!("Invariant failed: no legal moves at ply {ply} (seed {seed})"));
        }
        let action = choose(&mut rng, &actions);
        let next = state
            .apply_action(action)
            .map_err(|e| format!("Invariant failed: legal {action} rejected: {e} (seed {seed})"))?;

        if let Some(violation) = next.invariant_violation() {
            return Err(format!("Invariant failed: {violation} at ply {ply} (seed {seed})"));
        }
        if next.adversaries.len() != adversaries {
            return Err(format!("Invariant failed: adversary count changed (seed {seed})"));
        }
        if next.width * next.height != area {
            return Err(format!("Invariant failed: grid area changed (seed {seed})"));
        }
        if next.steps != state.steps + 1 {
            return Err(format!("Invariant failed: step counter skipped (seed {seed})"));
        }
        if next.food.len() > state.food.len() || next.power_items.len() > state.power_items.len() {
            return Err(format!("Invariant failed: collectibles reappeared (seed {seed})"));
        }
        state = next;
    }

    Ok(())
}

#[test]
fn test_fuzz_random_legal_walks() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(40));
    let inputs = (0..MAPS.len(), any::<u64>());

    runner
        .run(&inputs, |(map_index, seed)| {
            run_random_walk(map_index, seed, 200).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("random legal walks should preserve invariants");
}
