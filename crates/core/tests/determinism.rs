use chase_core::{Action, GameState, PlannerConfig, decode, encode, plan, plan_with, replay};

const CLASSIC: &str = include_str!("../../../maps/classic.txt");
const OPEN: &str = include_str!("../../../maps/open.txt");

fn planned_hash(text: &str) -> (Vec<Action>, u64) {
    let state = GameState::parse(text).expect("sample map parses");
    let actions = plan(&state);
    let result = replay(&state, &actions).expect("plan replays");
    (actions, result.final_snapshot_hash)
}

#[test]
fn test_determinism_same_map_produces_same_plan_and_hash() {
    let (actions1, hash1) = planned_hash(CLASSIC);
    let (actions2, hash2) = planned_hash(CLASSIC);

    assert_eq!(actions1, actions2, "Identical inputs must produce identical plans");
    assert_eq!(hash1, hash2, "Identical runs must produce identical hashes");
}

#[test]
fn test_determinism_different_maps_produce_different_hashes() {
    let (_, classic_hash) = planned_hash(CLASSIC);
    let (_, open_hash) = planned_hash(OPEN);
    assert_ne!(classic_hash, open_hash);
}

#[test]
fn test_default_config_matches_plain_plan() {
    let state = GameState::parse(OPEN).expect("sample map parses");
    let outcome = plan_with(&state, &PlannerConfig::default());
    assert_eq!(outcome.actions, plan(&state));
}

#[test]
fn test_encoded_plan_decodes_to_the_same_actions() {
    let (actions, hash) = planned_hash(OPEN);
    let decoded = decode(&encode(&actions)).expect("encoded plan decodes");
    assert_eq!(decoded, actions);

    let state = GameState::parse(OPEN).expect("sample map parses");
    let result = replay(&state, &decoded).expect("decoded plan replays");
    assert_eq!(result.final_snapshot_hash, hash);
}
