use std::fs;
use std::path::{Path, PathBuf};

use chase_core::{PlanStop, PlannerConfig, RunOutcome, load_map, plan_with, replay};

fn maps_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../maps")
}

fn run_map(name: &str) -> (PlanStop, Option<RunOutcome>, usize) {
    let state = load_map(&maps_dir().join(name)).expect("sample map loads");
    let outcome = plan_with(&state, &PlannerConfig::default());
    let result = replay(&state, &outcome.actions).expect("planned actions replay");
    (outcome.stop, result.outcome, outcome.actions.len())
}

#[test]
fn open_map_is_cleared_and_exited() {
    let (stop, outcome, plies) = run_map("open.txt");
    assert_eq!(stop, PlanStop::Completed);
    assert_eq!(outcome, Some(RunOutcome::Victory));
    assert!(plies > 0);
}

#[test]
fn classic_map_plan_never_walks_into_the_adversary() {
    let (_, outcome, plies) = run_map("classic.txt");
    assert_ne!(outcome, Some(RunOutcome::Defeat));
    assert!(plies > 0);
}

#[test]
fn every_sample_map_loads_and_plans() {
    let mut seen = 0;
    for entry in fs::read_dir(maps_dir()).expect("maps directory exists") {
        let path = entry.expect("directory entry").path();
        if path.extension().is_none_or(|ext| ext != "txt") {
            continue;
        }
        let state = load_map(&path).expect("sample map loads");
        assert!(state.invariant_violation().is_none(), "{} starts broken", path.display());
        let outcome = plan_with(&state, &PlannerConfig::default());
        let result = replay(&state, &outcome.actions).expect("planned actions replay");
        assert_ne!(result.outcome, Some(RunOutcome::Defeat), "{} ends in capture", path.display());
        seen += 1;
    }
    assert!(seen >= 2, "Expected the bundled sample maps, found {seen}");
}
