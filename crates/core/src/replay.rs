use std::error::Error;
use std::fmt;

use crate::state::GameState;
use crate::types::{Action, MoveError, RunOutcome};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplayError {
    /// The action at `index` was rejected by the state it was applied to.
    IllegalMove { index: usize, action: Action },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalMove { index, action } => {
                write!(f, "action #{index} ({action}) is not legal at that point of the run")
            }
        }
    }
}

impl Error for ReplayError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub final_state: GameState,
    pub outcome: Option<RunOutcome>,
    /// Actions applied before the run ended or the list ran out.
    pub applied: usize,
    pub steps: u32,
    pub final_snapshot_hash: u64,
}

/// Applies `actions` in order, stopping early once the run reaches a terminal state.
pub fn replay(source: &GameState, actions: &[Action]) -> Result<ReplayResult, ReplayError> {
    let mut state = source.clone();
    let mut applied = 0;

    for (index, action) in actions.iter().enumerate() {
        if state.outcome().is_some() {
            break;
        }
        state = match state.apply_action(*action) {
            Ok(next) => next,
            Err(MoveError::IllegalMove { .. } | MoveError::RunFinished) => {
                return Err(ReplayError::IllegalMove { index, action: *action });
            }
        };
        applied += 1;
    }

    Ok(ReplayResult {
        outcome: state.outcome(),
        applied,
        steps: state.steps,
        final_snapshot_hash: state.snapshot_hash(),
        final_state: state,
    })
}
