//! Rules of the chase: move generation, the ply transition and grid rotation.
//! States are values; every rule here reads one state and returns a new one.
//! It does not own route planning or map-file I/O.

use crate::state::GameState;
use crate::types::*;

mod hash;
mod moves;
mod rotation;
#[cfg(test)]
pub(crate) mod test_support;
mod transition;

/// Legal actions from one state, in generation order, each with its destination cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegalMoves {
    entries: Vec<(Action, Pos)>,
}

impl LegalMoves {
    pub fn get(&self, action: Action) -> Option<Pos> {
        self.entries.iter().find(|(candidate, _)| *candidate == action).map(|(_, pos)| *pos)
    }

    pub fn contains(&self, action: Action) -> bool {
        self.get(action).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Action, Pos)> + '_ {
        self.entries.iter().copied()
    }

    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.entries.iter().map(|(action, _)| *action)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GameState {
    /// Validated transition for callers issuing labelled commands.
    ///
    /// A teleport label that is not in the legal set is still accepted while the
    /// player stands on a portal, which is how a manual player picks a destination
    /// after stepping onto one.
    pub fn apply_action(&self, action: Action) -> Result<GameState, MoveError> {
        if self.outcome().is_some() {
            return Err(MoveError::RunFinished);
        }
        let destination = match self.legal_moves().get(action) {
            Some(destination) => destination,
            None => self.manual_teleport_target(action).ok_or(MoveError::IllegalMove { action })?,
        };
        Ok(self.advance(destination, action))
    }

    fn manual_teleport_target(&self, action: Action) -> Option<Pos> {
        let Action::Teleport { portal, .. } = action else {
            return None;
        };
        let current = self.portal_index(self.player)?;
        let target_index = usize::from(portal).checked_sub(1)?;
        let target = *self.portals.get(target_index)?;
        (target_index != current && target != self.player).then_some(target)
    }
}
