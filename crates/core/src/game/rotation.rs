//! Quarter-turn of the whole grid, applied every `ROTATION_PERIOD` plies.

use std::collections::BTreeSet;

use crate::state::GameState;
use crate::types::*;

impl GameState {
    /// Maps `(x, y)` on a `W x H` grid to `(H - 1 - y, x)` and swaps the dimensions.
    /// Adversary headings keep their vectors; only positions move.
    pub(crate) fn rotated(&self) -> GameState {
        let height = self.height;
        let turn = |pos: Pos| Pos { y: pos.x, x: height - 1 - pos.y };
        let turn_all = |cells: &BTreeSet<Pos>| cells.iter().copied().map(turn).collect();

        GameState {
            width: self.height,
            height: self.width,
            player: turn(self.player),
            food: turn_all(&self.food),
            power_items: turn_all(&self.power_items),
            walls: turn_all(&self.walls),
            exit: turn(self.exit),
            adversaries: self
                .adversaries
                .iter()
                .map(|adversary| Adversary { pos: turn(adversary.pos), heading: adversary.heading })
                .collect(),
            powerup_turns: self.powerup_turns,
            rotation_step: 0,
            portals: self.portals.map(turn),
            steps: self.steps,
        }
    }
}
