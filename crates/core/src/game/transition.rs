//! The ply transition: adversaries advance, collisions resolve, items are
//! consumed, timers tick and the grid may rotate.

use std::collections::BTreeSet;

use crate::state::{GameState, POWERUP_DURATION, ROTATION_PERIOD};
use crate::types::*;

struct Consumed {
    food: BTreeSet<Pos>,
    power_items: BTreeSet<Pos>,
    walls: BTreeSet<Pos>,
    ate_power_item: bool,
}

impl GameState {
    /// Applies one ply with the player moving to `destination` under `action`.
    /// `destination` must come from [`GameState::legal_moves`].
    pub fn advance(&self, destination: Pos, action: Action) -> GameState {
        let advanced = self.advance_adversaries();
        let crossing = self
            .adversaries
            .iter()
            .zip(&advanced)
            .any(|(before, after)| before.pos == destination && after.pos == self.player);

        let cell = match action {
            Action::Teleport { entry, .. } => self.player.step(entry),
            Action::Move(_) => destination,
        };
        let consumed = self.consume(cell, !crossing);
        let powerup_turns = if consumed.ate_power_item {
            POWERUP_DURATION
        } else {
            self.powerup_turns.saturating_sub(1)
        };

        let mut next = GameState {
            width: self.width,
            height: self.height,
            player: destination,
            food: consumed.food,
            power_items: consumed.power_items,
            walls: consumed.walls,
            exit: self.exit,
            adversaries: advanced,
            powerup_turns,
            rotation_step: self.rotation_step,
            portals: self.portals,
            steps: self.steps + 1,
        };

        // A swap leaves the two never sharing a cell, so the pre-move adversaries
        // are kept to make the capture visible to `is_game_over`.
        if crossing {
            next.adversaries = self.adversaries.clone();
            next.rotation_step = 0;
            return next;
        }
        if next.is_game_over() {
            next.rotation_step = 0;
            return next;
        }

        next.rotation_step += 1;
        if next.rotation_step == ROTATION_PERIOD { next.rotated() } else { next }
    }

    /// Each adversary steps along its heading, or reverses in place when blocked.
    fn advance_adversaries(&self) -> Vec<Adversary> {
        self.adversaries
            .iter()
            .map(|adversary| {
                let ahead = adversary.pos.offset(adversary.heading);
                if self.walls.contains(&ahead) || !self.in_bounds(ahead) {
                    let (dx, dy) = adversary.heading;
                    Adversary { pos: adversary.pos, heading: (-dx, -dy) }
                } else {
                    Adversary { pos: ahead, heading: adversary.heading }
                }
            })
            .collect()
    }

    fn consume(&self, cell: Pos, may_clear_wall: bool) -> Consumed {
        let mut walls = self.walls.clone();
        if may_clear_wall && self.powerup_active() {
            walls.remove(&cell);
        }
        let mut food = self.food.clone();
        food.remove(&cell);
        let mut power_items = self.power_items.clone();
        let ate_power_item = power_items.remove(&cell);
        Consumed { food, power_items, walls, ate_power_item }
    }
}
