//! Stable snapshot hashing for deterministic verification.
//! Search identity uses `StateKey`; this digest is only for reporting and replay checks.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::state::GameState;
use crate::types::Pos;

fn write_pos(hasher: &mut Xxh3, pos: Pos) {
    hasher.write_i32(pos.x);
    hasher.write_i32(pos.y);
}

impl GameState {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_i32(self.width);
        hasher.write_i32(self.height);
        write_pos(&mut hasher, self.player);
        write_pos(&mut hasher, self.exit);
        for cells in [&self.food, &self.power_items, &self.walls] {
            hasher.write_usize(cells.len());
            for pos in cells {
                write_pos(&mut hasher, *pos);
            }
        }
        hasher.write_usize(self.adversaries.len());
        for adversary in &self.adversaries {
            write_pos(&mut hasher, adversary.pos);
            hasher.write_i32(adversary.heading.0);
            hasher.write_i32(adversary.heading.1);
        }
        for portal in self.portals {
            write_pos(&mut hasher, portal);
        }
        hasher.write_u8(self.powerup_turns);
        hasher.write_u8(self.rotation_step);
        hasher.write_u32(self.steps);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::game::test_support::*;
    use crate::*;

    #[test]
    fn identical_states_hash_identically() {
        let left = parse(CORRIDOR);
        let right = parse(CORRIDOR);
        assert_eq!(left.snapshot_hash(), right.snapshot_hash());

        let moved = left.apply_action(Action::Move(Direction::Stop)).expect("stop");
        assert_ne!(left.snapshot_hash(), moved.snapshot_hash());
    }
}
