//! Move enumeration, including the synthesized portal hops.

use super::LegalMoves;
use crate::state::GameState;
use crate::types::*;

impl GameState {
    pub fn legal_moves(&self) -> LegalMoves {
        let mut entries = Vec::with_capacity(8);
        for direction in Direction::MOVE_ORDER {
            if direction == Direction::Stop {
                entries.push((Action::Move(Direction::Stop), self.player));
                continue;
            }

            let destination = self.player.step(direction);
            if !self.in_bounds(destination) {
                continue;
            }
            if self.walls.contains(&destination) && !self.powerup_active() {
                continue;
            }
            entries.push((Action::Move(direction), destination));

            let Some(entry_index) = self.portal_index(destination) else {
                continue;
            };
            for (index, portal) in self.portals.iter().enumerate() {
                if index != entry_index {
                    let action = Action::Teleport { entry: direction, portal: index as u8 + 1 };
                    entries.push((action, *portal));
                }
            }
        }
        LegalMoves { entries }
    }
}

#[cfg(test)]
mod tests {
    use crate::game::test_support::*;
    use crate::*;

    #[test]
    fn stop_is_always_offered_in_place() {
        let state = parse(WALLED_IN);
        let moves = state.legal_moves();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves.get(Action::Move(Direction::Stop)), Some(state.player));
    }

    #[test]
    fn walls_block_until_powerup_is_active() {
        let state = parse(WALLED_IN);
        assert!(!state.legal_moves().contains(Action::Move(Direction::East)));

        let powered = GameState { powerup_turns: 1, ..state.clone() };
        let east = powered.legal_moves().get(Action::Move(Direction::East));
        assert_eq!(east, Some(Pos { y: 2, x: 3 }));
    }

    #[test]
    fn grid_edge_is_never_crossed() {
        let state = parse(
            "\
P....
.....
....E",
        );
        let moves = state.legal_moves();
        assert!(!moves.contains(Action::Move(Direction::West)));
        assert!(!moves.contains(Action::Move(Direction::North)));
        assert_eq!(moves.get(Action::Move(Direction::East)), Some(Pos { y: 0, x: 1 }));
    }

    #[test]
    fn stepping_onto_a_portal_offers_three_hops() {
        let state = parse(PORTAL_ROOM);
        let moves = state.legal_moves();
        let labels: Vec<String> = moves.actions().map(|action| action.to_string()).collect();
        assert_eq!(
            labels,
            vec!["WEST", "EAST", "EAST_TELE_P1", "EAST_TELE_P3", "EAST_TELE_P4", "SOUTH", "STOP"]
        );
        let hop = Action::Teleport { entry: Direction::East, portal: 3 };
        assert_eq!(moves.get(hop), Some(state.portals[2]));
    }
}
