//! Breadth-first step costs between cells, ignoring adversaries.

use std::collections::{BTreeSet, VecDeque};

use crate::state::{GameState, PORTAL_COUNT};
use crate::types::{Direction, Pos};

/// Cost reported when no route exists. Sums saturate, so it stays "infinite".
pub const UNREACHABLE: u32 = u32::MAX;

/// Obstacle and portal layout a cost query runs against.
#[derive(Clone, Copy, Debug)]
pub struct CostGrid<'a> {
    pub width: i32,
    pub height: i32,
    pub walls: &'a BTreeSet<Pos>,
    pub portals: &'a [Pos; PORTAL_COUNT],
    /// Every wall counts as open for the whole query.
    pub phasing: bool,
}

impl<'a> CostGrid<'a> {
    pub fn of(state: &'a GameState) -> Self {
        CostGrid {
            width: state.width,
            height: state.height,
            walls: &state.walls,
            portals: &state.portals,
            phasing: state.powerup_active(),
        }
    }

    pub fn phasing(self) -> Self {
        CostGrid { phasing: true, ..self }
    }

    fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Fewest steps from `start` to `end`.
    ///
    /// Stepping onto any portal puts every other portal on the same frontier
    /// level, one step later, so real hops are undercounted in some layouts.
    pub fn shortest_path_cost(&self, start: Pos, end: Pos) -> u32 {
        if start == end {
            return 0;
        }
        let mut visited = BTreeSet::from([start]);
        let mut queue = VecDeque::from([(start, 0u32)]);

        while let Some((current, cost)) = queue.pop_front() {
            for direction in Direction::STEPS {
                let next = current.step(direction);
                if next == end {
                    return cost + 1;
                }
                if !self.in_bounds(next) {
                    continue;
                }
                if self.portals.contains(&next) {
                    for target in self.portals {
                        if *target == end {
                            return cost + 1;
                        }
                        if *target != next && visited.insert(*target) {
                            queue.push_back((*target, cost + 1));
                        }
                    }
                    visited.insert(next);
                    continue;
                }
                if self.walls.contains(&next) && !self.phasing {
                    continue;
                }
                if visited.insert(next) {
                    queue.push_back((next, cost + 1));
                }
            }
        }
        UNREACHABLE
    }
}

/// Search heuristic: distance to the nearest food, or to the exit once food is gone.
pub(super) fn estimate(state: &GameState) -> u32 {
    // Finite stand-in for "no route" so f-scores never overflow.
    const UNREACHABLE_ESTIMATE: u32 = 100_000;

    let grid = CostGrid::of(state);
    let cost = if state.food.is_empty() {
        grid.shortest_path_cost(state.player, state.exit)
    } else {
        state
            .food
            .iter()
            .map(|food| grid.shortest_path_cost(state.player, *food))
            .min()
            .unwrap_or(UNREACHABLE)
    };
    if cost == UNREACHABLE { UNREACHABLE_ESTIMATE } else { cost }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    const RING: &str = "\
%%%%%%%
%P    %
% %%% %
%    E%
%%%%%%%";

    #[test]
    fn open_floor_cost_is_the_manhattan_distance() {
        let state = parse(OPEN_ROOM);
        let grid = CostGrid::of(&state);
        let start = Pos { y: 3, x: 3 };
        assert_eq!(grid.shortest_path_cost(start, Pos { y: 3, x: 6 }), 3);
        assert_eq!(grid.shortest_path_cost(start, Pos { y: 4, x: 5 }), 3);
        assert_eq!(grid.shortest_path_cost(start, start), 0);
    }

    #[test]
    fn portals_collapse_to_one_step() {
        let state = parse(RING);
        let grid = CostGrid::of(&state);
        // Around the ring is six steps; via the portal approximation it is four.
        assert_eq!(grid.shortest_path_cost(Pos { y: 1, x: 3 }, Pos { y: 3, x: 3 }), 4);
    }

    #[test]
    fn portal_goal_is_one_step_from_any_portal_neighbour() {
        let state = parse(PORTAL_EXIT);
        let grid = CostGrid::of(&state);
        assert_eq!(state.portal_index(state.exit), Some(3));
        assert_eq!(grid.shortest_path_cost(state.player, state.exit), 1);
        assert_eq!(estimate(&state), 1);
    }

    #[test]
    fn phasing_walks_through_walls() {
        let state = parse(RING);
        let phasing = CostGrid::of(&state).phasing();
        assert_eq!(phasing.shortest_path_cost(Pos { y: 1, x: 3 }, Pos { y: 3, x: 3 }), 2);
    }

    #[test]
    fn sealed_cells_are_unreachable() {
        let state = parse(SEALED_EXIT);
        let grid = CostGrid::of(&state);
        assert_eq!(grid.shortest_path_cost(state.player, state.exit), UNREACHABLE);
        assert_eq!(estimate(&state), 100_000);
        assert_eq!(grid.phasing().shortest_path_cost(state.player, state.exit), 5);
    }

    #[test]
    fn estimate_targets_nearest_food_then_exit() {
        let state = parse(OPEN_ROOM);
        assert_eq!(estimate(&state), 4);

        let fed = GameState { food: BTreeSet::new(), ..state };
        assert_eq!(estimate(&fed), 5);
    }
}
