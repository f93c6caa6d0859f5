//! Greedy multi-stage route planning.
//! Commits to one food item per outer iteration, optionally detouring through a
//! power item, then finishes with a leg to the exit.
//! It does not own the rules; every leg is replayed through `GameState::apply_action`.

use serde::{Deserialize, Serialize};

use crate::state::GameState;
use crate::types::{Action, Pos, RunOutcome};

mod oracle;
mod search;

pub use oracle::{CostGrid, UNREACHABLE};
pub use search::{LegSearch, find_path, route_to};

/// Optional work caps. The default has none, which leaves completed runs unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Node expansions allowed per A* leg.
    pub max_expansions_per_leg: Option<u32>,
    /// Collection iterations allowed before moving on to the exit leg.
    pub max_legs: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanStop {
    Completed,
    /// Every remaining food item costs `UNREACHABLE` from the player.
    NoReachableFood,
    RouteNotFound { target: Pos },
    BudgetExhausted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanOutcome {
    pub actions: Vec<Action>,
    pub legs: u32,
    pub stop: PlanStop,
}

/// Chosen next hop together with the estimated cost of the whole detour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Waypoint {
    target: Pos,
    cost: u32,
}

pub fn plan(source: &GameState) -> Vec<Action> {
    plan_with(source, &PlannerConfig::default()).actions
}

pub fn plan_with(source: &GameState, config: &PlannerConfig) -> PlanOutcome {
    let mut planner = Planner::new(source, config);
    planner.collect_food();
    planner.finish_at_exit();
    tracing::debug!(
        plies = planner.actions.len(),
        legs = planner.legs,
        stop = ?planner.stop,
        "Plan finished"
    );
    PlanOutcome { actions: planner.actions, legs: planner.legs, stop: planner.stop }
}

struct Planner {
    live: GameState,
    actions: Vec<Action>,
    legs: u32,
    stop: PlanStop,
    config: PlannerConfig,
}

impl Planner {
    fn new(source: &GameState, config: &PlannerConfig) -> Self {
        Planner {
            live: source.clone(),
            actions: Vec::new(),
            legs: 0,
            stop: PlanStop::Completed,
            config: *config,
        }
    }

    fn collect_food(&mut self) {
        while !self.live.food.is_empty() {
            if self.config.max_legs.is_some_and(|cap| self.legs >= cap) {
                tracing::warn!(legs = self.legs, "Leg budget exhausted");
                self.stop = PlanStop::BudgetExhausted;
                return;
            }
            let Some(waypoint) = choose_collection_waypoint(&self.live) else {
                tracing::warn!(food = self.live.food.len(), "No reachable food remains");
                self.stop = PlanStop::NoReachableFood;
                return;
            };
            tracing::debug!(target = %waypoint.target, cost = waypoint.cost, "Collection leg");

            let collected = self.live.food.len() + self.live.power_items.len();
            if !self.travel_to(waypoint.target) {
                return;
            }
            if self.live.food.len() + self.live.power_items.len() >= collected {
                tracing::warn!(target = %waypoint.target, "Leg ended without collecting");
                self.stop = PlanStop::RouteNotFound { target: waypoint.target };
                return;
            }
        }
    }

    fn finish_at_exit(&mut self) {
        let target = choose_exit_waypoint(&self.live);
        if target != self.live.exit {
            tracing::debug!(target = %target, "Detouring through a power item before the exit");
            if !self.travel_to(target) {
                return;
            }
        }
        let exit = self.live.exit;
        if self.live.player != exit {
            self.travel_to(exit);
        }
    }

    /// Searches one leg from the live state and replays it; false when the leg failed.
    /// The leg is searched without collectibles, so the live run may be won before
    /// its last step; the rest of the leg is then dropped.
    fn travel_to(&mut self, target: Pos) -> bool {
        let leg = search::search(
            &search::routing_state(&self.live, target),
            self.config.max_expansions_per_leg,
        );
        let path = match leg {
            LegSearch::Found(path) if !path.is_empty() => path,
            LegSearch::BudgetExhausted => {
                tracing::warn!(target = %target, "Leg search hit the expansion cap");
                self.record_failure(PlanStop::BudgetExhausted);
                return false;
            }
            LegSearch::Found(_) | LegSearch::Unreachable => {
                tracing::warn!(target = %target, "Detailed route not found");
                self.record_failure(PlanStop::RouteNotFound { target });
                return false;
            }
        };
        self.legs += 1;
        tracing::debug!(target = %target, plies = path.len(), "Leg found");

        for action in path {
            match self.live.apply_action(action) {
                Ok(next) => {
                    self.live = next;
                    self.actions.push(action);
                    if self.live.outcome() == Some(RunOutcome::Victory) {
                        tracing::debug!(target = %target, "Run won before the leg ended");
                        return true;
                    }
                }
                Err(err) => {
                    tracing::warn!(%action, %err, "Leg diverged from the live state");
                    self.record_failure(PlanStop::RouteNotFound { target });
                    return false;
                }
            }
        }
        true
    }

    fn record_failure(&mut self, stop: PlanStop) {
        if self.stop == PlanStop::Completed {
            self.stop = stop;
        }
    }
}

/// Cheapest food item, where each item may be approached through a power item
/// whose second half is costed with walls open.
fn choose_collection_waypoint(state: &GameState) -> Option<Waypoint> {
    let grid = CostGrid::of(state);
    let phasing = grid.phasing();
    let to_power_items: Vec<(Pos, u32)> = state
        .power_items
        .iter()
        .map(|item| (*item, grid.shortest_path_cost(state.player, *item)))
        .collect();

    let mut best: Option<Waypoint> = None;
    for food in &state.food {
        let mut candidate =
            Waypoint { target: *food, cost: grid.shortest_path_cost(state.player, *food) };
        for (item, to_item) in &to_power_items {
            let via = to_item.saturating_add(phasing.shortest_path_cost(*item, *food));
            if via < candidate.cost {
                candidate = Waypoint { target: *item, cost: via };
            }
        }
        if candidate.cost < best.map_or(UNREACHABLE, |best| best.cost) {
            best = Some(candidate);
        }
    }
    best
}

/// The exit itself, or a power item when going through it is cheaper.
fn choose_exit_waypoint(state: &GameState) -> Pos {
    let grid = CostGrid::of(state);
    let phasing = grid.phasing();
    let mut best =
        Waypoint { target: state.exit, cost: grid.shortest_path_cost(state.player, state.exit) };
    for item in &state.power_items {
        let via = grid
            .shortest_path_cost(state.player, *item)
            .saturating_add(phasing.shortest_path_cost(*item, state.exit));
        if via < best.cost {
            best = Waypoint { target: *item, cost: via };
        }
    }
    best.target
}
