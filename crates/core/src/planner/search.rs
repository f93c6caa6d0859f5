//! A* over whole game states toward a single goal.

use std::collections::{BTreeMap, BTreeSet};

use slotmap::{SlotMap, new_key_type};

use super::oracle::estimate;
use crate::state::{GameState, StateKey};
use crate::types::{Action, Pos};

new_key_type! {
    struct NodeId;
}

struct SearchNode {
    state: GameState,
    parent: Option<(NodeId, Action)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    g: u32,
    seq: u64,
    id: NodeId,
}

/// Result of one leg search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LegSearch {
    Found(Vec<Action>),
    Unreachable,
    /// The node-expansion cap was hit before a goal was popped.
    BudgetExhausted,
}

impl LegSearch {
    pub fn into_actions(self) -> Vec<Action> {
        match self {
            LegSearch::Found(actions) => actions,
            LegSearch::Unreachable | LegSearch::BudgetExhausted => Vec::new(),
        }
    }
}

/// Fewest-ply action sequence from `source` to a winning state, or empty if none exists.
pub fn find_path(source: &GameState) -> Vec<Action> {
    search(source, None).into_actions()
}

/// Fewest-ply route that ends with the player on `target`, ignoring food and power items.
pub fn route_to(source: &GameState, target: Pos) -> Vec<Action> {
    search(&routing_state(source, target), None).into_actions()
}

/// The source with collectibles cleared and the exit moved onto `target`, so that
/// "won" means "standing on target".
pub(super) fn routing_state(source: &GameState, target: Pos) -> GameState {
    GameState {
        food: BTreeSet::new(),
        power_items: BTreeSet::new(),
        exit: target,
        ..source.clone()
    }
}

#[tracing::instrument(
    level = "trace",
    skip(source),
    fields(player = %source.player, exit = %source.exit)
)]
pub(super) fn search(source: &GameState, max_expansions: Option<u32>) -> LegSearch {
    let mut nodes: SlotMap<NodeId, SearchNode> = SlotMap::with_key();
    let mut best_g: BTreeMap<StateKey, u32> = BTreeMap::new();
    let mut open_set = BTreeSet::new();
    let mut seq = 0u64;
    let mut expansions = 0u32;

    let root = nodes.insert(SearchNode { state: source.clone(), parent: None });
    best_g.insert(source.key(), 0);
    open_set.insert(OpenNode { f: estimate(source), g: 0, seq, id: root });

    while let Some(current) = open_set.pop_first() {
        let state = &nodes[current.id].state;
        if state.is_game_over() {
            continue;
        }
        if best_g.get(&state.key()).is_some_and(|best| current.g > *best) {
            continue;
        }
        if state.is_winner() {
            tracing::trace!(expansions, plies = current.g, "Goal reached");
            return LegSearch::Found(reconstruct_path(&nodes, current.id));
        }
        if max_expansions.is_some_and(|cap| expansions >= cap) {
            tracing::trace!(expansions, "Expansion cap reached");
            return LegSearch::BudgetExhausted;
        }
        expansions += 1;

        let successors: Vec<(Action, GameState)> = state
            .legal_moves()
            .iter()
            .map(|(action, destination)| (action, state.advance(destination, action)))
            .filter(|(_, next)| !next.is_game_over())
            .collect();

        let g = current.g + 1;
        for (action, next) in successors {
            let key = next.key();
            if best_g.get(&key).is_some_and(|best| g >= *best) {
                continue;
            }
            let f = g + estimate(&next);
            let id = nodes.insert(SearchNode { state: next, parent: Some((current.id, action)) });
            best_g.insert(key, g);
            seq += 1;
            open_set.insert(OpenNode { f, g, seq, id });
        }
    }

    tracing::trace!(expansions, "No path found");
    LegSearch::Unreachable
}

fn reconstruct_path(nodes: &SlotMap<NodeId, SearchNode>, goal: NodeId) -> Vec<Action> {
    let mut actions = Vec::new();
    let mut cursor = goal;
    while let Some((parent, action)) = nodes[cursor].parent {
        actions.push(action);
        cursor = parent;
    }
    actions.reverse();
    actions
}
