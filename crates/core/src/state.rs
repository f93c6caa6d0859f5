use std::collections::BTreeSet;
use std::str::FromStr;

use crate::types::*;

pub const PORTAL_COUNT: usize = 4;
/// Plies between whole-grid rotations.
pub const ROTATION_PERIOD: u8 = 30;
/// Length of the wall-phasing window granted by a power item.
pub const POWERUP_DURATION: u8 = 5;

/// Immutable snapshot of a run. Every transition builds a fresh value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub width: i32,
    pub height: i32,
    pub player: Pos,
    pub food: BTreeSet<Pos>,
    pub power_items: BTreeSet<Pos>,
    pub walls: BTreeSet<Pos>,
    pub exit: Pos,
    pub adversaries: Vec<Adversary>,
    pub powerup_turns: u8,
    pub rotation_step: u8,
    pub portals: [Pos; PORTAL_COUNT],
    pub steps: u32,
}

/// Search identity of a state. Exit, portals and the step counter are not part of it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateKey {
    player: Pos,
    food: BTreeSet<Pos>,
    power_items: BTreeSet<Pos>,
    walls: BTreeSet<Pos>,
    adversaries: Vec<Adversary>,
    powerup_turns: u8,
    rotation_step: u8,
    width: i32,
    height: i32,
}

pub fn default_portals(width: i32, height: i32) -> [Pos; PORTAL_COUNT] {
    [
        Pos { y: 1, x: 1 },
        Pos { y: 1, x: width - 2 },
        Pos { y: height - 2, x: width - 2 },
        Pos { y: height - 2, x: 1 },
    ]
}

impl GameState {
    /// Parses a rectangular map. Markers: `P` player, `E` exit, `.` food,
    /// `O` power item, `%` wall, `G` adversary; anything else is open floor.
    pub fn parse(text: &str) -> Result<GameState, ParseError> {
        let rows: Vec<&str> = text.trim_matches(|c| c == '\n' || c == '\r').lines().collect();
        let Some(first) = rows.first() else {
            return Err(ParseError::EmptyMap);
        };
        let expected = first.chars().count();
        if expected == 0 {
            return Err(ParseError::EmptyMap);
        }

        let mut player = None;
        let mut exit = None;
        let mut food = BTreeSet::new();
        let mut power_items = BTreeSet::new();
        let mut walls = BTreeSet::new();
        let mut adversaries = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != expected {
                return Err(ParseError::RaggedRow { row: y, expected, found });
            }
            for (x, cell) in row.chars().enumerate() {
                let pos = Pos { y: y as i32, x: x as i32 };
                match cell {
                    'P' => player = Some(pos),
                    'E' => exit = Some(pos),
                    '.' => {
                        food.insert(pos);
                    }
                    'O' => {
                        power_items.insert(pos);
                    }
                    '%' => {
                        walls.insert(pos);
                    }
                    'G' => adversaries.push(Adversary { pos, heading: Adversary::INITIAL_HEADING }),
                    _ => {}
                }
            }
        }

        let player = player.ok_or(ParseError::MissingPlayer)?;
        let exit = exit.ok_or(ParseError::MissingExit)?;
        let width = expected as i32;
        let height = rows.len() as i32;

        Ok(GameState {
            width,
            height,
            player,
            food,
            power_items,
            walls,
            exit,
            adversaries,
            powerup_turns: 0,
            rotation_step: 0,
            portals: default_portals(width, height),
            steps: 0,
        })
    }

    pub fn key(&self) -> StateKey {
        StateKey {
            player: self.player,
            food: self.food.clone(),
            power_items: self.power_items.clone(),
            walls: self.walls.clone(),
            adversaries: self.adversaries.clone(),
            powerup_turns: self.powerup_turns,
            rotation_step: self.rotation_step,
            width: self.width,
            height: self.height,
        }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    pub fn powerup_active(&self) -> bool {
        self.powerup_turns > 0
    }

    /// Index of the first portal at `pos`.
    pub fn portal_index(&self, pos: Pos) -> Option<usize> {
        self.portals.iter().position(|portal| *portal == pos)
    }

    pub fn is_game_over(&self) -> bool {
        self.adversaries.iter().any(|adversary| adversary.pos == self.player)
    }

    pub fn is_winner(&self) -> bool {
        self.food.is_empty() && self.player == self.exit
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        if self.is_game_over() {
            Some(RunOutcome::Defeat)
        } else if self.is_winner() {
            Some(RunOutcome::Victory)
        } else {
            None
        }
    }

    /// First broken structural invariant, if any.
    pub fn invariant_violation(&self) -> Option<&'static str> {
        if !self.in_bounds(self.player) {
            return Some("player outside the grid");
        }
        if !self.in_bounds(self.exit) {
            return Some("exit outside the grid");
        }
        if self.rotation_step >= ROTATION_PERIOD {
            return Some("rotation step reached the rotation period");
        }
        if self.powerup_turns > POWERUP_DURATION {
            return Some("powerup window longer than a power item grants");
        }
        if self.adversaries.iter().any(|adversary| !self.in_bounds(adversary.pos)) {
            return Some("adversary outside the grid");
        }
        None
    }
}

impl FromStr for GameState {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        GameState::parse(text)
    }
}
