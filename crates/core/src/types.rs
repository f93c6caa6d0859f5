use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn offset(self, (dx, dy): (i32, i32)) -> Pos {
        Pos { y: self.y + dy, x: self.x + dx }
    }

    pub fn step(self, direction: Direction) -> Pos {
        self.offset(direction.offset())
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

impl Direction {
    /// Order in which candidate moves are generated; search tie-breaking follows it.
    pub const MOVE_ORDER: [Direction; 5] =
        [Direction::West, Direction::East, Direction::North, Direction::South, Direction::Stop];

    pub const STEPS: [Direction; 4] =
        [Direction::West, Direction::East, Direction::North, Direction::South];

    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Direction::North => "NORTH",
            Direction::South => "SOUTH",
            Direction::East => "EAST",
            Direction::West => "WEST",
            Direction::Stop => "STOP",
        }
    }

    fn from_label(label: &str) -> Option<Direction> {
        match label {
            "NORTH" => Some(Direction::North),
            "SOUTH" => Some(Direction::South),
            "EAST" => Some(Direction::East),
            "WEST" => Some(Direction::West),
            "STOP" => Some(Direction::Stop),
            _ => None,
        }
    }
}

/// One player command. Teleports carry the direction used to step onto the
/// entry portal and the 1-based index of the destination portal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Action {
    Move(Direction),
    Teleport { entry: Direction, portal: u8 },
}

const TELEPORT_MARKER: &str = "_TELE_P";

impl Action {
    pub fn is_teleport(self) -> bool {
        matches!(self, Action::Teleport { .. })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(direction) => f.write_str(direction.label()),
            Action::Teleport { entry, portal } => {
                write!(f, "{}{TELEPORT_MARKER}{portal}", entry.label())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionParseError {
    pub label: String,
}

impl fmt::Display for ActionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action label `{}`", self.label)
    }
}

impl Error for ActionParseError {}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let invalid = || ActionParseError { label: label.to_string() };
        let Some((entry, portal)) = label.split_once(TELEPORT_MARKER) else {
            return Direction::from_label(label).map(Action::Move).ok_or_else(invalid);
        };
        let entry = Direction::from_label(entry)
            .filter(|direction| *direction != Direction::Stop)
            .ok_or_else(invalid)?;
        let portal: u8 = portal.parse().map_err(|_| invalid())?;
        if !(1..=4).contains(&portal) {
            return Err(invalid());
        }
        Ok(Action::Teleport { entry, portal })
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.to_string()
    }
}

impl TryFrom<String> for Action {
    type Error = ActionParseError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

/// A patrolling adversary. `heading` is the (dx, dy) vector it advances along each ply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Adversary {
    pub pos: Pos,
    pub heading: (i32, i32),
}

impl Adversary {
    pub const INITIAL_HEADING: (i32, i32) = Direction::East.offset();
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    EmptyMap,
    MissingPlayer,
    MissingExit,
    RaggedRow { row: usize, expected: usize, found: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMap => write!(f, "map text contains no rows"),
            Self::MissingPlayer => write!(f, "map has no player start marker `P`"),
            Self::MissingExit => write!(f, "map has no exit marker `E`"),
            Self::RaggedRow { row, expected, found } => {
                write!(f, "map row {row} has {found} cells, expected {expected}")
            }
        }
    }
}

impl Error for ParseError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    /// The action is not available from the current position.
    IllegalMove { action: Action },
    /// The run already ended in a win or a capture.
    RunFinished,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalMove { action } => write!(f, "move {action} is not legal here"),
            Self::RunFinished => write!(f, "the run has already finished"),
        }
    }
}

impl Error for MoveError {}
