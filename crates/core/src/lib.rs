pub mod encoding;
pub mod game;
pub mod map_file;
pub mod planner;
pub mod replay;
pub mod state;
pub mod types;

pub use encoding::{DecodeError, decode, encode};
pub use game::LegalMoves;
pub use map_file::{MapFileError, load_map};
pub use planner::{PlanOutcome, PlanStop, PlannerConfig, plan, plan_with};
pub use replay::*;
pub use state::{GameState, StateKey};
pub use types::*;
