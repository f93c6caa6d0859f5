//! Loads maps from text files on disk.
//!
//! The file holds the same character grid `GameState::parse` accepts; blank
//! lines before the first row and after the last are ignored.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::state::GameState;
use crate::types::ParseError;


/// Describes why a map file could not be loaded.
#[derive(Debug)]
pub enum MapFileError {
    /// Underlying I/O failure.
    Io(io::Error),
    /// The file was read but its contents are not a valid map.
    Parse(ParseError),
}

impl fmt::Display for MapFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "map I/O error: {e}"),
            Self::Parse(e) => write!(f, "invalid map: {e}"),
        }
    }
}

impl Error for MapFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<io::Error> for MapFileError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseError> for MapFileError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

pub fn load_map(path: &Path) -> Result<GameState, MapFileError> {
    let text = fs::read_to_string(path)?;
    let state = GameState::parse(&text)?;
    tracing::debug!(
        path = %path.display(),
        width = state.width,
        height = state.height,
        food = state.food.len(),
        adversaries = state.adversaries.len(),
        "Loaded map"
    );
    Ok(state)
}
