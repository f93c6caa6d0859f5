//! Compact text form of an action sequence: runs of one label become `LABEL-count`,
//! entries are joined with `, ` and teleports always stand alone.

use std::error::Error;
use std::fmt;
use std::iter;

use crate::types::{Action, ActionParseError};

const SEPARATOR: &str = ", ";

pub fn encode(actions: &[Action]) -> String {
    let mut entries = Vec::new();
    let mut runs = actions.iter().copied().peekable();
    while let Some(action) = runs.next() {
        if action.is_teleport() {
            entries.push(action.to_string());
            continue;
        }
        let mut count = 1usize;
        while runs.next_if_eq(&action).is_some() {
            count += 1;
        }
        entries.push(format!("{action}-{count}"));
    }
    entries.join(SEPARATOR)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// An entry's label is not in the action vocabulary.
    Label { entry: usize, source: ActionParseError },
    /// A run count is missing, zero or not a number.
    Count { entry: usize, text: String },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label { entry, source } => write!(f, "entry {entry}: {source}"),
            Self::Count { entry, text } => write!(f, "entry {entry}: invalid run count `{text}`"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Label { source, .. } => Some(source),
            Self::Count { .. } => None,
        }
    }
}

/// Inverse of [`encode`]. Bare labels count as a run of one.
pub fn decode(text: &str) -> Result<Vec<Action>, DecodeError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut actions = Vec::new();
    for (entry, raw) in text.split(',').map(str::trim).enumerate() {
        let (label, count) = match raw.rsplit_once('-') {
            Some((label, run)) => {
                let count = run
                    .parse::<usize>()
                    .ok()
                    .filter(|count| *count > 0)
                    .ok_or_else(|| DecodeError::Count { entry, text: run.to_string() })?;
                (label, count)
            }
            None => (raw, 1),
        };
        let action: Action =
            label.parse().map_err(|source| DecodeError::Label { entry, source })?;
        actions.extend(iter::repeat_n(action, count));
    }
    Ok(actions)
}
