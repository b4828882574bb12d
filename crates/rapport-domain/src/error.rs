//! Parse errors for the closed domain vocabularies

use std::fmt;

/// A string fell outside one of the closed domain sets.
///
/// For statuses and actions this is a contract violation: the producer and
/// this crate disagree about the vocabulary. Callers must propagate it, not
/// substitute a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not one of the eight relationship statuses
    UnknownStatus(String),

    /// Not one of the seven relationship actions
    UnknownAction(String),

    /// Not a recognised friendship state
    UnknownFriendshipStatus(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownStatus(s) => write!(f, "Unknown relationship status: {}", s),
            ParseError::UnknownAction(s) => write!(f, "Unknown relationship action: {}", s),
            ParseError::UnknownFriendshipStatus(s) => {
                write!(f, "Unknown friendship status: {}", s)
            }
        }
    }
}

impl std::error::Error for ParseError {}
