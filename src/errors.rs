//! Error types for puzzle loading with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (P001-P003) for documentation
//! lookup:
//!
//! - P001: `WrongLetterCount` (Puzzle does not contain exactly 13 letters)
//! - P002: `InvalidCharacter` (Puzzle contains a non-letter character)
//! - P003: `Io` (Puzzle file could not be read)
//!
//! The solver core itself never produces errors: an unsolvable puzzle is a
//! regular [`crate::solver::SolveOutcome::Failure`], not an error.

use std::io;

/// Custom error type for puzzle-loading operations
#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    #[error("puzzle must contain exactly 13 letters, found {found}")]
    WrongLetterCount { found: usize },

    #[error("invalid puzzle character '{ch}' (letters only)")]
    InvalidCharacter { ch: char },

    #[error("failed to read puzzle from '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl PuzzleError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            PuzzleError::WrongLetterCount { .. } => "P001",
            PuzzleError::InvalidCharacter { .. } => "P002",
            PuzzleError::Io { .. } => "P003",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            PuzzleError::WrongLetterCount { .. } => Some(
                "The puzzle is two 4-letter words plus their 5-letter sum, \
                 e.g. SEND, MORE, MONEY on one line or several",
            ),
            PuzzleError::InvalidCharacter { .. } => {
                Some("Only letters are allowed; line breaks between words are fine")
            }
            PuzzleError::Io { .. } => None,
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        if let Some(help) = self.help() {
            format!("{self} ({})\n{help}", self.code())
        } else {
            format!("{self} ({})", self.code())
        }
    }
}
