//! `puzzle`: loading a puzzle, wiring up its CSP, and writing results.
//!
//! This is the I/O shell around the engine. A puzzle file carries the 13
//! letters of the three words (the two 4-letter addends followed by the
//! 5-letter sum) as characters, with line breaks ignored, so both
//! `SENDMOREMONEY` and one word per line parse the same way.
//!
//! Parsing validates shape (exactly 13 letters, letters only) at this
//! boundary and reports [`PuzzleError`] with a code and help text; the
//! engine itself assumes a well-formed setup and never re-checks it.
//!
//! The result file format: on success the three solved digit strings,
//! one per line; on failure the literal token `failure`. The target file
//! is removed first if present and freshly created, never appended to.

use std::fs;
use std::io;
use std::io::Write;
use std::ops::Range;
use std::path::Path;

use crate::csp::{Assignment, Csp};
use crate::domain::DigitSet;
use crate::errors::PuzzleError;
use crate::variable::{Label, Variable, NUM_POSITIONS, NUM_VARIABLES};

/// Slot ranges of the three words.
const WORD1: Range<usize> = 0..4;
const WORD2: Range<usize> = 4..8;
const WORD3: Range<usize> = 8..13;

/// Leading slots, whose letters may not be zero.
const LEADING_SLOTS: [usize; 2] = [WORD1.start, WORD2.start];

/// The sum word's leading slot; its digit is forced by the final carry,
/// which for a 4+4=5 addition can only be 1.
const PINNED_SLOT: usize = WORD3.start;

/// A validated 13-letter puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    letters: [char; NUM_POSITIONS],
}

impl Puzzle {
    /// Parse a puzzle from an in-memory string.
    ///
    /// Characters are read in order; line breaks are skipped so the three
    /// words may sit on one line or three. Anything that is not a letter
    /// is rejected, as is any total other than 13.
    ///
    /// # Errors
    ///
    /// `PuzzleError::InvalidCharacter` for a non-letter character,
    /// `PuzzleError::WrongLetterCount` for a wrong total.
    pub fn parse_from_str(contents: &str) -> Result<Puzzle, PuzzleError> {
        let mut letters = Vec::with_capacity(NUM_POSITIONS);
        for ch in contents.chars() {
            if ch == '\n' || ch == '\r' {
                continue;
            }
            if !ch.is_alphabetic() {
                return Err(PuzzleError::InvalidCharacter { ch });
            }
            letters.push(ch);
        }

        let letters: [char; NUM_POSITIONS] = letters
            .try_into()
            .map_err(|v: Vec<char>| PuzzleError::WrongLetterCount { found: v.len() })?;
        Ok(Puzzle { letters })
    }

    /// Read a puzzle from a file path.
    ///
    /// # Errors
    ///
    /// `PuzzleError::Io` if the file cannot be read, plus everything
    /// [`Puzzle::parse_from_str`] rejects.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Puzzle, PuzzleError> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|source| PuzzleError::Io {
            path: path_ref.display().to_string(),
            source,
        })?;
        Self::parse_from_str(&contents)
    }

    /// The 13 puzzle letters in position order.
    pub fn letters(&self) -> &[char; NUM_POSITIONS] {
        &self.letters
    }

    /// Build the constraint store for this puzzle: one slot per letter
    /// position (ids 0–12), four carry slots (ids 13–16), and the fixed
    /// domain table:
    ///
    /// - leading letters of the addends exclude 0,
    /// - the sum's leading letter is pinned to {1},
    /// - carries get {0,1},
    /// - every other position gets 0–9.
    pub fn build_csp(&self) -> Csp {
        let mut variables: Vec<Variable> = self
            .letters
            .iter()
            .enumerate()
            .map(|(id, &ch)| Variable::new(id, Label::Letter(ch)))
            .collect();
        for (i, id) in (NUM_POSITIONS..NUM_VARIABLES).enumerate() {
            variables.push(Variable::new(id, Label::Carry(i as u8)));
        }

        let mut domains = [DigitSet::all(); NUM_VARIABLES];
        for id in NUM_POSITIONS..NUM_VARIABLES {
            domains[id] = DigitSet::binary();
        }
        for id in LEADING_SLOTS {
            domains[id] = DigitSet::nonzero();
        }
        domains[PINNED_SLOT] = DigitSet::single(1);

        Csp::new(variables, domains)
    }
}

/// The three solved digit strings, in word order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedWords {
    pub word1: String,
    pub word2: String,
    pub word3: String,
}

impl std::fmt::Display for SolvedWords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + {} = {}", self.word1, self.word2, self.word3)
    }
}

/// Render a completed assignment as the three digit words.
///
/// Returns `None` if any position's letter is unassigned, which a
/// [`crate::solver::SolveOutcome::Solved`] outcome rules out.
pub fn solved_words(csp: &Csp, assignment: &Assignment) -> Option<SolvedWords> {
    let digits = |range: Range<usize>| -> Option<String> {
        range
            .map(|id| Some(char::from(b'0' + csp.assigned_digit(id, assignment)?)))
            .collect()
    };

    Some(SolvedWords {
        word1: digits(WORD1)?,
        word2: digits(WORD2)?,
        word3: digits(WORD3)?,
    })
}

/// Write the result file: three digit lines on success, the literal
/// token `failure` otherwise.
///
/// Any pre-existing file at `path` is removed first; the target is always
/// freshly created, never appended to.
///
/// # Errors
///
/// Propagates filesystem errors from the remove/create/write steps.
pub fn write_result<P: AsRef<Path>>(path: P, words: Option<&SolvedWords>) -> io::Result<()> {
    let path = path.as_ref();
    if path.exists() {
        fs::remove_file(path)?;
    }

    let mut file = fs::File::create_new(path)?;
    match words {
        Some(words) => {
            writeln!(file, "{}", words.word1)?;
            writeln!(file, "{}", words.word2)?;
            writeln!(file, "{}", words.word3)?;
        }
        None => write!(file, "failure")?,
    }
    Ok(())
}
