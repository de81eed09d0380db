//! Incremental guess verification.
//!
//! A `GuessVerifier` is created when listening begins and consumes one guess
//! per call. It only remembers a cursor, never the guesses themselves.

use im::Vector;
use serde::{Deserialize, Serialize};

/// Outcome of a single guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Matches the current secret, more remain.
    Continue,
    /// Matches the final secret.
    Complete,
    /// Does not match the current secret.
    Incorrect,
}

impl Verdict {
    /// True for `Continue` and `Complete`.
    #[must_use]
    pub const fn is_right(self) -> bool {
        !matches!(self, Verdict::Incorrect)
    }
}

/// Result of `check()`, in the flag form hosts display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckAnswer {
    pub is_right: bool,
    pub is_victory: bool,
    pub is_defeat: bool,
}

impl From<Verdict> for CheckAnswer {
    fn from(verdict: Verdict) -> Self {
        Self {
            is_right: verdict.is_right(),
            is_victory: verdict == Verdict::Complete,
            is_defeat: verdict == Verdict::Incorrect,
        }
    }
}

/// Single-use comparator over one listening phase.
///
/// The cursor advances on every submission, whatever the outcome. Once it
/// passes the end or a guess misses, the session discards the verifier.
#[derive(Clone, Debug)]
pub struct GuessVerifier {
    sequence: Vector<i32>,
    cursor: usize,
}

impl GuessVerifier {
    /// Start verifying against `sequence` from position 0.
    #[must_use]
    pub fn new(sequence: Vector<i32>) -> Self {
        Self {
            sequence,
            cursor: 0,
        }
    }

    /// Position the next guess is compared against.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Secrets not yet matched.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.sequence.len().saturating_sub(self.cursor)
    }

    /// Compare `guess` with the secret under the cursor, then advance.
    ///
    /// Submitting past the end counts as `Incorrect`.
    pub fn submit(&mut self, guess: i32) -> Verdict {
        let expected = self.sequence.get(self.cursor).copied();
        if self.cursor < self.sequence.len() {
            self.cursor += 1;
        }

        match expected {
            Some(secret) if secret == guess => {
                if self.cursor == self.sequence.len() {
                    Verdict::Complete
                } else {
                    Verdict::Continue
                }
            }
            _ => Verdict::Incorrect,
        }
    }
}
