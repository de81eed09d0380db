//! Serializable session state.

use serde::{Deserialize, Serialize};

use crate::core::Status;

/// A point-in-time view of a session, for hosts that render state elsewhere.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: Status,
    pub round: u32,
    /// Secrets in round order. Hosts should not show these to the player.
    pub sequence: Vec<i32>,
    /// Next position to be guessed, while listening.
    pub cursor: Option<usize>,
    pub elapsed_ms: u64,
    pub next_deadline_ms: Option<u64>,
    pub seed: u64,
}

impl SessionSnapshot {
    /// Guesses still needed to finish the round, while listening.
    #[must_use]
    pub fn remaining_guesses(&self) -> Option<usize> {
        self.cursor
            .map(|cursor| self.sequence.len().saturating_sub(cursor))
    }
}
