//! Session status.

use serde::{Deserialize, Serialize};

/// Where a session is in its round cycle.
///
/// ```text
/// Initial ──run──▶ Speaking ──(announced)──▶ Listening ──check──▶ Victory | Defeat
///                      ▲                                            │
///                      └──────────────────run───────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// No game in progress.
    #[default]
    Initial,
    /// The sequence is being announced.
    Speaking,
    /// Waiting for the player's guesses.
    Listening,
    /// The player repeated the whole sequence.
    Victory,
    /// The player missed a secret.
    Defeat,
}

impl Status {
    /// True while a round is in progress (`run()` is rejected).
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(self, Status::Speaking | Status::Listening)
    }

    /// True once a round has been decided.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Status::Victory | Status::Defeat)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Status::Initial => "initial",
            Status::Speaking => "speaking",
            Status::Listening => "listening",
            Status::Victory => "victory",
            Status::Defeat => "defeat",
        };
        f.write_str(name)
    }
}
