//! Error types for session construction and control.

use thiserror::Error;

use super::status::Status;

/// Invalid session configuration. Raised once, at construction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid integer range: min {min} is greater than max {max}")]
    InvertedRange { min: i32, max: i32 },

    #[error("Pacing interval must be positive")]
    ZeroPacing,
}

/// Errors returned by session operations.
///
/// Configuration problems are reported by construction as [`ConfigError`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// `run()` while a round is being announced or answered.
    #[error("Cannot start a round while {status}")]
    SessionBusy { status: Status },
}
