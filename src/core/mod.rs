//! Core engine types: status, ranges, RNG, configuration, errors.
//!
//! These are the leaf building blocks; nothing here knows about rounds,
//! timers or notifications.

pub mod config;
pub mod error;
pub mod range;
pub mod rng;
pub mod status;

pub use config::{NumberRange, SessionConfig, DEFAULT_PACING_MS};
pub use error::{ConfigError, GameError};
pub use range::IntegerRange;
pub use rng::GameRng;
pub use status::Status;
