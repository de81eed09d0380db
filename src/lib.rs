//! # simon-says
//!
//! The engine of a "Simon Says" memory game: grow a secret number sequence
//! round by round, announce it with timed pacing, then check the player's
//! replay one guess at a time.
//!
//! ## Design Principles
//!
//! 1. **Host-driven**: The engine does no I/O. Audio, key layout and
//!    rendering belong to the host, which listens through [`Handlers`].
//!
//! 2. **Explicit time**: Announcements are timers on a session timeline.
//!    Hosts move it forward themselves or hand the session to
//!    [`runtime::spawn`], which follows the tokio clock.
//!
//! 3. **Deterministic**: Given a seed, a session produces the same secrets,
//!    which keeps tests and replays exact.
//!
//! ## Modules
//!
//! - `core`: Status, integer ranges, RNG, configuration, errors
//! - `events`: Listener callbacks
//! - `sequence`: Secret storage and incremental guess verification
//! - `schedule`: The paced announcement timer chain
//! - `session`: The `GameSession` state machine
//! - `runtime`: Tokio driver and `SessionHandle`

pub mod core;
pub mod events;
pub mod runtime;
pub mod schedule;
pub mod sequence;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, GameError, GameRng, IntegerRange, NumberRange, SessionConfig, Status,
};

pub use crate::events::Handlers;

pub use crate::sequence::{CheckAnswer, GuessVerifier, SequenceStore, Verdict};

pub use crate::schedule::{AnnouncementScheduler, TimerAction};

pub use crate::session::{GameSession, SessionSnapshot};

pub use crate::runtime::{DriverError, SessionHandle};
