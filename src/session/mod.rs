//! The game session facade.
//!
//! [`GameSession`] wires the range, RNG, sequence store, verifier and
//! announcement scheduler together behind three operations:
//!
//! | From | Call | To |
//! |---|---|---|
//! | Initial, Victory | `run()` | Speaking (one more secret) |
//! | Defeat | `run()` | Speaking (fresh game, one secret) |
//! | Speaking | timers drained | Listening |
//! | Listening | `check(right)` | Listening, or Victory on the last secret |
//! | Listening | `check(wrong)` | Defeat |
//! | any | `reset()` | Initial |

mod game;
mod snapshot;

pub use game::GameSession;
pub use snapshot::SessionSnapshot;
