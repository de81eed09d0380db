//! Timed announcement scheduling.
//!
//! The scheduler owns the session timeline and at most one pending timer.
//! A round's announcements form a chain:
//!
//! ```text
//! start ─pacing─▶ Announce(0) ─pacing─▶ Announce(1) … Announce(n-1) ─pacing─▶ StartListening
//! ```
//!
//! Each link is scheduled only when the previous one fires, so deliveries
//! never overlap. Cancelling drops the pending link and the rest of the chain
//! with it.
//!
//! Time does not pass on its own. Whoever owns the session moves the
//! timeline forward (manually, or through [`crate::runtime`]), and due timers
//! are handed back one at a time by [`AnnouncementScheduler::fire_due`].

mod announcer;

pub use announcer::{AnnouncementScheduler, PendingTimer, TimerAction, TimerId};
