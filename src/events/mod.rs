//! Listener notifications.
//!
//! The session reports three kinds of events to its host:
//! - each announced secret
//! - round counter changes
//! - status transitions
//!
//! Notifications are synchronous and fire after the mutation they describe
//! has been committed. A panicking listener unwinds through the operation
//! that triggered it; the session does not catch it.

mod handlers;

pub use handlers::{AnnounceFn, Handlers, RoundChangeFn, StatusChangeFn};
