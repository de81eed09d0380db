//! Notification callbacks.

use crate::core::Status;

/// Called with each secret as it is announced.
pub type AnnounceFn = Box<dyn FnMut(i32) + Send>;

/// Called with `(new_round, old_round)`.
pub type RoundChangeFn = Box<dyn FnMut(u32, u32) + Send>;

/// Called with `(new_status, old_status)`.
pub type StatusChangeFn = Box<dyn FnMut(Status, Status) + Send>;

/// Listener callbacks for one session.
///
/// The announce callback is required. Round and status callbacks default
/// to no-ops, resolved here so the session never checks for absence.
///
/// ```
/// use simon_says::events::Handlers;
///
/// let handlers = Handlers::new(|n| println!("simon says {n}"))
///     .on_round_change(|new, old| println!("round {old} -> {new}"));
/// ```
pub struct Handlers {
    announce: AnnounceFn,
    round_change: RoundChangeFn,
    status_change: StatusChangeFn,
}

impl Handlers {
    /// Create handlers with the required announce callback.
    pub fn new(on_announce: impl FnMut(i32) + Send + 'static) -> Self {
        Self {
            announce: Box::new(on_announce),
            round_change: Box::new(|_, _| {}),
            status_change: Box::new(|_, _| {}),
        }
    }

    /// Set the round-change callback.
    #[must_use]
    pub fn on_round_change(mut self, f: impl FnMut(u32, u32) + Send + 'static) -> Self {
        self.round_change = Box::new(f);
        self
    }

    /// Set the status-change callback.
    #[must_use]
    pub fn on_status_change(mut self, f: impl FnMut(Status, Status) + Send + 'static) -> Self {
        self.status_change = Box::new(f);
        self
    }

    pub(crate) fn announce(&mut self, secret: i32) {
        (self.announce)(secret);
    }

    pub(crate) fn round_changed(&mut self, new: u32, old: u32) {
        (self.round_change)(new, old);
    }

    pub(crate) fn status_changed(&mut self, new: Status, old: Status) {
        (self.status_change)(new, old);
    }
}

impl std::fmt::Debug for Handlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handlers").finish_non_exhaustive()
    }
}
