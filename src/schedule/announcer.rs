//! The announcement timer chain.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identifier of a scheduled timer, unique within one scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// What happens when a timer fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerAction {
    /// Deliver the secret at this position of the sequence.
    Announce { index: usize },
    /// The last announcement has been given its pause; start listening.
    StartListening,
}

/// The single timer a scheduler may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    /// Absolute due time on the session timeline.
    pub due: Duration,
    pub action: TimerAction,
}

/// Paces the delivery of one round's announcements.
#[derive(Clone, Debug)]
pub struct AnnouncementScheduler {
    pacing: Duration,
    /// Current position on the timeline.
    now: Duration,
    /// Number of secrets in the chain being announced.
    total: usize,
    pending: Option<PendingTimer>,
    next_id: u64,
}

impl AnnouncementScheduler {
    /// Create an idle scheduler at time zero.
    #[must_use]
    pub fn new(pacing: Duration) -> Self {
        Self {
            pacing,
            now: Duration::ZERO,
            total: 0,
            pending: None,
            next_id: 0,
        }
    }

    /// The pacing interval.
    #[must_use]
    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    /// Current position on the timeline.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// The pending timer, if any.
    #[must_use]
    pub fn pending(&self) -> Option<&PendingTimer> {
        self.pending.as_ref()
    }

    /// Due time of the pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.map(|timer| timer.due)
    }

    /// True while a chain is in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.pending.is_some()
    }

    /// Begin announcing a sequence of `total` secrets.
    ///
    /// Any chain already in flight is cancelled first.
    pub fn start(&mut self, total: usize) {
        self.cancel();
        self.total = total;

        let first = if total == 0 {
            TimerAction::StartListening
        } else {
            TimerAction::Announce { index: 0 }
        };
        self.schedule(first);
    }

    /// Drop the pending timer. Returns it if there was one.
    pub fn cancel(&mut self) -> Option<PendingTimer> {
        let cancelled = self.pending.take();
        if let Some(timer) = &cancelled {
            debug!(timer = %timer.id, action = ?timer.action, "Timer cancelled");
        }
        cancelled
    }

    /// Fire the pending timer if it is due at or before `until`.
    ///
    /// Moves the timeline to the timer's due time and schedules the next
    /// link of the chain before returning the fired action. Call repeatedly
    /// until `None` to drain everything due.
    pub fn fire_due(&mut self, until: Duration) -> Option<TimerAction> {
        let timer = self.pending.filter(|timer| timer.due <= until)?;
        self.pending = None;
        self.now = self.now.max(timer.due);

        debug!(timer = %timer.id, action = ?timer.action, at = ?timer.due, "Timer fired");

        match timer.action {
            TimerAction::Announce { index } if index + 1 < self.total => {
                self.schedule(TimerAction::Announce { index: index + 1 });
            }
            TimerAction::Announce { .. } => self.schedule(TimerAction::StartListening),
            TimerAction::StartListening => {}
        }

        Some(timer.action)
    }

    /// Move the timeline to `at` without firing anything.
    ///
    /// The timeline never moves backwards.
    pub fn settle(&mut self, at: Duration) {
        self.now = self.now.max(at);
    }

    fn schedule(&mut self, action: TimerAction) {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let due = self.now.saturating_add(self.pacing);
        debug!(timer = %id, ?action, ?due, "Timer scheduled");

        self.pending = Some(PendingTimer { id, due, action });
    }
}
