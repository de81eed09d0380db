//! The game session state machine.

use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::core::{ConfigError, GameError, GameRng, IntegerRange, SessionConfig, Status};
use crate::events::Handlers;
use crate::schedule::{AnnouncementScheduler, TimerAction};
use crate::sequence::{CheckAnswer, GuessVerifier, SequenceStore, Verdict};

use super::snapshot::SessionSnapshot;

/// One Simon Says game.
///
/// Owns the status, round counter, secret sequence, verifier and the
/// announcement timer. All mutation goes through [`run`](Self::run),
/// [`check`](Self::check), [`reset`](Self::reset) and the `advance*`
/// methods that move the timeline and fire due timers.
///
/// ## Invariants
///
/// - `sequence().len() == round()` at every notification and return
/// - a verifier exists only while `Listening`
/// - a timer is pending only while `Speaking`
///
/// ## Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
/// use simon_says::{GameSession, Handlers, SessionConfig, Status};
///
/// let heard = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&heard);
///
/// let config = SessionConfig::new(0, 9).with_seed(42);
/// let mut game = GameSession::new(&config, Handlers::new(move |n| sink.lock().unwrap().push(n)))?;
///
/// game.run()?;
/// game.advance(Duration::from_millis(2000));
/// assert_eq!(game.status(), Status::Listening);
///
/// let secret = heard.lock().unwrap()[0];
/// let answer = game.check(secret).unwrap();
/// assert!(answer.is_victory);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct GameSession {
    range: IntegerRange,
    rng: GameRng,
    handlers: Handlers,

    status: Status,
    round: u32,
    sequence: SequenceStore,
    verifier: Option<GuessVerifier>,
    scheduler: AnnouncementScheduler,
}

impl GameSession {
    /// Build a session, validating the configuration.
    pub fn new(config: &SessionConfig, handlers: Handlers) -> Result<Self, ConfigError> {
        let range = config.validate()?;
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);

        debug!(%range, pacing = ?config.pacing(), seed = rng.seed(), "Session created");

        Ok(Self {
            range,
            rng,
            handlers,
            status: Status::Initial,
            round: 0,
            sequence: SequenceStore::new(),
            verifier: None,
            scheduler: AnnouncementScheduler::new(config.pacing()),
        })
    }

    // === Operations ===

    /// Start a new game or the next round.
    ///
    /// From `Initial` or `Victory` the sequence grows by one secret. From
    /// `Defeat` the previous game is discarded first. Announcements then
    /// start, paced by the configured interval.
    ///
    /// Rejected with [`GameError::SessionBusy`] while `Speaking` or
    /// `Listening`; nothing is changed in that case.
    pub fn run(&mut self) -> Result<(), GameError> {
        if self.status.is_busy() {
            warn!(status = %self.status, round = self.round, "Rejected run() during a round");
            return Err(GameError::SessionBusy {
                status: self.status,
            });
        }

        if self.status == Status::Defeat {
            self.clear_round_data();
        }

        let secret = self.range.sample(&mut self.rng);
        self.sequence.push(secret);
        debug!(round = self.round + 1, "Round started");
        self.set_round(self.round + 1);

        self.scheduler.start(self.sequence.len());
        self.set_status(Status::Speaking);
        Ok(())
    }

    /// Submit the player's next guess.
    ///
    /// Returns `None` unless the session is `Listening`; nothing is changed
    /// in that case.
    pub fn check(&mut self, guess: i32) -> Option<CheckAnswer> {
        self.submit(guess).map(CheckAnswer::from)
    }

    /// Like [`check`](Self::check), but returns the raw verdict.
    pub fn submit(&mut self, guess: i32) -> Option<Verdict> {
        if self.status != Status::Listening {
            trace!(guess, status = %self.status, "Ignored guess outside listening");
            return None;
        }

        let verifier = self.verifier.as_mut()?;
        let position = verifier.cursor();
        let verdict = verifier.submit(guess);
        debug!(guess, position, ?verdict, "Guess checked");

        match verdict {
            Verdict::Continue => {}
            Verdict::Complete => {
                self.verifier = None;
                info!(round = self.round, "Victory");
                self.set_status(Status::Victory);
            }
            Verdict::Incorrect => {
                self.verifier = None;
                info!(round = self.round, guess, position, "Defeat");
                self.set_status(Status::Defeat);
            }
        }

        Some(verdict)
    }

    /// Abandon the game and return to `Initial`.
    ///
    /// Cancels any pending announcement; nothing more is announced until
    /// the next [`run`](Self::run).
    pub fn reset(&mut self) {
        self.scheduler.cancel();
        self.clear_round_data();
        self.set_status(Status::Initial);
    }

    // === Time ===

    /// Move the timeline forward by `by`, firing every timer that falls due.
    ///
    /// Returns the number of timers fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        self.advance_to(self.elapsed().saturating_add(by))
    }

    /// Move the timeline to `at`, firing every timer due at or before it.
    ///
    /// Timers fire one at a time, in order, each with the timeline at its
    /// own due time. A target in the past only fires what is already due.
    pub fn advance_to(&mut self, at: Duration) -> usize {
        let mut fired = 0;
        while let Some(action) = self.scheduler.fire_due(at) {
            self.on_timer(action);
            fired += 1;
        }
        self.scheduler.settle(at);
        fired
    }

    /// Jump to the next deadline and fire that one timer.
    pub fn advance_to_next_deadline(&mut self) -> Option<TimerAction> {
        let due = self.scheduler.next_deadline()?;
        let action = self.scheduler.fire_due(due)?;
        self.on_timer(action);
        Some(action)
    }

    // === Accessors ===

    /// Current status.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Current round, 0 before the first `run()`.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Secrets of the current game.
    #[must_use]
    pub fn sequence(&self) -> &SequenceStore {
        &self.sequence
    }

    /// Verifier position while listening.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.verifier.as_ref().map(GuessVerifier::cursor)
    }

    /// The validated secret range.
    #[must_use]
    pub fn range(&self) -> IntegerRange {
        self.range
    }

    /// The pacing interval.
    #[must_use]
    pub fn pacing(&self) -> Duration {
        self.scheduler.pacing()
    }

    /// Seed of this session's RNG.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Position on the session timeline.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.scheduler.now()
    }

    /// When the pending timer falls due, if one is pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// True while announcements are in flight.
    #[must_use]
    pub fn is_announcing(&self) -> bool {
        self.scheduler.is_active()
    }

    /// Serializable view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            round: self.round,
            sequence: self.sequence.to_vec(),
            cursor: self.cursor(),
            elapsed_ms: millis(self.elapsed()),
            next_deadline_ms: self.next_deadline().map(millis),
            seed: self.seed(),
        }
    }

    // === Internals ===

    fn on_timer(&mut self, action: TimerAction) {
        // Timers only act while speaking.
        if self.status != Status::Speaking {
            return;
        }

        match action {
            TimerAction::Announce { index } => {
                if let Some(secret) = self.sequence.get(index) {
                    debug!(index, secret, "Announcing");
                    self.handlers.announce(secret);
                } else {
                    warn!(index, len = self.sequence.len(), "Announcement past end of sequence");
                }
            }
            TimerAction::StartListening => {
                self.verifier = Some(GuessVerifier::new(self.sequence.share()));
                self.set_status(Status::Listening);
            }
        }
    }

    fn clear_round_data(&mut self) {
        self.sequence.clear();
        self.verifier = None;
        self.set_round(0);
    }

    fn set_round(&mut self, round: u32) {
        let old = self.round;
        if old == round {
            return;
        }
        self.round = round;
        self.handlers.round_changed(round, old);
    }

    fn set_status(&mut self, status: Status) {
        let old = self.status;
        if old == status {
            return;
        }
        self.status = status;
        debug!(from = %old, to = %status, "Status changed");
        self.handlers.status_changed(status, old);
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    const PACE: Duration = Duration::from_millis(1000);

    fn session(seed: u64) -> (GameSession, Arc<Mutex<Vec<i32>>>) {
        let heard = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&heard);
        let config = SessionConfig::new(0, 9).with_seed(seed);
        let game = GameSession::new(&config, Handlers::new(move |n| sink.lock().unwrap().push(n)))
            .unwrap();
        (game, heard)
    }

    /// Play rounds until listening, answering every earlier round correctly.
    fn listen(game: &mut GameSession) {
        game.run().unwrap();
        while game.status() == Status::Speaking {
            game.advance_to_next_deadline();
        }
    }

    #[test]
    fn test_new_session_is_initial() {
        let (game, _) = session(1);
        assert_eq!(game.status(), Status::Initial);
        assert_eq!(game.round(), 0);
        assert!(game.sequence().is_empty());
        assert_eq!(game.cursor(), None);
        assert_eq!(game.pacing(), PACE);
    }

    #[test]
    fn test_invalid_config_fails_construction() {
        let config = SessionConfig::new(3, 1);
        let err = GameSession::new(&config, Handlers::new(|_| {})).unwrap_err();
        assert_eq!(err, ConfigError::InvertedRange { min: 3, max: 1 });
    }

    #[test]
    fn test_run_starts_speaking() {
        let (mut game, heard) = session(1);
        game.run().unwrap();

        assert_eq!(game.status(), Status::Speaking);
        assert_eq!(game.round(), 1);
        assert_eq!(game.sequence().len(), 1);
        assert!(heard.lock().unwrap().is_empty());
        assert_eq!(game.next_deadline(), Some(PACE));
    }

    #[test]
    fn test_run_rejected_while_busy() {
        let (mut game, _) = session(1);
        game.run().unwrap();

        assert_eq!(
            game.run(),
            Err(GameError::SessionBusy { status: Status::Speaking })
        );
        assert_eq!(game.round(), 1);

        game.advance(PACE * 2);
        assert_eq!(
            game.run(),
            Err(GameError::SessionBusy { status: Status::Listening })
        );
        assert_eq!(game.sequence().len(), 1);
    }

    #[test]
    fn test_listening_after_one_more_interval() {
        let (mut game, heard) = session(1);
        game.run().unwrap();

        assert_eq!(game.advance(PACE), 1);
        assert_eq!(heard.lock().unwrap().len(), 1);
        assert_eq!(game.status(), Status::Speaking);

        assert_eq!(game.advance(PACE), 1);
        assert_eq!(game.status(), Status::Listening);
        assert_eq!(game.cursor(), Some(0));
    }

    #[test]
    fn test_check_outside_listening_is_ignored() {
        let (mut game, _) = session(1);
        assert_eq!(game.check(0), None);

        game.run().unwrap();
        let before = game.snapshot();
        assert_eq!(game.check(0), None);
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_victory_then_next_round_extends() {
        let (mut game, _) = session(3);
        listen(&mut game);

        let secret = game.sequence().get(0).unwrap();
        assert_eq!(
            game.check(secret),
            Some(CheckAnswer { is_right: true, is_victory: true, is_defeat: false })
        );
        assert_eq!(game.status(), Status::Victory);
        assert_eq!(game.cursor(), None);

        game.run().unwrap();
        assert_eq!(game.round(), 2);
        assert_eq!(game.sequence().get(0), Some(secret));
        assert_eq!(game.sequence().len(), 2);
    }

    #[test]
    fn test_defeat_then_run_restarts() {
        let (mut game, _) = session(5);
        listen(&mut game);

        let wrong = game.sequence().get(0).unwrap() + 1;
        assert_eq!(game.submit(wrong), Some(Verdict::Incorrect));
        assert_eq!(game.status(), Status::Defeat);
        assert_eq!(game.round(), 1);

        game.run().unwrap();
        assert_eq!(game.round(), 1);
        assert_eq!(game.sequence().len(), 1);
        assert_eq!(game.status(), Status::Speaking);
    }

    #[test]
    fn test_reset_cancels_announcements() {
        let (mut game, heard) = session(1);
        game.run().unwrap();
        game.reset();

        assert_eq!(game.next_deadline(), None);
        assert_eq!(game.advance(PACE * 10), 0);
        assert!(heard.lock().unwrap().is_empty());
        assert_eq!(game.status(), Status::Initial);
        assert_eq!(game.round(), 0);
    }

    #[test]
    fn test_announcement_past_sequence_end_is_skipped() {
        let (mut game, heard) = session(1);
        game.run().unwrap();
        game.sequence.clear();

        assert_eq!(game.advance(PACE), 1);
        assert!(heard.lock().unwrap().is_empty());

        game.advance(PACE);
        assert_eq!(game.status(), Status::Listening);
    }

    #[test]
    fn test_advance_to_past_only_fires_due() {
        let (mut game, _) = session(1);
        game.advance(Duration::from_millis(500));
        game.run().unwrap();

        assert_eq!(game.next_deadline(), Some(Duration::from_millis(1500)));
        assert_eq!(game.advance_to(Duration::from_millis(100)), 0);
        assert_eq!(game.elapsed(), Duration::from_millis(500));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let (mut a, _) = session(99);
        let (mut b, _) = session(99);

        for _ in 0..5 {
            listen(&mut a);
            listen(&mut b);
            for secret in a.sequence().to_vec() {
                a.check(secret);
                b.check(secret);
            }
        }

        assert_eq!(a.sequence(), b.sequence());
        assert_eq!(a.status(), Status::Victory);
    }
}
