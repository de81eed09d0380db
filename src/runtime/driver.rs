//! Tokio task that owns a session and drives its timeline in real time.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::core::GameError;
use crate::sequence::CheckAnswer;
use crate::session::{GameSession, SessionSnapshot};

/// Command queue depth per session.
const COMMAND_BUFFER: usize = 32;

/// Errors returned by [`SessionHandle`] calls.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DriverError {
    /// The driver task is gone (shut down, or a listener panicked).
    #[error("Session driver has stopped")]
    Closed,

    #[error(transparent)]
    Game(#[from] GameError),
}

enum Command {
    Run(oneshot::Sender<Result<(), GameError>>),
    Check(i32, oneshot::Sender<Option<CheckAnswer>>),
    Reset(oneshot::Sender<()>),
    Snapshot(oneshot::Sender<SessionSnapshot>),
    Shutdown(oneshot::Sender<GameSession>),
}

/// Cloneable handle to a session running on a tokio task.
///
/// Every call is queued and applied on the driver task, so a session is
/// never touched by two callers at once.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
}

impl SessionHandle {
    /// See [`GameSession::run`].
    pub async fn run(&self) -> Result<(), DriverError> {
        self.request(Command::Run).await??;
        Ok(())
    }

    /// See [`GameSession::check`].
    pub async fn check(&self, guess: i32) -> Result<Option<CheckAnswer>, DriverError> {
        self.request(|reply| Command::Check(guess, reply)).await
    }

    /// See [`GameSession::reset`].
    pub async fn reset(&self) -> Result<(), DriverError> {
        self.request(Command::Reset).await
    }

    /// Current state of the session.
    pub async fn snapshot(&self) -> Result<SessionSnapshot, DriverError> {
        self.request(Command::Snapshot).await
    }

    /// Stop the driver and take the session back.
    ///
    /// Other clones of this handle get [`DriverError::Closed`] afterwards.
    /// Timers due before the call are fired first; the pending one, if any,
    /// stays on the returned session.
    pub async fn shutdown(self) -> Result<GameSession, DriverError> {
        self.request(Command::Shutdown).await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, DriverError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| DriverError::Closed)?;
        response.await.map_err(|_| DriverError::Closed)
    }
}

/// Move `session` onto a new tokio task.
///
/// The session timeline is mapped onto `tokio::time::Instant`, so tests can
/// run it under a paused clock. The task ends on
/// [`SessionHandle::shutdown`], which receives the session, or once every
/// handle is dropped, in which case the join handle yields it.
///
/// Must be called from within a tokio runtime.
pub fn spawn(session: GameSession) -> (SessionHandle, JoinHandle<Option<GameSession>>) {
    let (commands, inbox) = mpsc::channel(COMMAND_BUFFER);
    let task = tokio::spawn(drive(session, inbox));
    (SessionHandle { commands }, task)
}

async fn drive(
    mut session: GameSession,
    mut inbox: mpsc::Receiver<Command>,
) -> Option<GameSession> {
    let clock = Clock::new(session.elapsed());
    debug!(elapsed = ?session.elapsed(), "Session driver started");

    let shutdown = loop {
        let deadline = session.next_deadline().map(|at| clock.instant_at(at));

        tokio::select! {
            command = inbox.recv() => {
                let Some(command) = command else { break None };
                session.advance_to(clock.now());
                if let Some(reply) = dispatch(&mut session, command) {
                    break Some(reply);
                }
            }
            () = wait_for(deadline) => {
                session.advance_to(clock.now());
            }
        }
    };

    debug!(status = %session.status(), round = session.round(), "Session driver stopped");
    match shutdown {
        // A caller that dropped the shutdown future hands the session to the join handle.
        Some(reply) => reply.send(session).err(),
        None => Some(session),
    }
}

/// Apply one command. Returns the reply channel when the command is a shutdown.
fn dispatch(session: &mut GameSession, command: Command) -> Option<oneshot::Sender<GameSession>> {
    // Callers that gave up on a reply are not an error.
    match command {
        Command::Run(reply) => {
            let _ = reply.send(session.run());
        }
        Command::Check(guess, reply) => {
            let _ = reply.send(session.check(guess));
        }
        Command::Reset(reply) => {
            session.reset();
            let _ = reply.send(());
        }
        Command::Snapshot(reply) => {
            let _ = reply.send(session.snapshot());
        }
        Command::Shutdown(reply) => return Some(reply),
    }
    None
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Maps the session timeline onto tokio time.
struct Clock {
    origin: Instant,
    base: Duration,
}

impl Clock {
    fn new(base: Duration) -> Self {
        Self {
            origin: Instant::now(),
            base,
        }
    }

    /// Current position on the session timeline.
    fn now(&self) -> Duration {
        self.base.saturating_add(self.origin.elapsed())
    }

    fn instant_at(&self, at: Duration) -> Instant {
        self.origin + at.saturating_sub(self.base)
    }
}
