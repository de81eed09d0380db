//! Real-time driving of a session on tokio.
//!
//! A [`GameSession`](crate::GameSession) never waits on its own; its timers
//! fire when the owner moves the timeline. [`spawn`] hands the session to a
//! task that does this against the tokio clock, sleeping until the next
//! deadline and applying commands from [`SessionHandle`]s in arrival order.
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use simon_says::{runtime, GameSession, Handlers, SessionConfig};
//!
//! let session = GameSession::new(&SessionConfig::default(), Handlers::new(|n| println!("{n}")))?;
//! let (handle, _task) = runtime::spawn(session);
//!
//! handle.run().await?;
//! let session = handle.shutdown().await?;
//! println!("stopped at round {}", session.round());
//! # Ok(())
//! # }
//! ```

mod driver;

pub use driver::{spawn, DriverError, SessionHandle};
