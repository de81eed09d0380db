//! Real-time driver integration tests.
//!
//! Run under a paused tokio clock, so pacing is exact and the tests finish
//! instantly.

use std::time::Duration;

use simon_says::{runtime, GameSession, Handlers, SessionConfig, Status};
use tokio::sync::mpsc;
use tokio::time::Instant;

const PACE: Duration = Duration::from_millis(1000);

fn spawn(seed: u64) -> (runtime::SessionHandle, mpsc::UnboundedReceiver<(Instant, i32)>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let config = SessionConfig::new(0, 9).with_seed(seed);
    let session = GameSession::new(
        &config,
        Handlers::new(move |n| {
            let _ = tx.send((Instant::now(), n));
        }),
    )
    .unwrap();

    let (handle, _task) = runtime::spawn(session);
    (handle, rx)
}

/// Timer deadlines resolve to the millisecond, so allow one tick of slack.
fn assert_about(actual: Duration, expected: Duration) {
    let slack = Duration::from_millis(2);
    assert!(
        actual + slack >= expected && actual <= expected + slack,
        "expected about {expected:?}, got {actual:?}"
    );
}

/// Wait until the session reaches `status`, polling every quarter interval.
async fn wait_for(handle: &runtime::SessionHandle, status: Status) {
    for _ in 0..100 {
        if handle.snapshot().await.unwrap().status == status {
            return;
        }
        tokio::time::sleep(PACE / 4).await;
    }
    panic!("session never reached {status}");
}

/// Test two full rounds against the tokio clock.
#[tokio::test(start_paused = true)]
async fn test_two_rounds_in_real_time() {
    let (handle, mut heard) = spawn(42);
    let start = Instant::now();

    // Round 1: one announcement one interval in, listening one later.
    handle.run().await.unwrap();
    let (at, first) = heard.recv().await.unwrap();
    assert_about(at - start, PACE);
    assert!((0..=9).contains(&first));

    wait_for(&handle, Status::Listening).await;
    let answer = handle.check(first).await.unwrap().unwrap();
    assert!(answer.is_right && answer.is_victory && !answer.is_defeat);

    // Round 2: two announcements, in order, one interval apart.
    handle.run().await.unwrap();
    let round_start = Instant::now();
    let (at0, s0) = heard.recv().await.unwrap();
    let (at1, s1) = heard.recv().await.unwrap();

    assert_eq!(s0, first);
    assert_about(at0 - round_start, PACE);
    assert_about(at1 - at0, PACE);

    wait_for(&handle, Status::Listening).await;
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.sequence, vec![s0, s1]);
    assert_eq!(snapshot.round, 2);
}

/// Test the wrong-guess path through the driver.
#[tokio::test(start_paused = true)]
async fn test_defeat_in_real_time() {
    let (handle, mut heard) = spawn(8);

    handle.run().await.unwrap();
    let (_, secret) = heard.recv().await.unwrap();
    wait_for(&handle, Status::Listening).await;

    let answer = handle.check(secret + 1).await.unwrap().unwrap();
    assert!(answer.is_defeat);
    assert_eq!(handle.snapshot().await.unwrap().status, Status::Defeat);

    // Guesses after the round are ignored.
    assert_eq!(handle.check(secret).await.unwrap(), None);
}

/// Test that several handles share one session.
#[tokio::test(start_paused = true)]
async fn test_cloned_handles_share_session() {
    let (handle, _heard) = spawn(1);
    let other = handle.clone();

    handle.run().await.unwrap();
    assert_eq!(other.snapshot().await.unwrap().round, 1);

    other.reset().await.unwrap();
    assert_eq!(handle.snapshot().await.unwrap().status, Status::Initial);
}

/// Test that shutdown hands the session back while other handles live.
#[tokio::test(start_paused = true)]
async fn test_shutdown_with_live_clone() {
    let (handle, mut heard) = spawn(5);
    let other = handle.clone();

    handle.run().await.unwrap();
    let (_, secret) = heard.recv().await.unwrap();
    wait_for(&handle, Status::Listening).await;

    let mut session = handle.shutdown().await.unwrap();
    assert_eq!(session.status(), Status::Listening);
    assert_eq!(session.sequence().to_vec(), vec![secret]);
    assert_eq!(other.check(secret).await, Err(runtime::DriverError::Closed));

    // The returned session keeps working on its manual timeline.
    assert!(session.check(secret).unwrap().is_victory);
}
