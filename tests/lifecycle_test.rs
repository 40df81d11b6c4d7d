use runnable_actor::mock::{Behavior, MockActor};
use runnable_actor::tracing::try_setup_tracing;
use runnable_actor::{Actor, LifecycleConfig, LifecycleError};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Short enough to keep the suite fast, long enough to tell apart from "instant".
const PING_TIMEOUT: Duration = Duration::from_millis(300);

fn quick_config() -> LifecycleConfig {
    LifecycleConfig::default().with_ping_timeout(PING_TIMEOUT)
}

/// The full scenario: ping, start, ping, stop, ping.
#[tokio::test]
async fn test_start_ping_stop_scenario() {
    let _ = try_setup_tracing();
    let actor = MockActor::new("scenario", Behavior::Echo);

    assert!(!actor.ping().await, "Fresh actor must not answer pings");

    actor.start().await.expect("Failed to start actor");
    assert!(actor.ping().await, "Started actor must answer pings");

    actor.stop().await;
    assert!(!actor.ping().await, "Stopped actor must not answer pings");
    assert!(!actor.is_running());
    assert_eq!(actor.pings_served(), 1);
}

#[tokio::test]
async fn test_new_actor_is_not_running() {
    let actor = MockActor::new("fresh", Behavior::Echo);
    assert!(!actor.is_running());
    assert!(!actor.ping().await);
    assert_eq!(actor.name(), "fresh");
}

/// A ping issued the moment `start` returns must always succeed.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_ping_immediately_after_start_never_races() {
    let actor = MockActor::new("eager", Behavior::Echo);

    for cycle in 0..100 {
        actor.start().await.expect("Failed to start actor");
        assert!(actor.is_running(), "Not running after start in cycle {cycle}");
        assert!(actor.ping().await, "Ping lost in cycle {cycle}");
        actor.stop().await;
        assert!(!actor.is_running(), "Still running after stop in cycle {cycle}");
    }

    assert_eq!(actor.pings_served(), 100);
}

#[tokio::test]
async fn test_double_start_runs_once() {
    let actor = MockActor::new("twice", Behavior::Echo);

    actor.start().await.expect("First start failed");
    actor.start().await.expect("Second start failed");
    assert!(actor.is_running());
    assert!(actor.ping().await);

    actor.stop().await;
    assert!(!actor.is_running());
    assert!(!actor.ping().await);
}

#[tokio::test]
async fn test_double_stop_does_not_hang() {
    let actor = MockActor::new("stop-twice", Behavior::Echo);
    actor.start().await.unwrap();

    tokio::time::timeout(Duration::from_secs(5), async {
        actor.stop().await;
        actor.stop().await;
    })
    .await
    .expect("Stopping twice hung");

    assert!(!actor.is_running());
}

#[tokio::test]
async fn test_stop_on_never_started_actor_is_noop() {
    let actor = MockActor::new("idle", Behavior::Echo);
    tokio::time::timeout(Duration::from_secs(1), actor.stop())
        .await
        .expect("Stop on an idle actor hung");
    assert!(!actor.is_running());
}

#[tokio::test]
async fn test_ping_when_stopped_returns_immediately() {
    let actor = MockActor::with_config("idle", Behavior::Echo, quick_config());

    let began = Instant::now();
    for _ in 0..1_000 {
        assert!(!actor.ping().await);
    }
    assert!(
        began.elapsed() < PING_TIMEOUT,
        "Pinging a stopped actor took {:?}",
        began.elapsed()
    );
}

/// A stalled body fails the probe after the timeout, not before and not never.
#[tokio::test]
async fn test_stalled_body_times_out() {
    let _ = try_setup_tracing();
    let actor = MockActor::with_config("stalled", Behavior::Stall, quick_config());
    actor.start().await.unwrap();

    let began = Instant::now();
    let alive = actor.ping().await;
    let elapsed = began.elapsed();

    assert!(!alive, "Stalled body must fail the probe");
    assert!(elapsed >= PING_TIMEOUT, "Gave up early after {elapsed:?}");
    assert!(elapsed < Duration::from_secs(5), "Took {elapsed:?} to give up");

    // Still honors stop even though it never answers pings.
    assert!(actor.is_running());
    actor.stop().await;
    assert!(!actor.is_running());
}

/// Every probe against a stalled body fails on its own timeout, even with a
/// stale request already sitting in the channel.
#[tokio::test]
async fn test_repeated_pings_against_stalled_body_stay_bounded() {
    let actor = MockActor::with_config("wedged", Behavior::Stall, quick_config());
    actor.start().await.unwrap();

    for _ in 0..3 {
        let began = Instant::now();
        assert!(!actor.ping().await);
        assert!(began.elapsed() < Duration::from_secs(5));
    }

    actor.stop().await;
}

#[tokio::test]
async fn test_wrong_echo_fails_probe() {
    let actor = MockActor::with_config("liar", Behavior::WrongEcho, quick_config());
    actor.start().await.unwrap();

    assert!(!actor.ping().await, "Wrong token must not count as alive");
    assert!(actor.is_running(), "A failed probe does not stop the actor");

    actor.stop().await;
    assert!(!actor.is_running());
}

#[tokio::test]
async fn test_body_exiting_before_started_fails_start() {
    let actor = MockActor::new("quitter", Behavior::ExitEarly);

    let result = actor.start().await;
    assert_eq!(result, Err(LifecycleError::EventLoopExited("quitter".to_string())));
    assert!(!actor.is_running());
    assert!(!actor.ping().await);

    // Nothing to stop, and stopping must not hang.
    tokio::time::timeout(Duration::from_secs(1), actor.stop())
        .await
        .expect("Stop after failed start hung");
}

#[tokio::test]
async fn test_body_panicking_before_started_fails_start() {
    let actor = MockActor::new("panicker", Behavior::Panic);

    let result = actor.start().await;
    assert_eq!(result, Err(LifecycleError::EventLoopPanicked("panicker".to_string())));
    assert!(!actor.is_running());
}

/// Each cycle gets fresh channels, so an actor can be restarted indefinitely.
#[tokio::test]
async fn test_restart_after_stop() {
    let actor = MockActor::new("phoenix", Behavior::Echo);

    for _ in 0..3 {
        actor.start().await.unwrap();
        assert!(actor.ping().await);
        assert!(actor.ping().await);
        actor.stop().await;
        assert!(!actor.ping().await);
    }

    assert_eq!(actor.pings_served(), 6);
}

/// Pings from several tasks against one shared actor are serialized, so every
/// one of them gets its own echo.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_pings_are_serialized() {
    let actor = Arc::new(MockActor::new("shared", Behavior::Echo));
    actor.start().await.unwrap();

    let mut handles = vec![];
    for _ in 0..20 {
        let actor = Arc::clone(&actor);
        handles.push(tokio::spawn(async move { actor.ping().await }));
    }

    for handle in handles {
        assert!(handle.await.unwrap(), "Concurrent ping failed");
    }

    actor.stop().await;
    assert_eq!(actor.pings_served(), 20);
}

/// Two controllers racing to stop the same actor both return, and the body is
/// stopped exactly once.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_stops_both_return() {
    let actor = Arc::new(MockActor::new("contested", Behavior::Echo));
    actor.start().await.unwrap();

    let first = tokio::spawn({
        let actor = Arc::clone(&actor);
        async move { actor.stop().await }
    });
    let second = tokio::spawn({
        let actor = Arc::clone(&actor);
        async move { actor.stop().await }
    });

    tokio::time::timeout(Duration::from_secs(5), async {
        first.await.unwrap();
        second.await.unwrap();
    })
    .await
    .expect("Concurrent stops hung");

    assert!(!actor.is_running());
    assert!(!actor.ping().await);
}

#[tokio::test]
async fn test_set_name_through_actor_trait() {
    let mut actor = MockActor::new("before", Behavior::Echo);
    actor.set_name("after".to_string());
    assert_eq!(actor.name(), "after");
    assert_eq!(actor.runnable().identity().name(), "after");
    assert_eq!(actor.behavior(), Behavior::Echo);
}

/// Runs one actor whose body leaves on its own right after starting, and
/// checks that the lifecycle still behaves: pings fail fast, stop returns,
/// and the actor can be started again.
async fn assert_recovers_from_body_that_left(behavior: Behavior) {
    let _ = try_setup_tracing();
    // Long enough that a failing ping can only be fast through the closed channel.
    let config = LifecycleConfig::default().with_ping_timeout(Duration::from_secs(5));
    let actor = MockActor::with_config("departed", behavior, config);

    for cycle in 0..2 {
        actor.start().await.expect("Failed to start actor");
        assert!(actor.is_running(), "Flag only changes through stop (cycle {cycle})");

        let began = Instant::now();
        assert!(!actor.ping().await, "Departed body must fail the probe");
        assert!(
            began.elapsed() < Duration::from_secs(1),
            "Ping against a departed body took {:?}",
            began.elapsed()
        );

        tokio::time::timeout(Duration::from_secs(5), actor.stop())
            .await
            .expect("Stop after the body left hung");
        assert!(!actor.is_running());
        assert!(!actor.ping().await);
    }
}

#[tokio::test]
async fn test_body_returning_after_start_is_acknowledged_by_stop() {
    assert_recovers_from_body_that_left(Behavior::QuitAfterStart).await;
}

#[tokio::test]
async fn test_body_panicking_after_start_is_reported_by_stop() {
    assert_recovers_from_body_that_left(Behavior::PanicAfterStart).await;
}
