//! # Lifecycle Demo
//!
//! Walks one actor through its whole lifecycle:
//! 1. Ping a fresh actor (fails, it is not running).
//! 2. Start it and ping again (succeeds).
//! 3. Stop it and ping once more (fails).
//!
//! The actor is a heartbeat that also does its own periodic work, showing how
//! a body mixes the control channels with other futures in one `select!`.

use async_trait::async_trait;
use runnable_actor::tracing::setup_tracing;
use runnable_actor::{Actor, ControlChannels, LifecycleConfig, LifecycleError, RunnableActor, Signal, Started};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, Instrument};

/// Ticks on an interval and answers pings until stopped.
struct Heartbeat {
    runnable: RunnableActor,
    beats: Arc<AtomicU64>,
}

impl Heartbeat {
    fn new(name: &str) -> Self {
        Self {
            runnable: RunnableActor::with_config(name, LifecycleConfig::from_env()),
            beats: Arc::new(AtomicU64::new(0)),
        }
    }

    fn beats(&self) -> u64 {
        self.beats.load(Ordering::SeqCst)
    }
}

async fn heartbeat_loop(mut channels: ControlChannels, started: Started, beats: Arc<AtomicU64>) {
    let mut ticker = tokio::time::interval(Duration::from_millis(50));
    started.signal();

    loop {
        tokio::select! {
            signal = channels.recv() => match signal {
                Signal::Ping(request) => request.echo(),
                Signal::Stop => return,
            },
            _ = ticker.tick() => {
                let n = beats.fetch_add(1, Ordering::SeqCst) + 1;
                debug!(beat = n, "Tick");
            }
        }
    }
}

#[async_trait]
impl Actor for Heartbeat {
    fn runnable(&self) -> &RunnableActor {
        &self.runnable
    }

    fn runnable_mut(&mut self) -> &mut RunnableActor {
        &mut self.runnable
    }

    async fn start(&self) -> Result<(), LifecycleError> {
        let beats = Arc::clone(&self.beats);
        self.runnable
            .start(move |channels, started| heartbeat_loop(channels, started, beats))
            .await
    }
}

#[tokio::main]
async fn main() -> Result<(), LifecycleError> {
    setup_tracing();

    let actor = Heartbeat::new("heartbeat");
    let span = tracing::info_span!("lifecycle", actor = %actor.name());

    async {
        let alive = actor.ping().await;
        info!(alive, "Pinged before start");

        actor.start().await?;
        let alive = actor.ping().await;
        info!(alive, "Pinged after start");

        tokio::time::sleep(Duration::from_millis(200)).await;

        actor.stop().await;
        let alive = actor.ping().await;
        info!(
            alive,
            running = actor.is_running(),
            beats = actor.beats(),
            "Pinged after stop"
        );
        Ok::<(), LifecycleError>(())
    }
    .instrument(span)
    .await
}
