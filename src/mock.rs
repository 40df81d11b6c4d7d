//! # Scripted Event Loops for Testing
//!
//! Lifecycle bugs live in the edge cases: bodies that stall, lie, or quit.
//! Those are awkward to provoke with a real actor, so this module ships ready
//! made execution bodies plus a [`MockActor`] that runs one of them.
//!
//! | Behavior | Pings | Stop | Start |
//! |----------|-------|------|-------|
//! | [`Echo`](Behavior::Echo) | echoed | honored | ok |
//! | [`Stall`](Behavior::Stall) | never read | honored | ok |
//! | [`WrongEcho`](Behavior::WrongEcho) | answered with a different token | honored | ok |
//! | [`ExitEarly`](Behavior::ExitEarly) | - | - | fails, body returns |
//! | [`Panic`](Behavior::Panic) | - | - | fails, body panics |
//! | [`QuitAfterStart`](Behavior::QuitAfterStart) | channel closed | acknowledged | ok, body returns |
//! | [`PanicAfterStart`](Behavior::PanicAfterStart) | channel closed | acknowledged | ok, body panics |
//!
//! ```rust
//! use runnable_actor::mock::{Behavior, MockActor};
//! use runnable_actor::Actor;
//!
//! #[tokio::main]
//! async fn main() {
//!     let actor = MockActor::new("mock", Behavior::Echo);
//!     actor.start().await.unwrap();
//!     assert!(actor.ping().await);
//!     actor.stop().await;
//!     assert_eq!(actor.pings_served(), 1);
//! }
//! ```

use crate::actor::Actor;
use crate::channels::{ControlChannels, Signal, Started};
use crate::config::LifecycleConfig;
use crate::error::LifecycleError;
use crate::runnable::RunnableActor;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Echoes every ping until stopped, counting the pings it served.
pub async fn echo_loop(mut channels: ControlChannels, started: Started, served: Arc<AtomicUsize>) {
    started.signal();
    while let Signal::Ping(request) = channels.recv().await {
        request.echo();
        served.fetch_add(1, Ordering::SeqCst);
    }
}

/// Signals started, then ignores pings until stopped.
pub async fn stalled_loop(mut channels: ControlChannels, started: Started) {
    started.signal();
    channels.wait_for_stop().await;
}

/// Answers every ping with a token other than the one it received.
pub async fn wrong_echo_loop(mut channels: ControlChannels, started: Started) {
    started.signal();
    while let Signal::Ping(request) = channels.recv().await {
        let wrong = request.token().wrapping_add(1);
        request.reply(wrong);
    }
}

/// Returns without ever signalling started.
pub async fn early_exit_loop(_channels: ControlChannels, _started: Started) {}

/// Panics without ever signalling started.
pub async fn panicking_loop(_channels: ControlChannels, _started: Started) {
    panic!("scripted event loop panic");
}

/// Signals started, then returns on its own without waiting for a stop.
pub async fn quit_after_start_loop(channels: ControlChannels, started: Started) {
    started.signal();
    drop(channels);
}

/// Signals started, then panics while still holding its channels.
pub async fn panic_after_start_loop(channels: ControlChannels, started: Started) {
    started.signal();
    let _channels = channels;
    panic!("scripted event loop panic after start");
}

/// Which scripted event loop a [`MockActor`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Echo,
    Stall,
    WrongEcho,
    ExitEarly,
    Panic,
    QuitAfterStart,
    PanicAfterStart,
}

/// An [`Actor`] whose execution body is one of the scripted loops above.
#[derive(Debug)]
pub struct MockActor {
    runnable: RunnableActor,
    behavior: Behavior,
    served: Arc<AtomicUsize>,
}

impl MockActor {
    pub fn new(name: impl Into<String>, behavior: Behavior) -> Self {
        Self::with_config(name, behavior, LifecycleConfig::default())
    }

    pub fn with_config(name: impl Into<String>, behavior: Behavior, config: LifecycleConfig) -> Self {
        Self {
            runnable: RunnableActor::with_config(name, config),
            behavior,
            served: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    /// Pings answered correctly across all cycles. Only [`Behavior::Echo`]
    /// ever increments this.
    pub fn pings_served(&self) -> usize {
        self.served.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Actor for MockActor {
    fn runnable(&self) -> &RunnableActor {
        &self.runnable
    }

    fn runnable_mut(&mut self) -> &mut RunnableActor {
        &mut self.runnable
    }

    async fn start(&self) -> Result<(), LifecycleError> {
        match self.behavior {
            Behavior::Echo => {
                let served = Arc::clone(&self.served);
                self.runnable
                    .start(move |channels, started| echo_loop(channels, started, served))
                    .await
            }
            Behavior::Stall => self.runnable.start(stalled_loop).await,
            Behavior::WrongEcho => self.runnable.start(wrong_echo_loop).await,
            Behavior::ExitEarly => self.runnable.start(early_exit_loop).await,
            Behavior::Panic => self.runnable.start(panicking_loop).await,
            Behavior::QuitAfterStart => self.runnable.start(quit_after_start_loop).await,
            Behavior::PanicAfterStart => self.runnable.start(panic_after_start_loop).await,
        }
    }
}
