//! # Runnable Actor
//!
//! [`RunnableActor`] is the lifecycle half of an actor: it owns the controller
//! side of the control channels and drives a caller-supplied execution body
//! through start, ping, and stop.
//!
//! ## State machine
//!
//! ```text
//!            start()                 started signal
//! Stopped ───────────► Starting ─────────────────────► Running
//!    ▲                                                     │
//!    │            stop acknowledged            stop()      │
//!    └──────────────────────────── Stopping ◄──────────────┘
//! ```
//!
//! Only `Stopped` and `Running` are observable from outside, through
//! [`RunnableActor::is_running`].
//!
//! ## Concurrency Model
//!
//! The running flag lives in [`ActorIdentity`] behind a read/write lock. The
//! current cycle's controller handles live behind an async mutex, held for the
//! whole of `start`, `stop`, and each ping round trip, so these three never
//! interleave on the channels. Under that mutex the flag is true exactly when a
//! cycle is stored.

use crate::channels::{
    control_channels, started_signal, ControlChannels, ControllerHandles, PingOutcome, PingToken,
    Started,
};
use crate::config::LifecycleConfig;
use crate::error::LifecycleError;
use crate::identity::ActorIdentity;
use std::future::Future;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Lifecycle states, used for logging transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

/// One start/stop cycle: the controller's channel half and the body's task.
#[derive(Debug)]
struct Cycle {
    handles: ControllerHandles,
    task: JoinHandle<()>,
}

/// Start/stop/ping machinery shared by every concrete actor.
///
/// Concrete actors hold one of these as a field and delegate to it, supplying
/// their execution body to [`start`](RunnableActor::start).
///
/// Dropping a running `RunnableActor` closes its stop-request channel, which
/// the body observes as [`Signal::Stop`](crate::Signal::Stop). Nothing waits for
/// the body to finish in that case.
///
/// ```rust
/// use runnable_actor::{RunnableActor, Signal};
///
/// #[tokio::main]
/// async fn main() {
///     let actor = RunnableActor::new("echo");
///     assert!(!actor.ping().await);
///
///     actor
///         .start(|mut channels, started| async move {
///             started.signal();
///             while let Signal::Ping(request) = channels.recv().await {
///                 request.echo();
///             }
///         })
///         .await
///         .unwrap();
///     assert!(actor.ping().await);
///
///     actor.stop().await;
///     assert!(!actor.ping().await);
///     assert!(!actor.is_running());
/// }
/// ```
#[derive(Debug)]
pub struct RunnableActor {
    identity: ActorIdentity,
    config: LifecycleConfig,
    cycle: Mutex<Option<Cycle>>,
}

impl Default for RunnableActor {
    fn default() -> Self {
        Self::new("")
    }
}

impl RunnableActor {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, LifecycleConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: LifecycleConfig) -> Self {
        Self {
            identity: ActorIdentity::new(name),
            config,
            cycle: Mutex::new(None),
        }
    }

    pub fn identity(&self) -> &ActorIdentity {
        &self.identity
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        self.identity.name()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.identity.set_name(name);
    }

    pub fn is_running(&self) -> bool {
        self.identity.is_running()
    }

    /// Spawns `body` on fresh channels and waits until it signals started.
    ///
    /// Does nothing if the actor is already running. When this returns `Ok`,
    /// the body is already listening, so an immediate [`ping`](Self::ping)
    /// succeeds.
    ///
    /// The body receives its [`ControlChannels`] and a [`Started`] signal. It
    /// must fire `Started` once it is ready, answer pings, and return promptly
    /// after a stop request. If it drops `Started` without firing it, or panics
    /// first, the actor stays stopped and an error is returned.
    pub async fn start<F, Fut>(&self, body: F) -> Result<(), LifecycleError>
    where
        F: FnOnce(ControlChannels, Started) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.is_running() {
            debug!(actor = %self.name(), "Already running");
            return Ok(());
        }

        let mut slot = self.cycle.lock().await;
        if slot.is_some() {
            debug!(actor = %self.name(), "Already running");
            return Ok(());
        }

        debug!(actor = %self.name(), state = ?LifecycleState::Starting, "Spawning event loop");
        let (handles, channels) = control_channels();
        let (started, ready) = started_signal();
        let task = tokio::spawn(body(channels, started));

        if ready.await.is_err() {
            // Make sure the body is gone before reporting why.
            let _ = handles.request_stop().await;
            let error = match task.await {
                Err(e) if e.is_panic() => LifecycleError::EventLoopPanicked(self.name().to_string()),
                _ => LifecycleError::EventLoopExited(self.name().to_string()),
            };
            warn!(actor = %self.name(), error = %error, "Start failed");
            return Err(error);
        }

        *slot = Some(Cycle { handles, task });
        self.identity.set_running(true);
        info!(actor = %self.name(), state = ?LifecycleState::Running, "Started");
        Ok(())
    }

    /// Asks the body to stop and waits until it has fully exited.
    ///
    /// Safe to call any number of times; only the first call on a running
    /// actor has an effect.
    ///
    /// There is no timeout: a body that never returns after the stop request
    /// keeps this future pending forever.
    pub async fn stop(&self) {
        if !self.is_running() {
            debug!(actor = %self.name(), "Already stopped");
            return;
        }

        let mut slot = self.cycle.lock().await;
        let Some(Cycle { handles, task }) = slot.take() else {
            debug!(actor = %self.name(), "Already stopped");
            return;
        };

        // Cleared before the stop request so no new ping gets past the fast path.
        self.identity.set_running(false);
        debug!(actor = %self.name(), state = ?LifecycleState::Stopping, "Requesting stop");

        let _ = handles.request_stop().await;
        if let Err(e) = task.await {
            if e.is_panic() {
                warn!(actor = %self.name(), "Event loop panicked");
            }
        }

        info!(actor = %self.name(), state = ?LifecycleState::Stopped, "Stopped");
    }

    /// Proves the body is alive with a random-token round trip.
    ///
    /// Returns `false` straight away when the actor is not running. Otherwise
    /// returns `true` only if the body echoes the exact token within
    /// [`LifecycleConfig::ping_timeout`]. A wrong token, a timeout, or an exited
    /// body all return `false`; deciding what repeated failures mean is up to
    /// the caller.
    pub async fn ping(&self) -> bool {
        if !self.is_running() {
            return false;
        }

        let slot = self.cycle.lock().await;
        let Some(cycle) = slot.as_ref() else {
            return false;
        };

        let token: PingToken = rand::random();
        match cycle.handles.ping(token, self.config.ping_timeout).await {
            PingOutcome::Echoed => true,
            PingOutcome::Mismatch(echo) => {
                warn!(actor = %self.name(), token, echo, "Ping answered with wrong token");
                false
            }
            PingOutcome::TimedOut => {
                debug!(
                    actor = %self.name(),
                    timeout_ms = self.config.ping_timeout.as_millis() as u64,
                    "Ping timed out"
                );
                false
            }
            PingOutcome::Closed => {
                debug!(actor = %self.name(), "Ping channel closed");
                false
            }
        }
    }
}
