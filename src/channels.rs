//! # Control Channels
//!
//! Every start/stop cycle gets a fresh set of signaling channels, split into two
//! halves:
//!
//! - [`ControlChannels`] is moved into the execution body. It receives pings and
//!   the stop request, and acknowledges the stop when it is dropped.
//! - [`ControllerHandles`] stays inside [`RunnableActor`](crate::RunnableActor)
//!   and is the only writer of pings and of the stop request.
//!
//! Each direction has exactly one writer and one reader. Because both halves are
//! created together and handed out by value, a body can never hold a handle from
//! a previous cycle.
//!
//! ## Event loop shape
//!
//! ```rust
//! use runnable_actor::{ControlChannels, Signal, Started};
//!
//! async fn event_loop(mut channels: ControlChannels, started: Started) {
//!     started.signal();
//!     loop {
//!         match channels.recv().await {
//!             Signal::Ping(request) => request.echo(),
//!             Signal::Stop => return,
//!         }
//!     }
//!     // `channels` is dropped here, which acknowledges the stop.
//! }
//! ```

use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// Value carried by a liveness probe.
pub type PingToken = u64;

/// A liveness probe waiting for its echo.
#[derive(Debug)]
pub struct PingRequest {
    token: PingToken,
    reply: oneshot::Sender<PingToken>,
}

impl PingRequest {
    pub fn token(&self) -> PingToken {
        self.token
    }

    /// Sends the received token straight back. This is the only correct reply.
    pub fn echo(self) {
        let token = self.token;
        self.reply(token);
    }

    /// Replies with an arbitrary token. The controller treats anything other
    /// than the original token as a failed probe.
    pub fn reply(self, token: PingToken) {
        // The controller may already have timed out and gone away.
        let _ = self.reply.send(token);
    }
}

/// What the event loop should do next.
#[derive(Debug)]
pub enum Signal {
    Ping(PingRequest),
    Stop,
}

/// One-shot signal the body fires once it holds its channels and is ready.
///
/// Dropping it without calling [`Started::signal`] tells `start` that the body
/// gave up before it began serving.
#[derive(Debug)]
pub struct Started(oneshot::Sender<()>);

impl Started {
    pub fn signal(self) {
        let _ = self.0.send(());
    }
}

/// Fires the stop acknowledgement exactly once, on whatever path drops it.
#[derive(Debug)]
struct StopAck(Option<oneshot::Sender<()>>);

impl Drop for StopAck {
    fn drop(&mut self) {
        if let Some(ack) = self.0.take() {
            let _ = ack.send(());
        }
    }
}

/// The execution body's half of one cycle's channels.
///
/// Holding this value is holding the obligation to acknowledge the stop: the
/// acknowledgement fires when it is dropped, including on early returns and
/// panics.
#[derive(Debug)]
pub struct ControlChannels {
    pings: mpsc::Receiver<PingRequest>,
    stop: oneshot::Receiver<()>,
    stop_requested: bool,
    _ack: StopAck,
}

impl ControlChannels {
    /// Waits for the next ping or for the stop request.
    ///
    /// A pending stop request wins over a pending ping. Once the stop has been
    /// observed every further call returns [`Signal::Stop`] immediately. The
    /// future is cancel safe, so it can sit in a `tokio::select!` next to the
    /// body's own work.
    pub async fn recv(&mut self) -> Signal {
        if self.stop_requested {
            return Signal::Stop;
        }

        tokio::select! {
            biased;
            // Err means the controller was dropped, which is also a stop.
            _ = &mut self.stop => {
                self.stop_requested = true;
                Signal::Stop
            }
            Some(request) = self.pings.recv() => Signal::Ping(request),
        }
    }

    /// Waits for the stop request only, leaving pings unanswered.
    pub async fn wait_for_stop(&mut self) {
        if self.stop_requested {
            return;
        }
        let _ = (&mut self.stop).await;
        self.stop_requested = true;
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested
    }
}

/// The controller's half of one cycle's channels.
#[derive(Debug)]
pub(crate) struct ControllerHandles {
    pings: mpsc::Sender<PingRequest>,
    stop: oneshot::Sender<()>,
    stopped: oneshot::Receiver<()>,
}

/// Result of one ping round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PingOutcome {
    Echoed,
    Mismatch(PingToken),
    TimedOut,
    Closed,
}

impl ControllerHandles {
    /// Sends `token` and waits for the echo. The timeout covers the whole round
    /// trip, so a body that never reads the ping channel cannot block the caller.
    pub(crate) async fn ping(&self, token: PingToken, timeout: Duration) -> PingOutcome {
        let round_trip = async {
            let (reply, echoed) = oneshot::channel();
            if self.pings.send(PingRequest { token, reply }).await.is_err() {
                return Err(PingOutcome::Closed);
            }
            echoed.await.map_err(|_| PingOutcome::Closed)
        };

        match tokio::time::timeout(timeout, round_trip).await {
            Ok(Ok(echo)) if echo == token => PingOutcome::Echoed,
            Ok(Ok(echo)) => PingOutcome::Mismatch(echo),
            Ok(Err(outcome)) => outcome,
            Err(_) => PingOutcome::TimedOut,
        }
    }

    /// Fires the stop request and hands back the acknowledgement to wait on.
    ///
    /// Consumes the handles, so the request can only ever be fired once per cycle.
    pub(crate) fn request_stop(self) -> oneshot::Receiver<()> {
        // Never blocks: the receiver is either waiting or already gone.
        let _ = self.stop.send(());
        self.stopped
    }
}

/// Allocates a fresh set of channels for one start/stop cycle.
pub(crate) fn control_channels() -> (ControllerHandles, ControlChannels) {
    // mpsc needs a capacity of at least one; the controller lock keeps at most
    // one request in flight, which gives the same lockstep as a rendezvous.
    let (ping_tx, ping_rx) = mpsc::channel(1);
    let (stop_tx, stop_rx) = oneshot::channel();
    let (ack_tx, ack_rx) = oneshot::channel();

    let controller = ControllerHandles {
        pings: ping_tx,
        stop: stop_tx,
        stopped: ack_rx,
    };
    let event_loop = ControlChannels {
        pings: ping_rx,
        stop: stop_rx,
        stop_requested: false,
        _ack: StopAck(Some(ack_tx)),
    };
    (controller, event_loop)
}

/// Allocates the started signal and the receiver `start` waits on.
pub(crate) fn started_signal() -> (Started, oneshot::Receiver<()>) {
    let (tx, rx) = oneshot::channel();
    (Started(tx), rx)
}
