//! # Runnable Actor
//!
//! > **A start/ping/stop lifecycle primitive for Tokio actors.**
//!
//! This crate is the foundation an actor system is built on, not the system
//! itself. It gives a unit of concurrent work a deterministic lifecycle:
//!
//! - **start** spawns the actor's execution body and returns only once the body
//!   is listening.
//! - **ping** proves the body is still scheduled and responsive with a
//!   random-token round trip bounded by a timeout.
//! - **stop** asks the body to exit and returns only once it has.
//!
//! Mailboxes, routing, supervision, and restart policies are deliberately left
//! to the layers above.
//!
//! ## Module Tour
//!
//! 1. **[`identity`]**: name plus the lock-guarded running flag.
//! 2. **[`channels`]**: the per-cycle ping, stop-request, and stop-acknowledged
//!    channels, split into the body's half ([`ControlChannels`]) and the
//!    controller's half.
//! 3. **[`runnable`]**: [`RunnableActor`], the state machine driving a body
//!    through its cycle.
//! 4. **[`actor`]**: the [`Actor`] trait concrete actors implement by
//!    delegating to a `RunnableActor` field.
//! 5. **[`mock`]**: scripted execution bodies for testing the edge cases.
//!
//! ## The Execution Body Contract
//!
//! A body is any `FnOnce(ControlChannels, Started) -> impl Future<Output = ()>`.
//! It must:
//!
//! 1. Fire [`Started`] once it is ready to serve.
//! 2. Echo every [`Signal::Ping`] it receives.
//! 3. Return promptly on [`Signal::Stop`].
//!
//! Acknowledging the stop is automatic: it fires when the body's
//! `ControlChannels` is dropped, on every exit path.
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod actor;
pub mod channels;
pub mod config;
pub mod error;
pub mod identity;
pub mod mock;
pub mod runnable;
pub mod tracing;

// Re-export core types for convenience
pub use actor::Actor;
pub use channels::{ControlChannels, PingRequest, PingToken, Signal, Started};
pub use config::LifecycleConfig;
pub use error::LifecycleError;
pub use identity::ActorIdentity;
pub use runnable::{LifecycleState, RunnableActor};
