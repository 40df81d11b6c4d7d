//! # Actor Trait
//!
//! The interface every concrete actor exposes. Concrete actors own a
//! [`RunnableActor`] field and hand it out through [`Actor::runnable`]; the
//! trait then provides everything except `start`, which is where each actor
//! supplies its own execution body.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use runnable_actor::{Actor, ControlChannels, LifecycleError, RunnableActor, Signal, Started};
//!
//! struct Echo {
//!     runnable: RunnableActor,
//! }
//!
//! async fn event_loop(mut channels: ControlChannels, started: Started) {
//!     started.signal();
//!     while let Signal::Ping(request) = channels.recv().await {
//!         request.echo();
//!     }
//! }
//!
//! #[async_trait]
//! impl Actor for Echo {
//!     fn runnable(&self) -> &RunnableActor {
//!         &self.runnable
//!     }
//!
//!     fn runnable_mut(&mut self) -> &mut RunnableActor {
//!         &mut self.runnable
//!     }
//!
//!     async fn start(&self) -> Result<(), LifecycleError> {
//!         self.runnable.start(event_loop).await
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let echo = Echo { runnable: RunnableActor::new("echo") };
//!     echo.start().await.unwrap();
//!     assert!(echo.ping().await);
//!     echo.stop().await;
//! }
//! ```

use crate::error::LifecycleError;
use crate::runnable::RunnableActor;
use async_trait::async_trait;

/// A named unit of concurrent work that can be started, pinged, and stopped.
#[async_trait]
pub trait Actor: Send + Sync {
    /// Access the lifecycle machinery this actor delegates to.
    fn runnable(&self) -> &RunnableActor;

    fn runnable_mut(&mut self) -> &mut RunnableActor;

    /// Spawn this actor's execution body via [`RunnableActor::start`].
    async fn start(&self) -> Result<(), LifecycleError>;

    fn name(&self) -> &str {
        self.runnable().name()
    }

    fn set_name(&mut self, name: String) {
        self.runnable_mut().set_name(name);
    }

    fn is_running(&self) -> bool {
        self.runnable().is_running()
    }

    async fn stop(&self) {
        self.runnable().stop().await;
    }

    async fn ping(&self) -> bool {
        self.runnable().ping().await
    }
}
