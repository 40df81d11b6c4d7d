//! # Lifecycle Errors
//!
//! The lifecycle primitive reports almost everything as a boolean or a silent
//! no-op (double start, double stop, ping while stopped). The one failure a
//! caller has to react to is an event loop that never came up, and that is
//! what [`LifecycleError`] describes.

/// Errors raised while bringing an actor's event loop up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    /// The event loop returned before it signalled that it had started.
    #[error("Event loop for actor '{0}' exited before signalling started")]
    EventLoopExited(String),

    /// The event loop panicked before it signalled that it had started.
    #[error("Event loop for actor '{0}' panicked before signalling started")]
    EventLoopPanicked(String),
}
