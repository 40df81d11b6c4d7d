//! # Actor Identity
//!
//! The leaf of the lifecycle stack: a name plus the `running` flag. The flag is
//! the only shared mutable state in the whole primitive, so it lives behind a
//! read/write lock and is never touched except through [`ActorIdentity::is_running`]
//! and the crate-private setter.

use std::sync::{PoisonError, RwLock};

/// Name and running flag of one actor.
#[derive(Debug, Default)]
pub struct ActorIdentity {
    name: String,
    running: RwLock<bool>,
}

impl ActorIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            running: RwLock::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Overwrites the name. Requires exclusive access, so renames are
    /// serialized by ownership rather than by the lock.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Whether the actor's channels are live. Any number of readers may call
    /// this concurrently.
    pub fn is_running(&self) -> bool {
        // A poisoned lock still holds a plain bool, which cannot be torn.
        *self.running.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn set_running(&self, running: bool) {
        *self.running.write().unwrap_or_else(PoisonError::into_inner) = running;
    }
}
