//! # Lifecycle Configuration
//!
//! Tunables for [`RunnableActor`](crate::RunnableActor). There is only one knob
//! today: how long a liveness probe waits for its echo before it gives up.

use std::time::Duration;
use tracing::warn;

/// Environment variable read by [`LifecycleConfig::from_env`], in milliseconds.
pub const PING_TIMEOUT_ENV: &str = "ACTOR_PING_TIMEOUT_MS";

/// How long [`ping`](crate::RunnableActor::ping) waits by default.
pub const DEFAULT_PING_TIMEOUT: Duration = Duration::from_secs(1);

/// Settings shared by every start/stop cycle of one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Upper bound on a full ping round trip (send plus echo).
    pub ping_timeout: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            ping_timeout: DEFAULT_PING_TIMEOUT,
        }
    }
}

impl LifecycleConfig {
    pub fn with_ping_timeout(mut self, ping_timeout: Duration) -> Self {
        self.ping_timeout = ping_timeout;
        self
    }

    /// Builds a config from the process environment.
    ///
    /// Reads [`PING_TIMEOUT_ENV`]. A missing variable yields the default; an
    /// unparseable one is logged and also yields the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let config = Self::default();
        match lookup(PING_TIMEOUT_ENV) {
            None => config,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(millis) => config.with_ping_timeout(Duration::from_millis(millis)),
                Err(e) => {
                    warn!(var = PING_TIMEOUT_ENV, value = %raw, error = %e, "Ignoring invalid ping timeout");
                    config
                }
            },
        }
    }
}
