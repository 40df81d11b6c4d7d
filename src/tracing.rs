//! # Observability & Tracing
//!
//! Every lifecycle transition is logged with the `tracing` crate, keyed by the
//! actor's name:
//!
//! ```text
//! INFO Started actor="heartbeat" state=Running
//! DEBUG Ping timed out actor="stalled" timeout_ms=1000
//! WARN Ping answered with wrong token actor="liar" token=... echo=...
//! INFO Stopped actor="heartbeat" state=Stopped
//! ```
//!
//! Verbosity is controlled by the `RUST_LOG` environment variable:
//!
//! ```bash
//! RUST_LOG=info cargo run      # Starts and stops only
//! RUST_LOG=debug cargo run     # Plus no-op guards and ping failures
//! ```

/// Installs the global subscriber. Panics if one is already installed.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // actor names identify the source
        .compact()
        .init();
}

/// Like [`setup_tracing`], but returns an error instead of panicking when a
/// subscriber is already installed. Convenient for tests, which share a process.
pub fn try_setup_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .with_test_writer()
        .try_init()
}
