//! Tracing initialization for destination workers and tests.
//!
//! Installs a `tracing_subscriber` registry with an `EnvFilter` (from `RUST_LOG`, falling
//! back to the configured filter) and a stdout fmt layer. Errors raised by destinations
//! are emitted on the `errors` target, so `RUST_LOG=errors=warn` isolates them.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static TRACING_INSTALLED: OnceLock<bool> = OnceLock::new();

/// Install the global subscriber once. Later calls are no-ops.
///
/// Returns whether this crate's subscriber is the active one; `false` means another
/// global subscriber was already set (e.g. by the host process).
pub fn init_tracing(default_filter: &str) -> Result<bool> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .with_context(|| format!("Invalid log filter '{}'", default_filter))?;

    let installed = *TRACING_INSTALLED.get_or_init(move || {
        let stdout_layer = tracing_subscriber::fmt::layer().with_filter(filter);
        tracing_subscriber::registry()
            .with(stdout_layer)
            .try_init()
            .is_ok()
    });

    Ok(installed)
}

/// Install the global subscriber using the configured `telemetry.log_filter`.
pub fn init_tracing_from(config: &AppConfig) -> Result<bool> {
    init_tracing(&config.telemetry.log_filter)
}
