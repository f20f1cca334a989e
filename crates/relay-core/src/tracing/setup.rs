//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Relay tracing/logging system.
///
/// Reads the `RELAY_LOG` environment variable for log levels, e.g.
/// `RELAY_LOG=relay_core=trace`. Falls back to `relay=info` if `RELAY_LOG`
/// is not set or is invalid.
///
/// Idempotent; calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("RELAY_LOG").unwrap_or_else(|_| EnvFilter::new("relay=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .init();
    });
}
