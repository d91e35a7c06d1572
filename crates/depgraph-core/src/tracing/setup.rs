//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants;

static INIT: Once = Once::new();

/// Initialize the depgraph tracing/logging system.
///
/// Reads the `DEPGRAPH_LOG` environment variable for per-module log levels,
/// e.g. `DEPGRAPH_LOG=depgraph_aggregator=debug,depgraph_graph=warn`.
/// Falls back to `depgraph=info` if unset or invalid.
///
/// Idempotent; a subscriber installed elsewhere first is left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(constants::LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("depgraph=info"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
