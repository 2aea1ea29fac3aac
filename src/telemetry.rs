//! Tracing/logging initialization.
//!
//! Sets up `tracing_subscriber` with an env-filter and optional JSON output.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::TelemetryConfig;

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Installs the global tracing subscriber, returning an error if one is
/// already set.
///
/// * `default_filter` -- filter used when `RUST_LOG` is not set
///   (e.g. `"gym_desk=info"`).
/// * `log_json` -- emit structured JSON lines instead of the human-readable
///   format.
pub fn try_init_tracing(default_filter: &str, log_json: bool) -> Result<(), TryInitError> {
    let filter = env_filter(default_filter);
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
    }
}

/// Like [`try_init_tracing`], but a second call is silently ignored.
pub fn init_tracing(default_filter: &str, log_json: bool) {
    let _ = try_init_tracing(default_filter, log_json);
}

/// Initializes tracing from the telemetry config section.
pub fn init_from_config(config: &TelemetryConfig) {
    init_tracing(&config.log_level, config.json);
}
