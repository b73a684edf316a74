//! Tracing subscriber setup.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,bollybook=debug,tower_http=debug";

/// Install the global subscriber.
///
/// Levels come from `RUST_LOG`, falling back to `info` with debug output
/// for the Bollybook crates. With `json` set, each event is one JSON line.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_telemetry(json: bool) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }

    tracing::info!(json, "Telemetry initialized");
    Ok(())
}
