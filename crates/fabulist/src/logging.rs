//! Tracing subscriber setup for the command-line tool.

use fabulist_error::{ConfigError, FabulistResult};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` picks the filter, defaulting to `info`; `verbose` forces
/// `debug`. With `json` set, events are written as JSON lines.
///
/// # Errors
///
/// Returns `ConfigError` if the filter is invalid or a subscriber is
/// already installed.
pub fn init_logging(verbose: bool, json: bool) -> FabulistResult<()> {
    let filter = if verbose {
        EnvFilter::try_new("debug")
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))
    }
    .map_err(|e| ConfigError::new(format!("Invalid log filter: {}", e)))?;

    let fmt_layer = if json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(format!("Failed to install logger: {}", e)))?;
    Ok(())
}
