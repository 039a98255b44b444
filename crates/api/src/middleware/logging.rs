//! Logging initialization.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level string seeds
/// the filter. The `json` format is meant for log shippers, `pretty` for a
/// terminal.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.format == "json" {
        builder.json().flatten_event(true).init();
    } else {
        builder.pretty().init();
    }
}
