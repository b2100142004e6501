//! Structured logging with tracing
//!
//! Configures the tracing subscriber for the CLI. The `WORKHUB_LOG`
//! environment variable takes precedence over the configured level and
//! accepts full `EnvFilter` directives.

use tracing_subscriber::EnvFilter;

use workhub_domain::error::Result;

use crate::config::{LoggingConfig, parse_log_level};

/// Initialize logging with the provided configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env("WORKHUB_LOG").unwrap_or_else(|_| EnvFilter::new(&config.level));

    // Types differ between the branches, so each initializes its own builder
    if config.json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    tracing::debug!("Logging initialized with level: {}", level);
    Ok(())
}
