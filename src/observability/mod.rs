//! # Observability
//!
//! Structured logging for the bridge using the tracing ecosystem. Every
//! log line carries its context as fields (connection name, secret id,
//! attempt number) so one rotation can be followed end to end in a log
//! aggregator.

use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;
use crate::errors::{Error, Result};

/// Initialize the global tracing subscriber from configuration.
///
/// Called once at startup; a second call fails because the global
/// subscriber is already installed.
pub fn init_tracing(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.log_level).map_err(|e| {
        Error::config(format!("Invalid log level '{}': {}", config.log_level, e))
    })?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result =
        if config.json_logs { builder.json().try_init() } else { builder.try_init() };

    result.map_err(|e| Error::config(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_log_level_is_a_config_error() {
        let config = ObservabilityConfig {
            log_level: "[not-a-directive".to_string(),
            json_logs: true,
        };

        let error = init_tracing(&config).unwrap_err();
        assert!(matches!(error, Error::Config { .. }));
        assert!(error.to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_init_tracing_default_config() {
        // May succeed or fail depending on whether a subscriber is already
        // installed by another test in this process.
        let result = init_tracing(&ObservabilityConfig::default());
        assert!(result.is_ok() || result.is_err());
    }
}
