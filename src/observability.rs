//! Observability setup: structured logging and match counters.
//!
//! The library only emits `tracing` events and `metrics` counters; nothing is
//! recorded until the embedding program installs a subscriber or recorder.
//! [`init_tracing`] installs the subscriber used by the command-line driver.

use anyhow::Result;
use std::env;
use tracing_subscriber::prelude::*;

/// Logging configuration for different environments
#[derive(Debug, Clone, PartialEq)]
pub struct ObservabilityConfig {
    /// Log level for the `unit_parsing` target
    pub log_level: String,
    /// `pretty` or `json`
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ObservabilityConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("UNIT_PARSING_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid log level '{}'. Must be one of: {:?}",
                self.log_level, valid_levels
            ));
        }

        if !["pretty", "json"].contains(&self.log_format.as_str()) {
            return Err(format!(
                "Invalid log format '{}'. Must be 'pretty' or 'json'",
                self.log_format
            ));
        }

        Ok(())
    }

    pub fn is_json(&self) -> bool {
        self.log_format == "json"
    }
}

/// Initialize tracing with configuration from the environment
pub fn init_tracing() -> Result<()> {
    init_tracing_with_config(&ObservabilityConfig::from_env())
}

/// Initialize tracing with structured logging
pub fn init_tracing_with_config(config: &ObservabilityConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid observability configuration: {}", e))?;

    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("unit_parsing={}", config.log_level.to_lowercase()).parse()?);

    if config.is_json() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    tracing::debug!(
        log_level = %config.log_level,
        log_format = %config.log_format,
        "Tracing initialized with structured logging"
    );
    Ok(())
}

/// Count a successful quantity rule match
pub fn record_quantity_match(rule: &'static str) {
    metrics::counter!("quantity_rule_matches_total", "rule" => rule).increment(1);
}

/// Count a successful unit-price calculation
pub fn record_unit_price_match(unit: &str) {
    metrics::counter!("unit_price_matches_total", "unit" => unit.to_string()).increment(1);
}
