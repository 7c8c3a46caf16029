//! # Parser Configuration
//!
//! Settings shared by the quantity extractor and the unit-price calculator.
//! Configuration is loaded from a JSON file and then overridden by environment
//! variables, falling back to defaults when no file is found.

use crate::errors::{UnitParseError, UnitParseResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

/// Environment variable naming the JSON configuration file
pub const CONFIG_PATH_ENV: &str = "UNIT_PARSING_CONFIG_PATH";

/// Paths tried when `UNIT_PARSING_CONFIG_PATH` is unset or unreadable
const FALLBACK_CONFIG_PATHS: [&str; 2] = ["config/parser.json", "../config/parser.json"];

/// What the quantity extractor does with milliliter amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MillilitrePolicy {
    /// `ml` is a terminal unit: "250 ml" -> 250 ml
    #[default]
    Keep,
    /// Convert to ounces: "250 ml" -> 250 / 29.5735 oz
    FoldIntoOunces,
}

impl FromStr for MillilitrePolicy {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "keep" | "ml" => Ok(MillilitrePolicy::Keep),
            "fold_into_ounces" | "fold" | "oz" => Ok(MillilitrePolicy::FoldIntoOunces),
            other => Err(UnitParseError::Config(format!(
                "unknown millilitre policy '{}', expected 'keep' or 'fold_into_ounces'",
                other
            ))),
        }
    }
}

impl fmt::Display for MillilitrePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MillilitrePolicy::Keep => f.write_str("keep"),
            MillilitrePolicy::FoldIntoOunces => f.write_str("fold_into_ounces"),
        }
    }
}

/// Parser configuration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Milliliter handling in the quantity extractor
    pub millilitre_policy: MillilitrePolicy,
    /// Emit a debug event naming the rule that matched
    pub trace_matches: bool,
    /// Reject inputs longer than this many characters (unbounded when None)
    pub max_input_length: Option<usize>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            millilitre_policy: MillilitrePolicy::Keep,
            trace_matches: true,
            max_input_length: None,
        }
    }
}

impl ParserConfig {
    /// Validate parser configuration
    pub fn validate(&self) -> UnitParseResult<()> {
        if self.max_input_length == Some(0) {
            return Err(UnitParseError::Config(
                "max_input_length must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load and validate configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> UnitParseResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            UnitParseError::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let config: ParserConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the file named by `UNIT_PARSING_CONFIG_PATH`
    /// (or a fallback path), then apply environment overrides
    pub fn from_env() -> UnitParseResult<Self> {
        let mut config = load_config_file();

        if let Ok(policy) = env::var("UNIT_PARSING_ML_POLICY") {
            config.millilitre_policy = policy.parse()?;
        }
        if let Ok(length) = env::var("UNIT_PARSING_MAX_INPUT_LENGTH") {
            let length = length.trim().parse().map_err(|_| {
                UnitParseError::Config(
                    "UNIT_PARSING_MAX_INPUT_LENGTH must be a valid number".to_string(),
                )
            })?;
            config.max_input_length = Some(length);
        }
        if let Ok(trace) = env::var("UNIT_PARSING_TRACE_MATCHES") {
            config.trace_matches = trace.trim().to_lowercase() == "true";
        }

        config.validate()?;
        Ok(config)
    }

    /// Get a summary of the current configuration for logging
    pub fn summary(&self) -> String {
        format!(
            "Configuration: millilitre_policy={}, trace_matches={}, max_input_length={}",
            self.millilitre_policy,
            self.trace_matches,
            self.max_input_length
                .map_or_else(|| "unbounded".to_string(), |n| n.to_string())
        )
    }
}

fn load_config_file() -> ParserConfig {
    if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
        match ParserConfig::from_file(&config_path) {
            Ok(config) => {
                info!("Loaded parser config from environment variable: {}", config_path);
                return config;
            }
            Err(e) => {
                warn!(
                    "Failed to load parser config from '{}': {}. Falling back to default paths.",
                    config_path, e
                );
            }
        }
    }

    for config_path in FALLBACK_CONFIG_PATHS {
        if !Path::new(config_path).exists() {
            continue;
        }
        match ParserConfig::from_file(config_path) {
            Ok(config) => {
                info!("Loaded parser config from fallback path: {}", config_path);
                return config;
            }
            Err(e) => {
                warn!(
                    "Failed to load parser config at '{}': {}. Trying next path.",
                    config_path, e
                );
            }
        }
    }

    info!("No parser config file found, using defaults");
    ParserConfig::default()
}
