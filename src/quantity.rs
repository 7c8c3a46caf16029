//! # Quantity Extraction Module
//!
//! Classifies a product-label string into one quantity shape and returns its
//! amount in a canonical unit.
//!
//! ## Features
//!
//! - Ordered rule cascade (see [`crate::quantity_patterns`]); the first rule to match wins
//! - Mixed numbers and fractions: "3 1/2 gal", "1/2 lb"
//! - Container counts: "4 ct/15.25 oz" -> 61 oz
//! - Pounds, pints, quarts and gallons converted to ounces
//! - Count, each, pack and bunch kept as terminal units

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{debug, info};

use crate::config::ParserConfig;
use crate::errors::{error_logging, UnitParseError, UnitParseResult};
use crate::observability;
use crate::quantity_patterns::{quantity_rules, QuantityRule};

/// An amount in a canonical unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    pub amount: f64,
    pub unit: String,
}

impl Bundle {
    pub fn new(amount: f64, unit: impl Into<String>) -> Self {
        Self {
            amount,
            unit: unit.into(),
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }
}

impl fmt::Display for Bundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}

/// Quantity extractor running the rule cascade under a configuration
#[derive(Debug, Clone)]
pub struct QuantityExtractor {
    config: ParserConfig,
}

lazy_static! {
    static ref DEFAULT_EXTRACTOR: QuantityExtractor = QuantityExtractor {
        config: ParserConfig::default(),
    };
}

impl QuantityExtractor {
    /// Create an extractor with the default configuration
    pub fn new() -> Self {
        info!("Creating new QuantityExtractor with default configuration");
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create an extractor with a custom configuration
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unit_parsing::config::{MillilitrePolicy, ParserConfig};
    /// use unit_parsing::quantity::QuantityExtractor;
    ///
    /// let config = ParserConfig {
    ///     millilitre_policy: MillilitrePolicy::FoldIntoOunces,
    ///     ..Default::default()
    /// };
    /// let extractor = QuantityExtractor::with_config(config)?;
    /// assert_eq!(extractor.extract("29.5735 ml")?.unit(), "oz");
    /// # Ok::<(), unit_parsing::UnitParseError>(())
    /// ```
    pub fn with_config(config: ParserConfig) -> UnitParseResult<Self> {
        config.validate()?;
        info!("Creating QuantityExtractor with custom config: {}", config.summary());
        Ok(Self { config })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Extract the first quantity mentioned in the text
    ///
    /// Matching ignores case. Every rule is tried in priority order. The
    /// first matching rule produces the result; a malformed number in that
    /// rule's captures is reported as [`UnitParseError::InvalidNumber`] rather
    /// than falling through to later rules.
    pub fn extract(&self, text: &str) -> UnitParseResult<Bundle> {
        let result = self.run_cascade(text);
        if let Err(e) = &result {
            error_logging::log_parse_error(e, "extract_quantity");
        }
        result
    }

    fn run_cascade(&self, text: &str) -> UnitParseResult<Bundle> {
        if let Some(max) = self.config.max_input_length {
            let length = text.chars().count();
            if length > max {
                return Err(UnitParseError::InvalidInput(format!(
                    "string of {} characters (limit {})",
                    length, max
                )));
            }
        }

        // every rule is case-insensitive, so the caller's text is matched as-is
        // and carried unchanged into any error
        for rule in quantity_rules() {
            if let Some(result) = rule.apply(text, self.config.millilitre_policy) {
                let bundle = result?;
                self.record_match(rule, text, &bundle);
                return Ok(bundle);
            }
        }

        Err(UnitParseError::ParseQuantity(text.to_string()))
    }

    fn record_match(&self, rule: &QuantityRule, text: &str, bundle: &Bundle) {
        if self.config.trace_matches {
            debug!(
                rule = rule.name,
                input = %text,
                amount = bundle.amount,
                unit = %bundle.unit,
                "Quantity rule matched"
            );
        }
        observability::record_quantity_match(rule.name);
    }

    /// Extract from a dynamic value: null is read as the empty string, strings
    /// are extracted, anything else is rejected
    pub fn extract_value(&self, value: &Value) -> UnitParseResult<Bundle> {
        match value {
            Value::Null => self.extract(""),
            Value::String(text) => self.extract(text),
            other => Err(UnitParseError::InvalidInput(json_type_name(other).to_string())),
        }
    }
}

impl Default for QuantityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Extract a quantity with the default configuration; `None` is read as ""
///
/// # Examples
///
/// ```rust
/// use unit_parsing::{extract_quantity, Bundle};
///
/// assert_eq!(extract_quantity("4 ct/15.25 oz")?, Bundle::new(61.0, "oz"));
/// assert_eq!(extract_quantity("1/2 lb")?, Bundle::new(8.0, "oz"));
/// assert_eq!(extract_quantity("Mission White Corn Tortillas - 30 Count")?, Bundle::new(30.0, "count"));
/// assert!(extract_quantity(None).is_err());
/// # Ok::<(), unit_parsing::UnitParseError>(())
/// ```
pub fn extract_quantity<'a>(text: impl Into<Option<&'a str>>) -> UnitParseResult<Bundle> {
    DEFAULT_EXTRACTOR.extract(text.into().unwrap_or_default())
}

/// Extract a quantity from a dynamic value with the default configuration
pub fn extract_quantity_value(value: &Value) -> UnitParseResult<Bundle> {
    DEFAULT_EXTRACTOR.extract_value(value)
}
