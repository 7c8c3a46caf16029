//! # Unit Price Module
//!
//! Reads a price tag such as "$2.29/lb", "4.99/100 pk" or "5.49 per pt" and
//! returns the price per single unit. Pound prices are reported per ounce.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::{debug, info};

use crate::config::ParserConfig;
use crate::errors::{error_logging, UnitParseError, UnitParseResult};
use crate::fraction::{parse_amount, parse_amount_or, InvalidToken};
use crate::observability;
use crate::units::{is_pound, price_unit_label, OZ_PER_LB};

/// Price, optional separator (`/`, `per`, `-`, possibly repeated), optional
/// quantity, unit. The price must be the first number in the text.
const UNIT_PRICE_PATTERN: &str = r"(?i)^\D*?(?P<dollars>\d*\.?\d+)\s*(?:(?:/|per|-)\s*)*(?P<qty>\d*\.?\d+)?\s*(?P<unit>lbs?|oz|bunch|pk|pack|ct|count|milliliters?|millilitres?|mls?|each|ea|pints?|pt)\b";

lazy_static! {
    static ref UNIT_PRICE_REGEX: Regex =
        Regex::new(UNIT_PRICE_PATTERN).expect("Unit price pattern should be valid");
    static ref DEFAULT_CALCULATOR: UnitPriceCalculator = UnitPriceCalculator {
        config: ParserConfig::default(),
    };
}

/// A price per one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitPrice {
    pub amount: f64,
    pub unit: String,
}

impl UnitPrice {
    pub fn new(amount: f64, unit: impl Into<String>) -> Self {
        Self {
            amount,
            unit: unit.into(),
        }
    }

    /// The `(amount, unit)` pair
    pub fn into_tuple(self) -> (f64, String) {
        (self.amount, self.unit)
    }
}

impl fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.amount, self.unit)
    }
}

impl From<UnitPrice> for (f64, String) {
    fn from(price: UnitPrice) -> Self {
        price.into_tuple()
    }
}

impl PartialEq<(f64, &str)> for UnitPrice {
    fn eq(&self, other: &(f64, &str)) -> bool {
        self.amount == other.0 && self.unit == other.1
    }
}

/// Unit-price calculator
#[derive(Debug, Clone)]
pub struct UnitPriceCalculator {
    config: ParserConfig,
}

impl UnitPriceCalculator {
    pub fn new() -> Self {
        info!("Creating new UnitPriceCalculator with default configuration");
        Self {
            config: ParserConfig::default(),
        }
    }

    pub fn with_config(config: ParserConfig) -> UnitParseResult<Self> {
        config.validate()?;
        info!("Creating UnitPriceCalculator with custom config: {}", config.summary());
        Ok(Self { config })
    }

    /// Compute price per unit
    ///
    /// `dollars / qty` where `qty` defaults to 1. A pound price is divided by
    /// 16 and reported per ounce; `pk` and `pack` are reported as `pack`; any
    /// other unit is passed through lowercased.
    pub fn calculate(&self, text: &str) -> UnitParseResult<UnitPrice> {
        let result = self.calculate_inner(text);
        if let Err(e) = &result {
            error_logging::log_parse_error(e, "compute_unit_price");
        }
        result
    }

    fn calculate_inner(&self, text: &str) -> UnitParseResult<UnitPrice> {
        if let Some(max) = self.config.max_input_length {
            let length = text.chars().count();
            if length > max {
                return Err(UnitParseError::InvalidInput(format!(
                    "string of {} characters (limit {})",
                    length, max
                )));
            }
        }

        let normalized = text.to_lowercase();
        let captures = UNIT_PRICE_REGEX
            .captures(&normalized)
            .ok_or_else(|| UnitParseError::UnitPrice(text.to_string()))?;

        let invalid = |err: InvalidToken| UnitParseError::InvalidNumber {
            token: err.token,
            text: text.to_string(),
        };
        let dollars = parse_amount(&captures["dollars"]).map_err(invalid)?;
        let qty = parse_amount_or(captures.name("qty").map(|m| m.as_str()), 1.0)
            .map_err(invalid)?;
        if qty == 0.0 {
            return Err(UnitParseError::DivisionByZero(text.to_string()));
        }

        let unit = &captures["unit"];
        let per_unit = dollars / qty;
        let price = if is_pound(unit) {
            UnitPrice::new(per_unit / OZ_PER_LB, "oz")
        } else {
            UnitPrice::new(per_unit, price_unit_label(unit))
        };

        if self.config.trace_matches {
            debug!(
                input = %text,
                dollars,
                qty,
                unit = %unit,
                amount = price.amount,
                "Unit price matched"
            );
        }
        observability::record_unit_price_match(&price.unit);
        Ok(price)
    }

    /// Calculate from a dynamic value: strings are read as-is, everything else
    /// is stringified first
    pub fn calculate_value(&self, value: &Value) -> UnitParseResult<UnitPrice> {
        match value {
            Value::String(text) => self.calculate(text),
            other => self.calculate(&other.to_string()),
        }
    }
}

impl Default for UnitPriceCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute a unit price with the default configuration
///
/// Anything displayable is accepted and stringified before matching.
///
/// # Examples
///
/// ```rust
/// use unit_parsing::compute_unit_price;
///
/// assert_eq!(compute_unit_price("5.49/lb")?, (0.343125, "oz"));
/// assert_eq!(compute_unit_price("4.99/100 pk")?, (0.0499, "pack"));
/// assert!(compute_unit_price("/ oz").is_err());
/// # Ok::<(), unit_parsing::UnitParseError>(())
/// ```
pub fn compute_unit_price(text: impl fmt::Display) -> UnitParseResult<UnitPrice> {
    DEFAULT_CALCULATOR.calculate(&text.to_string())
}

/// Compute a unit price from a dynamic value with the default configuration
pub fn compute_unit_price_value(value: &Value) -> UnitParseResult<UnitPrice> {
    DEFAULT_CALCULATOR.calculate_value(value)
}
