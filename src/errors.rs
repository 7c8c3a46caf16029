//! # Parser Error Types
//!
//! This module defines the error taxonomy shared by the quantity extractor and
//! the unit-price calculator. Every variant carries the offending text so the
//! caller can report what failed to parse.

use std::fmt;

/// Errors raised while extracting quantities or unit prices
#[derive(Debug, Clone, PartialEq)]
pub enum UnitParseError {
    /// Dynamic input that is neither a string nor null
    InvalidInput(String),
    /// No quantity rule matched the text
    ParseQuantity(String),
    /// The unit-price pattern did not match the text
    UnitPrice(String),
    /// A captured number field is not a valid decimal or `a/b` fraction
    InvalidNumber { token: String, text: String },
    /// Unit-price quantity evaluated to zero
    DivisionByZero(String),
    /// Parser configuration errors
    Config(String),
    /// Internal errors surfaced by the driver
    Internal(String),
}

impl UnitParseError {
    /// True for failures of a captured numeric field rather than of shape matching
    pub fn is_numeric_error(&self) -> bool {
        matches!(
            self,
            UnitParseError::InvalidNumber { .. } | UnitParseError::DivisionByZero(_)
        )
    }

    /// The input text the error was raised for, when there is one
    pub fn offending_text(&self) -> Option<&str> {
        match self {
            UnitParseError::ParseQuantity(text)
            | UnitParseError::UnitPrice(text)
            | UnitParseError::DivisionByZero(text)
            | UnitParseError::InvalidNumber { text, .. } => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for UnitParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitParseError::InvalidInput(kind) => {
                write!(f, "[INVALID_INPUT] expecting a string, got {}", kind)
            }
            UnitParseError::ParseQuantity(text) => {
                write!(f, "[QUANTITY] can't match quantity on string '{}'", text)
            }
            UnitParseError::UnitPrice(text) => {
                write!(f, "[UNIT_PRICE] can't calculate unit price on string '{}'", text)
            }
            UnitParseError::InvalidNumber { token, text } => {
                write!(f, "[NUMBER] invalid number '{}' in string '{}'", token, text)
            }
            UnitParseError::DivisionByZero(text) => {
                write!(f, "[NUMBER] division by zero in string '{}'", text)
            }
            UnitParseError::Config(msg) => write!(f, "[CONFIG] {}", msg),
            UnitParseError::Internal(msg) => write!(f, "[INTERNAL] {}", msg),
        }
    }
}

impl std::error::Error for UnitParseError {}

impl From<anyhow::Error> for UnitParseError {
    fn from(err: anyhow::Error) -> Self {
        UnitParseError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for UnitParseError {
    fn from(err: serde_json::Error) -> Self {
        UnitParseError::Config(err.to_string())
    }
}

/// Result type alias for convenience
pub type UnitParseResult<T> = Result<T, UnitParseError>;

/// Structured error logging helpers
pub mod error_logging {
    use tracing::{error, warn};

    /// Log a failed parse together with the operation that raised it
    pub fn log_parse_error(error: &super::UnitParseError, operation: &str) {
        if error.is_numeric_error() {
            error!(
                error = %error,
                operation = %operation,
                input_value = ?error.offending_text().map(truncate),
                "Malformed number in input"
            );
        } else {
            warn!(
                error = %error,
                operation = %operation,
                input_value = ?error.offending_text().map(truncate),
                "Input did not match any pattern"
            );
        }
    }

    /// Log configuration errors during startup
    pub fn log_config_error(error: &impl std::fmt::Display, config_key: &str, operation: &str) {
        error!(
            error = %error,
            config_key = %config_key,
            operation = %operation,
            "Configuration error"
        );
    }

    fn truncate(value: &str) -> String {
        if value.chars().count() > 100 {
            format!("{}...", value.chars().take(100).collect::<String>())
        } else {
            value.to_string()
        }
    }
}
