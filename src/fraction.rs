//! # Number Evaluator
//!
//! Converts a captured number field into an amount. A field is one or more
//! whitespace-separated tokens, each either a decimal (`10.5`, `.3`) or an
//! `integer/integer` fraction (`1/2`). Mixed numbers are the sum of their
//! tokens, so `"3 1/2"` evaluates to `3.5`.

use std::fmt;

/// A token the evaluator refused to read as a number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidToken {
    pub token: String,
    pub reason: &'static str,
}

impl fmt::Display for InvalidToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid number token '{}': {}", self.token, self.reason)
    }
}

impl std::error::Error for InvalidToken {}

/// Evaluate a number field as the sum of its tokens
///
/// An empty field is an error. Callers that want a default must ask for it
/// with [`parse_amount_or`].
///
/// # Examples
///
/// ```rust
/// use unit_parsing::fraction::parse_amount;
///
/// assert_eq!(parse_amount("1/2").unwrap(), 0.5);
/// assert_eq!(parse_amount("3 1/2").unwrap(), 3.5);
/// assert_eq!(parse_amount("10.5").unwrap(), 10.5);
/// assert!(parse_amount("1/2/").is_err());
/// ```
pub fn parse_amount(field: &str) -> Result<f64, InvalidToken> {
    let mut tokens = field.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return Err(InvalidToken {
            token: field.to_string(),
            reason: "empty number field",
        });
    }

    tokens.try_fold(0.0, |total, token| parse_token(token).map(|value| total + value))
}

/// Evaluate an optional number field, using `default` when it was not captured
pub fn parse_amount_or(field: Option<&str>, default: f64) -> Result<f64, InvalidToken> {
    match field {
        Some(field) if !field.trim().is_empty() => parse_amount(field),
        _ => Ok(default),
    }
}

fn parse_token(token: &str) -> Result<f64, InvalidToken> {
    let invalid = |reason| InvalidToken {
        token: token.to_string(),
        reason,
    };

    let mut parts = token.split('/');
    let numerator = parts.next().unwrap_or_default();
    let denominator = parts.next();
    if parts.next().is_some() {
        return Err(invalid("more than one '/' in fraction"));
    }

    match denominator {
        None => parse_decimal(numerator).ok_or_else(|| invalid("not a decimal number")),
        Some(denominator) => {
            let numerator = parse_integer(numerator).ok_or_else(|| invalid("bad numerator"))?;
            let denominator =
                parse_integer(denominator).ok_or_else(|| invalid("bad denominator"))?;
            if denominator == 0.0 {
                return Err(invalid("zero denominator"));
            }
            Ok(numerator / denominator)
        }
    }
}

fn parse_decimal(token: &str) -> Option<f64> {
    let digits = token.chars().filter(char::is_ascii_digit).count();
    let dots = token.chars().filter(|c| *c == '.').count();
    if digits == 0 || dots > 1 || digits + dots != token.len() {
        return None;
    }
    token.parse().ok()
}

/// Digits only; read as `f64` so terms beyond `u64` still evaluate
fn parse_integer(token: &str) -> Option<f64> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}
