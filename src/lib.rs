//! # Unit Parsing
//!
//! Extracts normalized quantities and unit prices from free-form product-label
//! and price-tag strings such as "4 ct/15.25 oz", "$2.29/lb" or "250ML".
//!
//! - [`extract_quantity`] returns a [`Bundle`]: an amount in a canonical unit
//!   (`oz`, `ml`, `count`, `each`, `pack`, `bunch`).
//! - [`compute_unit_price`] returns a [`UnitPrice`]: the price per one unit,
//!   with pound prices reported per ounce.

pub mod config;
pub mod errors;
pub mod fraction;
pub mod observability;
pub mod quantity;
pub mod quantity_patterns;
pub mod unit_price;
pub mod units;

// Re-export types for easier access
pub use config::{MillilitrePolicy, ParserConfig};
pub use errors::{UnitParseError, UnitParseResult};
pub use quantity::{extract_quantity, extract_quantity_value, Bundle, QuantityExtractor};
pub use unit_price::{compute_unit_price, compute_unit_price_value, UnitPrice, UnitPriceCalculator};
