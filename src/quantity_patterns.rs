//! # Quantity Patterns Module
//!
//! The ordered rule table consulted by the quantity extractor. Every rule is a
//! compiled regex plus a policy describing how its captures become a [`Bundle`].
//!
//! Capture groups used by the patterns:
//! - `num`: optional leading multiplier (a count of containers)
//! - `qty`: the amount, possibly a mixed number such as `3 1/2`
//! - `unit`: the unit spelling, for rules that accept more than one unit
//!
//! Rules are tried top to bottom and the first match wins. Patterns start with
//! a lazy `^.*?` so that the earliest mention in the text is the one captured.
//! Specific shapes (a count followed by a volume, a range of cans) come before
//! the single-unit rules that would otherwise match only their tail.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::trace;

use crate::config::MillilitrePolicy;
use crate::errors::{UnitParseError, UnitParseResult};
use crate::fraction::{parse_amount, parse_amount_or, InvalidToken};
use crate::quantity::Bundle;
use crate::units::{normalize_unit, CanonicalUnit, UnitConversion, ML_PER_OZ};

/// A decimal or fraction; greedy over `/` so that a malformed `1/2/` is captured whole
const NUM: &str = r"(?:\d|\.\d)[\d./]*";

/// A number optionally followed by a fraction token: `3 1/2`, `3/4 1/2`
const MIXED: &str = r"(?:\d|\.\d)[\d./]*(?:\s+\d+/\d+)?";

/// Words that mark a leading number as a container count rather than an amount
const CONTAINER_WORDS: &str = r"x|count|ct|cans?|jars?|pks?|packs?|bottles?";

/// Where a rule's amount comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountPolicy {
    /// The `qty` group always participates in a match
    Captured,
    /// Use `qty` when captured, otherwise this amount
    DefaultsTo(f64),
}

/// Where a rule's unit comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitPolicy {
    /// Always this spelling, resolved through the alias table
    Fixed(&'static str),
    /// The `unit` group, resolved through the alias table
    FromCapture,
}

/// One entry of the quantity rule cascade
#[derive(Debug, Clone)]
pub struct QuantityRule {
    /// Stable rule name, used in logs and metrics
    pub name: &'static str,
    pattern: Regex,
    /// Text this rule refuses even when `pattern` matches
    exclude: Option<Regex>,
    amount: AmountPolicy,
    unit: UnitPolicy,
    /// Extra factor applied before unit conversion (0.5 for half gallons)
    scale: f64,
}

impl QuantityRule {
    fn new(name: &'static str, pattern: &str, amount: AmountPolicy, unit: UnitPolicy) -> Self {
        Self {
            name,
            pattern: Regex::new(&format!("(?i){}", pattern))
                .expect("Quantity rule pattern should be valid"),
            exclude: None,
            amount,
            unit,
            scale: 1.0,
        }
    }

    fn unless(mut self, pattern: &str) -> Self {
        self.exclude = Some(
            Regex::new(&format!("(?i){}", pattern))
                .expect("Quantity rule exclusion should be valid"),
        );
        self
    }

    fn scaled(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// The regex source of this rule
    pub fn pattern_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Whether this rule fires on the text
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text) && !self.is_excluded(text)
    }

    fn is_excluded(&self, text: &str) -> bool {
        self.exclude.as_ref().is_some_and(|exclude| exclude.is_match(text))
    }

    /// Apply this rule alone. Returns `None` when the pattern does not match,
    /// and an error when it matches but a captured number is malformed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use unit_parsing::config::MillilitrePolicy;
    /// use unit_parsing::quantity::Bundle;
    /// use unit_parsing::quantity_patterns::quantity_rules;
    ///
    /// let pound = quantity_rules().iter().find(|rule| rule.name == "pound").unwrap();
    /// let bundle = pound.apply("3.00 lb", MillilitrePolicy::Keep).unwrap().unwrap();
    /// assert_eq!(bundle, Bundle::new(48.0, "oz"));
    /// assert!(pound.apply("3 oz", MillilitrePolicy::Keep).is_none());
    /// ```
    pub fn apply(&self, text: &str, ml_policy: MillilitrePolicy) -> Option<UnitParseResult<Bundle>> {
        trace!(rule = self.name, "Trying quantity rule");
        if self.is_excluded(text) {
            return None;
        }
        let captures = self.pattern.captures(text)?;
        Some(self.evaluate(&captures, text, ml_policy))
    }

    fn evaluate(
        &self,
        captures: &Captures<'_>,
        text: &str,
        ml_policy: MillilitrePolicy,
    ) -> UnitParseResult<Bundle> {
        let invalid = |err: InvalidToken| UnitParseError::InvalidNumber {
            token: err.token,
            text: text.to_string(),
        };
        let group = |name| captures.name(name).map(|m| m.as_str());

        let qty = match self.amount {
            AmountPolicy::Captured => parse_amount(group("qty").unwrap_or_default()),
            AmountPolicy::DefaultsTo(default) => parse_amount_or(group("qty"), default),
        }
        .map_err(invalid)?;
        let multiplier = parse_amount_or(group("num"), 1.0).map_err(invalid)?;

        let spelling = match self.unit {
            UnitPolicy::Fixed(spelling) => spelling,
            UnitPolicy::FromCapture => group("unit").unwrap_or_default(),
        };
        let conversion = normalize_unit(spelling)
            .ok_or_else(|| UnitParseError::ParseQuantity(text.to_string()))?;

        let amount = conversion.to_canonical(qty * multiplier * self.scale);
        Ok(finish(conversion, amount, ml_policy))
    }
}

fn finish(conversion: UnitConversion, amount: f64, ml_policy: MillilitrePolicy) -> Bundle {
    match (conversion.unit, ml_policy) {
        (CanonicalUnit::Ml, MillilitrePolicy::FoldIntoOunces) => {
            Bundle::new(amount / ML_PER_OZ, CanonicalUnit::Oz.as_str())
        }
        (unit, _) => Bundle::new(amount, unit.as_str()),
    }
}

fn build_rules() -> Vec<QuantityRule> {
    use AmountPolicy::*;
    use UnitPolicy::*;

    vec![
        // "- 15-11 Fl Oz cans", "- 6-11.2 Fl. Oz."
        QuantityRule::new(
            "range_count_times_ounce",
            &format!(r"^.*?\s+-\s+(?P<num>{NUM})\s*-\s*(?P<qty>{NUM})\s*fl\.?\s*oz\b"),
            Captured,
            Fixed("oz"),
        ),
        // "3 1/2 gal", "250ML", "16.9 Fl. Oz.", "4 ct/15.25 oz", "6pk/16 fl oz"
        QuantityRule::new(
            "composite_volume",
            &format!(
                r"^.*?(?:(?P<num>{NUM})\s*(?:{CONTAINER_WORDS})\s*/?\s*)?(?P<qty>{MIXED})\s*(?P<unit>pints?|pts?|milliliters?|millilitres?|mls?|quarts?|qts?|fl\.?\s*oz|ounces?|ozs?|fl\.?\s*gal|gallons?|gals?)\b"
            ),
            Captured,
            FromCapture,
        ),
        // "  LB  ", "fl gal", "Ground Beef - LB"; no digit anywhere, "half gal" is its own rule
        QuantityRule::new(
            "unit_only",
            r"^\D*?(?:\bfl\.?\s*|\b)(?P<unit>pounds?|lbs?|ounces?|ozs?|gallons?|gals?)\b\.?\D*$",
            DefaultsTo(1.0),
            FromCapture,
        )
        .unless(r"\bhalf\s*gal"),
        // "100pack", "1/2 pk"
        QuantityRule::new(
            "pack",
            &format!(r"^.*?(?P<qty>{MIXED})\s*(?:packs?|pks?)\b"),
            Captured,
            Fixed("pack"),
        ),
        // "10 bunch", "2 / bunch"
        QuantityRule::new(
            "bunch",
            &format!(r"^.*?(?P<qty>{MIXED})\s*/?\s*bunch(?:es)?\b"),
            Captured,
            Fixed("bunch"),
        ),
        // "16 ct / 40 oz", "3 jars / 12 fl. oz"
        // composite_volume already reads every shape this rule and the two
        // ounce rules below accept; they stay as fallbacks for the cascade order
        QuantityRule::new(
            "count_over_volume",
            &format!(
                r"^.*?(?P<num>{NUM})\s*(?:count|ct|cans?|jars?|pks?|packs?)\s*/\s*(?P<qty>{MIXED})\s*(?:fl\.?)?\s*oz\b"
            ),
            Captured,
            Fixed("oz"),
        ),
        // "- 23ct", "1/2 count"
        QuantityRule::new(
            "count",
            &format!(r"^.*?(?P<qty>{MIXED})\s*/?\s*(?:count|ct)\b"),
            Captured,
            Fixed("count"),
        ),
        // "12 Each", "3 / ea", "1each"
        QuantityRule::new(
            "each",
            &format!(r"^.*?(?P<qty>{MIXED})\s*/?\s*(?:each|ea)\b"),
            Captured,
            Fixed("each"),
        ),
        // "3 half gal", "half gallon"
        QuantityRule::new(
            "half_gallon",
            &format!(r"^.*?(?:(?P<qty>{MIXED})\s*)?half\s*gal(?:lon)?s?\b"),
            DefaultsTo(1.0),
            Fixed("gal"),
        )
        .scaled(0.5),
        // "3.00Lb", "1/2 / lb", "2.5lbs"
        QuantityRule::new(
            "pound",
            &format!(r"^.*?(?P<qty>{MIXED})\s*/?\s*(?:pounds?|lbs?)\b"),
            Captured,
            Fixed("lb"),
        ),
        // "3.4 Fl Oz"
        QuantityRule::new(
            "fluid_ounce",
            &format!(r"^.*?(?P<qty>{MIXED})\s*fl\.?\s*oz\b"),
            Captured,
            Fixed("oz"),
        ),
        // "32 oz", "1/2 ounce"
        QuantityRule::new(
            "ounce",
            &format!(r"^.*?(?P<qty>{MIXED})\s*(?:ounces?|ozs?)\b"),
            Captured,
            Fixed("oz"),
        ),
        // "3 cans / 23 fl oz", "6 Count/11 Fl Oz"
        QuantityRule::new(
            "cans_of_fluid_ounce",
            &format!(r"^.*?(?P<num>{NUM})\s*(?:cans?|count|ct)\s*/\s*(?P<qty>{MIXED})\s*fl.*?oz\b"),
            Captured,
            Fixed("oz"),
        ),
        // "Seedless Mini Watermelon - Each"
        QuantityRule::new("bare_each", r"^.*?\beach\b", DefaultsTo(1.0), Fixed("each")),
    ]
}

lazy_static! {
    static ref QUANTITY_RULES: Vec<QuantityRule> = build_rules();
}

/// The quantity rules in priority order, highest first
pub fn quantity_rules() -> &'static [QuantityRule] {
    &QUANTITY_RULES
}
