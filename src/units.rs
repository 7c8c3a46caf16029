//! # Units Module
//!
//! Conversion constants, the canonical unit vocabulary and the alias table that
//! maps every accepted unit spelling onto a canonical unit and a conversion factor.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Ounces per pound
pub const OZ_PER_LB: f64 = 16.0;
/// Ounces per pint
pub const OZ_PER_PINT: f64 = 16.0;
/// Ounces per quart
pub const OZ_PER_QUART: f64 = 32.0;
/// Ounces per gallon
pub const OZ_PER_GAL: f64 = 128.0;
/// Milliliters per fluid ounce
pub const ML_PER_OZ: f64 = 29.5735;

/// Output units of the quantity extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalUnit {
    /// Mass/volume anchor
    Oz,
    Ml,
    Count,
    Each,
    Pack,
    Bunch,
}

impl CanonicalUnit {
    /// Short lowercase token used in `Bundle::unit`
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalUnit::Oz => "oz",
            CanonicalUnit::Ml => "ml",
            CanonicalUnit::Count => "count",
            CanonicalUnit::Each => "each",
            CanonicalUnit::Pack => "pack",
            CanonicalUnit::Bunch => "bunch",
        }
    }

    /// Terminal units have no further conversion target
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CanonicalUnit::Count | CanonicalUnit::Each | CanonicalUnit::Pack | CanonicalUnit::Bunch
        )
    }
}

impl fmt::Display for CanonicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How one unit spelling converts onto its canonical unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConversion {
    pub unit: CanonicalUnit,
    /// Canonical units per one source unit
    pub factor: f64,
}

impl UnitConversion {
    const fn new(unit: CanonicalUnit, factor: f64) -> Self {
        Self { unit, factor }
    }

    /// Convert an amount in the source unit to the canonical unit
    pub fn to_canonical(&self, amount: f64) -> f64 {
        amount * self.factor
    }

    /// Recover the amount in the source unit from a canonical amount
    pub fn from_canonical(&self, amount: f64) -> f64 {
        amount / self.factor
    }
}

lazy_static! {
    /// Every accepted unit spelling, keyed by its squashed form (see [`squash_unit`])
    static ref UNIT_ALIASES: HashMap<&'static str, UnitConversion> = {
        use CanonicalUnit::*;
        let groups: [(&[&'static str], UnitConversion); 10] = [
            (&["lb", "lbs", "pound", "pounds"], UnitConversion::new(Oz, OZ_PER_LB)),
            (&["oz", "ozs", "ounce", "ounces", "floz"], UnitConversion::new(Oz, 1.0)),
            (&["pt", "pts", "pint", "pints"], UnitConversion::new(Oz, OZ_PER_PINT)),
            (&["qt", "qts", "quart", "quarts"], UnitConversion::new(Oz, OZ_PER_QUART)),
            (
                &["gal", "gals", "gallon", "gallons", "flgal"],
                UnitConversion::new(Oz, OZ_PER_GAL),
            ),
            (
                &["ml", "mls", "milliliter", "milliliters", "millilitre", "millilitres"],
                UnitConversion::new(Ml, 1.0),
            ),
            (&["ct", "cts", "count", "counts"], UnitConversion::new(Count, 1.0)),
            (&["ea", "each"], UnitConversion::new(Each, 1.0)),
            (&["pk", "pks", "pack", "packs"], UnitConversion::new(Pack, 1.0)),
            (&["bunch", "bunches"], UnitConversion::new(Bunch, 1.0)),
        ];

        let mut aliases = HashMap::new();
        for (spellings, conversion) in groups {
            for spelling in spellings {
                aliases.insert(*spelling, conversion);
            }
        }
        aliases
    };
}

/// Lowercase a unit token and drop whitespace and dots: `"Fl. Oz."` -> `"floz"`
pub fn squash_unit(token: &str) -> String {
    token
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Look up the canonical unit and conversion factor for a unit spelling
///
/// # Examples
///
/// ```rust
/// use unit_parsing::units::{normalize_unit, CanonicalUnit};
///
/// let gallons = normalize_unit("Gallons").unwrap();
/// assert_eq!(gallons.unit, CanonicalUnit::Oz);
/// assert_eq!(gallons.to_canonical(0.5), 64.0);
/// assert!(normalize_unit("cup").is_none());
/// ```
pub fn normalize_unit(token: &str) -> Option<UnitConversion> {
    UNIT_ALIASES.get(squash_unit(token).as_str()).copied()
}

/// Output label for a unit-price unit: pack spellings collapse onto `pack`,
/// everything else passes through lowercased
pub fn price_unit_label(token: &str) -> String {
    let squashed = squash_unit(token);
    match normalize_unit(&squashed) {
        Some(UnitConversion {
            unit: CanonicalUnit::Pack,
            ..
        }) => CanonicalUnit::Pack.as_str().to_string(),
        _ => squashed,
    }
}

/// True for pound spellings, which unit prices never report as a terminal unit
pub fn is_pound(token: &str) -> bool {
    matches!(squash_unit(token).as_str(), "lb" | "lbs" | "pound" | "pounds")
}
