//! Physical quantities: a value paired with its unit.
//!
//! Amounts never convert between units. Arithmetic only happens inside the ledger, and only
//! after the unit has been checked against the item's inventory unit.

use sea_orm::entity::prelude::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit an item's inventory is tracked in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Unit {
    /// Grams (g)
    #[sea_orm(string_value = "grams")]
    Grams,
    /// Ounces (oz)
    #[sea_orm(string_value = "ounces")]
    Ounces,
    /// Pounds (lb)
    #[sea_orm(string_value = "pounds")]
    Pounds,
    /// Milligrams (mg)
    #[sea_orm(string_value = "milligrams")]
    Milligrams,
    /// Milliliters (mL)
    #[sea_orm(string_value = "milliliters")]
    Milliliters,
    /// Discrete pieces
    #[sea_orm(string_value = "count")]
    Count,
}

impl Unit {
    /// Stored name, as used in the database and in `config.toml`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grams => "grams",
            Self::Ounces => "ounces",
            Self::Pounds => "pounds",
            Self::Milligrams => "milligrams",
            Self::Milliliters => "milliliters",
            Self::Count => "count",
        }
    }

    /// Short label used when displaying amounts.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Grams => "g",
            Self::Ounces => "oz",
            Self::Pounds => "lb",
            Self::Milligrams => "mg",
            Self::Milliliters => "mL",
            Self::Count => "ct",
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grams" | "g" => Ok(Self::Grams),
            "ounces" | "oz" => Ok(Self::Ounces),
            "pounds" | "lb" => Ok(Self::Pounds),
            "milligrams" | "mg" => Ok(Self::Milligrams),
            "milliliters" | "ml" => Ok(Self::Milliliters),
            "count" | "ct" => Ok(Self::Count),
            other => Err(format!("unknown unit '{other}'")),
        }
    }
}

impl TryFrom<String> for Unit {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

/// A quantity in a specific unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Amount {
    /// Magnitude; signed when used as a ledger delta
    pub value: f64,
    /// Unit the value is expressed in
    pub unit: Unit,
}

impl Amount {
    /// Creates an amount. Construction never fails.
    #[must_use]
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// The empty amount in `unit`.
    #[must_use]
    pub const fn zero(unit: Unit) -> Self {
        Self { value: 0.0, unit }
    }

    /// Whether the value is neither NaN nor infinite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.value.is_finite()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit.abbreviation())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_unit_parses_names_and_abbreviations() {
        assert_eq!("grams".parse::<Unit>().unwrap(), Unit::Grams);
        assert_eq!("mL".parse::<Unit>().unwrap(), Unit::Milliliters);
        assert_eq!(" Count ".parse::<Unit>().unwrap(), Unit::Count);
        assert!("furlongs".parse::<Unit>().is_err());
    }

    #[test]
    fn test_unit_as_str_round_trips() {
        for unit in [
            Unit::Grams,
            Unit::Ounces,
            Unit::Pounds,
            Unit::Milligrams,
            Unit::Milliliters,
            Unit::Count,
        ] {
            assert_eq!(unit.as_str().parse::<Unit>().unwrap(), unit);
        }
    }

    #[test]
    fn test_unit_deserializes_like_it_parses() {
        #[derive(Deserialize)]
        struct Holder {
            unit: Unit,
        }
        let parsed: Holder = toml::from_str(r#"unit = "mL""#).unwrap();
        assert_eq!(parsed.unit, Unit::Milliliters);
        let parsed: Holder = toml::from_str(r#"unit = "grams""#).unwrap();
        assert_eq!(parsed.unit, Unit::Grams);
        assert!(toml::from_str::<Holder>(r#"unit = "bushels""#).is_err());
    }

    #[test]
    fn test_amount_equality_is_structural() {
        assert_eq!(Amount::new(3.5, Unit::Grams), Amount::new(3.5, Unit::Grams));
        assert_ne!(Amount::new(3.5, Unit::Grams), Amount::new(3.5, Unit::Ounces));
    }

    #[test]
    fn test_amount_display() {
        assert_eq!(Amount::new(3.5, Unit::Grams).to_string(), "3.5 g");
        assert_eq!(Amount::new(-2.0, Unit::Count).to_string(), "-2 ct");
        assert_eq!(Amount::zero(Unit::Milliliters).to_string(), "0 mL");
    }

    #[test]
    fn test_amount_is_finite() {
        assert!(Amount::new(1.0, Unit::Grams).is_finite());
        assert!(!Amount::new(f64::NAN, Unit::Grams).is_finite());
        assert!(!Amount::new(f64::INFINITY, Unit::Grams).is_finite());
    }
}
