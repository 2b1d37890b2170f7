//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as [`Decimal`] in the currency's standard unit (cedis,
//! not pesewas). They are serialized as decimal strings so the persisted
//! cart record reads `{"price": "10.5"}` and reloads exactly, and they accept
//! either numeric strings or numbers when deserialized.
//!
//! Display rounds half away from zero to two places (`0.125` shows as
//! `0.13`).

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number (this includes `NaN` and `inf`).
    #[error("price is not a number: {0}")]
    Invalid(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative unit price.
///
/// ```
/// use tuckshop_core::Price;
///
/// assert_eq!(Price::parse("10.00").unwrap().to_string(), "10.00");
/// assert!(Price::parse("NaN").is_err());
/// assert!(Price::parse("-1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        // Collapse `-0` so it never renders with a sign.
        Ok(Self(amount.abs()))
    }

    /// Create a price from a whole number of minor units (pesewas, cents).
    #[must_use]
    pub fn from_minor_units(units: u32) -> Self {
        Self(Decimal::new(i64::from(units), 2))
    }

    /// Parse a price from user input.
    ///
    /// Accepts plain (`"5.50"`) and scientific (`"5.5e0"`) notation.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a decimal number, or
    /// negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| PriceError::Invalid(trimmed.to_owned()))?;

        Self::new(amount)
    }

    /// Returns the amount in the currency's standard unit.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the price of `quantity` units.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Decimal {
        self.0.saturating_mul(Decimal::from(quantity))
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::str::serialize(&self.0, serializer)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", round_cents(self.0))
    }
}

/// Round to two places, half away from zero.
fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// ISO 4217 currency codes the shop can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    GHS,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Short symbol used next to unit and line prices (e.g. `₵`).
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::GHS => "₵",
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Unambiguous symbol used for totals (e.g. `GH₵`).
    #[must_use]
    pub const fn qualified_symbol(self) -> &'static str {
        match self {
            Self::GHS => "GH₵",
            Self::USD => "US$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Returns the ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::GHS => "GHS",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }

    /// Format an amount with the short symbol and two decimals.
    #[must_use]
    pub fn format(self, amount: Decimal) -> String {
        format!("{}{:.2}", self.symbol(), round_cents(amount))
    }

    /// Format an amount with the qualified symbol and two decimals.
    #[must_use]
    pub fn format_qualified(self, amount: Decimal) -> String {
        format!("{}{:.2}", self.qualified_symbol(), round_cents(amount))
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GHS" => Ok(Self::GHS),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            other => Err(format!("unsupported currency code: {other}")),
        }
    }
}
