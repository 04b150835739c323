//! Currency codes and price formatting.
//!
//! Amounts are carried as exact [`Decimal`] values everywhere in the cart.
//! Rounding to two fractional digits happens only here, at display time.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown currency code.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown currency code: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for CurrencyCode {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Self::INR),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(UnknownCurrency(s.to_owned())),
        }
    }
}

/// Formats decimal amounts for display.
///
/// The symbol is configuration, not business logic: the same cart renders
/// as `₹2599.00` or `$2599.00` depending on how the storefront is set up.
///
/// ```
/// use rust_decimal::Decimal;
/// use shopfront_core::{CurrencyCode, PriceFormat};
///
/// let format = PriceFormat::from(CurrencyCode::USD);
/// assert_eq!(format.format(Decimal::new(2999, 2)), "$29.99");
/// assert_eq!(format.format(Decimal::new(299, 0)), "$299.00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceFormat {
    symbol: String,
}

impl PriceFormat {
    /// Create a formatter with an explicit symbol.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// The symbol prefixed to every amount.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Format an amount with exactly two fractional digits.
    ///
    /// Midpoints round away from zero.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{}{rounded:.2}", self.symbol)
    }
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self::from(CurrencyCode::default())
    }
}

impl From<CurrencyCode> for PriceFormat {
    fn from(code: CurrencyCode) -> Self {
        Self::new(code.symbol())
    }
}
