//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a decimal number")]
    InvalidNumber,
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount has more fractional digits than the currency supports.
    #[error("price supports at most {max_scale} fractional digits")]
    TooPrecise {
        /// Maximum number of fractional digits.
        max_scale: u32,
    },
}

/// A non-negative amount of money.
///
/// Prices are decimal values with at most two fractional digits, held as
/// [`rust_decimal::Decimal`] so no binary floating point is involved at any
/// point. The amount is normalized to exactly two fractional digits, so
/// `"10"` and `"10.00"` parse to the same value and both display as
/// `10.00`.
///
/// The store is single-currency; prices carry no currency code.
///
/// ## Examples
///
/// ```
/// use stockroom_core::Price;
///
/// let price = Price::parse("999.99")?;
/// assert_eq!(price.to_string(), "999.99");
///
/// assert!(Price::parse("-1").is_err());    // negative
/// assert!(Price::parse("1.999").is_err()); // sub-cent precision
/// # Ok::<(), stockroom_core::PriceError>(())
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Maximum number of fractional digits.
    pub const MAX_SCALE: u32 = 2;

    /// Parse a `Price` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is not a decimal number
    /// - Is negative
    /// - Has more than two fractional digits
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        if s.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount = Decimal::from_str(s).map_err(|_| PriceError::InvalidNumber)?;
        Self::from_decimal(amount)
    }

    /// Build a `Price` from an already-parsed decimal amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative or carries more than two
    /// fractional digits.
    pub fn from_decimal(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative);
        }

        if amount.scale() > Self::MAX_SCALE {
            return Err(PriceError::TooPrecise {
                max_scale: Self::MAX_SCALE,
            });
        }

        let mut amount = amount;
        amount.rescale(Self::MAX_SCALE);
        if amount.is_zero() {
            // Collapse "-0" so zero has a single representation
            amount.set_sign_positive(true);
        }

        Ok(Self(amount))
    }

    /// Returns the amount as a decimal.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(amount)
    }
}

// SQLx support (with sqlite feature). Prices are stored as TEXT because
// SQLite has no decimal column type and REAL would reintroduce binary
// floating point.
#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for Price {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for Price {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Sqlite>>::decode(value)?;
        // Database values are assumed valid
        let amount = Decimal::from_str(&s)?;
        Ok(Self(amount))
    }
}

#[cfg(feature = "sqlite")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&self.0.to_string(), buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_prices() {
        assert!(Price::parse("999.99").is_ok());
        assert!(Price::parse("0").is_ok());
        assert!(Price::parse("0.00").is_ok());
        assert!(Price::parse("29.99").is_ok());
        assert!(Price::parse("1000000").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Price::parse(""), Err(PriceError::Empty)));
    }

    #[test]
    fn test_parse_not_a_number() {
        assert!(matches!(
            Price::parse("abc"),
            Err(PriceError::InvalidNumber)
        ));
        assert!(matches!(
            Price::parse("12.3.4"),
            Err(PriceError::InvalidNumber)
        ));
        assert!(matches!(
            Price::parse("$9.99"),
            Err(PriceError::InvalidNumber)
        ));
    }

    #[test]
    fn test_parse_negative() {
        assert!(matches!(Price::parse("-1"), Err(PriceError::Negative)));
        assert!(matches!(Price::parse("-0.01"), Err(PriceError::Negative)));
    }

    #[test]
    fn test_parse_too_precise() {
        assert!(matches!(
            Price::parse("1.999"),
            Err(PriceError::TooPrecise { max_scale: 2 })
        ));
    }

    #[test]
    fn test_normalizes_to_two_fractional_digits() {
        assert_eq!(Price::parse("10").unwrap().to_string(), "10.00");
        assert_eq!(Price::parse("0.5").unwrap().to_string(), "0.50");
        assert_eq!(Price::parse("999.99").unwrap().to_string(), "999.99");
    }

    #[test]
    fn test_equal_regardless_of_input_scale() {
        assert_eq!(Price::parse("10").unwrap(), Price::parse("10.00").unwrap());
    }

    #[test]
    fn test_negative_zero_collapses() {
        let price = Price::parse("-0.0").unwrap();
        assert_eq!(price.to_string(), "0.00");
    }

    #[test]
    fn test_ordering() {
        let cheap = Price::parse("29.99").unwrap();
        let pricey = Price::parse("999.99").unwrap();
        assert!(cheap < pricey);
    }

    #[test]
    fn test_from_decimal() {
        let amount = Decimal::new(99_999, 2); // 999.99
        let price = Price::from_decimal(amount).unwrap();
        assert_eq!(price.amount(), amount);
    }

    #[test]
    fn test_serde_roundtrip() {
        let price = Price::parse("999.99").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"999.99\"");

        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }

    #[test]
    fn test_from_str() {
        let price: Price = "79.99".parse().unwrap();
        assert_eq!(price.to_string(), "79.99");
    }
}
