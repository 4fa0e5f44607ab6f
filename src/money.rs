//! Fixed-point money type with 2 decimal places precision.
//!
//! ABA files carry amounts as integer counts of cents. `Money` wraps
//! `rust_decimal` and keeps every value at scale 2, so the cent count is
//! always the mantissa of the underlying decimal.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// A decimal amount in major units (dollars) with exactly 2 decimal places.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use aba_generator::Money;
///
/// let amount = Money::from_str("1337.42").unwrap();
/// assert_eq!(amount.minor_units(), 133742);
/// assert_eq!(amount.to_string(), "1337.42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Money(Decimal);

impl Money {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// Creates a new `Money`, rounding half away from zero to 2 decimal places.
    pub fn new(value: Decimal) -> Self {
        let mut normalized =
            value.round_dp_with_strategy(Self::SCALE, RoundingStrategy::MidpointAwayFromZero);
        normalized.rescale(Self::SCALE);
        Money(normalized)
    }

    /// Creates a value from a whole number of cents.
    pub fn from_minor_units(cents: i64) -> Self {
        Money(Decimal::new(cents, Self::SCALE))
    }

    /// Returns the amount as a count of minor units (cents).
    ///
    /// Values saturated at the decimal limits may carry a scale other than
    /// 2, so the mantissa is shifted to cents rather than returned as is.
    pub fn minor_units(&self) -> i128 {
        let mantissa = self.0.mantissa();
        let scale = self.0.scale();
        if scale <= Self::SCALE {
            mantissa * 10i128.pow(Self::SCALE - scale)
        } else {
            mantissa / 10i128.pow(scale - Self::SCALE)
        }
    }

    /// Returns the absolute value.
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the underlying decimal.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money::new(value)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Money::new(Decimal::from(value))
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())?;
        Ok(Money::new(decimal))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    /// Saturates at the decimal limits instead of panicking.
    fn add(self, rhs: Self) -> Self::Output {
        let sum = self.0.checked_add(rhs.0).unwrap_or(if rhs.0.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        });
        Money::new(sum)
    }
}

impl Sub for Money {
    type Output = Self;

    /// Saturates at the decimal limits instead of panicking.
    fn sub(self, rhs: Self) -> Self::Output {
        let difference = self.0.checked_sub(rhs.0).unwrap_or(if rhs.0.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        });
        Money::new(difference)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:.2}", self.0))
    }
}

impl<'de> Deserialize<'de> for Money {
    /// Accepts JSON numbers as well as decimal strings.
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <Decimal as Deserialize>::deserialize(deserializer).map(Money::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_normalizes_scale() {
        let m = Money::from_str("12").unwrap();
        assert_eq!(m.to_string(), "12.00");
        assert_eq!(m.minor_units(), 1200);

        let m = Money::from_str(" 1.5 ").unwrap();
        assert_eq!(m.to_string(), "1.50");
        assert_eq!(m.minor_units(), 150);
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        assert_eq!(Money::from_str("1.005").unwrap().minor_units(), 101);
        assert_eq!(Money::from_str("1.004").unwrap().minor_units(), 100);
        assert_eq!(Money::from_str("-1.005").unwrap().minor_units(), -101);
    }

    #[test]
    fn test_sum_and_difference() {
        let amounts = [
            Money::from_str("666.69").unwrap(),
            Money::from_str("616.66").unwrap(),
        ];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.minor_units(), 128335);

        let credit = Money::from_str("666.66").unwrap();
        let debit = Money::from_str("1337.42").unwrap();
        assert_eq!((credit - debit).minor_units(), -67076);
        assert_eq!((credit - debit).abs().minor_units(), 67076);
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_panicking() {
        let max = Money::new(Decimal::MAX);
        let min = Money::new(Decimal::MIN);

        assert_eq!(max + max, max);
        assert_eq!(min + min, min);
        assert_eq!(max - min, max);
        assert_eq!(min - max, min);
        assert!(max.minor_units() > 0);
        assert!(min.minor_units() < 0);
    }

    #[test]
    fn test_from_minor_units() {
        assert_eq!(Money::from_minor_units(57378).to_string(), "573.78");
        assert!(Money::from_minor_units(0).is_zero());
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let from_number: Money = serde_json::from_str("1337.42").unwrap();
        let from_string: Money = serde_json::from_str("\"1337.42\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.minor_units(), 133742);
    }
}
