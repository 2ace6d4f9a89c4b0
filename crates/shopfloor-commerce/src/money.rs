//! Money type for representing monetary values.
//!
//! Amounts are held in cents so that totals are exact sums. On the wire
//! they are plain decimals: the backend sends prices as JSON numbers (or
//! numeric strings, as DECIMAL columns often serialize) and expects
//! numbers back.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// Number of fractional digits shown and kept.
pub const DECIMAL_PLACES: u32 = 2;

const CENTS_PER_UNIT: i64 = 10_i64.pow(DECIMAL_PLACES);

/// A monetary amount in the store's single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// ```
    /// use shopfloor_commerce::Money;
    /// let price = Money::from_decimal(49.99);
    /// assert_eq!(price.cents(), 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::from_cents((amount * CENTS_PER_UNIT as f64).round() as i64)
    }

    /// Parse a decimal string such as `"10.50"`.
    pub fn parse(input: &str) -> Option<Self> {
        let amount: f64 = input.trim().parse().ok()?;
        amount.is_finite().then(|| Self::from_decimal(amount))
    }

    pub const fn zero() -> Self {
        Self::from_cents(0)
    }

    pub const fn cents(&self) -> i64 {
        self.cents
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.cents as f64 / CENTS_PER_UNIT as f64
    }

    /// Multiply by a quantity, saturating instead of overflowing.
    pub fn times(&self, quantity: u32) -> Money {
        Money::from_cents(self.cents.saturating_mul(i64::from(quantity)))
    }

    /// Format without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        let unit = CENTS_PER_UNIT as u64;
        format!(
            "{}{}.{:0width$}",
            sign,
            abs / unit,
            abs % unit,
            width = DECIMAL_PLACES as usize
        )
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::from_cents(self.cents.saturating_add(other.cents))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        self.times(quantity)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cents < 0 {
            write!(f, "-${}", Money::from_cents(-self.cents).display_amount())
        } else {
            write!(f, "${}", self.display_amount())
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        let money = match Raw::deserialize(deserializer)? {
            Raw::Number(n) if n.is_finite() => Money::from_decimal(n),
            Raw::Number(n) => {
                return Err(de::Error::custom(format!("invalid amount: {}", n)));
            }
            Raw::Text(s) => Money::parse(&s)
                .ok_or_else(|| de::Error::custom(format!("invalid amount: {:?}", s)))?,
        };
        Ok(money)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(49.99).cents(), 4999);
        assert_eq!(Money::from_decimal(0.1 + 0.2).cents(), 30);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(4999).to_string(), "$49.99");
        assert_eq!(Money::from_cents(3000).to_string(), "$30.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-250).to_string(), "-$2.50");
        assert_eq!(Money::zero().display_amount(), "0.00");
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::from_cents(1000);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!((a + Money::from_cents(5)).cents(), 1005);
        let total: Money = vec![a, a, Money::from_cents(1)].into_iter().sum();
        assert_eq!(total.cents(), 2001);
    }

    #[test]
    fn test_times_saturates() {
        assert_eq!(Money::from_cents(i64::MAX).times(2).cents(), i64::MAX);
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let m: Money = serde_json::from_str("10.5").unwrap();
        assert_eq!(m.cents(), 1050);
        let m: Money = serde_json::from_str("\"10.50\"").unwrap();
        assert_eq!(m.cents(), 1050);
        let m: Money = serde_json::from_str("12").unwrap();
        assert_eq!(m.cents(), 1200);
        assert!(serde_json::from_str::<Money>("\"ten\"").is_err());
    }

    #[test]
    fn test_serialize_as_decimal_number() {
        let json = serde_json::to_value(Money::from_cents(3000)).unwrap();
        assert_eq!(json, serde_json::json!(30.0));
    }
}
