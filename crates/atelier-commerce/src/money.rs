//! Money type for representing prices and totals.
//!
//! Uses a cents-based integer representation to avoid floating-point
//! precision issues. The backend speaks decimals, so the wire format is
//! a JSON number (or a decimal string, which some endpoints return).

use crate::CommerceError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use std::str::FromStr;

/// A monetary amount in the store currency, held in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Create a value from cents.
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// The zero amount.
    pub const fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Create a value from a decimal amount, rounding to the nearest cent.
    ///
    /// ```
    /// use atelier_commerce::Money;
    /// assert_eq!(Money::from_decimal(49.99).cents(), 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::from_cents((amount * 100.0).round() as i64)
    }

    /// Amount in cents.
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Multiply by a quantity, returning `None` on overflow.
    pub fn checked_mul(&self, quantity: i64) -> Option<Money> {
        self.cents.checked_mul(quantity).map(Money::from_cents)
    }

    /// Add another amount, returning `None` on overflow.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.cents.checked_add(other.cents).map(Money::from_cents)
    }

    /// Format without the currency symbol (e.g. "49.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = CommerceError;

    /// Parse a decimal string such as "29.99", "30" or "$12.50".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('$');
        let value: f64 = trimmed
            .parse()
            .map_err(|_| CommerceError::InvalidPrice(s.to_string()))?;
        if !value.is_finite() {
            return Err(CommerceError::InvalidPrice(s.to_string()));
        }
        Ok(Money::from_decimal(value))
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
        Money::from_cents(self.cents.saturating_mul(i64::from(quantity)))
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
        enum Wire {
            Number(f64),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Number(n) => Ok(Money::from_decimal(n)),
            Wire::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
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
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(-250).to_string(), "-$2.50");
        assert_eq!(Money::zero().display_amount(), "0.00");
    }

    #[test]
    fn test_money_parse() {
        assert_eq!("29.99".parse::<Money>().unwrap().cents(), 2999);
        assert_eq!(" $12.5 ".parse::<Money>().unwrap().cents(), 1250);
        assert!("abc".parse::<Money>().is_err());
        assert!("NaN".parse::<Money>().is_err());
    }

    #[test]
    fn test_money_arithmetic() {
        let price = Money::from_cents(1000);
        assert_eq!((price * 3).cents(), 3000);
        assert_eq!((price + Money::from_cents(1)).cents(), 1001);
        let total: Money = vec![Money::from_cents(100), Money::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 350);
        assert!(Money::from_cents(i64::MAX).checked_mul(2).is_none());
    }

    #[test]
    fn test_money_wire_format() {
        let from_number: Money = serde_json::from_str("19.99").unwrap();
        let from_text: Money = serde_json::from_str("\"19.99\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "19.99");
    }
}
