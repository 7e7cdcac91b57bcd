use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A monetary value in plain decimal arithmetic.
///
/// Wraps `rust_decimal::Decimal` so amounts and totals cannot be mixed up with
/// other numbers. Any sign is allowed: a negative balance means the worker was
/// overpaid.
///
/// Serializes as a decimal string (`"1500.25"`), never as a JSON number, so
/// every digit survives consumers that parse numbers as `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Deserializes from the textual form only.
    ///
    /// Self-describing formats such as CSV guess a number type for
    /// `deserialize_any` and would hand over an `f64`, rounding anything past
    /// ~17 significant digits.
    pub fn deserialize_exact<'de, D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        rust_decimal::serde::str::deserialize(deserializer).map(Self)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(10.50));
        let b = Money::new(dec!(5.25));
        assert_eq!(a + b, Money::new(dec!(15.75)));
        assert_eq!(b - a, Money::new(dec!(-5.25)));

        let mut c = Money::ZERO;
        c += a;
        c -= b;
        assert_eq!(c, Money::new(dec!(5.25)));
    }

    #[test]
    fn test_money_sum() {
        let values = [Money::new(dec!(0.1)), Money::new(dec!(0.2)), Money::new(dec!(-0.3))];
        assert_eq!(values.iter().sum::<Money>(), Money::ZERO);
        assert_eq!(std::iter::empty::<Money>().sum::<Money>(), Money::ZERO);
    }

    #[test]
    fn test_money_deserializes_from_string_and_number() {
        let from_str: Money = serde_json::from_str("\"1500.00\"").unwrap();
        let from_num: Money = serde_json::from_str("800").unwrap();
        assert_eq!(from_str, Money::new(dec!(1500)));
        assert_eq!(from_num, Money::new(dec!(800)));
    }

    #[test]
    fn test_money_serializes_as_exact_string() {
        let amount = Money::new(dec!(12345678901234567.89));
        let json = serde_json::to_value(amount).unwrap();
        assert_eq!(json, serde_json::json!("12345678901234567.89"));

        let back: Money = serde_json::from_value(json).unwrap();
        assert_eq!(back, amount);
    }
}
