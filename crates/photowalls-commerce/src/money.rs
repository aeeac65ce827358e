//! Money and percentage types.
//!
//! Amounts are integers in the smallest unit of the currency so totals shown
//! to the customer never drift the way floating-point sums do.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    RUB,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "RUB").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::RUB => "RUB",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "₽").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::RUB => "\u{20bd}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Get the number of decimal places for this currency.
    ///
    /// Ruble prices in the catalog are whole rubles.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::RUB => 0,
            _ => 2,
        }
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "RUB" => Some(Currency::RUB),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }

    fn symbol_after_amount(&self) -> bool {
        matches!(self, Currency::RUB | Currency::EUR)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A whole-number percentage in the range 1..=100.
///
/// "No discount" is modelled as `Option<Percent>::None`, so a zero
/// percentage can never be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Percent(u8);

impl Percent {
    /// Create a percentage, rejecting 0 and anything above 100.
    pub fn new(value: u8) -> Result<Self, CommerceError> {
        if value == 0 || value > 100 {
            return Err(CommerceError::InvalidPercent(u32::from(value)));
        }
        Ok(Self(value))
    }

    /// Percentage for built-in data; only evaluate in const context so an
    /// out-of-range value fails the build.
    pub(crate) const fn constant(value: u8) -> Self {
        assert!(value > 0 && value <= 100, "percentage out of range");
        Self(value)
    }

    /// The percentage as an integer.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Percent {
    type Error = CommerceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Percent::new(value)
    }
}

impl From<Percent> for u8 {
    fn from(p: Percent) -> Self {
        p.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (whole rubles, cents, ...).
    pub amount: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount < 0
    }

    /// Format as a display string (e.g., "4 050 ₽" or "$49.99").
    pub fn display(&self) -> String {
        let amount = self.display_amount();
        if self.currency.symbol_after_amount() {
            format!("{} {}", amount, self.currency.symbol())
        } else {
            format!("{}{}", self.currency.symbol(), amount)
        }
    }

    /// Format the amount with digit grouping and no symbol (e.g., "4 050").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let magnitude = self.amount.unsigned_abs();
        let sign = if self.amount < 0 { "-" } else { "" };
        let whole = group_thousands(magnitude / divisor);
        if places == 0 {
            format!("{}{}", sign, whole)
        } else {
            let frac = magnitude % divisor;
            format!("{}{}.{:0width$}", sign, whole, frac, width = places as usize)
        }
    }

    /// Try to add another Money value, returning None on currency mismatch or overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount.checked_add(other.amount)?;
        Some(Money::new(amount, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount.checked_sub(other.amount)?;
        Some(Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let amount = self.amount.checked_mul(factor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Calculate a percentage of this amount, truncating toward zero.
    pub fn try_percentage(&self, percent: Percent) -> Option<Money> {
        let amount = self.amount.checked_mul(i64::from(percent.value()))? / 100;
        Some(Money::new(amount, self.currency))
    }

    /// Sum an iterator of Money values.
    ///
    /// Returns None if any value has a different currency or the sum overflows.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_new() {
        let m = Money::new(4500, Currency::RUB);
        assert_eq!(m.amount, 4500);
        assert_eq!(m.currency, Currency::RUB);
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4050, Currency::RUB).display(), "4 050 \u{20bd}");
        assert_eq!(Money::new(580, Currency::RUB).display(), "580 \u{20bd}");
        assert_eq!(Money::new(1_234_567, Currency::RUB).display(), "1 234 567 \u{20bd}");
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(-450, Currency::RUB).display(), "-450 \u{20bd}");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::RUB);
        let b = Money::new(500, Currency::RUB);
        assert_eq!(a.try_add(&b).unwrap().amount, 1500);
    }

    #[test]
    fn test_money_currency_mismatch() {
        let rub = Money::new(1000, Currency::RUB);
        let eur = Money::new(1000, Currency::EUR);
        assert!(rub.try_add(&eur).is_none());
        assert!(rub.try_subtract(&eur).is_none());
    }

    #[test]
    fn test_money_overflow() {
        let m = Money::new(i64::MAX, Currency::RUB);
        assert!(m.try_multiply(2).is_none());
        assert!(m.try_add(&Money::new(1, Currency::RUB)).is_none());
    }

    #[test]
    fn test_money_percentage() {
        let m = Money::new(4500, Currency::RUB);
        let ten = Percent::new(10).unwrap();
        assert_eq!(m.try_percentage(ten).unwrap().amount, 450);

        // Truncates toward zero
        let m = Money::new(3825, Currency::RUB);
        assert_eq!(m.try_percentage(ten).unwrap().amount, 382);
    }

    #[test]
    fn test_money_sum() {
        let values = [
            Money::new(100, Currency::RUB),
            Money::new(250, Currency::RUB),
        ];
        let total = Money::try_sum(values.iter(), Currency::RUB).unwrap();
        assert_eq!(total.amount, 350);
        assert!(Money::try_sum(values.iter(), Currency::USD).is_none());
    }

    #[test]
    fn test_percent_bounds() {
        assert!(Percent::new(0).is_err());
        assert!(Percent::new(101).is_err());
        assert_eq!(Percent::new(100).unwrap().value(), 100);
        assert_eq!(Percent::new(1).unwrap().to_string(), "1%");
    }

    #[test]
    fn test_percent_deserialize_validates() {
        let ok: Percent = serde_json::from_str("15").unwrap();
        assert_eq!(ok.value(), 15);
        assert!(serde_json::from_str::<Percent>("0").is_err());
        assert!(serde_json::from_str::<Percent>("150").is_err());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("RUB"), Some(Currency::RUB));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
