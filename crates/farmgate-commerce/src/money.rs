//! Money type for representing monetary values.
//!
//! Uses minor-unit integer representation (kobo, cents) to avoid the
//! floating-point precision issues that plague monetary calculations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Supported currencies.
///
/// The set matches the markets the payment gateway serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Nigerian naira.
    #[default]
    NGN,
    /// Kenyan shilling.
    KES,
    /// Ghanaian cedi.
    GHS,
    /// South African rand.
    ZAR,
    /// US dollar.
    USD,
}

impl Currency {
    /// Get the currency code (e.g., "NGN").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::NGN => "NGN",
            Currency::KES => "KES",
            Currency::GHS => "GHS",
            Currency::ZAR => "ZAR",
            Currency::USD => "USD",
        }
    }

    /// Get the currency symbol (e.g., "₦").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::NGN => "\u{20a6}",
            Currency::KES => "KSh",
            Currency::GHS => "GH\u{20b5}",
            Currency::ZAR => "R",
            Currency::USD => "$",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "NGN" => Some(Currency::NGN),
            "KES" => Some(Currency::KES),
            "GHS" => Some(Currency::GHS),
            "ZAR" => Some(Currency::ZAR),
            "USD" => Some(Currency::USD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., kobo for
/// NGN). This avoids floating-point precision issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., kobo).
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use farmgate_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(49.99, Currency::NGN);
    /// assert_eq!(price.amount_minor, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_minor = (amount * multiplier as f64).round() as i64;
        Self::new(amount_minor, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_minor as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "₦49.99").
    pub fn display(&self) -> String {
        let decimal = self.to_decimal();
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), decimal)
    }

    /// Try to add another Money value, returning None if currencies don't
    /// match or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let sum = self.amount_minor.checked_add(other.amount_minor)?;
        Some(Money::new(sum, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let diff = self.amount_minor.checked_sub(other.amount_minor)?;
        Some(Money::new(diff, self.currency))
    }

    /// Try to multiply by a scalar, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let product = self.amount_minor.checked_mul(factor)?;
        Some(Money::new(product, self.currency))
    }

    /// Sum an iterator of Money values, returning None on currency
    /// mismatch or overflow.
    pub fn try_sum<'a>(
        iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        let mut acc = Money::zero(currency);
        for m in iter {
            acc = acc.try_add(m)?;
        }
        Some(acc)
    }
}

impl Add for Money {
    type Output = Money;

    /// # Panics
    /// Panics if currencies don't match or the sum overflows. Use
    /// [`Money::try_add`] for fallible addition.
    fn add(self, other: Money) -> Money {
        self.try_add(&other).expect("Currency mismatch in addition")
    }
}

impl Sub for Money {
    type Output = Money;

    /// # Panics
    /// Panics if currencies don't match or the difference overflows.
    fn sub(self, other: Money) -> Money {
        self.try_subtract(&other)
            .expect("Currency mismatch in subtraction")
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    /// # Panics
    /// Panics on overflow. Use [`Money::try_multiply`] for fallible
    /// multiplication.
    fn mul(self, factor: i64) -> Money {
        self.try_multiply(factor).expect("Overflow in multiplication")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_minor_units() {
        let m = Money::new(4999, Currency::NGN);
        assert_eq!(m.amount_minor, 4999);
        assert_eq!(m.currency, Currency::NGN);
    }

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::NGN);
        assert_eq!(m.amount_minor, 4999);

        let m = Money::from_decimal(200.0, Currency::NGN);
        assert_eq!(m.amount_minor, 20000);
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(4999, Currency::NGN);
        assert!((m.to_decimal() - 49.99).abs() < 0.001);
    }

    #[test]
    fn test_money_display() {
        let m = Money::new(4999, Currency::NGN);
        assert_eq!(m.display(), "\u{20a6}49.99");

        let m = Money::new(100, Currency::USD);
        assert_eq!(m.display(), "$1.00");
    }

    #[test]
    fn test_money_addition() {
        let a = Money::new(1000, Currency::NGN);
        let b = Money::new(500, Currency::NGN);
        let c = a + b;
        assert_eq!(c.amount_minor, 1500);
    }

    #[test]
    fn test_money_multiply() {
        let m = Money::new(1000, Currency::NGN);
        let doubled = m * 2;
        assert_eq!(doubled.amount_minor, 2000);
    }

    #[test]
    fn test_money_try_add_currency_mismatch() {
        let ngn = Money::new(1000, Currency::NGN);
        let usd = Money::new(1000, Currency::USD);
        assert!(ngn.try_add(&usd).is_none());
    }

    #[test]
    fn test_money_try_multiply_overflow() {
        let m = Money::new(i64::MAX, Currency::NGN);
        assert!(m.try_multiply(2).is_none());
    }

    #[test]
    fn test_money_try_sum() {
        let values = [
            Money::new(100, Currency::NGN),
            Money::new(250, Currency::NGN),
        ];
        let sum = Money::try_sum(values.iter(), Currency::NGN).unwrap();
        assert_eq!(sum.amount_minor, 350);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("NGN"), Some(Currency::NGN));
        assert_eq!(Currency::from_code("kes"), Some(Currency::KES));
        assert_eq!(Currency::from_code("INVALID"), None);
    }
}
