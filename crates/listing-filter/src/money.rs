//! Money type for listing prices.
//!
//! Uses cents-based integer representation so that effective prices compare
//! exactly against the cent-granular price buckets.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported display currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    BRL,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "BRL").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "R$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BRL => "R$ ",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Thousands separator used when formatting amounts.
    pub fn thousands_separator(&self) -> char {
        match self {
            Currency::USD => ',',
            Currency::BRL | Currency::EUR => '.',
        }
    }

    /// Decimal separator used when formatting amounts.
    pub fn decimal_separator(&self) -> char {
        match self {
            Currency::USD => '.',
            Currency::BRL | Currency::EUR => ',',
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
/// Amounts are stored in the smallest unit of the currency (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// ```
    /// use listing_filter::money::{Money, Currency};
    /// let price = Money::from_decimal(49.99, Currency::BRL);
    /// assert_eq!(price.amount_cents, 4999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format with symbol and locale separators (e.g., "R$ 1.234,56").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without symbol (e.g., "1.234,56" for BRL, "1,234.56" for USD).
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places();
        let divisor = 10_i64.pow(places);
        let abs = self.amount_cents.unsigned_abs();
        let whole = group_thousands(abs / divisor as u64, self.currency.thousands_separator());
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        if places == 0 {
            return format!("{}{}", sign, whole);
        }
        format!(
            "{}{}{}{:0width$}",
            sign,
            whole,
            self.currency.decimal_separator(),
            abs % divisor as u64,
            width = places as usize
        )
    }

    /// Format whole units only (e.g., "R$ 5.000"), used for bucket labels.
    pub fn display_whole(&self) -> String {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        let whole = group_thousands(
            (self.amount_cents / divisor).unsigned_abs(),
            self.currency.thousands_separator(),
        );
        format!("{}{}", self.currency.symbol(), whole)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
