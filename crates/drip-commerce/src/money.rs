//! Monetary amounts in integer minor units.
//!
//! Prices and totals never touch floating point: an amount is a count of
//! paise, cents, or pence. Arithmetic the engine depends on is checked,
//! so overflow surfaces as an error instead of wrapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies the store can be configured with.
///
/// All of them use two-digit minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
}

impl Currency {
    const ALL: [Currency; 4] = [Currency::INR, Currency::USD, Currency::EUR, Currency::GBP];

    /// ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            Currency::INR => "INR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }

    /// Display symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::INR => "\u{20b9}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Look a currency up by its code, ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An amount of money in a single currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in minor units (paise, cents, pence).
    pub amount: i64,
    /// The currency the amount is denominated in.
    pub currency: Currency,
}

impl Money {
    /// An amount of minor units in the given currency.
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Zero in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Whether the amount is zero.
    pub fn is_zero(self) -> bool {
        self.amount == 0
    }

    /// Checked addition. Fails on currency mismatch or overflow.
    pub fn try_add(self, other: Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount.checked_add(other.amount)?;
        Some(Money::new(amount, self.currency))
    }

    /// Checked scalar multiplication. Fails on overflow.
    pub fn try_multiply(self, factor: i64) -> Option<Money> {
        let amount = self.amount.checked_mul(factor)?;
        Some(Money::new(amount, self.currency))
    }

    /// Checked sum of amounts, starting from zero in `currency`.
    ///
    /// Fails if any amount is in another currency or the total overflows.
    pub fn try_sum(values: impl IntoIterator<Item = Money>, currency: Currency) -> Option<Money> {
        values
            .into_iter()
            .try_fold(Money::zero(currency), Money::try_add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            self.currency.symbol(),
            abs / 100,
            abs % 100
        )
    }
}
