//! Money amounts in minor currency units.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are an integer count of the smallest currency unit (e.g. cents);
//! `rust_decimal::Decimal` is only used to present major units.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest balance a bank account may hold: 999,999,999.99 in major units.
pub const MAX_BALANCE: Money = Money(99_999_999_999);

/// Number of minor units in one major unit.
const MINOR_UNIT_SCALE: u32 = 2;

/// A monetary amount counted in minor currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from a count of minor units.
    #[must_use]
    pub const fn from_minor(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// Returns the amount as a count of minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is strictly greater than zero.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Adds two amounts, returning `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Subtracts two amounts, returning `None` on overflow.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Returns true if the amount is a valid bank-account balance.
    #[must_use]
    pub const fn is_valid_balance(self) -> bool {
        self.0 >= 0 && self.0 <= MAX_BALANCE.0
    }

    /// Returns the amount in major units, e.g. `12345` becomes `123.45`.
    #[must_use]
    pub fn to_major(self) -> Decimal {
        Decimal::new(self.0, MINOR_UNIT_SCALE)
    }
}

impl From<i64> for Money {
    fn from(minor_units: i64) -> Self {
        Self(minor_units)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_major())
    }
}

/// Saturates at `i64::MIN`/`i64::MAX` instead of overflowing.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.fold(0i64, |acc, m| acc.saturating_add(m.0)))
    }
}
