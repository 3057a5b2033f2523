//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing prices as floats:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Cart totals and order totals are summed in cents, so the order      │
//! │    total is exactly the sum of the line prices.                        │
//! │                                                                         │
//! │  The database stores REAL columns; kicks-db converts at the boundary.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kicks_core::money::Money;
//!
//! let airmax = Money::from_major_minor(120, 0);
//! let ultraboost = Money::from_cents(15000);
//!
//! let total: Money = [airmax, ultraboost].into_iter().sum();
//! assert_eq!(total.cents(), 27000);
//! ```
//!
//! ## Overflow
//! `+`, `+=`, `-` and `sum()` saturate at `i64::MIN`/`i64::MAX` cents rather
//! than panicking. Use [`Money::checked_add`] to detect overflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// sneakers.price ──► CartLine.price ──► Cart::total() ──► Order.total_price
///                          │
///                          └──► Displayed as "$120.00" by the presentation layer
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use kicks_core::money::Money;
    ///
    /// let price = Money::from_cents(12999); // Represents $129.99
    /// assert_eq!(price.cents(), 12999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use kicks_core::money::Money;
    ///
    /// let price = Money::from_major_minor(149, 99);
    /// assert_eq!(price.cents(), 14999);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money with a dollar sign and two decimals.
///
/// Presentation surfaces with a configured currency symbol should use
/// `ConfigState::format_currency` in the storefront crate instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(12099);
        assert_eq!(money.cents(), 12099);
        assert_eq!(money.dollars(), 120);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(150, 0).cents(), 15000);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(27000)), "$270.00");
        assert_eq!(format!("{}", Money::from_cents(5)), "$0.05");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_sum_is_exact() {
        // 0.10 + 0.20 summed in cents has no representation error
        let prices = vec![Money::from_cents(10), Money::from_cents(20)];
        let total: Money = prices.iter().sum();
        assert_eq!(total, Money::from_cents(30));
    }

    #[test]
    fn test_arithmetic() {
        let mut a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        a += b;
        assert_eq!(a.cents(), 1500);
        assert!(a.is_positive());
        assert!(!Money::default().is_positive());
    }

    #[test]
    fn test_addition_saturates() {
        let huge = Money::from_cents(i64::MAX - 10);

        assert_eq!((huge + Money::from_cents(100)).cents(), i64::MAX);
        assert_eq!([huge, huge, huge].into_iter().sum::<Money>().cents(), i64::MAX);
        assert_eq!((Money::from_cents(i64::MIN) - Money::from_cents(1)).cents(), i64::MIN);

        let mut total = huge;
        total += huge;
        assert_eq!(total.cents(), i64::MAX);
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(
            Money::from_cents(12000).checked_add(Money::from_cents(15000)),
            Some(Money::from_cents(27000))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }
}
