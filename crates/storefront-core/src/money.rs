//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Storefront prices are admin-entered per market:                        │
//! │    $49.99, ₹3,499.00, €44.90  → must round-trip EXACTLY                 │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal                                    │
//! │    96-bit mantissa + scale, base-10 arithmetic                          │
//! │    49.99 - 49.99 * 10 / 100 = 44.991 (exact, no drift)                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `Money` carries no currency: the resolvers attach a currency code and
//! symbol next to it, because one stored amount may be shown in whatever
//! currency the pricing context resolved to.
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//! use rust_decimal_macros::dec;
//!
//! let price = Money::new(dec!(10.99));
//! let doubled = price * 2;
//! assert_eq!(doubled.amount(), dec!(21.98));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// An exact monetary amount in the major unit (dollars, rupees, euros).
///
/// ## Design Decisions
/// - **Decimal, not float**: no binary rounding artefacts
/// - **Transparent serde**: serializes exactly like the inner decimal
/// - **Signed**: intermediate results may go negative; the discount helpers
///   clamp before anything reaches a customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Wraps a decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is below zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns `max(self, 0)`.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Money::new(dec!(-3)).clamp_non_negative(), Money::zero());
    /// assert_eq!(Money::new(dec!(3)).clamp_non_negative(), Money::new(dec!(3)));
    /// ```
    #[inline]
    pub fn clamp_non_negative(self) -> Self {
        if self.is_negative() {
            Money::zero()
        } else {
            self
        }
    }

    /// Multiplies money by a quantity, saturating at the decimal range.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let unit_price = Money::new(dec!(2.99));
    /// assert_eq!(unit_price.multiply_quantity(3).amount(), dec!(8.97));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(Decimal::from(qty)))
    }

    /// Returns `percent`% of this amount (unrounded).
    ///
    /// Saturates instead of overflowing, so even `Decimal::MAX` prices
    /// produce a value.
    pub fn percentage(&self, percent: Decimal) -> Money {
        Money(self.0.saturating_mul(percent / Decimal::ONE_HUNDRED))
    }

    /// `self + other`, saturating at the decimal range.
    #[inline]
    pub fn saturating_add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// `self - other`, saturating at the decimal range.
    #[inline]
    pub fn saturating_sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }

    /// Rounds to `dp` decimal places, midpoint away from zero.
    ///
    /// Only the presentation layer should need this; resolvers keep full
    /// precision.
    pub fn round_dp(&self, dp: u32) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering, no symbol or grouping.
///
/// ## Note
/// Customer-facing output goes through [`crate::format`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_arithmetic() {
        let a = Money::new(dec!(10.00));
        let b = Money::new(dec!(5.00));

        assert_eq!((a + b).amount(), dec!(15.00));
        assert_eq!((a - b).amount(), dec!(5.00));
        let result: Money = a * 3;
        assert_eq!(result.amount(), dec!(30.00));
    }

    #[test]
    fn test_no_float_drift() {
        let total: Money = [dec!(0.1), dec!(0.2)].into_iter().map(Money::new).sum();
        assert_eq!(total.amount(), dec!(0.3));
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::new(dec!(-1));
        assert!(negative.is_negative());
        assert_eq!(negative.clamp_non_negative(), Money::zero());
    }

    #[test]
    fn test_percentage() {
        let price = Money::new(dec!(49.99));
        assert_eq!(price.percentage(dec!(10)).amount(), dec!(4.999));
    }

    #[test]
    fn test_large_amounts_saturate() {
        let max = Money::new(Decimal::MAX);
        let half = max.percentage(dec!(50));
        assert!(half.is_positive() && half < max);
        assert_eq!(max.percentage(dec!(150)), max);
        assert_eq!(max.multiply_quantity(3), max);
        assert_eq!(max.saturating_add(Money::new(dec!(1))), max);
        assert_eq!(Money::new(Decimal::MIN).saturating_sub(max), Money::new(Decimal::MIN));

        let total: Money = [max, max].into_iter().sum();
        assert_eq!(total, max);
    }

    #[test]
    fn test_round_dp() {
        assert_eq!(Money::new(dec!(4.995)).round_dp(2).amount(), dec!(5.00));
        assert_eq!(Money::new(dec!(-4.995)).round_dp(2).amount(), dec!(-5.00));
    }

    #[test]
    fn test_serde_accepts_numbers_and_strings() {
        let from_number: Money = serde_json::from_str("3500").unwrap();
        let from_string: Money = serde_json::from_str("\"3500.50\"").unwrap();
        assert_eq!(from_number.amount(), dec!(3500));
        assert_eq!(from_string.amount(), dec!(3500.50));
    }
}
