//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    10 × 0.82 × 1.10 = 9.020000000000001  ❌ WRONG!                      │
//! │                                                                         │
//! │  Costs here are weights (grams, with decimals) times per-gram rates,   │
//! │  so integer cents alone cannot hold the intermediate products.         │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal + rounding at the line level             │
//! │    10 × 0.82 × 1.10 = 9.0200 → line rounds to 9.02                      │
//! │    Totals are the exact sum of their rounded lines                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use atelier_core::money::Money;
//! use rust_decimal_macros::dec;
//!
//! let stone = Money::from_cents(45);          // €0.45
//! let line = (stone * dec!(3)).round_cents(); // €1.35
//! assert_eq!(line.cents(), 135);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the shop's currency (euros).
///
/// ## Design Decisions
/// - **Decimal (signed)**: Allows negative values for premiums below cost
/// - **Single field tuple struct**: Zero-cost abstraction over Decimal
/// - **Serialized as a string**: `"9.02"`, never a JSON float
///
/// ## Where Money is Used
/// ```text
/// Material.cost_per_unit ──► material line ──┐
/// spot price × weight ─────► metal line ─────┼──► CostBreakdown.total
/// LaborCost fields ────────► labor lines ────┘          │
///                                                        ▼
///                               Product.active_price (written by caller)
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps a raw decimal amount without rounding.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::money::Money;
    ///
    /// let price = Money::from_cents(550); // €5.50
    /// assert_eq!(price.to_string(), "€5.50");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
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

    /// Returns the value in whole cents, rounding half away from zero.
    pub fn cents(&self) -> i64 {
        (self.round_cents().0 * Decimal::ONE_HUNDRED)
            .to_i64()
            .unwrap_or_default()
    }

    /// Rounds to whole cents, half away from zero (0.005 → 0.01).
    ///
    /// Every cost line goes through this before it is summed, so a total is
    /// always the exact sum of the lines shown next to it.
    pub fn round_cents(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Expresses `self` as a percentage of `base`, rounded to 2 places.
    ///
    /// Returns zero when `base` is zero instead of dividing.
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::money::Money;
    /// use rust_decimal_macros::dec;
    ///
    /// let premium = Money::from_cents(250);
    /// assert_eq!(premium.percent_of(Money::from_cents(1000)), dec!(25));
    /// assert_eq!(premium.percent_of(Money::zero()), dec!(0));
    /// ```
    pub fn percent_of(&self, base: Money) -> Decimal {
        if base.is_zero() {
            return Decimal::ZERO;
        }
        (self.0 / base.0 * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money rounded to cents with the euro sign, e.g. `€9.02`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_cents().0;
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{}€{:.2}", sign, rounded.abs())
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

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by a decimal factor (weight in grams, quantity, ratio).
/// The result is not rounded.
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: Decimal) -> Self {
        Money(self.0 * factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
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
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.amount(), dec!(10.99));
        assert_eq!(money.cents(), 1099);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "€10.99");
        assert_eq!(Money::from_cents(500).to_string(), "€5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-€5.50");
        assert_eq!(Money::zero().to_string(), "€0.00");
        assert_eq!(Money::new(dec!(9.0200)).to_string(), "€9.02");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * dec!(3)).cents(), 3000);
        assert_eq!((-b).cents(), -500);
    }

    #[test]
    fn test_round_cents_half_away_from_zero() {
        assert_eq!(Money::new(dec!(0.125)).round_cents().amount(), dec!(0.13));
        assert_eq!(Money::new(dec!(0.124)).round_cents().amount(), dec!(0.12));
        assert_eq!(Money::new(dec!(-0.125)).round_cents().amount(), dec!(-0.13));
    }

    #[test]
    fn test_metal_line_is_exact() {
        // 10g × 0.82/g × 1.10 loss factor
        let line = (Money::new(dec!(0.82)) * dec!(10) * dec!(1.10)).round_cents();
        assert_eq!(line, Money::new(dec!(9.02)));
    }

    #[test]
    fn test_percent_of_guards_zero() {
        let premium = Money::from_cents(1500);
        assert_eq!(premium.percent_of(Money::from_cents(1000)), dec!(150));
        assert_eq!(premium.percent_of(Money::zero()), Decimal::ZERO);
        assert_eq!(
            Money::from_cents(100).percent_of(Money::from_cents(300)),
            dec!(33.33)
        );
    }

    #[test]
    fn test_sum() {
        let total: Money = [1, 2, 3].iter().map(|c| Money::from_cents(*c)).sum();
        assert_eq!(total.cents(), 6);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
        assert_eq!(Money::from_cents(-100).abs(), Money::from_cents(100));
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&Money::from_cents(902)).unwrap();
        assert_eq!(json, "\"9.02\"");
    }
}
