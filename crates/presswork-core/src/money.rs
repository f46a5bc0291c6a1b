//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Area pricing multiplies a rate by a float area:                        │
//! │    2.50 × 864 sq ft, then × 1.15 material, then + grommets ...          │
//! │  Doing the whole chain in floats drifts by fractions of a cent.         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer smallest units (cents, sen)                      │
//! │    Every scale by a factor rounds ONCE to a whole unit:                 │
//! │    250 × 864 = 216000 cents, exact and auditable line by line          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use presswork_core::money::Money;
//!
//! let rate = Money::from_cents(250); // 2.50 per square foot
//! let base = rate.scale(864.0);      // 24 × 36 banner
//! assert_eq!(base.cents(), 216_000);
//!
//! let total = base.multiply_quantity(2);
//! assert_eq!(total.cents(), 432_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents, sen).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  SizeOption.price_addon ──┐                                             │
/// │  PricingTier.unit_price ──┼──► engine unit price ──► PriceResult        │
/// │  OptionItem price ────────┘          │                                  │
/// │                                      ▼                                  │
/// │                          BreakdownLine values (audit trail)             │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from the smallest currency unit.
    ///
    /// ## Example
    /// ```rust
    /// use presswork_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in the smallest currency unit.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
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

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use presswork_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(80);
    /// assert_eq!(unit_price.multiply_quantity(150).cents(), 12_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Scales money by a scalar factor (multiplier, area, or both).
    ///
    /// The result is rounded to the nearest smallest unit, half away from
    /// zero. A non-finite product scales to zero.
    ///
    /// ## Example
    /// ```rust
    /// use presswork_core::money::Money;
    ///
    /// let base = Money::from_cents(2000);
    /// assert_eq!(base.scale(1.2).cents(), 2400);
    /// assert_eq!(Money::from_cents(5).scale(0.5).cents(), 3);
    /// ```
    pub fn scale(&self, factor: f64) -> Money {
        let scaled = self.0 as f64 * factor;
        if !scaled.is_finite() {
            return Money::zero();
        }
        Money(scaled.round() as i64)
    }

    /// Divides money by a quantity, rounding half away from zero.
    ///
    /// Returns `None` for a zero divisor.
    ///
    /// ## Example
    /// ```rust
    /// use presswork_core::money::Money;
    ///
    /// let total = Money::from_cents(18_000);
    /// assert_eq!(total.divide_rounded(200), Some(Money::from_cents(90)));
    /// assert_eq!(total.divide_rounded(0), None);
    /// ```
    pub fn divide_rounded(&self, divisor: i64) -> Option<Money> {
        if divisor == 0 {
            return None;
        }

        let num = self.0 as i128;
        let den = divisor as i128;
        let mut quotient = num / den;
        let remainder = num % den;
        if 2 * remainder.abs() >= den.abs() {
            quotient += num.signum() * den.signum();
        }

        Some(Money(quotient as i64))
    }

    /// Returns the portion of this amount a discount rate takes off.
    ///
    /// Uses integer math: `(amount * bps + 5000) / 10000`.
    pub fn discount_amount(&self, rate: DiscountRate) -> Money {
        let amount = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money(amount as i64)
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Example
    /// ```rust
    /// use presswork_core::money::Money;
    /// use presswork_core::types::DiscountRate;
    ///
    /// let unit = Money::from_cents(2400);
    /// let discounted = unit.apply_discount(DiscountRate::from_bps(1500));
    /// assert_eq!(discounted.cents(), 2040);
    /// ```
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        *self - self.discount_amount(rate)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering for logs and breakdown labels.
///
/// No currency symbol: localisation belongs to the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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
