//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In floating point:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  Worse: a store file holding "8000.0" one day and "8000" the next  │
//! │  forces every reader to guess which shape it is looking at.        │
//! │                                                                     │
//! │  OUR SOLUTION: one integer representation end-to-end                │
//! │    Rupiah has no working subunit, so Money(8000) IS Rp 8.000.      │
//! │    Stores, math and reports all use the raw integer; only the      │
//! │    display boundary adds separators.                               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kasir_core::money::Money;
//!
//! let price = Money::new(8000);
//! let line_total = price.multiply_quantity(3);
//! assert_eq!(line_total.amount(), 24000);
//! assert_eq!(line_total.format_plain(), "24.000");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole rupiah.
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate math (change, profit) may dip negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: serde writes the bare integer into CSV/JSON fields
///
/// ## Where Money flows
/// ```text
/// Product.sell_price ──► CartLine.price ──► CartLine.subtotal
///                                               │
///        Cart subtotal ◄───────────────────────┘
///              │
///              ▼
///   total = max(0, subtotal − discount) ──► payment ──► change
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from a whole-rupiah amount.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let price = Money::new(8000);
    /// assert_eq!(price.amount(), 8000);
    /// ```
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the raw rupiah amount.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Subtracts, clamping at zero instead of going negative.
    ///
    /// This is the totals rule: a discount larger than the subtotal
    /// produces a free sale, never a negative one.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let subtotal = Money::new(10000);
    /// assert_eq!(subtotal.saturating_sub(Money::new(4000)).amount(), 6000);
    /// assert_eq!(subtotal.saturating_sub(Money::new(99000)).amount(), 0);
    /// ```
    #[inline]
    pub const fn saturating_sub(self, other: Self) -> Self {
        let diff = self.0 - other.0;
        if diff < 0 {
            Money(0)
        } else {
            Money(diff)
        }
    }

    /// Multiplies a unit price by a line quantity.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// let unit_price = Money::new(8000);
    /// assert_eq!(unit_price.multiply_quantity(3).amount(), 24000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }

    /// Formats the bare amount with `.` thousands separators, no decimals.
    ///
    /// This is the column format on receipts: `24000` → `"24.000"`.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// assert_eq!(Money::new(0).format_plain(), "0");
    /// assert_eq!(Money::new(1500).format_plain(), "1.500");
    /// assert_eq!(Money::new(1250000).format_plain(), "1.250.000");
    /// ```
    pub fn format_plain(&self) -> String {
        let digits = self.0.abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        if self.0 < 0 {
            format!("-{grouped}")
        } else {
            grouped
        }
    }

    /// Formats as a full rupiah string with the `Rp` prefix.
    ///
    /// ## Example
    /// ```rust
    /// use kasir_core::money::Money;
    ///
    /// assert_eq!(Money::new(8000).format_rp(), "Rp 8.000");
    /// ```
    pub fn format_rp(&self) -> String {
        format!("Rp {}", self.format_plain())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the rupiah form; storage never goes through Display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_rp())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a line quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing line subtotals into a cart subtotal.
impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_amount() {
        let money = Money::new(8000);
        assert_eq!(money.amount(), 8000);
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(Money::new(0).format_plain(), "0");
        assert_eq!(Money::new(500).format_plain(), "500");
        assert_eq!(Money::new(8000).format_plain(), "8.000");
        assert_eq!(Money::new(24000).format_plain(), "24.000");
        assert_eq!(Money::new(1250000).format_plain(), "1.250.000");
        assert_eq!(Money::new(-5000).format_plain(), "-5.000");
    }

    #[test]
    fn test_format_rp() {
        assert_eq!(Money::new(8000).format_rp(), "Rp 8.000");
        assert_eq!(Money::new(0).format_rp(), "Rp 0");
        assert_eq!(format!("{}", Money::new(15000)), "Rp 15.000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(10000);
        let b = Money::new(4000);

        assert_eq!((a + b).amount(), 14000);
        assert_eq!((a - b).amount(), 6000);
        let tripled: Money = b * 3u32;
        assert_eq!(tripled.amount(), 12000);
    }

    #[test]
    fn test_saturating_sub_clamps_at_zero() {
        let subtotal = Money::new(10000);
        assert_eq!(subtotal.saturating_sub(Money::new(4000)).amount(), 6000);
        assert_eq!(subtotal.saturating_sub(Money::new(10000)).amount(), 0);
        assert_eq!(subtotal.saturating_sub(Money::new(25000)).amount(), 0);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::new(8000);
        assert_eq!(unit_price.multiply_quantity(3).amount(), 24000);
        assert_eq!(unit_price.multiply_quantity(0).amount(), 0);
    }

    #[test]
    fn test_sum() {
        let lines = vec![Money::new(8000), Money::new(12000), Money::new(500)];
        let subtotal: Money = lines.into_iter().sum();
        assert_eq!(subtotal.amount(), 20500);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::new(100);
        assert!(positive.is_positive());

        let negative = Money::new(-100);
        assert!(negative.is_negative());
    }

    #[test]
    fn test_serde_is_bare_integer() {
        let price = Money::new(8000);
        assert_eq!(serde_json::to_string(&price).unwrap(), "8000");

        let back: Money = serde_json::from_str("8000").unwrap();
        assert_eq!(back, price);
    }
}
