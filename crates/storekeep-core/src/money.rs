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
//! │  OUR SOLUTION: Integer Cents                                        │
//! │    1099 cents = $10.99, and arithmetic is exact                     │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operator-entered amounts arrive as decimal strings ("10.99") and are
//! parsed once at the boundary by [`Money::parse_decimal`]; everything past
//! that point is integer cents, including the persisted ledger payload.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// - **i64 (signed)**: totals and profit may legitimately go negative
/// - **Single-field tuple struct**: zero-cost abstraction over i64, and
///   serde serializes it as the bare integer, which keeps the ledger
///   payload compact
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ```
    /// use storekeep_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Largest amount an operator-entered string may carry: 9,999,999.99.
    ///
    /// Keeps `MAX_AMOUNT × quantity` comfortably inside i64 cents, so
    /// line arithmetic on parsed amounts can never overflow.
    pub const MAX_AMOUNT: Money = Money(999_999_999);

    /// Parses a non-negative decimal string with at most two decimal
    /// places ("10", "10.9", "10.99") into cents.
    ///
    /// Returns `None` for anything else: signs, exponents, more than two
    /// decimal places, empty or non-digit input, or an amount above
    /// [`Money::MAX_AMOUNT`]. This is the boundary where operator-entered
    /// price/cost strings become integer money.
    ///
    /// ```
    /// use storekeep_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("10.99"), Some(Money::from_cents(1099)));
    /// assert_eq!(Money::parse_decimal("10.9"), Some(Money::from_cents(1090)));
    /// assert_eq!(Money::parse_decimal("10"), Some(Money::from_cents(1000)));
    /// assert_eq!(Money::parse_decimal("10.999"), None);
    /// assert_eq!(Money::parse_decimal("-1"), None);
    /// ```
    pub fn parse_decimal(input: &str) -> Option<Money> {
        let (whole, frac) = match input.split_once('.') {
            Some((w, f)) => (w, f),
            None => (input, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // A trailing dot ("10.") and >2 decimals are both rejected.
        if input.contains('.') && (frac.is_empty() || frac.len() > 2) {
            return None;
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let major: i64 = whole.parse().ok()?;
        let minor: i64 = if frac.is_empty() {
            0
        } else {
            // "9" means 90 cents, "99" means 99.
            let parsed: i64 = frac.parse().ok()?;
            if frac.len() == 1 {
                parsed * 10
            } else {
                parsed
            }
        };

        let cents = major.checked_mul(100)?.checked_add(minor)?;
        if cents > Self::MAX_AMOUNT.0 {
            return None;
        }
        Some(Money(cents))
    }

    /// Returns the value in cents.
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

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity (a cart line's subtotal).
    ///
    /// Amounts from [`Money::parse_decimal`] are capped at
    /// [`Money::MAX_AMOUNT`] and quantities at 1000, so this cannot
    /// overflow for any value that passed input validation.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Calculates tax at `rate` with standard rounding.
    ///
    /// Integer math: `(amount_cents * bps + 5000) / 10000`; i128
    /// intermediate prevents overflow on large amounts.
    ///
    /// ```
    /// use storekeep_core::money::Money;
    /// use storekeep_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(1000); // $10.00
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(825)); // 8.25%
    /// assert_eq!(tax.cents(), 83);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Human-readable form, used in log output and error context.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
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

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
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
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("0"), Some(Money::zero()));
        assert_eq!(Money::parse_decimal("5"), Some(Money::from_cents(500)));
        assert_eq!(Money::parse_decimal("10.5"), Some(Money::from_cents(1050)));
        assert_eq!(Money::parse_decimal("10.99"), Some(Money::from_cents(1099)));
        assert_eq!(Money::parse_decimal("0.07"), Some(Money::from_cents(7)));
    }

    #[test]
    fn test_parse_decimal_rejects_bad_input() {
        // More than two decimal places
        assert_eq!(Money::parse_decimal("10.999"), None);
        // Negative amounts
        assert_eq!(Money::parse_decimal("-1"), None);
        // Trailing dot, empty, junk
        assert_eq!(Money::parse_decimal("10."), None);
        assert_eq!(Money::parse_decimal(""), None);
        assert_eq!(Money::parse_decimal(".5"), None);
        assert_eq!(Money::parse_decimal("1,5"), None);
        assert_eq!(Money::parse_decimal("1e3"), None);
        assert_eq!(Money::parse_decimal(" 1"), None);
    }

    #[test]
    fn test_parse_decimal_caps_amount() {
        // The cap itself parses; one cent past it does not.
        assert_eq!(
            Money::parse_decimal("9999999.99"),
            Some(Money::MAX_AMOUNT)
        );
        assert_eq!(Money::parse_decimal("10000000.00"), None);
        // i64::MAX cents is well-formed digits-wise but far past the cap.
        assert_eq!(Money::parse_decimal("92233720368547758.07"), None);
        // Digits overflowing i64 entirely.
        assert_eq!(Money::parse_decimal("99999999999999999999"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!(a.multiply_quantity(3).cents(), 3000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 13].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 363);
    }

    #[test]
    fn test_tax_calculation() {
        // $10.00 at 10% = $1.00
        let amount = Money::from_cents(1000);
        assert_eq!(amount.calculate_tax(TaxRate::from_bps(1000)).cents(), 100);

        // $10.00 at 8.25% = $0.825 → $0.83 (standard rounding)
        assert_eq!(amount.calculate_tax(TaxRate::from_bps(825)).cents(), 83);
    }

    #[test]
    fn test_serde_is_bare_integer() {
        let money = Money::from_cents(1099);
        assert_eq!(serde_json::to_string(&money).unwrap(), "1099");

        let back: Money = serde_json::from_str("1099").unwrap();
        assert_eq!(back, money);
    }
}
