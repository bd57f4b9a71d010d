//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In PHP/JavaScript floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A 12% tax on ₱31,000 must be EXACTLY ₱3,720.00 on the receipt,        │
//! │  the order row, and the line-item sum - never ₱3,719.9999.             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    ₱31,000.00 = 3_100_000 centavos                                     │
//! │    tax = (3_100_000 × 1200 + 5000) / 10000 = 372_000 centavos          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use artisell_core::money::Money;
//!
//! // Create from centavos (preferred)
//! let price = Money::from_cents(1_250_000); // ₱12,500.00
//!
//! // Arithmetic operations
//! let doubled = price * 2;                  // ₱25,000.00
//! let total = price + Money::from_cents(25_000); // ₱12,750.00
//!
//! // NEVER do this:
//! // let bad = Money::from_float(12500.0); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (centavos for PHP).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds, adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// Product.price_cents ──► CartItem.unit_price_cents ──► line totals
///        │
///        └──► Cart subtotal ──► shipping + tax ──► Order.total_cents
/// ```
/// Every monetary value in the system flows through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use artisell_core::money::Money;
    ///
    /// let price = Money::from_cents(1_250_000); // Represents ₱12,500.00
    /// assert_eq!(price.cents(), 1_250_000);
    /// ```
    ///
    /// ## Why Centavos?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// The database, calculations, and API all use centavos.
    /// Only the UI converts to pesos for display.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (pesos and centavos).
    ///
    /// ## Example
    /// ```rust
    /// use artisell_core::money::Money;
    ///
    /// let price = Money::from_major_minor(12_500, 0); // ₱12,500.00
    /// assert_eq!(price.cents(), 1_250_000);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -₱5.50 (refund)
    /// assert_eq!(negative.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -₱5.50, not -₱4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in centavos (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (pesos) portion.
    ///
    /// ## Example
    /// ```rust
    /// use artisell_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.pesos(), 10);
    ///
    /// let negative = Money::from_cents(-550);
    /// assert_eq!(negative.pesos(), -5);
    /// ```
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (centavos) portion (always 0-99).
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

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates tax on this amount, rounded to the nearest centavo.
    ///
    /// ## Implementation
    /// We use integer math: `(amount * rate + 5000) / 10000`
    /// The +5000 provides rounding (5000/10000 = 0.5)
    ///
    /// ## Example
    /// ```rust
    /// use artisell_core::money::Money;
    /// use artisell_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_major_minor(31_000, 0); // ₱31,000.00
    /// let rate = TaxRate::from_bps(1200);                // 12%
    ///
    /// let tax = subtotal.calculate_tax(rate);
    /// assert_eq!(tax, Money::from_major_minor(3_720, 0)); // ₱3,720.00
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Cart Subtotal: ₱31,000.00
    ///      │
    ///      ▼
    /// calculate_tax(12%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Tax: ₱3,720.00 → Total: subtotal + shipping + tax
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // Use i128 to prevent overflow on large amounts
        // rate.bps() is basis points: 1200 = 12%
        // Formula: amount_cents * bps / 10000
        // With rounding: (amount_cents * bps + 5000) / 10000
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use artisell_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(980_000); // ₱9,800.00
    /// let line_total = unit_price.multiply_quantity(2);
    /// assert_eq!(line_total.cents(), 1_960_000); // ₱19,600.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Use frontend formatting for actual UI
/// display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₱{}.{:02}", sign, self.pesos().abs(), self.cents_part())
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

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
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
        assert_eq!(money.pesos(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(12_500, 0);
        assert_eq!(money.cents(), 1_250_000);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "₱10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "₱5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-₱5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "₱0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_tax_calculation_basic() {
        // ₱10.00 at 10% = ₱1.00
        let amount = Money::from_cents(1000);
        let rate = TaxRate::from_bps(1000); // 10%
        let tax = amount.calculate_tax(rate);
        assert_eq!(tax.cents(), 100);
    }

    #[test]
    fn test_tax_calculation_checkout_rate() {
        // ₱31,000.00 at 12% = ₱3,720.00 exactly
        let amount = Money::from_major_minor(31_000, 0);
        let rate = TaxRate::from_bps(1200);
        let tax = amount.calculate_tax(rate);
        assert_eq!(tax.cents(), 372_000);
    }

    #[test]
    fn test_tax_calculation_with_rounding() {
        // ₱0.33 at 12% = ₱0.0396 → rounds to ₱0.04
        let amount = Money::from_cents(33);
        let rate = TaxRate::from_bps(1200);
        let tax = amount.calculate_tax(rate);
        assert_eq!(tax.cents(), 4);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let positive = Money::from_cents(100);
        assert!(!positive.is_zero());
        assert!(positive.is_positive());
        assert!(!positive.is_negative());

        let negative = Money::from_cents(-100);
        assert!(!negative.is_zero());
        assert!(!negative.is_positive());
        assert!(negative.is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(1_850_000);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.cents(), 5_550_000);
    }
}
