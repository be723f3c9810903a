//! # Money Module
//!
//! Integer minor-unit amounts for prices, line totals and cart totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHY NOT f64                                                            │
//! │                                                                         │
//! │  Product payloads arrive with float prices:                             │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  A cart total kept as a float drifts away from Σ(price × quantity)      │
//! │  after enough add/update/remove cycles.                                 │
//! │                                                                         │
//! │  OUR SOLUTION: convert ONCE at the product boundary, then integers      │
//! │    19.99 ──try_from_major──► 1999 cents                                 │
//! │    every cart total is an exact integer sum                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use probiotic_core::money::Money;
//!
//! let price = Money::from_cents(1099);
//! let doubled = price * 2u32;
//! assert_eq!(doubled.cents(), 2198);
//!
//! let from_page = Money::try_from_major(10.99).unwrap();
//! assert_eq!(from_page, price);
//! ```
//!
//! `Money` is currency-agnostic: the storefront renders it with whatever
//! symbol the configuration names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;
use crate::validation::{validate_price_major, ValidationResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents, paise, ...).
///
/// ## Design Decisions
/// - **i64 (signed)**: `Sub` is needed for the "add X more for free
///   shipping" hint; the cart itself never holds a negative amount
/// - **Newtype over i64**: `Copy`, hashable, serializes as a bare number
///
/// ## Where Money Flows
/// ```text
/// ProductRecord.price (f64) ──try_from_major──► ProductSummary.price
///                                                      │
///                                                      ▼
///                          CartItem.price × quantity ──► CartState.total
///                                                      │
///                                                      ▼
///                          OrderSummary { subtotal, shipping, tax, total }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Wraps an amount already in minor units.
    ///
    /// ## Example
    /// ```rust
    /// use probiotic_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ## Example
    /// ```rust
    /// use probiotic_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(49, 0).cents(), 4900);
    /// assert_eq!(Money::from_major_minor(4, 99).cents(), 499);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Converts a float price from a product payload into Money.
    ///
    /// This is the only place a float becomes Money. The value is rounded to
    /// the nearest cent.
    ///
    /// ## Rules
    /// - NaN and infinities are rejected
    /// - Negative prices are rejected
    /// - Prices above [`MAX_PRICE_MAJOR`](crate::MAX_PRICE_MAJOR) are rejected
    ///
    /// ## Example
    /// ```rust
    /// use probiotic_core::money::Money;
    ///
    /// assert_eq!(Money::try_from_major(4.99).unwrap().cents(), 499);
    /// assert_eq!(Money::try_from_major(0.0).unwrap().cents(), 0);
    /// assert!(Money::try_from_major(-1.0).is_err());
    /// assert!(Money::try_from_major(f64::NAN).is_err());
    /// ```
    pub fn try_from_major(major: f64) -> ValidationResult<Self> {
        validate_price_major(major)?;
        // Bounded by MAX_PRICE_MAJOR, so the cast cannot saturate.
        Ok(Money((major * 100.0).round() as i64))
    }

    /// Amount in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Major units as a float, for payloads written in catalog units.
    ///
    /// ## Example
    /// ```rust
    /// use probiotic_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(2999).to_major(), 29.99);
    /// ```
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the major unit portion.
    ///
    /// ## Example
    /// ```rust
    /// use probiotic_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).major(), 10);
    /// assert_eq!(Money::from_cents(-550).major(), -5);
    /// ```
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Nothing.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// `== 0`
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// `> 0`
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// `< 0`
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax, rounding half up to the nearest cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * rate + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use probiotic_core::money::Money;
    /// use probiotic_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(2999);  // 29.99
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(800)); // 8%
    /// // 29.99 × 8% = 2.3992 → 2.40
    /// assert_eq!(tax.cents(), 240);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 so large carts cannot overflow the intermediate product
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a cart quantity.
    ///
    /// ## Example
    /// ```rust
    /// use probiotic_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1000);
    /// assert_eq!(unit_price.multiply_quantity(5).cents(), 5000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * qty as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain `major.minor` rendering without a currency symbol.
///
/// The storefront config owns the symbol; see `StorefrontConfig::format_currency`.
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

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
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
