//! # Money Module
//!
//! Provides the `Money` type for prices, budgets and totals, and the
//! `Quantity` type for item amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing floats:  2.99 + 3.00 × 2  = 8.990000000000002  ❌              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer ten-thousandths of a unit                        │
//! │    29_900 + 30_000 × 2 = 89_900  → "$8.99"                              │
//! │                                                                         │
//! │  Unit prices can be below a cent ($0.004 per gram), so amounts are     │
//! │  kept at 1/10000 of a unit. Only display and `cents()` round to a      │
//! │  whole cent.                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! Local storage keeps prices as plain JSON numbers in major units
//! (`"price": 2.99`). `Money` serializes to and from that form, so the
//! stored layout does not change while arithmetic stays in integers.
//!
//! ## Overflow
//! All arithmetic saturates at `i64::MIN` / `i64::MAX`. Absurd stored
//! quantities give a pinned total, never a panic or a wrapped sign.
//!
//! ## Usage
//! ```rust
//! use basket_core::money::{Money, Quantity};
//!
//! let price = Money::from_cents(299); // $2.99
//! let line = price.multiply_quantity(Quantity::new(2.0));
//! assert_eq!(line.cents(), 598);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// Stored units per major currency unit.
pub const SCALE: i64 = 10_000;

/// Stored units per cent.
const PER_CENT: i64 = SCALE / 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in ten-thousandths of the currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: `remaining` budget can go negative
/// - **1/10000 resolution**: per-gram and per-ml prices survive a load
/// - **Serialized as a decimal number**: matches the persisted layout
/// - **No TS derive**: exported structs map it with `#[ts(as = "f64")]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents.saturating_mul(PER_CENT))
    }

    /// Creates a Money value from raw ten-thousandths.
    #[inline]
    pub const fn from_ten_thousandths(value: i64) -> Self {
        Money(value)
    }

    /// Creates a Money value from a decimal amount in major units.
    ///
    /// Rounds to the nearest ten-thousandth. Returns `None` for NaN or
    /// infinite input.
    ///
    /// ```rust
    /// use basket_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(2.99).unwrap().cents(), 299);
    /// assert_eq!(Money::from_decimal(0.004).unwrap().ten_thousandths(), 40);
    /// assert!(Money::from_decimal(f64::NAN).is_none());
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        // `as` saturates out-of-range floats
        Some(Money((amount * SCALE as f64).round() as i64))
    }

    /// Returns the raw value in ten-thousandths.
    #[inline]
    pub const fn ten_thousandths(&self) -> i64 {
        self.0
    }

    /// Returns the value rounded half away from zero to whole cents.
    pub const fn cents(&self) -> i64 {
        let half = PER_CENT / 2;
        if self.0 >= 0 {
            self.0.saturating_add(half) / PER_CENT
        } else {
            self.0.saturating_sub(half) / PER_CENT
        }
    }

    /// Returns the value in major units (for serialization and display math).
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / SCALE as f64
    }

    /// Returns the major unit (dollars) portion of the rounded value.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.cents() / 100
    }

    /// Returns the minor unit (cents) portion of the rounded value (0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.cents() % 100).abs()
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

    /// Multiplies a unit price by a (possibly fractional) quantity.
    ///
    /// The product is rounded half away from zero to a ten-thousandth and
    /// saturates on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::money::{Money, Quantity};
    ///
    /// let per_gram = Money::from_decimal(0.004).unwrap();
    /// let bag = per_gram.multiply_quantity(Quantity::new(500.0));
    /// assert_eq!(bag, Money::from_cents(200));
    /// ```
    pub fn multiply_quantity(&self, qty: Quantity) -> Money {
        // `as` saturates out-of-range floats and maps NaN to 0
        Money((self.0 as f64 * qty.value()).round() as i64)
    }

    /// Percentage of `total` this value represents, in 0.0..=100.0 for
    /// non-negative inputs. Zero total yields 0.
    pub fn percent_of(&self, total: Money) -> f64 {
        if total.is_zero() {
            return 0.0;
        }
        self.0 as f64 / total.0 as f64 * 100.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$12.34` for logs and debugging.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents() < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
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

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount)
            .ok_or_else(|| serde::de::Error::custom("money amount must be finite"))
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// Amount of an item, in the item's [`Unit`](crate::types::Unit).
///
/// Fractional values are allowed (0.5 kg). Positivity is checked by
/// [`crate::validation::validate_quantity`], not here, so persisted data
/// always loads.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(f64);

impl Quantity {
    #[inline]
    pub const fn new(value: f64) -> Self {
        Quantity(value)
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity(1.0)
    }
}

impl From<f64> for Quantity {
    fn from(value: f64) -> Self {
        Quantity(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
