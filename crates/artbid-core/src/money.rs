//! # Money Module
//!
//! Provides the `Money` type for bid prices and listed prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing bids as floats:                                                │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    A bid of "99.50" is stored as 9950                                   │
//! │    Cart totals are exact integer sums                                   │
//! │                                                                         │
//! │  The backend speaks JSON numbers, so floats appear ONLY at the wire    │
//! │  boundary (see [`wire`]) and are rounded to the nearest cent there.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use artbid_core::money::Money;
//!
//! let bid: Money = "99.5".parse().unwrap();
//! assert_eq!(bid.cents(), 9950);
//! assert_eq!(bid.to_string(), "99.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents, øre, ...).
///
/// The currency itself is carried by the product, not by the amount: every
/// amount in a checkout is in the currency of the product it was bid on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// ```rust
    /// use artbid_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(100, 5).cents(), 10005);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in minor units.
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

    /// Returns zero.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Parses a user-entered amount and requires it to be positive.
    ///
    /// This is the rule for bid prices: a cart line never holds a zero or
    /// negative bid.
    pub fn parse_positive(input: &str, field: &str) -> Result<Money, ValidationError> {
        let amount = parse_decimal(input, field)?;
        if !amount.is_positive() {
            return Err(ValidationError::MustBePositive {
                field: field.to_string(),
            });
        }
        Ok(amount)
    }

    /// Converts to the JSON number the backend expects.
    ///
    /// ## Note
    /// Only call this when building a wire payload.
    #[inline]
    pub fn to_wire(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Converts a JSON number from the backend, rounding to the nearest cent.
    #[inline]
    pub fn from_wire(amount: f64) -> Money {
        Money((amount * 100.0).round() as i64)
    }

    /// Formats the amount followed by a currency code, as the cart shows it.
    ///
    /// ```rust
    /// use artbid_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(10000).format_with("DKK"), "100.00 DKK");
    /// ```
    pub fn format_with(&self, currency: &str) -> String {
        if currency.is_empty() {
            self.to_string()
        } else {
            format!("{} {}", self, currency)
        }
    }
}

/// Parses a plain decimal string ("100", "99.5", "12.34") into minor units.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Optional leading `-`
/// - At most two fractional digits
/// - Digits only otherwise (no exponents, no thousands separators)
fn parse_decimal(input: &str, field: &str) -> Result<Money, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let (whole, frac) = match unsigned.split_once('.') {
        Some((w, f)) => (w, f),
        None => (unsigned, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(invalid("not a number"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("not a number"));
    }
    if frac.len() > 2 {
        return Err(invalid("at most two decimals are allowed"));
    }

    let major: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| invalid("amount is too large"))?
    };
    let minor: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid("not a number"))? * 10,
        _ => frac.parse().map_err(|_| invalid("not a number"))?,
    };

    let cents = major
        .checked_mul(100)
        .and_then(|c| c.checked_add(minor))
        .ok_or_else(|| invalid("amount is too large"))?;

    Ok(Money(if negative { -cents } else { cents }))
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s, "amount")
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with two decimals and no currency ("100.00").
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().unsigned_abs(), self.minor())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Arithmetic saturates at the i64 bounds. Bids are only bounded by what
// `parse` accepts, so a cart of huge bids must still produce a total.

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
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Wire Format
// =============================================================================

/// Serde adapter for fields that travel as JSON numbers (`"bidPrice": 100.5`).
///
/// ```rust,ignore
/// #[serde(with = "crate::money::wire")]
/// pub bid_price: Money,
/// ```
pub mod wire {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_wire())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Ok(Money::from_wire(amount))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
