//! Fixed-point money type.
//!
//! # Motivation
//!
//! All money amounts in this system use a 1e-2 (minor-units) fixed-point
//! representation stored as `i64`: 1 currency unit = 100 minor units.
//! Catalog prices and submission amounts are two-decimal currency
//! throughout, so this scale represents every value exactly and
//! `price × quantity` never rounds.
//!
//! Using raw `i64` for money is error-prone: it allows accidental
//! arithmetic with unrelated integers (quantities, ids) without any
//! compile-time signal. `Money` wraps the raw `i64` so the type system
//! prevents:
//! - Implicit construction from raw `i64` (no `From<i64>` impl).
//! - Mixing `Money` with unrelated integers in arithmetic.
//!
//! # Arithmetic
//!
//! - `Add`, `Sub`, `AddAssign` are implemented for `Money op Money`.
//! - `saturating_add` clamps at `Money::MAX`.
//! - `checked_mul_qty(qty: u32) -> Option<Money>` multiplies a per-unit
//!   price by an entered quantity with overflow detection. Callers must
//!   handle `None` explicitly.
//!
//! # Parsing
//!
//! [`Money::parse`] converts a decimal string to `Money` digit-wise, with
//! no floating point at any stage. Strings with more than two decimal
//! places are rejected (they would require rounding).

use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Minor units per currency unit (two decimal places).
pub const MINOR_PER_UNIT: i64 = 100;

/// A fixed-point monetary amount at 1e-2 scale (minor units).
///
/// 1 currency unit = `Money(100)`.
///
/// There is intentionally no `From<i64>` implementation — callers must be
/// deliberate about when a raw integer represents a monetary amount. Use
/// [`Money::from_minor`] for explicit construction and [`Money::minor`] to
/// extract the raw value at crate boundaries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Zero monetary amount.
    pub const ZERO: Money = Money(0);

    /// Maximum representable value.
    pub const MAX: Money = Money(i64::MAX);

    /// Construct a `Money` from raw minor units.
    #[inline]
    pub const fn from_minor(raw: i64) -> Self {
        Money(raw)
    }

    /// Construct a `Money` from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units * MINOR_PER_UNIT)
    }

    /// Extract the underlying raw minor-unit count.
    #[inline]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// `true` if this amount is non-negative.
    #[inline]
    pub fn is_non_negative(self) -> bool {
        self.0 >= 0
    }

    /// Saturating addition — clamps at [`Money::MAX`] on overflow.
    #[inline]
    pub fn saturating_add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }

    /// Multiply a per-unit price by an entered quantity.
    ///
    /// Returns `None` if the multiplication overflows `i64`. Callers must
    /// handle `None` explicitly; overflow in an order amount is a data
    /// error, not a routine saturation.
    #[inline]
    pub fn checked_mul_qty(self, qty: u32) -> Option<Money> {
        self.0.checked_mul(i64::from(qty)).map(Money)
    }

    /// Convert a decimal price string to `Money` deterministically.
    ///
    /// Rules:
    /// - Accepts optional leading `+` or `-` and surrounding whitespace.
    /// - Accepts an optional fractional part separated by `.`.
    /// - Rejects more than two decimal places (would require rounding).
    /// - Rejects empty strings, non-digit characters, or multiple `.`.
    /// - Does **not** use floating point at any stage.
    pub fn parse(s: &str) -> Result<Money, MoneyParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let (negative, digits) = if let Some(rest) = s.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = s.strip_prefix('+') {
            (false, rest)
        } else {
            (false, s)
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };

        let all_digits = |p: &str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(MoneyParseError::Invalid { raw: s.to_string() });
        }
        if (!int_part.is_empty() && !all_digits(int_part))
            || (!frac_part.is_empty() && !all_digits(frac_part))
        {
            return Err(MoneyParseError::Invalid { raw: s.to_string() });
        }

        if frac_part.len() > 2 {
            return Err(MoneyParseError::TooManyDecimalPlaces { raw: s.to_string() });
        }

        let int_val: i64 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse::<i64>()
                .map_err(|_| MoneyParseError::OutOfRange { raw: s.to_string() })?
        };

        let mut frac_padded = frac_part.to_string();
        while frac_padded.len() < 2 {
            frac_padded.push('0');
        }
        // At most two ASCII digits; cannot fail.
        let frac_val: i64 = frac_padded.parse::<i64>().unwrap_or(0);

        let minor = int_val
            .checked_mul(MINOR_PER_UNIT)
            .and_then(|v| v.checked_add(frac_val))
            .ok_or_else(|| MoneyParseError::OutOfRange { raw: s.to_string() })?;

        Ok(Money(if negative { -minor } else { minor }))
    }
}

impl Add for Money {
    type Output = Money;
    #[inline]
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    #[inline]
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.0 / MINOR_PER_UNIT;
        let frac = (self.0 % MINOR_PER_UNIT).abs();
        // When |value| < 1 unit and value is negative, `units` truncates to
        // 0, losing the sign. Emit "-0" explicitly in that case.
        if self.0 < 0 && units == 0 {
            write!(f, "-{units}.{frac:02}")
        } else {
            write!(f, "{units}.{frac:02}")
        }
    }
}

/// Serialized as its decimal string form (`"60.00"`), matching the shape
/// persisted in submission records.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Money::parse(&raw).map_err(D::Error::custom)
    }
}

/// Errors returned by [`Money::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    /// The input was empty or whitespace-only.
    Empty,
    /// The input contained non-digit characters or multiple separators.
    Invalid { raw: String },
    /// The input had more than two decimal places.
    TooManyDecimalPlaces { raw: String },
    /// The value does not fit in `i64` minor units.
    OutOfRange { raw: String },
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::Empty => write!(f, "amount string is empty"),
            MoneyParseError::Invalid { raw } => {
                write!(f, "amount could not be parsed: '{raw}'")
            }
            MoneyParseError::TooManyDecimalPlaces { raw } => {
                write!(f, "amount has more than two decimal places: '{raw}'")
            }
            MoneyParseError::OutOfRange { raw } => {
                write!(f, "amount out of representable range: '{raw}'")
            }
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_additive_identity() {
        let a = Money::from_minor(4_200);
        assert_eq!(a + Money::ZERO, a);
        assert_eq!(Money::ZERO + a, a);
    }

    #[test]
    fn add_and_sub_roundtrip() {
        let a = Money::from_units(100);
        let b = Money::from_units(25);
        assert_eq!((a + b) - b, a);
    }

    #[test]
    fn add_assign_works() {
        let mut acc = Money::from_units(10);
        acc += Money::from_minor(550);
        assert_eq!(acc, Money::from_minor(1_550));
    }

    #[test]
    fn saturating_add_clamps_at_max() {
        assert_eq!(Money::MAX.saturating_add(Money::from_minor(1)), Money::MAX);
    }

    #[test]
    fn checked_mul_qty_normal() {
        let price = Money::from_units(20); // 20.00
        let amount = price.checked_mul_qty(3).expect("no overflow");
        assert_eq!(amount, Money::from_units(60));
    }

    #[test]
    fn checked_mul_qty_zero_quantity_is_zero() {
        assert_eq!(
            Money::from_units(15).checked_mul_qty(0),
            Some(Money::ZERO)
        );
    }

    #[test]
    fn checked_mul_qty_overflow_returns_none() {
        assert_eq!(Money::MAX.checked_mul_qty(2), None);
    }

    #[test]
    fn display_formats_two_decimal_places() {
        assert_eq!(Money::from_minor(6_000).to_string(), "60.00");
        assert_eq!(Money::from_minor(1_550).to_string(), "15.50");
        assert_eq!(Money::ZERO.to_string(), "0.00");
    }

    #[test]
    fn display_negative_below_one_unit_keeps_sign() {
        assert_eq!(Money::from_minor(-75).to_string(), "-0.75");
    }

    #[test]
    fn parse_whole_units() {
        assert_eq!(Money::parse("20").unwrap(), Money::from_units(20));
    }

    #[test]
    fn parse_two_decimal_places() {
        assert_eq!(Money::parse("15.50").unwrap(), Money::from_minor(1_550));
        assert_eq!(Money::parse("0.05").unwrap(), Money::from_minor(5));
    }

    #[test]
    fn parse_single_decimal_place_pads() {
        assert_eq!(Money::parse("19.5").unwrap(), Money::from_minor(1_950));
    }

    #[test]
    fn parse_trims_whitespace_and_accepts_sign() {
        assert_eq!(Money::parse(" 7.25 ").unwrap(), Money::from_minor(725));
        assert_eq!(Money::parse("+7.25").unwrap(), Money::from_minor(725));
        assert_eq!(Money::parse("-7.25").unwrap(), Money::from_minor(-725));
    }

    #[test]
    fn parse_rejects_empty() {
        assert_eq!(Money::parse(""), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse("   "), Err(MoneyParseError::Empty));
    }

    #[test]
    fn parse_rejects_three_decimal_places() {
        assert!(matches!(
            Money::parse("1.005"),
            Err(MoneyParseError::TooManyDecimalPlaces { .. })
        ));
    }

    #[test]
    fn parse_rejects_non_numeric() {
        assert!(matches!(
            Money::parse("abc"),
            Err(MoneyParseError::Invalid { .. })
        ));
        assert!(matches!(
            Money::parse("1.2.3"),
            Err(MoneyParseError::Invalid { .. })
        ));
        assert!(matches!(
            Money::parse("1,50"),
            Err(MoneyParseError::Invalid { .. })
        ));
    }

    #[test]
    fn parse_rejects_bare_separator() {
        assert!(matches!(
            Money::parse("."),
            Err(MoneyParseError::Invalid { .. })
        ));
    }

    #[test]
    fn parse_accepts_leading_or_trailing_separator_forms() {
        assert_eq!(Money::parse(".50").unwrap(), Money::from_minor(50));
        assert_eq!(Money::parse("3.").unwrap(), Money::from_units(3));
    }

    #[test]
    fn parse_display_roundtrip() {
        for raw in ["0.00", "20.00", "15.50", "1234.05"] {
            let m = Money::parse(raw).unwrap();
            assert_eq!(m.to_string(), raw);
        }
    }

    #[test]
    fn serde_uses_decimal_string_form() {
        let m = Money::from_minor(6_000);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "\"60.00\"");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
