//! Arbitrary precision integers.
//!
//! A thin wrapper around `dashu::IBig` carrying what the rationals and the
//! series weights need: factorials, powers and decimal parsing.

use dashu::base::Signed as DashuSigned;
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg};

/// An arbitrary precision integer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(IBig);

impl Integer {
    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Parses an optionally signed string of decimal digits.
    ///
    /// Returns `None` for empty input or any non-digit character.
    #[must_use]
    pub fn from_decimal(s: &str) -> Option<Self> {
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let magnitude = IBig::from_str_radix(digits, 10).ok()?;
        Some(Self(if negative { -magnitude } else { magnitude }))
    }

    /// Computes `n!`.
    #[must_use]
    pub fn factorial(n: u32) -> Self {
        (2..=u64::from(n)).fold(Self::one(), |acc, i| acc * Self::from(i))
    }

    /// Whether the value is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Unwraps the `dashu` value.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }

    /// The value as an `i64`, if it fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }

    /// Raises to a non-negative power.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0 == IBig::ZERO
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Add for Integer {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul for Integer {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self(IBig::from(value))
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial() {
        assert_eq!(Integer::factorial(0).to_i64(), Some(1));
        assert_eq!(Integer::factorial(1).to_i64(), Some(1));
        assert_eq!(Integer::factorial(5).to_i64(), Some(120));
        assert_eq!(
            Integer::factorial(25).to_string(),
            "15511210043330985984000000"
        );
        assert_eq!(Integer::factorial(25).to_i64(), None);
    }

    #[test]
    fn test_from_decimal() {
        assert_eq!(Integer::from_decimal("-42"), Some(Integer::new(-42)));
        assert_eq!(Integer::from_decimal("+7"), Some(Integer::new(7)));
        assert_eq!(Integer::from_decimal("007"), Some(Integer::new(7)));
        assert_eq!(Integer::from_decimal(""), None);
        assert_eq!(Integer::from_decimal("-"), None);
        assert_eq!(Integer::from_decimal("1e3"), None);

        let big = Integer::from_decimal("123456789012345678901234567890").unwrap();
        let sum = big + Integer::from_decimal("987654321098765432109876543210").unwrap();
        assert_eq!(sum.to_string(), "1111111110111111111011111111100");
    }

    #[test]
    fn test_powers_and_sign() {
        assert_eq!(Integer::new(10).pow(3), Integer::new(1000));
        assert_eq!(Integer::new(-2).pow(0), Integer::one());
        assert!((-Integer::new(4)).is_negative());
        assert!(!Integer::zero().is_negative());
    }
}
