//! Arbitrary precision rational numbers.
//!
//! This module provides exact rational arithmetic for symbolic computation.

use dashu::base::{Inverse, Signed as DashuSigned, UnsignedAbs};
use dashu::rational::RBig;
use num_traits::{Float, One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;
use thiserror::Error;

use crate::Integer;

/// An arbitrary precision rational number.
///
/// Rationals are always stored in lowest terms with a positive denominator.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rational(RBig);

/// Error returned when a string is not a rational literal.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseRationalError {
    /// The input was empty.
    #[error("empty rational literal")]
    Empty,

    /// The input contained something other than digits, a sign, `.` or `/`.
    #[error("invalid rational literal '{0}'")]
    Invalid(String),

    /// The literal had a zero denominator.
    #[error("zero denominator in '{0}'")]
    ZeroDenominator(String),
}

impl Rational {
    /// Creates a new rational from numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(numerator: Integer, denominator: Integer) -> Self {
        assert!(!denominator.is_zero(), "denominator cannot be zero");
        let numerator = if denominator.is_negative() {
            -numerator
        } else {
            numerator
        };
        Self(RBig::from_parts(
            numerator.into_inner(),
            denominator.into_inner().unsigned_abs(),
        ))
    }

    /// Creates a rational from an integer (denominator = 1).
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        Self(RBig::from(n.into_inner()))
    }

    /// Creates a rational from i64 numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Self {
        Self::new(Integer::new(numerator), Integer::new(denominator))
    }

    /// Converts a float to the rational it represents exactly.
    ///
    /// `0.5` becomes `1/2`; `0.1` becomes the dyadic fraction closest to one
    /// tenth. Returns `None` for NaN and infinities.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        let (mantissa, exponent, sign) = Float::integer_decode(value);
        let mut numerator = Integer::from(mantissa);
        if sign < 0 {
            numerator = -numerator;
        }

        let two = Integer::new(2);
        let shift = u32::from(exponent.unsigned_abs());
        if exponent >= 0 {
            Some(Self::from_integer(numerator * two.pow(shift)))
        } else {
            Some(Self::new(numerator, two.pow(shift)))
        }
    }

    /// Returns the numerator.
    #[must_use]
    pub fn numerator(&self) -> Integer {
        Integer::from(self.0.numerator().clone())
    }

    /// Returns the denominator.
    #[must_use]
    pub fn denominator(&self) -> Integer {
        Integer::from(dashu::integer::IBig::from(self.0.denominator().clone()))
    }

    /// Returns true if this rational is an integer.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.denominator().is_one()
    }

    /// Converts to an integer if the denominator is 1.
    #[must_use]
    pub fn to_integer(&self) -> Option<Integer> {
        if self.is_integer() {
            Some(self.numerator())
        } else {
            None
        }
    }

    /// Converts to an i64 if this is an integer that fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.to_integer().and_then(|n| n.to_i64())
    }

    /// Returns the nearest `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().value()
    }

    /// Returns the reciprocal (1/x).
    ///
    /// # Panics
    ///
    /// Panics if the rational is zero.
    #[must_use]
    pub fn recip(&self) -> Self {
        assert!(!self.is_zero(), "cannot take reciprocal of zero");
        Self(self.0.clone().inv())
    }

    /// Returns the sign: -1, 0, or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true if strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.signum() > 0
    }

    /// Returns true if negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Computes self^exp for non-negative exp.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Computes self^exp for any integer exponent.
    ///
    /// Returns `None` when a zero base is raised to a negative power.
    #[must_use]
    pub fn checked_powi(&self, exp: i64) -> Option<Self> {
        let magnitude = u32::try_from(exp.unsigned_abs()).ok()?;
        if exp >= 0 {
            Some(self.pow(magnitude))
        } else if self.is_zero() {
            None
        } else {
            Some(self.recip().pow(magnitude))
        }
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl FromStr for Rational {
    type Err = ParseRationalError;

    /// Parses `"7"`, `"-3/4"` or a decimal such as `"1.25"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseRationalError::Empty);
        }
        let invalid = || ParseRationalError::Invalid(s.to_string());

        if let Some((num, den)) = s.split_once('/') {
            let num = Integer::from_decimal(num).ok_or_else(invalid)?;
            let den = Integer::from_decimal(den).ok_or_else(invalid)?;
            if den.is_zero() {
                return Err(ParseRationalError::ZeroDenominator(s.to_string()));
            }
            return Ok(Self::new(num, den));
        }

        let (negative, body) = match s.as_bytes()[0] {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };
        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        let all_digits = |t: &str| t.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(invalid());
        }

        let digits = format!("{int_part}{frac_part}");
        let numerator = Integer::from_decimal(&digits).ok_or_else(invalid)?;
        let scale = u32::try_from(frac_part.len()).map_err(|_| invalid())?;
        let value = Self::new(numerator, Integer::new(10).pow(scale));
        Ok(if negative { -value } else { value })
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({})", self.0)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator())
        } else {
            write!(f, "{}/{}", self.numerator(), self.denominator())
        }
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add<&Rational> for Rational {
    type Output = Self;

    fn add(self, rhs: &Rational) -> Self::Output {
        Self(self.0 + &rhs.0)
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Self::Output {
        Rational(&self.0 + &rhs.0)
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sub<&Rational> for Rational {
    type Output = Self;

    fn sub(self, rhs: &Rational) -> Self::Output {
        Self(self.0 - &rhs.0)
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: Self) -> Self::Output {
        Rational(&self.0 - &rhs.0)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<&Rational> for Rational {
    type Output = Self;

    fn mul(self, rhs: &Rational) -> Self::Output {
        Self(self.0 * &rhs.0)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Self::Output {
        Rational(&self.0 * &rhs.0)
    }
}

impl Div for Rational {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self(self.0 / rhs.0)
    }
}

impl Div<&Rational> for Rational {
    type Output = Self;

    fn div(self, rhs: &Rational) -> Self::Output {
        Self(self.0 / &rhs.0)
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational(-&self.0)
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(Integer::new(n))
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from_integer(Integer::new(i64::from(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ops() {
        let a = Rational::from_i64(1, 2);
        let b = Rational::from_i64(1, 3);

        // 1/2 + 1/3 = 5/6
        let sum = a.clone() + b.clone();
        assert_eq!(sum.numerator().to_i64(), Some(5));
        assert_eq!(sum.denominator().to_i64(), Some(6));

        // 1/2 * 1/3 = 1/6
        let prod = a.clone() * b.clone();
        assert_eq!(prod.numerator().to_i64(), Some(1));
        assert_eq!(prod.denominator().to_i64(), Some(6));
    }

    #[test]
    fn test_reduction() {
        // 4/6 should reduce to 2/3
        let r = Rational::from_i64(4, 6);
        assert_eq!(r.numerator().to_i64(), Some(2));
        assert_eq!(r.denominator().to_i64(), Some(3));

        // Sign moves to the numerator
        let r = Rational::from_i64(3, -6);
        assert_eq!(r.to_string(), "-1/2");
    }

    #[test]
    fn test_display() {
        assert_eq!(Rational::from_i64(3, 1).to_string(), "3");
        assert_eq!(Rational::from_i64(2, 3).to_string(), "2/3");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("7".parse::<Rational>().unwrap(), Rational::from(7));
        assert_eq!("-3/4".parse::<Rational>().unwrap(), Rational::from_i64(-3, 4));
        assert_eq!("1.25".parse::<Rational>().unwrap(), Rational::from_i64(5, 4));
        assert_eq!("-.5".parse::<Rational>().unwrap(), Rational::from_i64(-1, 2));
        assert_eq!("3.".parse::<Rational>().unwrap(), Rational::from(3));

        assert_eq!("".parse::<Rational>(), Err(ParseRationalError::Empty));
        assert!(matches!(
            "x".parse::<Rational>(),
            Err(ParseRationalError::Invalid(_))
        ));
        assert!(matches!(
            "1/0".parse::<Rational>(),
            Err(ParseRationalError::ZeroDenominator(_))
        ));
        assert!("1.2.3".parse::<Rational>().is_err());
    }

    #[test]
    fn test_from_f64_is_exact() {
        assert_eq!(Rational::from_f64(0.5), Some(Rational::from_i64(1, 2)));
        assert_eq!(Rational::from_f64(-1.5), Some(Rational::from_i64(-3, 2)));
        assert_eq!(Rational::from_f64(8.0), Some(Rational::from(8)));
        assert_eq!(Rational::from_f64(0.0), Some(Rational::zero()));
        assert_eq!(Rational::from_f64(f64::NAN), None);
        assert_eq!(Rational::from_f64(f64::INFINITY), None);

        // 0.1 is not one tenth in binary
        let tenth = Rational::from_f64(0.1).unwrap();
        assert_ne!(tenth, Rational::from_i64(1, 10));
        assert_eq!(tenth.to_f64(), 0.1);
    }

    #[test]
    fn test_checked_powi() {
        let two_thirds = Rational::from_i64(2, 3);
        assert_eq!(two_thirds.checked_powi(2), Some(Rational::from_i64(4, 9)));
        assert_eq!(two_thirds.checked_powi(-2), Some(Rational::from_i64(9, 4)));
        assert_eq!(Rational::zero().checked_powi(-1), None);
        assert_eq!(Rational::zero().checked_powi(0), Some(Rational::one()));
    }
}
