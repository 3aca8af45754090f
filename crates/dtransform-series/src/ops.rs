//! Arithmetic on series.
//!
//! Binary operations require [compatible](Series::compatible) operands and
//! read absent coefficients as zero. Results share the left operand's frame.

use std::collections::BTreeMap;
use std::ops::{Add, Div, Mul, Neg, Sub};

use tracing::debug;

use crate::engine::SymbolicEngine;
use crate::error::SeriesError;
use crate::multi_index::MultiIndex;
use crate::scalar::Scalar;
use crate::taylor::Series;

impl<E: SymbolicEngine> Series<E> {
    /// Negates every coefficient.
    #[must_use]
    pub fn negate(&self) -> Self {
        let engine = self.engine();
        let coeffs = self
            .coefficients()
            .iter()
            .map(|(k, c)| (k.clone(), engine.neg(c)))
            .collect();
        self.derive(coeffs)
    }

    /// Adds two series entrywise.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Incompatible`] if the frames differ.
    pub fn try_add(&self, other: &Self) -> Result<Self, SeriesError> {
        self.zip_with(other, |engine, a, b| engine.add(a, b))
    }

    /// Subtracts two series entrywise.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Incompatible`] if the frames differ.
    pub fn try_sub(&self, other: &Self) -> Result<Self, SeriesError> {
        self.zip_with(other, |engine, a, b| engine.sub(a, b))
    }

    /// Combines the union of both key sets with `op`.
    fn zip_with(
        &self,
        other: &Self,
        op: impl Fn(&E, &E::Expr, &E::Expr) -> E::Expr,
    ) -> Result<Self, SeriesError> {
        self.compatible(other)?;
        let engine = self.engine();
        let coeffs: BTreeMap<_, _> = self
            .coefficients()
            .keys()
            .chain(other.coefficients().keys())
            .map(|k| (k.clone(), op(engine, &self.coeff(k), &other.coeff(k))))
            .collect();
        Ok(self.derive(coeffs))
    }

    /// Multiplies two series, truncating at the order.
    ///
    /// `(a * b)[k]` is the sum of `a[i] * b[k - i]` over all `i <= k`
    /// componentwise.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Incompatible`] if the frames differ.
    pub fn try_mul(&self, other: &Self) -> Result<Self, SeriesError> {
        self.compatible(other)?;
        let engine = self.engine();
        let (a, b) = (self.coefficients(), other.coefficients());
        debug!(
            dimension = self.dimension(),
            order = self.order(),
            left = a.len(),
            right = b.len(),
            "multiplying series"
        );

        let mut coeffs = BTreeMap::new();
        for k in MultiIndex::cube(self.dimension(), self.order()) {
            let terms: Vec<E::Expr> = k
                .lower_set()
                .filter_map(|i| {
                    let rest = k.checked_sub(&i)?;
                    let left = a.get(&i).filter(|c| !engine.is_zero(c))?;
                    let right = b.get(&rest).filter(|c| !engine.is_zero(c))?;
                    Some(engine.mul(left, right))
                })
                .collect();
            coeffs.insert(k, engine.sum(terms));
        }
        Ok(self.derive(coeffs))
    }

    /// Divides two series, truncating at the order.
    ///
    /// Solves `b * q = a` for `q` index by index in lexicographic order:
    /// `q[k] = (a[k] - sum of b[i] * q[k - i] over 0 < i <= k) / b[0]`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Incompatible`] if the frames differ and
    /// [`SeriesError::ZeroLeadingCoefficient`] if `b[0]` is zero or absent.
    pub fn try_div(&self, other: &Self) -> Result<Self, SeriesError> {
        self.compatible(other)?;
        let engine = self.engine();
        let leading = other.coeff(&MultiIndex::zero(self.dimension()));
        if engine.is_zero(&leading) {
            return Err(SeriesError::ZeroLeadingCoefficient);
        }
        let b = other.coefficients();
        debug!(
            dimension = self.dimension(),
            order = self.order(),
            divisor = b.len(),
            "dividing series"
        );

        let mut quotient: BTreeMap<MultiIndex, E::Expr> = BTreeMap::new();
        for k in MultiIndex::cube(self.dimension(), self.order()) {
            let known: Vec<E::Expr> = k
                .lower_set()
                .filter(|i| !i.is_zero())
                .filter_map(|i| {
                    let rest = k.checked_sub(&i)?;
                    let divisor = b.get(&i).filter(|c| !engine.is_zero(c))?;
                    let solved = quotient.get(&rest).filter(|c| !engine.is_zero(c))?;
                    Some(engine.mul(divisor, solved))
                })
                .collect();
            let remainder = engine.sub(&self.coeff(&k), &engine.sum(known));
            quotient.insert(k, engine.div(&remainder, &leading));
        }
        Ok(self.derive(quotient))
    }

    /// Multiplies every coefficient by a scalar.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::UnsupportedOperand`] for non-finite floats and
    /// [`SeriesError::Parse`] for malformed expression text.
    pub fn scale(&self, factor: impl Into<Scalar>) -> Result<Self, SeriesError> {
        let factor = factor.into().to_expr(self.engine(), "multiplication")?;
        Ok(self.scale_by(&factor))
    }

    /// Multiplies every coefficient by an expression.
    #[must_use]
    pub fn scale_by(&self, factor: &E::Expr) -> Self {
        let engine = self.engine();
        let coeffs = self
            .coefficients()
            .iter()
            .map(|(k, c)| (k.clone(), engine.mul(c, factor)))
            .collect();
        self.derive(coeffs)
    }

    /// Divides every coefficient by a scalar.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::DivisionByZero`] for an exact zero,
    /// [`SeriesError::UnsupportedOperand`] for non-finite floats and
    /// [`SeriesError::Parse`] for malformed expression text.
    pub fn div_scalar(&self, divisor: impl Into<Scalar>) -> Result<Self, SeriesError> {
        let divisor = divisor.into().to_expr(self.engine(), "division")?;
        self.div_by(&divisor)
    }

    /// Divides every coefficient by an expression.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::DivisionByZero`] if `divisor` is zero.
    pub fn div_by(&self, divisor: &E::Expr) -> Result<Self, SeriesError> {
        let engine = self.engine();
        if engine.is_zero(divisor) {
            return Err(SeriesError::DivisionByZero);
        }
        let coeffs = self
            .coefficients()
            .iter()
            .map(|(k, c)| (k.clone(), engine.div(c, divisor)))
            .collect();
        Ok(self.derive(coeffs))
    }
}

impl<E: SymbolicEngine> Neg for Series<E> {
    type Output = Series<E>;

    fn neg(self) -> Series<E> {
        self.negate()
    }
}

impl<E: SymbolicEngine> Neg for &Series<E> {
    type Output = Series<E>;

    fn neg(self) -> Series<E> {
        self.negate()
    }
}

macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $inherent:ident) => {
        impl<E: SymbolicEngine> $trait for &Series<E> {
            type Output = Result<Series<E>, SeriesError>;

            fn $method(self, rhs: &Series<E>) -> Self::Output {
                self.$inherent(rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, try_add);
impl_binary_op!(Sub, sub, try_sub);
impl_binary_op!(Mul, mul, try_mul);
impl_binary_op!(Div, div, try_div);
