//! Human readable rendering.
//!
//! The output uses the parser's syntax, so a rendered expression parses
//! back to the same node. Negative exponents are shown as division and
//! `x^(1/2)` as `sqrt(x)`.

use std::fmt;

use dtransform_integers::Rational;
use num_traits::One;

use crate::arena::ExprArena;
use crate::expr::{ExprHandle, ExprNode};

const SUM: u8 = 1;
const PRODUCT: u8 = 2;
const POWER: u8 = 3;
const ATOM: u8 = 4;

/// A borrowed expression that implements [`fmt::Display`].
#[derive(Clone, Copy)]
pub struct ExprDisplay<'a> {
    arena: &'a ExprArena,
    expr: ExprHandle,
}

impl fmt::Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.arena.fmt_expr(f, self.expr, SUM)
    }
}

impl ExprArena {
    /// Wraps `expr` for formatting.
    #[must_use]
    pub fn display(&self, expr: ExprHandle) -> ExprDisplay<'_> {
        ExprDisplay { arena: self, expr }
    }

    /// Renders `expr` to a string.
    #[must_use]
    pub fn render(&self, expr: ExprHandle) -> String {
        self.display(expr).to_string()
    }

    fn precedence(&self, h: ExprHandle) -> u8 {
        match self.get(h) {
            ExprNode::Number(r) => {
                if r.is_negative() || !r.is_integer() {
                    PRODUCT
                } else {
                    ATOM
                }
            }
            ExprNode::Symbol(_) | ExprNode::Constant(_) | ExprNode::Apply { .. } => ATOM,
            ExprNode::Add(_) => SUM,
            ExprNode::Mul(_) => PRODUCT,
            ExprNode::Pow { exp, .. } => match self.as_number(*exp) {
                Some(e) if e.is_negative() => PRODUCT,
                Some(e) if is_half(e) => ATOM,
                _ => POWER,
            },
        }
    }

    fn fmt_expr(&self, f: &mut fmt::Formatter<'_>, h: ExprHandle, min: u8) -> fmt::Result {
        if self.precedence(h) < min {
            f.write_str("(")?;
            self.fmt_bare(f, h)?;
            f.write_str(")")
        } else {
            self.fmt_bare(f, h)
        }
    }

    fn fmt_bare(&self, f: &mut fmt::Formatter<'_>, h: ExprHandle) -> fmt::Result {
        match self.get(h) {
            ExprNode::Number(r) => write!(f, "{r}"),
            ExprNode::Symbol(id) => f.write_str(self.symbol_name(*id).unwrap_or("?")),
            ExprNode::Constant(c) => f.write_str(c.name()),
            ExprNode::Apply { func, arg } => {
                write!(f, "{}(", func.name())?;
                self.fmt_expr(f, *arg, SUM)?;
                f.write_str(")")
            }
            ExprNode::Add(terms) => {
                for (i, &t) in terms.iter().enumerate() {
                    if i == 0 {
                        self.fmt_expr(f, t, SUM)?;
                    } else if self.is_negative_term(t) {
                        f.write_str(" - ")?;
                        self.fmt_negated(f, t)?;
                    } else {
                        f.write_str(" + ")?;
                        self.fmt_expr(f, t, SUM)?;
                    }
                }
                Ok(())
            }
            ExprNode::Mul(factors) => self.fmt_product(f, factors, false),
            ExprNode::Pow { base, exp } => match self.as_number(*exp) {
                Some(e) if e.is_negative() => self.fmt_product(f, &[h], false),
                Some(e) => self.fmt_power(f, *base, e),
                None => {
                    self.fmt_expr(f, *base, ATOM)?;
                    f.write_str("^")?;
                    self.fmt_expr(f, *exp, ATOM)
                }
            },
        }
    }

    fn is_negative_term(&self, h: ExprHandle) -> bool {
        match self.get(h) {
            ExprNode::Number(r) => r.is_negative(),
            ExprNode::Mul(factors) => self
                .as_number(factors[0])
                .is_some_and(Rational::is_negative),
            _ => false,
        }
    }

    fn fmt_negated(&self, f: &mut fmt::Formatter<'_>, h: ExprHandle) -> fmt::Result {
        match self.get(h) {
            ExprNode::Number(r) => write!(f, "{}", -r),
            ExprNode::Mul(factors) => self.fmt_product(f, factors, true),
            _ => self.fmt_expr(f, h, PRODUCT),
        }
    }

    fn fmt_power(&self, f: &mut fmt::Formatter<'_>, base: ExprHandle, exp: &Rational) -> fmt::Result {
        if is_half(exp) {
            f.write_str("sqrt(")?;
            self.fmt_expr(f, base, SUM)?;
            return f.write_str(")");
        }
        self.fmt_expr(f, base, ATOM)?;
        if exp.is_integer() {
            write!(f, "^{exp}")
        } else {
            write!(f, "^({exp})")
        }
    }

    /// Writes a product as `numerator/denominator`, moving the coefficient's
    /// denominator and every negative power below the bar.
    fn fmt_product(
        &self,
        f: &mut fmt::Formatter<'_>,
        factors: &[ExprHandle],
        negate: bool,
    ) -> fmt::Result {
        let mut coeff = Rational::one();
        let mut numerator: Vec<ExprHandle> = Vec::new();
        let mut denominator: Vec<(ExprHandle, Rational)> = Vec::new();
        for &h in factors {
            match self.get(h) {
                ExprNode::Number(r) => coeff = coeff * r,
                ExprNode::Pow { base, exp } => match self.as_number(*exp) {
                    Some(e) if e.is_negative() => denominator.push((*base, -e)),
                    _ => numerator.push(h),
                },
                _ => numerator.push(h),
            }
        }
        if negate {
            coeff = -coeff;
        }
        if coeff.is_negative() {
            f.write_str("-")?;
            coeff = -coeff;
        }

        let p = coeff.numerator();
        let q = coeff.denominator();
        let mut first = true;
        if !p.is_one() || numerator.is_empty() {
            write!(f, "{p}")?;
            first = false;
        }
        for h in numerator {
            if !first {
                f.write_str("*")?;
            }
            self.fmt_expr(f, h, POWER)?;
            first = false;
        }

        let items = usize::from(!q.is_one()) + denominator.len();
        if items == 0 {
            return Ok(());
        }
        f.write_str("/")?;
        if items > 1 {
            f.write_str("(")?;
        }
        let mut first = true;
        if !q.is_one() {
            write!(f, "{q}")?;
            first = false;
        }
        for (base, exp) in denominator {
            if !first {
                f.write_str("*")?;
            }
            if exp.is_one() {
                self.fmt_expr(f, base, POWER)?;
            } else {
                self.fmt_power(f, base, &exp)?;
            }
            first = false;
        }
        if items > 1 {
            f.write_str(")")?;
        }
        Ok(())
    }
}

fn is_half(r: &Rational) -> bool {
    *r == Rational::from_i64(1, 2)
}
