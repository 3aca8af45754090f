//! Arena allocator and canonicalising constructors.
//!
//! All expressions are stored contiguously in a `Vec`, with hash-consing
//! ensuring each unique node is stored exactly once. Compound expressions
//! should be built through [`ExprArena::add`], [`ExprArena::mul`],
//! [`ExprArena::pow`] and [`ExprArena::apply`], which keep every node in
//! canonical form:
//!
//! - sums and products are flattened and their numbers folded exactly
//! - like terms are collected (`2*x + 3*x` becomes `5*x`)
//! - equal bases are merged (`x * x^2` becomes `x^3`)
//! - operands are ordered by handle, so argument order never matters
//!
//! An expression that is identically zero after this folding is the
//! `Number(0)` node, which is what [`ExprArena::is_zero`] tests for.

use dtransform_integers::Rational;
use hashbrown::HashMap;
use num_traits::{One, Zero};
use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};

use crate::expr::{Constant, ExprHandle, ExprNode, Function, SymbolId};
use crate::symbols::SymbolTable;

/// Largest integer exponent folded exactly for numeric bases.
const MAX_EXACT_EXPONENT: i64 = 4096;

/// The main arena for storing expressions.
#[derive(Debug, Default)]
pub struct ExprArena {
    /// Storage for all expression nodes.
    nodes: Vec<ExprNode>,
    /// Interning table: maps node content to its handle.
    intern_map: HashMap<ExprNode, ExprHandle>,
    /// Symbol names.
    symbols: SymbolTable,
}

impl ExprArena {
    /// Creates a new empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a node as-is, returning its handle.
    ///
    /// # Panics
    ///
    /// Panics if the arena holds `u32::MAX` nodes.
    pub(crate) fn intern(&mut self, node: ExprNode) -> ExprHandle {
        if let Some(&handle) = self.intern_map.get(&node) {
            return handle;
        }

        let index = u32::try_from(self.nodes.len()).expect("arena capacity exceeded");
        let handle = ExprHandle::new(index);
        self.nodes.push(node.clone());
        self.intern_map.insert(node, handle);
        handle
    }

    /// Gets the node at the given handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle belongs to another arena.
    #[must_use]
    pub fn get(&self, handle: ExprHandle) -> &ExprNode {
        &self.nodes[handle.index() as usize]
    }

    /// Returns the number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The symbol table.
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Interns a symbol name.
    pub fn intern_symbol(&mut self, name: &str) -> SymbolId {
        self.symbols.intern(name)
    }

    /// Gets the name of a symbol by its id.
    #[must_use]
    pub fn symbol_name(&self, id: SymbolId) -> Option<&str> {
        self.symbols.name(id)
    }

    // === Atoms ===

    /// An exact number.
    pub fn number(&mut self, value: Rational) -> ExprHandle {
        self.intern(ExprNode::Number(value))
    }

    /// An integer.
    pub fn integer(&mut self, value: i64) -> ExprHandle {
        self.number(Rational::from(value))
    }

    /// The number zero.
    pub fn zero(&mut self) -> ExprHandle {
        self.number(Rational::zero())
    }

    /// The number one.
    pub fn one(&mut self) -> ExprHandle {
        self.number(Rational::one())
    }

    /// A symbol, interning its name.
    pub fn symbol(&mut self, name: &str) -> ExprHandle {
        let id = self.intern_symbol(name);
        self.intern(ExprNode::Symbol(id))
    }

    /// A named constant.
    pub fn constant(&mut self, constant: Constant) -> ExprHandle {
        self.intern(ExprNode::Constant(constant))
    }

    // === Predicates ===

    /// Returns the value if `handle` is a number.
    #[must_use]
    pub fn as_number(&self, handle: ExprHandle) -> Option<&Rational> {
        match self.get(handle) {
            ExprNode::Number(r) => Some(r),
            _ => None,
        }
    }

    /// Returns true if `handle` is the number zero.
    #[must_use]
    pub fn is_zero(&self, handle: ExprHandle) -> bool {
        self.as_number(handle).is_some_and(Zero::is_zero)
    }

    /// Returns true if `handle` is the number one.
    #[must_use]
    pub fn is_one(&self, handle: ExprHandle) -> bool {
        self.as_number(handle).is_some_and(One::is_one)
    }

    // === Compound Expressions ===

    /// Canonical sum of `args`.
    pub fn add(&mut self, args: impl IntoIterator<Item = ExprHandle>) -> ExprHandle {
        let mut constant = Rational::zero();
        let mut rests: Vec<ExprHandle> = Vec::new();
        let mut coeffs: FxHashMap<ExprHandle, Rational> = FxHashMap::default();

        let mut pending: Vec<ExprHandle> = args.into_iter().collect();
        while let Some(arg) = pending.pop() {
            match self.get(arg) {
                ExprNode::Number(r) => constant = constant + r,
                ExprNode::Add(terms) => pending.extend(terms.iter().copied()),
                _ => {
                    let (c, rest) = self.split_coefficient(arg);
                    match coeffs.get_mut(&rest) {
                        Some(acc) => *acc = acc.clone() + c,
                        None => {
                            rests.push(rest);
                            coeffs.insert(rest, c);
                        }
                    }
                }
            }
        }

        rests.sort_unstable();
        let mut terms: SmallVec<[ExprHandle; 4]> = SmallVec::new();
        if !constant.is_zero() {
            terms.push(self.number(constant));
        }
        for rest in rests {
            let Some(c) = coeffs.remove(&rest) else { continue };
            if !c.is_zero() {
                terms.push(self.scaled(c, rest));
            }
        }

        match terms.len() {
            0 => self.zero(),
            1 => terms[0],
            _ => self.intern(ExprNode::Add(terms)),
        }
    }

    /// Canonical product of `args`.
    pub fn mul(&mut self, args: impl IntoIterator<Item = ExprHandle>) -> ExprHandle {
        let mut coeff = Rational::one();
        let mut bases: Vec<ExprHandle> = Vec::new();
        let mut exponents: FxHashMap<ExprHandle, SmallVec<[ExprHandle; 2]>> =
            FxHashMap::default();

        let mut pending: Vec<ExprHandle> = args.into_iter().collect();
        while let Some(arg) = pending.pop() {
            let (base, exp) = match self.get(arg) {
                ExprNode::Number(r) => {
                    coeff = coeff * r;
                    continue;
                }
                ExprNode::Mul(factors) => {
                    pending.extend(factors.iter().copied());
                    continue;
                }
                ExprNode::Pow { base, exp } => (*base, *exp),
                _ => (arg, self.one()),
            };
            exponents
                .entry(base)
                .or_insert_with(|| {
                    bases.push(base);
                    SmallVec::new()
                })
                .push(exp);
        }

        if coeff.is_zero() {
            return self.zero();
        }

        bases.sort_unstable();
        let mut factors: SmallVec<[ExprHandle; 4]> = SmallVec::new();
        let mut needs_flattening = false;
        for base in bases {
            let exps = exponents.remove(&base).unwrap_or_default();
            let exp = if exps.len() == 1 {
                exps[0]
            } else {
                self.add(exps)
            };
            let factor = self.pow(base, exp);
            match self.get(factor) {
                ExprNode::Number(r) => coeff = coeff * r,
                ExprNode::Mul(_) => {
                    needs_flattening = true;
                    factors.push(factor);
                }
                _ => factors.push(factor),
            }
        }

        if needs_flattening {
            factors.push(self.number(coeff));
            return self.mul(factors);
        }
        if coeff.is_zero() {
            return self.zero();
        }

        factors.sort_unstable();
        match factors.len() {
            0 => self.number(coeff),
            1 if coeff.is_one() => factors[0],
            1 => {
                if let ExprNode::Add(terms) = self.get(factors[0]).clone() {
                    let c = self.number(coeff);
                    let scaled: Vec<ExprHandle> =
                        terms.iter().map(|&t| self.mul([c, t])).collect();
                    return self.add(scaled);
                }
                let c = self.number(coeff);
                self.intern(ExprNode::Mul(smallvec![c, factors[0]]))
            }
            _ => {
                if !coeff.is_one() {
                    let c = self.number(coeff);
                    factors.insert(0, c);
                }
                self.intern(ExprNode::Mul(factors))
            }
        }
    }

    /// Canonical power `base^exp`.
    pub fn pow(&mut self, base: ExprHandle, exp: ExprHandle) -> ExprHandle {
        let Some(e) = self.as_number(exp).cloned() else {
            if self.is_one(base) {
                return base;
            }
            return self.intern(ExprNode::Pow { base, exp });
        };

        if e.is_zero() {
            return self.one();
        }
        if e.is_one() {
            return base;
        }

        match self.get(base).clone() {
            ExprNode::Number(b) => {
                if let Some(n) = e.to_i64().filter(|n| n.abs() <= MAX_EXACT_EXPONENT) {
                    // 0^(-n) has no value and stays unevaluated.
                    if let Some(value) = b.checked_powi(n) {
                        return self.number(value);
                    }
                } else if b.is_one() {
                    return base;
                } else if b.is_zero() && e.is_positive() {
                    return base;
                }
            }
            ExprNode::Pow {
                base: inner,
                exp: inner_exp,
            } if e.is_integer() => {
                let combined = self.mul([inner_exp, exp]);
                return self.pow(inner, combined);
            }
            ExprNode::Mul(factors) if e.is_integer() => {
                let powered: Vec<ExprHandle> = factors.iter().map(|&f| self.pow(f, exp)).collect();
                return self.mul(powered);
            }
            _ => {}
        }

        self.intern(ExprNode::Pow { base, exp })
    }

    /// `base^n` for an integer `n`.
    pub fn powi(&mut self, base: ExprHandle, n: i64) -> ExprHandle {
        let exp = self.integer(n);
        self.pow(base, exp)
    }

    /// `-a`, stored as `(-1) * a`.
    pub fn neg(&mut self, a: ExprHandle) -> ExprHandle {
        let minus_one = self.integer(-1);
        self.mul([minus_one, a])
    }

    /// `a - b`.
    pub fn sub(&mut self, a: ExprHandle, b: ExprHandle) -> ExprHandle {
        let negated = self.neg(b);
        self.add([a, negated])
    }

    /// `a / b`, stored as `a * b^(-1)`.
    pub fn div(&mut self, a: ExprHandle, b: ExprHandle) -> ExprHandle {
        let inverse = self.powi(b, -1);
        self.mul([a, inverse])
    }

    /// Applies `func` to `arg`, folding exactly known values.
    pub fn apply(&mut self, func: Function, arg: ExprHandle) -> ExprHandle {
        if self.is_zero(arg) {
            match func {
                Function::Sin
                | Function::Tan
                | Function::Asin
                | Function::Atan
                | Function::Sinh
                | Function::Tanh => return self.zero(),
                Function::Cos | Function::Cosh | Function::Exp => return self.one(),
                Function::Ln | Function::Acos => {}
            }
        }
        if self.is_one(arg) && matches!(func, Function::Ln | Function::Acos) {
            return self.zero();
        }
        if func == Function::Ln && matches!(self.get(arg), ExprNode::Constant(Constant::E)) {
            return self.one();
        }
        if let (
            Function::Exp,
            ExprNode::Apply {
                func: Function::Ln,
                arg: inner,
            },
        ) = (func, self.get(arg))
        {
            return *inner;
        }
        self.intern(ExprNode::Apply { func, arg })
    }

    /// Splits `c * rest` into its numeric coefficient and the remainder.
    fn split_coefficient(&mut self, handle: ExprHandle) -> (Rational, ExprHandle) {
        if let ExprNode::Mul(factors) = self.get(handle) {
            if let ExprNode::Number(c) = self.get(factors[0]) {
                let c = c.clone();
                let rest: SmallVec<[ExprHandle; 4]> = factors[1..].iter().copied().collect();
                let rest = if rest.len() == 1 {
                    rest[0]
                } else {
                    self.intern(ExprNode::Mul(rest))
                };
                return (c, rest);
            }
        }
        (Rational::one(), handle)
    }

    /// Rebuilds `c * rest` where `rest` carries no numeric coefficient.
    fn scaled(&mut self, c: Rational, rest: ExprHandle) -> ExprHandle {
        if c.is_one() {
            return rest;
        }
        let c = self.number(c);
        let mut factors: SmallVec<[ExprHandle; 4]> = smallvec![c];
        match self.get(rest) {
            ExprNode::Mul(fs) => factors.extend(fs.iter().copied()),
            _ => factors.push(rest),
        }
        self.intern(ExprNode::Mul(factors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_basic() {
        let mut arena = ExprArena::new();

        let x = arena.symbol("x");
        let y = arena.symbol("y");

        assert_eq!(x, arena.symbol("x"));
        assert_ne!(x, y);
    }

    #[test]
    fn test_hash_consing() {
        let mut arena = ExprArena::new();

        let x = arena.symbol("x");
        let one = arena.integer(1);

        let sum1 = arena.add([x, one]);
        let sum2 = arena.add([one, x]);

        assert_eq!(sum1, sum2);
        // x, 1 and (1 + x)
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_constant_folding() {
        let mut arena = ExprArena::new();
        let two = arena.integer(2);
        let three = arena.integer(3);

        let sum = arena.add([two, three]);
        assert_eq!(arena.as_number(sum), Some(&Rational::from(5)));

        let product = arena.mul([two, three]);
        assert_eq!(arena.as_number(product), Some(&Rational::from(6)));

        let half = arena.div(three, two);
        assert_eq!(arena.as_number(half), Some(&Rational::from_i64(3, 2)));
    }

    #[test]
    fn test_like_terms_cancel() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let y = arena.symbol("y");
        let xy = arena.mul([x, y]);
        let yx = arena.mul([y, x]);

        let difference = arena.sub(xy, yx);
        assert!(arena.is_zero(difference));

        let twice = arena.add([x, x]);
        let two = arena.integer(2);
        assert_eq!(twice, arena.mul([two, x]));
    }

    #[test]
    fn test_powers_merge() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let x2 = arena.powi(x, 2);

        let x3 = arena.mul([x, x2]);
        assert_eq!(x3, arena.powi(x, 3));

        let ratio = arena.div(x3, x2);
        assert_eq!(ratio, x);

        let unit = arena.div(x, x);
        assert!(arena.is_one(unit));
    }

    #[test]
    fn test_coefficient_distributes_over_sum() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let one = arena.one();
        let two = arena.integer(2);
        let sum = arena.add([x, one]);

        let scaled = arena.mul([two, sum]);
        let expected_term = arena.mul([two, x]);
        assert_eq!(scaled, arena.add([two, expected_term]));

        let back = arena.div(scaled, two);
        assert_eq!(back, sum);
    }

    #[test]
    fn test_zero_power_rules() {
        let mut arena = ExprArena::new();
        let zero = arena.zero();
        let x = arena.symbol("x");

        let unit = arena.powi(x, 0);
        assert!(arena.is_one(unit));
        let inverse_zero = arena.powi(zero, -1);
        assert!(matches!(arena.get(inverse_zero), ExprNode::Pow { .. }));

        let product = arena.mul([zero, x]);
        assert!(arena.is_zero(product));
    }

    #[test]
    fn test_special_function_values() {
        let mut arena = ExprArena::new();
        let zero = arena.zero();
        let one = arena.one();
        let e = arena.constant(Constant::E);

        let sin0 = arena.apply(Function::Sin, zero);
        let cos0 = arena.apply(Function::Cos, zero);
        let exp0 = arena.apply(Function::Exp, zero);
        let ln1 = arena.apply(Function::Ln, one);
        let ln_e = arena.apply(Function::Ln, e);
        assert!(arena.is_zero(sin0));
        assert!(arena.is_one(cos0));
        assert!(arena.is_one(exp0));
        assert!(arena.is_zero(ln1));
        assert!(arena.is_one(ln_e));
    }
}
