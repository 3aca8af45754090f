//! The symbolic capabilities a series needs, and their arena binding.
//!
//! [`SymbolicEngine`] is the only door between the series algebra and
//! expression manipulation. [`ArenaEngine`] implements it on top of a shared
//! [`ExprArena`] and an equality-saturation [`Simplifier`].

use std::collections::BTreeMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use dtransform_core::{EvalError, ExprArena, ExprHandle, ParseError};
use dtransform_integers::{Integer, Rational};
use dtransform_simplify::{Simplifier, SimplifierConfig};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// Expression operations used to build and combine series.
///
/// Expressions are opaque values owned by the engine; two engines may only
/// mix expressions if [`shares_storage`](SymbolicEngine::shares_storage)
/// holds between them.
pub trait SymbolicEngine: Clone + fmt::Debug {
    /// An expression owned by this engine.
    type Expr: Clone + Eq + Hash + fmt::Debug;

    /// Parses expression text.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for malformed input or unknown functions.
    fn parse(&self, text: &str) -> Result<Self::Expr, ParseError>;

    /// The free variables of `expr`, sorted by name.
    fn free_variables(&self, expr: &Self::Expr) -> Vec<String>;

    /// The variable called `name`.
    fn symbol(&self, name: &str) -> Self::Expr;

    /// An exact number.
    fn number(&self, value: Rational) -> Self::Expr;

    /// An integer.
    fn integer(&self, value: i64) -> Self::Expr {
        self.number(Rational::from(value))
    }

    /// The number zero.
    fn zero(&self) -> Self::Expr {
        self.integer(0)
    }

    /// `n!` as an exact number.
    fn factorial(&self, n: u32) -> Self::Expr {
        self.number(Rational::from_integer(Integer::factorial(n)))
    }

    /// Differentiates `expr` `times` times with respect to `var`.
    fn differentiate(&self, expr: &Self::Expr, var: &str, times: usize) -> Self::Expr;

    /// Replaces the named variables simultaneously.
    fn substitute(&self, expr: &Self::Expr, values: &BTreeMap<String, Self::Expr>)
        -> Self::Expr;

    /// `a + b`.
    fn add(&self, a: &Self::Expr, b: &Self::Expr) -> Self::Expr;

    /// `a - b`.
    fn sub(&self, a: &Self::Expr, b: &Self::Expr) -> Self::Expr;

    /// `a * b`.
    fn mul(&self, a: &Self::Expr, b: &Self::Expr) -> Self::Expr;

    /// `a / b`.
    fn div(&self, a: &Self::Expr, b: &Self::Expr) -> Self::Expr;

    /// `-a`.
    fn neg(&self, a: &Self::Expr) -> Self::Expr;

    /// `base^exp`.
    fn pow(&self, base: &Self::Expr, exp: u32) -> Self::Expr;

    /// The sum of `terms`; zero when empty.
    fn sum(&self, terms: Vec<Self::Expr>) -> Self::Expr {
        let mut terms = terms.into_iter();
        match terms.next() {
            Some(first) => terms.fold(first, |acc, t| self.add(&acc, &t)),
            None => self.zero(),
        }
    }

    /// A simpler equivalent of `expr`.
    fn simplify(&self, expr: &Self::Expr) -> Self::Expr;

    /// Whether two expressions have the same structure.
    fn structural_equal(&self, a: &Self::Expr, b: &Self::Expr) -> bool {
        a == b
    }

    /// Whether `expr` is exactly zero.
    fn is_zero(&self, expr: &Self::Expr) -> bool;

    /// The value of `expr` if it is a number.
    fn to_rational(&self, expr: &Self::Expr) -> Option<Rational>;

    /// Evaluates `expr` numerically. Names that do not occur are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::UnboundSymbol`] if a variable of `expr` has no
    /// value.
    fn evaluate(&self, expr: &Self::Expr, values: &BTreeMap<String, f64>)
        -> Result<f64, EvalError>;

    /// Renders `expr` in parseable syntax.
    fn render(&self, expr: &Self::Expr) -> String;

    /// Whether expressions of `self` and `other` are interchangeable.
    fn shares_storage(&self, other: &Self) -> bool;
}

/// A cloneable handle to a shared expression arena.
///
/// Clones share the arena, so series built from clones of one engine can be
/// combined. Every operation takes the arena lock once.
#[derive(Clone)]
pub struct ArenaEngine {
    arena: Arc<RwLock<ExprArena>>,
    simplifier: Arc<Simplifier>,
}

impl ArenaEngine {
    /// Creates an engine over a fresh arena with the default simplifier.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SimplifierConfig::default())
    }

    /// Creates an engine whose simplifier uses `config`.
    #[must_use]
    pub fn with_config(config: SimplifierConfig) -> Self {
        Self {
            arena: Arc::new(RwLock::new(ExprArena::new())),
            simplifier: Arc::new(Simplifier::with_config(config)),
        }
    }

    /// The simplifier configuration.
    #[must_use]
    pub fn config(&self) -> &SimplifierConfig {
        self.simplifier.config()
    }

    /// Number of distinct expressions stored so far.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.arena.read().len()
    }
}

impl Default for ArenaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ArenaEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaEngine")
            .field("nodes", &self.node_count())
            .field("config", self.simplifier.config())
            .finish()
    }
}

impl SymbolicEngine for ArenaEngine {
    type Expr = ExprHandle;

    fn parse(&self, text: &str) -> Result<ExprHandle, ParseError> {
        self.arena.write().parse(text)
    }

    fn free_variables(&self, expr: &ExprHandle) -> Vec<String> {
        self.arena.read().free_symbol_names(*expr)
    }

    fn symbol(&self, name: &str) -> ExprHandle {
        self.arena.write().symbol(name)
    }

    fn number(&self, value: Rational) -> ExprHandle {
        self.arena.write().number(value)
    }

    fn differentiate(&self, expr: &ExprHandle, var: &str, times: usize) -> ExprHandle {
        let mut arena = self.arena.write();
        let var = arena.intern_symbol(var);
        arena.differentiate_n(*expr, var, times)
    }

    fn substitute(&self, expr: &ExprHandle, values: &BTreeMap<String, ExprHandle>) -> ExprHandle {
        let mut arena = self.arena.write();
        let mapping: FxHashMap<_, _> = values
            .iter()
            .map(|(name, &value)| (arena.intern_symbol(name), value))
            .collect();
        arena.substitute(*expr, &mapping)
    }

    fn add(&self, a: &ExprHandle, b: &ExprHandle) -> ExprHandle {
        self.arena.write().add([*a, *b])
    }

    fn sub(&self, a: &ExprHandle, b: &ExprHandle) -> ExprHandle {
        self.arena.write().sub(*a, *b)
    }

    fn mul(&self, a: &ExprHandle, b: &ExprHandle) -> ExprHandle {
        self.arena.write().mul([*a, *b])
    }

    fn div(&self, a: &ExprHandle, b: &ExprHandle) -> ExprHandle {
        self.arena.write().div(*a, *b)
    }

    fn neg(&self, a: &ExprHandle) -> ExprHandle {
        self.arena.write().neg(*a)
    }

    fn pow(&self, base: &ExprHandle, exp: u32) -> ExprHandle {
        self.arena.write().powi(*base, i64::from(exp))
    }

    fn sum(&self, terms: Vec<ExprHandle>) -> ExprHandle {
        self.arena.write().add(terms)
    }

    fn simplify(&self, expr: &ExprHandle) -> ExprHandle {
        let mut arena = self.arena.write();
        self.simplifier.simplify_expr(&mut arena, *expr)
    }

    fn is_zero(&self, expr: &ExprHandle) -> bool {
        self.arena.read().is_zero(*expr)
    }

    fn to_rational(&self, expr: &ExprHandle) -> Option<Rational> {
        self.arena.read().as_number(*expr).cloned()
    }

    fn evaluate(&self, expr: &ExprHandle, values: &BTreeMap<String, f64>) -> Result<f64, EvalError> {
        let arena = self.arena.read();
        let bindings: FxHashMap<_, _> = values
            .iter()
            .filter_map(|(name, &value)| arena.symbols().lookup(name).map(|id| (id, value)))
            .collect();
        arena.evaluate(*expr, &bindings)
    }

    fn render(&self, expr: &ExprHandle) -> String {
        self.arena.read().render(*expr)
    }

    fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.arena, &other.arena)
    }
}
