//! Truncated multivariate Taylor expansions.
//!
//! A [`Series`] stores the coefficients of
//!
//! ```text
//! f(x) ~ sum over k of c_k * prod_m ((x_m - a_m) / s_m)^(k_m)
//! ```
//!
//! where `a` is the expansion center, `s` the per-variable scaling and `k`
//! ranges over the cube `{0..N-1}^d` for order `N`. Note that the order is a
//! bound on every exponent separately, not on the total degree, so a series
//! in `d` variables has `N^d` coefficients.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::engine::{ArenaEngine, SymbolicEngine};
use crate::error::{Mismatch, SeriesError};
use crate::multi_index::MultiIndex;
use crate::scalar::Scalar;

/// Order used when the builder is not given one.
pub const DEFAULT_ORDER: usize = 4;

/// The attributes shared by a series and everything derived from it.
#[derive(Debug)]
pub(crate) struct Frame<X> {
    pub(crate) expression: X,
    pub(crate) order: usize,
    pub(crate) variables: Vec<String>,
    pub(crate) center: BTreeMap<String, X>,
    pub(crate) scaling: BTreeMap<String, X>,
}

/// A truncated multivariate power series with symbolic coefficients.
///
/// Series are immutable. Arithmetic produces new series that share the
/// left operand's frame (expression of origin, order, variables, center and
/// scaling) and differ only in their coefficient table.
#[derive(Clone)]
pub struct Series<E: SymbolicEngine = ArenaEngine> {
    engine: E,
    frame: Arc<Frame<E::Expr>>,
    coeffs: BTreeMap<MultiIndex, E::Expr>,
}

/// Builder for [`Series`].
///
/// ```
/// use dtransform_series::{ArenaEngine, Series};
///
/// let engine = ArenaEngine::new();
/// let series = Series::builder(&engine, "x + y")
///     .order(3)
///     .at("x", 1)
///     .at("y", 2)
///     .build()
///     .unwrap();
/// assert_eq!(series.coefficients().len(), 9);
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct SeriesBuilder<'a, E: SymbolicEngine> {
    engine: &'a E,
    expression: String,
    order: usize,
    center: BTreeMap<String, Scalar>,
    overrides: BTreeMap<String, Scalar>,
    scaling: BTreeMap<String, Scalar>,
}

impl<'a, E: SymbolicEngine> SeriesBuilder<'a, E> {
    fn new(engine: &'a E, expression: &str) -> Self {
        Self {
            engine,
            expression: expression.to_owned(),
            order: DEFAULT_ORDER,
            center: BTreeMap::new(),
            overrides: BTreeMap::new(),
            scaling: BTreeMap::new(),
        }
    }

    /// Sets the per-axis order `N`. Exponents run from `0` to `N - 1`.
    pub fn order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Sets the expansion center from a mapping. Missing variables are
    /// expanded around zero.
    pub fn center<K, V>(mut self, center: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Scalar>,
    {
        self.center = center
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Sets the center for one variable. Takes precedence over the mapping
    /// given to [`center`](Self::center), whichever is called first.
    pub fn at(mut self, variable: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.overrides.insert(variable.into(), value.into());
        self
    }

    /// Sets the scaling constants. Missing variables use scaling 1.
    ///
    /// A scaling constant is any expression without variables whose value
    /// is strictly positive, such as `2`, `0.5` or `"pi/2"`.
    pub fn scaling<K, V>(mut self, scaling: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Scalar>,
    {
        self.scaling = scaling
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Parses the expression and computes every coefficient.
    ///
    /// Center and scaling entries for names that are not variables of the
    /// expression are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::InvalidOrder`] for order zero,
    /// [`SeriesError::InvalidScaling`] for a non-positive scaling constant,
    /// [`SeriesError::InvalidValue`] for unusable center or scaling values
    /// and [`SeriesError::Parse`] if the expression does not parse.
    pub fn build(self) -> Result<Series<E>, SeriesError> {
        if self.order == 0 {
            return Err(SeriesError::InvalidOrder(self.order));
        }
        let engine = self.engine;
        let expression = engine.parse(&self.expression)?;
        let variables = engine.free_variables(&expression);

        let mut center = BTreeMap::new();
        let mut scaling = BTreeMap::new();
        for var in &variables {
            let value = match self.overrides.get(var).or_else(|| self.center.get(var)) {
                Some(value) => value.to_value_expr(engine, var)?,
                None => engine.zero(),
            };
            let scale = match self.scaling.get(var) {
                Some(scale) => scale.to_scaling(engine, var)?,
                None => engine.integer(1),
            };
            center.insert(var.clone(), value);
            scaling.insert(var.clone(), scale);
        }

        let frame = Frame {
            expression,
            order: self.order,
            variables,
            center,
            scaling,
        };
        let coeffs = expand(engine, &frame);
        Ok(Series {
            engine: engine.clone(),
            frame: Arc::new(frame),
            coeffs,
        })
    }
}

/// Computes the dense coefficient table of `frame.expression`.
///
/// The derivative for `k` is the derivative for `k - e_m` differentiated
/// once along the last non-zero axis `m`; the cube is walked
/// lexicographically so `k - e_m` is always available.
fn expand<E: SymbolicEngine>(engine: &E, frame: &Frame<E::Expr>) -> BTreeMap<MultiIndex, E::Expr> {
    let dimension = frame.variables.len();
    debug!(
        expression = %engine.render(&frame.expression),
        dimension,
        order = frame.order,
        "expanding series"
    );

    let mut derivatives: BTreeMap<MultiIndex, E::Expr> = BTreeMap::new();
    let mut coeffs = BTreeMap::new();
    for k in MultiIndex::cube(dimension, frame.order) {
        let derivative = match k.last_nonzero_axis() {
            None => frame.expression.clone(),
            Some(axis) => {
                let previous = k
                    .decrement(axis)
                    .and_then(|prev| derivatives.get(&prev))
                    .cloned()
                    .unwrap_or_else(|| engine.zero());
                if engine.is_zero(&previous) {
                    previous
                } else {
                    engine.differentiate(&previous, &frame.variables[axis], 1)
                }
            }
        };

        let coefficient = if engine.is_zero(&derivative) {
            engine.zero()
        } else {
            let at_center = engine.substitute(&derivative, &frame.center);
            let mut weight = engine.integer(1);
            let mut factorials = engine.integer(1);
            for (var, &exponent) in frame.variables.iter().zip(k.components()) {
                if exponent > 0 {
                    weight = engine.mul(&weight, &engine.pow(&frame.scaling[var], exponent));
                    factorials = engine.mul(&factorials, &engine.factorial(exponent));
                }
            }
            let scaled = engine.mul(&at_center, &weight);
            engine.div(&scaled, &factorials)
        };
        trace!(index = %k, coefficient = %engine.render(&coefficient), "coefficient");

        derivatives.insert(k.clone(), derivative);
        coeffs.insert(k, coefficient);
    }

    debug!(coefficients = coeffs.len(), "series expanded");
    coeffs
}

impl<E: SymbolicEngine> Series<E> {
    /// Starts building the series of `expression` using `engine`.
    pub fn builder<'a>(engine: &'a E, expression: &str) -> SeriesBuilder<'a, E> {
        SeriesBuilder::new(engine, expression)
    }

    /// Builds a series with default center, scaling and order.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Parse`] if the expression does not parse.
    pub fn new(engine: &E, expression: &str) -> Result<Self, SeriesError> {
        Self::builder(engine, expression).build()
    }

    /// A series with this frame and the given coefficient table.
    pub(crate) fn derive(&self, coeffs: BTreeMap<MultiIndex, E::Expr>) -> Self {
        Self {
            engine: self.engine.clone(),
            frame: Arc::clone(&self.frame),
            coeffs,
        }
    }

    /// A series with the same frame and an explicit, possibly sparse,
    /// coefficient table. Absent entries read as zero.
    ///
    /// Values are converted by this series' engine, so expressions owned by
    /// another engine cannot enter the table.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::IndexOutOfRange`] if an index has the wrong
    /// dimension or an exponent of at least the order,
    /// [`SeriesError::UnsupportedOperand`] for non-finite floats and
    /// [`SeriesError::Parse`] for malformed expression text.
    pub fn with_coefficients<V: Into<Scalar>>(
        &self,
        coeffs: impl IntoIterator<Item = (MultiIndex, V)>,
    ) -> Result<Self, SeriesError> {
        let dimension = self.dimension();
        let order = self.order();
        let coeffs = coeffs
            .into_iter()
            .map(|(index, value)| {
                if index.dimension() == dimension && index.fits(order) {
                    let value = value.into().to_expr(&self.engine, "coefficient")?;
                    Ok((index, value))
                } else {
                    Err(SeriesError::IndexOutOfRange {
                        index,
                        order,
                        dimension,
                    })
                }
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(self.derive(coeffs))
    }

    /// The engine owning the coefficients.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The expression the frame was built from.
    #[must_use]
    pub fn expression(&self) -> &E::Expr {
        &self.frame.expression
    }

    /// The per-axis order `N`.
    #[must_use]
    pub fn order(&self) -> usize {
        self.frame.order
    }

    /// The variables, sorted by name. Position `i` is axis `i`.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.frame.variables
    }

    /// Number of variables.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.frame.variables.len()
    }

    /// The expansion center of every variable.
    #[must_use]
    pub fn center(&self) -> &BTreeMap<String, E::Expr> {
        &self.frame.center
    }

    /// The scaling constant of every variable.
    #[must_use]
    pub fn scaling(&self) -> &BTreeMap<String, E::Expr> {
        &self.frame.scaling
    }

    /// The stored coefficients, sorted by index.
    #[must_use]
    pub fn coefficients(&self) -> &BTreeMap<MultiIndex, E::Expr> {
        &self.coeffs
    }

    /// The coefficient at `index`, zero when absent.
    #[must_use]
    pub fn coeff(&self, index: &MultiIndex) -> E::Expr {
        self.coeffs
            .get(index)
            .cloned()
            .unwrap_or_else(|| self.engine.zero())
    }

    /// Checks that `other` can be combined with this series.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Incompatible`] naming the first attribute that
    /// differs, checked in the order engine, variables, order, scaling,
    /// center.
    pub fn compatible(&self, other: &Self) -> Result<(), SeriesError> {
        let mismatch = if !self.engine.shares_storage(&other.engine) {
            Some(Mismatch::Engine)
        } else if Arc::ptr_eq(&self.frame, &other.frame) {
            None
        } else if self.frame.variables != other.frame.variables {
            Some(Mismatch::Variables)
        } else if self.frame.order != other.frame.order {
            Some(Mismatch::Order)
        } else if !self.same_values(&self.frame.scaling, &other.frame.scaling) {
            Some(Mismatch::Scaling)
        } else if !self.same_values(&self.frame.center, &other.frame.center) {
            Some(Mismatch::Center)
        } else {
            None
        };
        mismatch.map_or(Ok(()), |m| Err(SeriesError::Incompatible(m)))
    }

    fn same_values(
        &self,
        left: &BTreeMap<String, E::Expr>,
        right: &BTreeMap<String, E::Expr>,
    ) -> bool {
        left.len() == right.len()
            && left
                .iter()
                .zip(right)
                .all(|((v, a), (w, b))| v == w && self.engine.structural_equal(a, b))
    }

    /// The terms `(x_m - a_m) / s_m`, one per axis.
    fn shifted_variables(&self) -> Vec<E::Expr> {
        let engine = &self.engine;
        self.frame
            .variables
            .iter()
            .map(|var| {
                let symbol = engine.symbol(var);
                let shifted = engine.sub(&symbol, &self.frame.center[var]);
                engine.div(&shifted, &self.frame.scaling[var])
            })
            .collect()
    }

    /// The polynomial `sum c_k prod ((x_m - a_m)/s_m)^(k_m)` without
    /// simplification.
    fn reconstruct(&self) -> E::Expr {
        let engine = &self.engine;
        let shifted = self.shifted_variables();
        let terms = self
            .coeffs
            .iter()
            .filter(|(_, c)| !engine.is_zero(c))
            .map(|(k, c)| {
                k.components()
                    .iter()
                    .zip(&shifted)
                    .filter(|&(&exponent, _)| exponent > 0)
                    .fold(c.clone(), |term, (&exponent, base)| {
                        engine.mul(&term, &engine.pow(base, exponent))
                    })
            })
            .collect();
        engine.sum(terms)
    }

    /// Reassembles an approximate closed form of the series and simplifies
    /// it.
    #[must_use]
    pub fn inverse(&self) -> E::Expr {
        let expr = self.reconstruct();
        self.engine.simplify(&expr)
    }

    /// Evaluates the reassembled polynomial at `point`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Eval`] if a variable has no value.
    pub fn evaluate<K: Into<String>>(
        &self,
        point: impl IntoIterator<Item = (K, f64)>,
    ) -> Result<f64, SeriesError> {
        let point: BTreeMap<String, f64> = point.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Ok(self.engine.evaluate(&self.reconstruct(), &point)?)
    }

    /// Writes one `Series[index] = coefficient` line per stored coefficient.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `out`.
    pub fn write_coefficients(&self, out: &mut impl Write) -> io::Result<()> {
        for (index, value) in &self.coeffs {
            writeln!(out, "Series[{index}] = {}", self.engine.render(value))?;
        }
        Ok(())
    }

    /// Prints the coefficient table to standard output.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from standard output.
    pub fn display_coefficients(&self) -> io::Result<()> {
        self.write_coefficients(&mut io::stdout().lock())
    }
}

impl<E: SymbolicEngine> PartialEq for Series<E> {
    /// Structural comparison of frames and coefficient tables.
    ///
    /// Unlike a plain map comparison, an absent coefficient compares equal
    /// to an explicit zero, so a sparse table equals its dense form.
    fn eq(&self, other: &Self) -> bool {
        if !self.engine.shares_storage(&other.engine)
            || self.frame.order != other.frame.order
            || self.frame.variables != other.frame.variables
            || !self.same_values(&self.frame.scaling, &other.frame.scaling)
            || !self.same_values(&self.frame.center, &other.frame.center)
        {
            return false;
        }
        self.coeffs
            .keys()
            .chain(other.coeffs.keys())
            .all(|k| self.engine.structural_equal(&self.coeff(k), &other.coeff(k)))
    }
}

impl<E: SymbolicEngine> fmt::Debug for Series<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Series")
            .field("expression", &self.frame.expression)
            .field("order", &self.frame.order)
            .field("variables", &self.frame.variables)
            .field("center", &self.frame.center)
            .field("scaling", &self.frame.scaling)
            .field("coefficients", &self.coeffs)
            .finish()
    }
}

impl<E: SymbolicEngine> fmt::Display for Series<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Series(expr='{}', order={}, center={{",
            self.engine.render(&self.frame.expression),
            self.frame.order
        )?;
        for (i, (var, value)) in self.frame.center.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{var}: {}", self.engine.render(value))?;
        }
        f.write_str("}, scaling={")?;
        for (i, (var, value)) in self.frame.scaling.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{var}: {}", self.engine.render(value))?;
        }
        f.write_str("})")
    }
}

#[cfg(test)]
mod tests {
    use dtransform_integers::Rational;

    use super::*;

    fn rational(engine: &ArenaEngine, series: &Series, index: &[u32]) -> Rational {
        engine
            .to_rational(&series.coeff(&MultiIndex::new(index)))
            .expect("numeric coefficient")
    }

    #[test]
    fn test_expansion_of_polynomial() {
        let engine = ArenaEngine::new();
        let series = Series::builder(&engine, "1 + x * y")
            .order(3)
            .center([("x", 1), ("y", 2)])
            .build()
            .unwrap();

        assert_eq!(series.variables(), ["x", "y"]);
        assert_eq!(series.coefficients().len(), 9);
        assert_eq!(rational(&engine, &series, &[0, 0]), Rational::from(3));
        assert_eq!(rational(&engine, &series, &[1, 0]), Rational::from(2));
        assert_eq!(rational(&engine, &series, &[0, 1]), Rational::from(1));
        assert_eq!(rational(&engine, &series, &[1, 1]), Rational::from(1));
        assert_eq!(rational(&engine, &series, &[2, 2]), Rational::from(0));
    }

    #[test]
    fn test_factorial_and_scaling() {
        let engine = ArenaEngine::new();
        let series = Series::builder(&engine, "x^3")
            .scaling([("x", 0.5)])
            .build()
            .unwrap();

        // x^3 at 0 with scaling 1/2: only k = 3 survives, 3!/3! * (1/2)^3
        assert_eq!(series.order(), DEFAULT_ORDER);
        assert_eq!(rational(&engine, &series, &[3]), Rational::from_i64(1, 8));
        assert_eq!(rational(&engine, &series, &[2]), Rational::from(0));

        let value = series.evaluate([("x", 3.0)]).unwrap();
        assert!((value - 27.0).abs() < 1e-10);
    }

    #[test]
    fn test_round_trip_at_center() {
        let engine = ArenaEngine::new();
        let series = Series::builder(&engine, "sin(x)/y")
            .order(3)
            .at("x", 1)
            .at("y", 2)
            .build()
            .unwrap();

        let value = series.evaluate([("x", 1.0), ("y", 2.0)]).unwrap();
        assert!((value - 1.0_f64.sin() / 2.0).abs() < 1e-10);

        let mut center = BTreeMap::new();
        center.insert("x".to_owned(), 1.0);
        center.insert("y".to_owned(), 2.0);
        let simplified = engine.evaluate(&series.inverse(), &center).unwrap();
        assert!((simplified - 1.0_f64.sin() / 2.0).abs() < 1e-10);

        let near = series.evaluate([("x", 1.01), ("y", 2.01)]).unwrap();
        assert!((near - 1.01_f64.sin() / 2.01).abs() < 1e-5);
    }

    #[test]
    fn test_keyword_center_wins() {
        let engine = ArenaEngine::new();
        let before = Series::builder(&engine, "x + y")
            .at("x", 5)
            .center([("x", 1), ("y", 2), ("z", 7)])
            .build()
            .unwrap();
        let after = Series::builder(&engine, "x + y")
            .center([("x", 1), ("y", 2)])
            .at("x", 5)
            .build()
            .unwrap();

        assert_eq!(before, after);
        assert_eq!(engine.to_rational(&before.center()["x"]), Some(Rational::from(5)));
        assert!(!before.center().contains_key("z"));
    }

    #[test]
    fn test_symbolic_center() {
        let engine = ArenaEngine::new();
        let series = Series::builder(&engine, "x^2")
            .order(2)
            .at("x", "a")
            .build()
            .unwrap();
        assert_eq!(series.variables(), ["x"]);
        assert_eq!(series.coeff(&MultiIndex::from([0])), engine.parse("a^2").unwrap());
        assert_eq!(series.coeff(&MultiIndex::from([1])), engine.parse("2*a").unwrap());
    }

    #[test]
    fn test_invalid_arguments() {
        let engine = ArenaEngine::new();
        assert_eq!(
            Series::builder(&engine, "x").order(0).build().unwrap_err(),
            SeriesError::InvalidOrder(0)
        );
        assert!(matches!(
            Series::builder(&engine, "x").scaling([("x", -2)]).build(),
            Err(SeriesError::InvalidScaling { ref variable, .. }) if variable == "x"
        ));
        assert!(matches!(
            Series::builder(&engine, "x").at("x", f64::NAN).build(),
            Err(SeriesError::InvalidValue { .. })
        ));
        assert!(matches!(
            Series::new(&engine, "x +"),
            Err(SeriesError::Parse(_))
        ));
        // names that are not variables are never inspected
        assert!(Series::builder(&engine, "x").scaling([("q", -1)]).build().is_ok());
    }

    #[test]
    fn test_constant_expression() {
        let engine = ArenaEngine::new();
        let series = Series::new(&engine, "pi + 1").unwrap();
        assert_eq!(series.dimension(), 0);
        assert_eq!(series.coefficients().len(), 1);
        let value = series.evaluate(Vec::<(String, f64)>::new()).unwrap();
        assert!((value - (std::f64::consts::PI + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_recovers_polynomial() {
        let engine = ArenaEngine::new();
        let series = Series::builder(&engine, "x*y + 2*x")
            .order(3)
            .at("x", 1)
            .at("y", -1)
            .scaling([("y", 3)])
            .build()
            .unwrap();
        let inverse = series.inverse();
        let mut point = BTreeMap::new();
        point.insert("x".to_owned(), 0.7);
        point.insert("y".to_owned(), 2.5);
        let value = engine.evaluate(&inverse, &point).unwrap();
        assert!((value - (0.7 * 2.5 + 1.4)).abs() < 1e-10);
    }

    #[test]
    fn test_with_coefficients_validates() {
        let engine = ArenaEngine::new();
        let series = Series::builder(&engine, "x + y").order(2).build().unwrap();
        let sparse = series
            .with_coefficients([(MultiIndex::from([1, 1]), 1)])
            .unwrap();
        assert_eq!(sparse.coefficients().len(), 1);
        assert!(engine.is_zero(&sparse.coeff(&MultiIndex::from([0, 0]))));

        assert_eq!(
            series.with_coefficients([(MultiIndex::from([2, 0]), 1)]),
            Err(SeriesError::IndexOutOfRange {
                index: MultiIndex::from([2, 0]),
                order: 2,
                dimension: 2
            })
        );
        assert!(series
            .with_coefficients([(MultiIndex::from([1]), 1)])
            .is_err());
        assert!(matches!(
            series.with_coefficients([(MultiIndex::from([0, 0]), f64::NAN)]),
            Err(SeriesError::UnsupportedOperand { operation: "coefficient", .. })
        ));
    }

    #[test]
    fn test_with_coefficients_uses_own_engine() {
        let engine = ArenaEngine::new();
        let series = Series::builder(&engine, "x").order(2).build().unwrap();

        // only the rendered text crosses from the other engine
        let other = ArenaEngine::new();
        let big = other.parse("sin(a)*cos(b) + exp(c) - d*e*f").unwrap();
        let text = other.render(&big);

        let sparse = series
            .with_coefficients([(MultiIndex::from([0]), text.as_str())])
            .unwrap();
        assert_eq!(sparse.coefficients().len(), 1);

        let mut point = BTreeMap::new();
        let values = [("a", 0.1), ("b", 0.2), ("c", 0.3), ("d", 1.0), ("e", 2.0), ("f", 3.0)];
        for (name, value) in values {
            point.insert(name.to_owned(), value);
        }
        let expected = 0.1_f64.sin() * 0.2_f64.cos() + 0.3_f64.exp() - 6.0;
        let value = engine.evaluate(&sparse.inverse(), &point).unwrap();
        assert!((value - expected).abs() < 1e-9 * expected.abs().max(1.0));
    }

    #[test]
    fn test_irrational_scaling() {
        let engine = ArenaEngine::new();
        let series = Series::builder(&engine, "x^2")
            .order(3)
            .at("x", 1)
            .scaling([("x", "pi")])
            .build()
            .unwrap();

        // coefficient k is f^(k)(1) * pi^k / k!
        let empty = BTreeMap::new();
        let second = engine
            .evaluate(&series.coeff(&MultiIndex::from([2])), &empty)
            .unwrap();
        assert!((second - std::f64::consts::PI.powi(2)).abs() < 1e-12);

        let mut point = BTreeMap::new();
        point.insert("x".to_owned(), 1.7);
        let value = engine.evaluate(&series.inverse(), &point).unwrap();
        assert!((value - 1.7 * 1.7).abs() < 1e-10);

        assert!(matches!(
            Series::builder(&engine, "x").scaling([("x", "-pi")]).build(),
            Err(SeriesError::InvalidScaling { .. })
        ));
        assert!(matches!(
            Series::builder(&engine, "x").scaling([("x", "y")]).build(),
            Err(SeriesError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_order_one_round_trip() {
        let engine = ArenaEngine::new();
        let series = Series::builder(&engine, "exp(x) * cos(y)")
            .order(1)
            .at("x", 0.5)
            .at("y", 2)
            .build()
            .unwrap();
        assert_eq!(series.coefficients().len(), 1);

        let mut center = BTreeMap::new();
        center.insert("x".to_owned(), 0.5);
        center.insert("y".to_owned(), 2.0);
        let value = engine.evaluate(&series.inverse(), &center).unwrap();
        assert!((value - 0.5_f64.exp() * 2.0_f64.cos()).abs() < 1e-12);
    }

    #[test]
    fn test_sparse_equals_dense() {
        let engine = ArenaEngine::new();
        let dense = Series::builder(&engine, "x + y").order(2).build().unwrap();
        let sparse = dense
            .with_coefficients([(MultiIndex::from([0, 1]), 1), (MultiIndex::from([1, 0]), 1)])
            .unwrap();
        assert_eq!(dense, sparse);
    }

    #[test]
    fn test_compatibility_order() {
        let engine = ArenaEngine::new();
        let base = Series::builder(&engine, "x + y").order(3).build().unwrap();
        let other_vars = Series::builder(&engine, "x").order(2).build().unwrap();
        let other_order = Series::builder(&engine, "x*y").order(2).build().unwrap();
        let other_scale = Series::builder(&engine, "x*y")
            .order(3)
            .scaling([("x", 2)])
            .at("x", 1)
            .build()
            .unwrap();
        let other_center = Series::builder(&engine, "x*y").order(3).at("x", 1).build().unwrap();
        let foreign = Series::builder(&ArenaEngine::new(), "x + y").order(3).build().unwrap();

        let mismatch = |s: &Series| match base.compatible(s) {
            Err(SeriesError::Incompatible(m)) => Some(m),
            _ => None,
        };
        assert_eq!(mismatch(&foreign), Some(Mismatch::Engine));
        assert_eq!(mismatch(&other_vars), Some(Mismatch::Variables));
        assert_eq!(mismatch(&other_order), Some(Mismatch::Order));
        assert_eq!(mismatch(&other_scale), Some(Mismatch::Scaling));
        assert_eq!(mismatch(&other_center), Some(Mismatch::Center));

        let same = Series::builder(&engine, "x*y").order(3).build().unwrap();
        assert!(base.compatible(&same).is_ok());
        assert_ne!(base, same);
    }

    #[test]
    fn test_coefficient_dump() {
        let engine = ArenaEngine::new();
        let series = Series::builder(&engine, "x + y").order(2).build().unwrap();
        let mut out = Vec::new();
        series.write_coefficients(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Series[(0, 0)] = 0\n\
             Series[(0, 1)] = 1\n\
             Series[(1, 0)] = 1\n\
             Series[(1, 1)] = 0\n"
        );
    }

    #[test]
    fn test_display() {
        let engine = ArenaEngine::new();
        let series = Series::builder(&engine, "x + y")
            .order(3)
            .center([("x", 1), ("y", 2)])
            .scaling([("y", 1.5)])
            .build()
            .unwrap();
        assert_eq!(
            series.to_string(),
            "Series(expr='x + y', order=3, center={x: 1, y: 2}, scaling={x: 1, y: 3/2})"
        );
    }
}
