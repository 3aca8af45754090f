//! Scalar operands accepted by the series API.

use std::collections::BTreeMap;

use dtransform_integers::Rational;

use crate::engine::SymbolicEngine;
use crate::error::SeriesError;

/// A number or expression used as a center value, scaling constant or
/// scalar operand.
///
/// Floats are converted to the exact rational they denote, so `0.5`
/// becomes `1/2` and `0.1` becomes `3602879701896397/36028797018963968`.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// An exact rational.
    Exact(Rational),
    /// A binary floating point value.
    Float(f64),
    /// Expression text, parsed by the engine (for example `"pi/2"`).
    Text(String),
}

impl Scalar {
    /// Converts to an engine expression.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::UnsupportedOperand`] for NaN and infinities and
    /// [`SeriesError::Parse`] for malformed text.
    pub fn to_expr<E: SymbolicEngine>(
        &self,
        engine: &E,
        operation: &'static str,
    ) -> Result<E::Expr, SeriesError> {
        match self {
            Scalar::Exact(r) => Ok(engine.number(r.clone())),
            Scalar::Float(v) => match Rational::from_f64(*v) {
                Some(r) => Ok(engine.number(r)),
                None => Err(SeriesError::UnsupportedOperand {
                    operation,
                    found: format!("non-finite float {v}"),
                }),
            },
            Scalar::Text(text) => Ok(engine.parse(text)?),
        }
    }

    /// Converts a value supplied for variable `name`.
    pub(crate) fn to_value_expr<E: SymbolicEngine>(
        &self,
        engine: &E,
        name: &str,
    ) -> Result<E::Expr, SeriesError> {
        self.to_expr(engine, "value").map_err(|err| match err {
            SeriesError::UnsupportedOperand { found, .. } => SeriesError::InvalidValue {
                name: name.to_owned(),
                reason: found,
            },
            other => other,
        })
    }

    /// Converts a scaling constant for variable `name`: an expression
    /// without variables whose value is strictly positive.
    pub(crate) fn to_scaling<E: SymbolicEngine>(
        &self,
        engine: &E,
        name: &str,
    ) -> Result<E::Expr, SeriesError> {
        let expr = self.to_value_expr(engine, name)?;
        let positive = match engine.to_rational(&expr) {
            Some(value) => value.is_positive(),
            None => {
                let value = engine.evaluate(&expr, &BTreeMap::new()).map_err(|_| {
                    SeriesError::InvalidValue {
                        name: name.to_owned(),
                        reason: format!("scaling '{}' is not a number", engine.render(&expr)),
                    }
                })?;
                value.is_finite() && value > 0.0
            }
        };
        if !positive {
            return Err(SeriesError::InvalidScaling {
                variable: name.to_owned(),
                value: engine.render(&expr),
            });
        }
        Ok(expr)
    }
}

impl From<Rational> for Scalar {
    fn from(value: Rational) -> Self {
        Scalar::Exact(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Exact(Rational::from(value))
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Exact(Rational::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ArenaEngine;

    #[test]
    fn test_exact_conversions() {
        let engine = ArenaEngine::new();
        let half = Scalar::from(0.5).to_expr(&engine, "mul").unwrap();
        assert_eq!(engine.to_rational(&half), Some(Rational::from_i64(1, 2)));

        let text = Scalar::from("3/4").to_expr(&engine, "mul").unwrap();
        assert_eq!(engine.to_rational(&text), Some(Rational::from_i64(3, 4)));
    }

    #[test]
    fn test_non_finite_float_is_unsupported() {
        let engine = ArenaEngine::new();
        let err = Scalar::from(f64::NAN).to_expr(&engine, "mul").unwrap_err();
        assert!(matches!(
            err,
            SeriesError::UnsupportedOperand { operation: "mul", .. }
        ));

        let err = Scalar::from(f64::INFINITY)
            .to_value_expr(&engine, "x")
            .unwrap_err();
        assert!(matches!(err, SeriesError::InvalidValue { ref name, .. } if name == "x"));
    }

    #[test]
    fn test_scaling_validation() {
        let engine = ArenaEngine::new();
        let scale = Scalar::from(1.5).to_scaling(&engine, "y").unwrap();
        assert_eq!(engine.to_rational(&scale), Some(Rational::from_i64(3, 2)));

        let pi = Scalar::from("pi/2").to_scaling(&engine, "y").unwrap();
        assert_eq!(pi, engine.parse("pi/2").unwrap());
        assert!(Scalar::from("sqrt(2)").to_scaling(&engine, "y").is_ok());
        assert!(matches!(
            Scalar::from("-pi").to_scaling(&engine, "y"),
            Err(SeriesError::InvalidScaling { ref variable, .. }) if variable == "y"
        ));
        assert_eq!(
            Scalar::from(0).to_scaling(&engine, "x"),
            Err(SeriesError::InvalidScaling {
                variable: "x".into(),
                value: "0".into()
            })
        );
        assert!(matches!(
            Scalar::from("z").to_scaling(&engine, "x"),
            Err(SeriesError::InvalidValue { .. })
        ));
    }
}
