//! Error types for series construction and arithmetic.

use std::fmt;

use dtransform_core::{EvalError, ParseError};
use thiserror::Error;

use crate::multi_index::MultiIndex;

/// The attribute that made two series incompatible.
///
/// Attributes are checked in declaration order and the first mismatch is
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mismatch {
    /// The series live in different expression stores.
    Engine,
    /// The variable lists differ.
    Variables,
    /// The expansion orders differ.
    Order,
    /// The scaling constants differ.
    Scaling,
    /// The expansion centers differ.
    Center,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mismatch::Engine => "expression engines do not match",
            Mismatch::Variables => "variables do not match",
            Mismatch::Order => "expansion order mismatch",
            Mismatch::Scaling => "scaling constants mismatch",
            Mismatch::Center => "expansion center mismatch",
        })
    }
}

/// Errors that can occur while building or combining series.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SeriesError {
    /// The order was zero.
    #[error("order must be a positive integer, got {0}")]
    InvalidOrder(usize),

    /// A scaling constant was not strictly positive.
    #[error("scaling constant for variable '{variable}' must be positive, got {value}")]
    InvalidScaling {
        /// The variable.
        variable: String,
        /// The rejected value, rendered.
        value: String,
    },

    /// A center or scaling value could not be turned into an expression.
    #[error("invalid value for '{name}': {reason}")]
    InvalidValue {
        /// The variable the value was supplied for.
        name: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A coefficient was supplied outside the series' index space.
    #[error("index {index} lies outside {{0..{order}}}^{dimension}")]
    IndexOutOfRange {
        /// The offending index.
        index: MultiIndex,
        /// The series order.
        order: usize,
        /// The number of variables.
        dimension: usize,
    },

    /// The operands of a binary operation are not compatible.
    #[error("incompatible series: {0}")]
    Incompatible(Mismatch),

    /// The constant coefficient of a series divisor is zero.
    #[error("leading coefficient of denominator is zero")]
    ZeroLeadingCoefficient,

    /// A series was divided by an exact scalar zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A scalar operand cannot be represented as an expression.
    #[error("unsupported operand for {operation}: {found}")]
    UnsupportedOperand {
        /// The operation attempted.
        operation: &'static str,
        /// Description of the operand.
        found: String,
    },

    /// Expression text failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Numeric evaluation failed.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            SeriesError::Incompatible(Mismatch::Order).to_string(),
            "incompatible series: expansion order mismatch"
        );
        assert_eq!(
            SeriesError::InvalidScaling {
                variable: "x".into(),
                value: "-1".into()
            }
            .to_string(),
            "scaling constant for variable 'x' must be positive, got -1"
        );
        assert_eq!(
            SeriesError::IndexOutOfRange {
                index: MultiIndex::from([3, 0]),
                order: 3,
                dimension: 2
            }
            .to_string(),
            "index (3, 0) lies outside {0..3}^2"
        );
    }

    #[test]
    fn test_parse_errors_convert() {
        let err: SeriesError = ParseError::UnknownFunction("gamma".into()).into();
        assert_eq!(err.to_string(), "unknown function 'gamma'");
    }
}
