//! Error types for parsing and evaluation.

use thiserror::Error;

/// Errors raised while parsing an expression string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The input does not match the expression grammar.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// A valid expression was followed by unparsed input.
    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),

    /// A call names a function that is not supported.
    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    /// A function was called with the wrong number of arguments.
    #[error("function '{name}' takes {expected} argument(s), got {found}")]
    Arity {
        /// The function name.
        name: String,
        /// Arguments the function accepts.
        expected: usize,
        /// Arguments supplied.
        found: usize,
    },
}

/// Errors raised while evaluating an expression numerically.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EvalError {
    /// A symbol had no value bound to it.
    #[error("no value bound for symbol '{0}'")]
    UnboundSymbol(String),
}
