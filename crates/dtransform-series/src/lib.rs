//! # dtransform-series
//!
//! Truncated multivariate power series with symbolic coefficients.
//!
//! This crate provides:
//! - [`Series`]: a Taylor expansion around a center with per-variable scaling
//! - [`SeriesBuilder`]: order, center and scaling configuration
//! - Arithmetic: negation, addition, subtraction, multiplication, division
//!   and scalar multiples, all on the coefficient tables
//! - [`SymbolicEngine`]: the expression capabilities the algebra relies on,
//!   implemented by [`ArenaEngine`]
//!
//! # Key algorithms
//!
//! - Construction: incremental partial derivatives along a lexicographic
//!   walk of the index cube
//! - Multiplication: truncated multivariate convolution
//! - Division: recursive deconvolution against the constant term

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod engine;
pub mod error;
pub mod multi_index;
pub mod ops;
pub mod scalar;
pub mod taylor;

#[cfg(test)]
mod proptests;

pub use engine::{ArenaEngine, SymbolicEngine};
pub use error::{Mismatch, SeriesError};
pub use multi_index::{IndexBox, MultiIndex};
pub use scalar::Scalar;
pub use taylor::{Series, SeriesBuilder, DEFAULT_ORDER};
