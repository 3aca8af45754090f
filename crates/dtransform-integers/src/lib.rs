//! # dtransform-integers
//!
//! Exact integer and rational arithmetic for dtransform.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - Arbitrary precision rationals (`Rational`)
//!
//! Every coefficient produced by a series expansion is built from these
//! numbers, so no floating point rounding enters the coefficient tables.
//! Floats supplied by callers are converted exactly (`Rational::from_f64`).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
pub use rational::{ParseRationalError, Rational};
