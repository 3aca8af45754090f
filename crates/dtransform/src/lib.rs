//! # dtransform
//!
//! Multivariate differential transforms: functions represented by their
//! truncated Taylor coefficients around a center, with the algebra carried
//! out directly on the coefficients.
//!
//! ## Features
//!
//! - **Expression Engine**: hash-consed arena with parsing, differentiation,
//!   substitution and evaluation
//! - **Exact Numbers**: arbitrary precision integers and rationals
//! - **Simplification**: equality saturation via e-graphs
//! - **Series Algebra**: addition, multiplication, division and scalar
//!   multiples of truncated multivariate series
//!
//! ## Quick Start
//!
//! ```rust
//! use dtransform::prelude::*;
//!
//! let engine = ArenaEngine::new();
//! let f = Series::builder(&engine, "x + y").order(3).at("x", 1).at("y", 2).build()?;
//! let g = Series::builder(&engine, "1 + x*y").order(3).at("x", 1).at("y", 2).build()?;
//!
//! let sum = (&f + &g)?;
//! let value = sum.evaluate([("x", 1.0), ("y", 2.0)])?;
//! assert!((value - 6.0).abs() < 1e-12);
//! # Ok::<(), SeriesError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use dtransform_core as core;
pub use dtransform_integers as integers;
pub use dtransform_series as series;
pub use dtransform_simplify as simplify;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use dtransform_core::{ExprArena, ExprHandle, ExprNode};
    pub use dtransform_integers::{Integer, Rational};
    pub use dtransform_series::{
        ArenaEngine, MultiIndex, Scalar, Series, SeriesBuilder, SeriesError, SymbolicEngine,
    };
    pub use dtransform_simplify::{Simplifier, SimplifierConfig};
}
