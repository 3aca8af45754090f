//! # dtransform-simplify
//!
//! Equality saturation-based simplification for dtransform expressions.
//!
//! This crate uses the `egg` library to provide:
//! - An e-graph language with exact rational literals
//! - Algebraic, trigonometric and exponential identities
//! - A weighted size cost for extraction
//! - Lowering from and raising back into an [`ExprArena`](dtransform_core::ExprArena)
//!
//! The arena already folds numbers and collects like terms, so the rules
//! here target identities the canonical constructors cannot see, such as
//! `sin(x)^2 + cos(x)^2 = 1`. Raising a result goes back through the
//! canonical constructors, which folds whatever arithmetic the rewrites
//! left behind.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod convert;
pub mod cost;
pub mod engine;
pub mod language;
pub mod rules;

pub use engine::{SimplificationStats, Simplifier, SimplifierConfig};
pub use language::ExprLang;
