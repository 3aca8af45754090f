//! # dtransform-core
//!
//! Core expression engine for dtransform.
//!
//! This crate provides:
//! - Arena-allocated expression storage with hash-consing
//! - Canonicalising constructors (flattening, exact constant folding,
//!   collection of like terms and powers)
//! - A text parser, differentiation, substitution and numeric evaluation
//!
//! ## Design Principles
//!
//! - **Hash-Consing**: every structurally unique expression is stored once,
//!   so handle equality is structural equality
//! - **Canonical Forms**: subtraction, negation and division are expressed
//!   through `Add`, `Mul` and `Pow`, so equal inputs meet in the same node
//! - **Exact Numbers**: literals are arbitrary precision rationals

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod diff;
pub mod display;
pub mod error;
pub mod eval;
pub mod expr;
pub mod parse;
pub mod subst;
pub mod symbols;

pub use arena::ExprArena;
pub use error::{EvalError, ParseError};
pub use expr::{Constant, ExprHandle, ExprNode, Function, SymbolId};
pub use symbols::SymbolTable;
