//! Simplification rules organized by category.
//!
//! Every rule is an identity on the real numbers wherever both sides are
//! defined. Rules that need sign or branch assumptions (`ln(x*y)`,
//! `(x^a)^b`, `sqrt(x^2)`) are left out.

pub mod arithmetic;
pub mod exp_log;
pub mod trig;

use egg::Rewrite;

use crate::language::ExprLang;

/// Collects all simplification rules.
#[must_use]
pub fn all_rules() -> Vec<Rewrite<ExprLang, ()>> {
    let mut rules = Vec::new();
    rules.extend(arithmetic::rules());
    rules.extend(trig::rules());
    rules.extend(exp_log::rules());
    rules
}
