//! Cost function for expression extraction.
//!
//! After equality saturation, one expression is picked from each
//! equivalence class. Smaller is better, and function applications weigh
//! more than arithmetic so identities that remove them win ties.

use egg::{CostFunction, Id, Language};

use crate::language::ExprLang;

/// Weighted AST size.
#[derive(Default)]
pub struct WeightedSize;

impl CostFunction<ExprLang> for WeightedSize {
    type Cost = usize;

    fn cost<C>(&mut self, enode: &ExprLang, mut costs: C) -> Self::Cost
    where
        C: FnMut(Id) -> Self::Cost,
    {
        let base_cost = match enode {
            ExprLang::Num(_) | ExprLang::Symbol(_) => 1,
            // Prefer the canonical spellings the arena produces.
            ExprLang::Sub(_) | ExprLang::Div(_) | ExprLang::Neg(_) => 2,
            node if node.is_function() => 3,
            _ => 1,
        };

        enode.fold(base_cost, |sum, id| sum + costs(id))
    }
}
