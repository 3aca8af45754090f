//! Substitution and free-symbol queries.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::arena::ExprArena;
use crate::expr::{ExprHandle, ExprNode, SymbolId};

impl ExprArena {
    /// Replaces every symbol in `mapping` simultaneously and re-canonicalises.
    ///
    /// Substituted values are not themselves rewritten, so `x -> y, y -> x`
    /// swaps the two symbols.
    pub fn substitute(
        &mut self,
        expr: ExprHandle,
        mapping: &FxHashMap<SymbolId, ExprHandle>,
    ) -> ExprHandle {
        if mapping.is_empty() {
            return expr;
        }
        let mut memo = FxHashMap::default();
        self.substitute_memo(expr, mapping, &mut memo)
    }

    fn substitute_memo(
        &mut self,
        expr: ExprHandle,
        mapping: &FxHashMap<SymbolId, ExprHandle>,
        memo: &mut FxHashMap<ExprHandle, ExprHandle>,
    ) -> ExprHandle {
        if let Some(&done) = memo.get(&expr) {
            return done;
        }

        let result = match self.get(expr).clone() {
            ExprNode::Number(_) | ExprNode::Constant(_) => expr,
            ExprNode::Symbol(id) => mapping.get(&id).copied().unwrap_or(expr),
            ExprNode::Add(terms) => {
                let terms: SmallVec<[ExprHandle; 4]> = terms
                    .iter()
                    .map(|&t| self.substitute_memo(t, mapping, memo))
                    .collect();
                self.add(terms)
            }
            ExprNode::Mul(factors) => {
                let factors: SmallVec<[ExprHandle; 4]> = factors
                    .iter()
                    .map(|&f| self.substitute_memo(f, mapping, memo))
                    .collect();
                self.mul(factors)
            }
            ExprNode::Pow { base, exp } => {
                let base = self.substitute_memo(base, mapping, memo);
                let exp = self.substitute_memo(exp, mapping, memo);
                self.pow(base, exp)
            }
            ExprNode::Apply { func, arg } => {
                let arg = self.substitute_memo(arg, mapping, memo);
                self.apply(func, arg)
            }
        };

        memo.insert(expr, result);
        result
    }

    /// The symbols occurring in `expr`, without duplicates.
    #[must_use]
    pub fn free_symbols(&self, expr: ExprHandle) -> Vec<SymbolId> {
        let mut seen = FxHashSet::default();
        let mut found = Vec::new();
        let mut stack = vec![expr];
        while let Some(handle) = stack.pop() {
            if !seen.insert(handle) {
                continue;
            }
            match self.get(handle) {
                ExprNode::Symbol(id) => found.push(*id),
                node => stack.extend(node.children()),
            }
        }
        found.sort_unstable();
        found.dedup();
        found
    }

    /// The names of the symbols in `expr`, sorted lexicographically.
    #[must_use]
    pub fn free_symbol_names(&self, expr: ExprHandle) -> Vec<String> {
        let mut names: Vec<String> = self
            .free_symbols(expr)
            .into_iter()
            .filter_map(|id| self.symbol_name(id).map(str::to_owned))
            .collect();
        names.sort();
        names
    }
}
