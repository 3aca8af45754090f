//! Floating point evaluation.

use rustc_hash::FxHashMap;

use crate::arena::ExprArena;
use crate::error::EvalError;
use crate::expr::{ExprHandle, ExprNode, SymbolId};

impl ExprArena {
    /// Evaluates `expr` with the given symbol values.
    ///
    /// Arithmetic follows IEEE semantics, so division by zero yields an
    /// infinity or NaN rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::UnboundSymbol`] if a symbol of `expr` has no value.
    pub fn evaluate(
        &self,
        expr: ExprHandle,
        values: &FxHashMap<SymbolId, f64>,
    ) -> Result<f64, EvalError> {
        let mut memo = FxHashMap::default();
        self.evaluate_memo(expr, values, &mut memo)
    }

    fn evaluate_memo(
        &self,
        expr: ExprHandle,
        values: &FxHashMap<SymbolId, f64>,
        memo: &mut FxHashMap<ExprHandle, f64>,
    ) -> Result<f64, EvalError> {
        if let Some(&v) = memo.get(&expr) {
            return Ok(v);
        }

        let value = match self.get(expr) {
            ExprNode::Number(r) => r.to_f64(),
            ExprNode::Constant(c) => c.value(),
            ExprNode::Symbol(id) => match values.get(id) {
                Some(&v) => v,
                None => {
                    let name = self.symbol_name(*id).unwrap_or("?");
                    return Err(EvalError::UnboundSymbol(name.to_owned()));
                }
            },
            ExprNode::Add(terms) => {
                let mut sum = 0.0;
                for &t in terms {
                    sum += self.evaluate_memo(t, values, memo)?;
                }
                sum
            }
            ExprNode::Mul(factors) => {
                let mut product = 1.0;
                for &f in factors {
                    product *= self.evaluate_memo(f, values, memo)?;
                }
                product
            }
            ExprNode::Pow { base, exp } => {
                let b = self.evaluate_memo(*base, values, memo)?;
                match self
                    .as_number(*exp)
                    .and_then(|e| e.to_i64())
                    .and_then(|e| i32::try_from(e).ok())
                {
                    Some(n) => b.powi(n),
                    None => b.powf(self.evaluate_memo(*exp, values, memo)?),
                }
            }
            ExprNode::Apply { func, arg } => func.apply_f64(self.evaluate_memo(*arg, values, memo)?),
        };

        memo.insert(expr, value);
        Ok(value)
    }
}
