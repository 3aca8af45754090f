//! Symbolic differentiation.
//!
//! Derivatives are built through the arena's canonical constructors, so a
//! derivative that vanishes identically comes back as the number zero.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use dtransform_integers::Rational;

use crate::arena::ExprArena;
use crate::expr::{ExprHandle, ExprNode, Function, SymbolId};

impl ExprArena {
    /// Differentiates `expr` once with respect to `var`.
    pub fn differentiate(&mut self, expr: ExprHandle, var: SymbolId) -> ExprHandle {
        let mut memo = FxHashMap::default();
        self.diff_memo(expr, var, &mut memo)
    }

    /// Differentiates `expr` `times` times with respect to `var`.
    pub fn differentiate_n(&mut self, expr: ExprHandle, var: SymbolId, times: usize) -> ExprHandle {
        let mut current = expr;
        for _ in 0..times {
            if self.is_zero(current) {
                break;
            }
            current = self.differentiate(current, var);
        }
        current
    }

    fn diff_memo(
        &mut self,
        expr: ExprHandle,
        var: SymbolId,
        memo: &mut FxHashMap<ExprHandle, ExprHandle>,
    ) -> ExprHandle {
        if let Some(&d) = memo.get(&expr) {
            return d;
        }

        let d = match self.get(expr).clone() {
            ExprNode::Number(_) | ExprNode::Constant(_) => self.zero(),
            ExprNode::Symbol(id) => {
                if id == var {
                    self.one()
                } else {
                    self.zero()
                }
            }
            ExprNode::Add(terms) => {
                let parts: SmallVec<[ExprHandle; 4]> = terms
                    .iter()
                    .map(|&t| self.diff_memo(t, var, memo))
                    .collect();
                self.add(parts)
            }
            ExprNode::Mul(factors) => {
                // Product rule: sum over i of (d f_i) * prod_{j != i} f_j
                let mut parts = Vec::with_capacity(factors.len());
                for (i, &f) in factors.iter().enumerate() {
                    let df = self.diff_memo(f, var, memo);
                    if self.is_zero(df) {
                        continue;
                    }
                    let mut product: SmallVec<[ExprHandle; 4]> = factors
                        .iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(_, &g)| g)
                        .collect();
                    product.push(df);
                    parts.push(self.mul(product));
                }
                self.add(parts)
            }
            ExprNode::Pow { base, exp } => {
                let db = self.diff_memo(base, var, memo);
                let de = self.diff_memo(exp, var, memo);
                if self.is_zero(de) {
                    if self.is_zero(db) {
                        self.zero()
                    } else {
                        // e * b^(e - 1) * b'
                        let minus_one = self.integer(-1);
                        let lowered = self.add([exp, minus_one]);
                        let power = self.pow(base, lowered);
                        self.mul([exp, power, db])
                    }
                } else {
                    // b^e * (e' * ln(b) + e * b' / b)
                    let ln_base = self.apply(Function::Ln, base);
                    let log_part = self.mul([de, ln_base]);
                    let inverse_base = self.powi(base, -1);
                    let base_part = self.mul([exp, db, inverse_base]);
                    let inner = self.add([log_part, base_part]);
                    self.mul([expr, inner])
                }
            }
            ExprNode::Apply { func, arg } => {
                let da = self.diff_memo(arg, var, memo);
                if self.is_zero(da) {
                    self.zero()
                } else {
                    let outer = self.function_derivative(func, arg);
                    self.mul([outer, da])
                }
            }
        };

        memo.insert(expr, d);
        d
    }

    /// The derivative of `func` evaluated at `u`.
    fn function_derivative(&mut self, func: Function, u: ExprHandle) -> ExprHandle {
        match func {
            Function::Sin => self.apply(Function::Cos, u),
            Function::Cos => {
                let sin = self.apply(Function::Sin, u);
                self.neg(sin)
            }
            Function::Tan => {
                // 1 + tan(u)^2
                let tan = self.apply(Function::Tan, u);
                let squared = self.powi(tan, 2);
                let one = self.one();
                self.add([one, squared])
            }
            Function::Exp => self.apply(Function::Exp, u),
            Function::Ln => self.powi(u, -1),
            Function::Asin | Function::Acos => {
                // +-(1 - u^2)^(-1/2)
                let one = self.one();
                let squared = self.powi(u, 2);
                let radicand = self.sub(one, squared);
                let exponent = self.number(Rational::from_i64(-1, 2));
                let root = self.pow(radicand, exponent);
                if func == Function::Acos {
                    self.neg(root)
                } else {
                    root
                }
            }
            Function::Atan => {
                let one = self.one();
                let squared = self.powi(u, 2);
                let denominator = self.add([one, squared]);
                self.powi(denominator, -1)
            }
            Function::Sinh => self.apply(Function::Cosh, u),
            Function::Cosh => self.apply(Function::Sinh, u),
            Function::Tanh => {
                // 1 - tanh(u)^2
                let tanh = self.apply(Function::Tanh, u);
                let squared = self.powi(tanh, 2);
                let one = self.one();
                self.sub(one, squared)
            }
        }
    }
}
