//! Conversion between arena expressions and e-graph terms.

use dtransform_core::{Constant, ExprArena, ExprHandle, ExprNode, Function};
use dtransform_integers::Rational;
use egg::{Id, RecExpr, Symbol};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::language::ExprLang;

/// Lowers an arena expression into a [`RecExpr`].
///
/// Shared subexpressions are emitted once.
#[must_use]
pub fn lower(arena: &ExprArena, expr: ExprHandle) -> RecExpr<ExprLang> {
    let mut rec = RecExpr::default();
    let mut ids = FxHashMap::default();
    lower_into(arena, expr, &mut rec, &mut ids);
    rec
}

fn lower_into(
    arena: &ExprArena,
    expr: ExprHandle,
    rec: &mut RecExpr<ExprLang>,
    ids: &mut FxHashMap<ExprHandle, Id>,
) -> Id {
    if let Some(&id) = ids.get(&expr) {
        return id;
    }

    let id = match arena.get(expr) {
        ExprNode::Number(r) => rec.add(ExprLang::Num(r.clone())),
        ExprNode::Symbol(s) => {
            let name = arena.symbol_name(*s).unwrap_or("?");
            rec.add(ExprLang::Symbol(Symbol::from(name)))
        }
        ExprNode::Constant(c) => rec.add(ExprLang::Symbol(Symbol::from(c.name()))),
        ExprNode::Add(terms) => lower_nary(arena, terms, rec, ids, ExprLang::Add),
        ExprNode::Mul(factors) => lower_nary(arena, factors, rec, ids, ExprLang::Mul),
        ExprNode::Pow { base, exp } => {
            let b = lower_into(arena, *base, rec, ids);
            let e = lower_into(arena, *exp, rec, ids);
            rec.add(ExprLang::Pow([b, e]))
        }
        ExprNode::Apply { func, arg } => {
            let a = lower_into(arena, *arg, rec, ids);
            rec.add(function_node(*func, a))
        }
    };

    ids.insert(expr, id);
    id
}

/// Emits `a1 op (a2 op (... op an))`.
fn lower_nary(
    arena: &ExprArena,
    operands: &[ExprHandle],
    rec: &mut RecExpr<ExprLang>,
    ids: &mut FxHashMap<ExprHandle, Id>,
    op: fn([Id; 2]) -> ExprLang,
) -> Id {
    let lowered: Vec<Id> = operands
        .iter()
        .map(|&h| lower_into(arena, h, rec, ids))
        .collect();
    let mut iter = lowered.into_iter().rev();
    let last = iter.next().unwrap_or_else(|| rec.add(ExprLang::Num(Rational::from(0_i64))));
    iter.fold(last, |acc, id| rec.add(op([id, acc])))
}

fn function_node(func: Function, arg: Id) -> ExprLang {
    match func {
        Function::Sin => ExprLang::Sin(arg),
        Function::Cos => ExprLang::Cos(arg),
        Function::Tan => ExprLang::Tan(arg),
        Function::Asin => ExprLang::Asin(arg),
        Function::Acos => ExprLang::Acos(arg),
        Function::Atan => ExprLang::Atan(arg),
        Function::Exp => ExprLang::Exp(arg),
        Function::Ln => ExprLang::Ln(arg),
        Function::Sinh => ExprLang::Sinh(arg),
        Function::Cosh => ExprLang::Cosh(arg),
        Function::Tanh => ExprLang::Tanh(arg),
    }
}

fn as_function(node: &ExprLang) -> Option<(Function, Id)> {
    Some(match node {
        ExprLang::Sin(a) => (Function::Sin, *a),
        ExprLang::Cos(a) => (Function::Cos, *a),
        ExprLang::Tan(a) => (Function::Tan, *a),
        ExprLang::Asin(a) => (Function::Asin, *a),
        ExprLang::Acos(a) => (Function::Acos, *a),
        ExprLang::Atan(a) => (Function::Atan, *a),
        ExprLang::Exp(a) => (Function::Exp, *a),
        ExprLang::Ln(a) => (Function::Ln, *a),
        ExprLang::Sinh(a) => (Function::Sinh, *a),
        ExprLang::Cosh(a) => (Function::Cosh, *a),
        ExprLang::Tanh(a) => (Function::Tanh, *a),
        _ => return None,
    })
}

/// Raises a [`RecExpr`] back into the arena through its canonical
/// constructors.
///
/// Returns `None` for an empty term.
pub fn raise(arena: &mut ExprArena, rec: &RecExpr<ExprLang>) -> Option<ExprHandle> {
    let nodes = rec.as_ref();
    let mut handles: Vec<ExprHandle> = Vec::with_capacity(nodes.len());
    for node in nodes {
        let at = |id: &Id| handles[usize::from(*id)];
        let handle = match node {
            ExprLang::Num(r) => arena.number(r.clone()),
            ExprLang::Symbol(s) => match Constant::from_name(s.as_str()) {
                Some(c) => arena.constant(c),
                None => arena.symbol(s.as_str()),
            },
            ExprLang::Add([a, b]) => {
                let (a, b) = (at(a), at(b));
                arena.add([a, b])
            }
            ExprLang::Sub([a, b]) => {
                let (a, b) = (at(a), at(b));
                arena.sub(a, b)
            }
            ExprLang::Mul([a, b]) => {
                let (a, b) = (at(a), at(b));
                arena.mul([a, b])
            }
            ExprLang::Div([a, b]) => {
                let (a, b) = (at(a), at(b));
                arena.div(a, b)
            }
            ExprLang::Pow([a, b]) => {
                let (a, b) = (at(a), at(b));
                arena.pow(a, b)
            }
            ExprLang::Neg(a) => {
                let a = at(a);
                arena.neg(a)
            }
            other => {
                let (func, a) = as_function(other)?;
                let a = at(&a);
                arena.apply(func, a)
            }
        };
        handles.push(handle);
    }
    handles.last().copied()
}

/// Number of distinct nodes reachable from `expr`.
#[must_use]
pub fn dag_size(arena: &ExprArena, expr: ExprHandle) -> usize {
    let mut seen = FxHashSet::default();
    let mut stack = vec![expr];
    while let Some(h) = stack.pop() {
        if seen.insert(h) {
            stack.extend(arena.get(h).children());
        }
    }
    seen.len()
}
