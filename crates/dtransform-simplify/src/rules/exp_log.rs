//! Exponential and logarithmic simplification rules.

use egg::{rewrite, Rewrite};

use crate::language::ExprLang;

/// Returns exponential and logarithmic rewrite rules.
#[must_use]
pub fn rules() -> Vec<Rewrite<ExprLang, ()>> {
    vec![
        rewrite!("exp-zero"; "(exp 0)" => "1"),
        rewrite!("ln-one"; "(ln 1)" => "0"),
        rewrite!("ln-e"; "(ln E)" => "1"),

        // Inverse compositions
        rewrite!("exp-ln"; "(exp (ln ?x))" => "?x"),
        rewrite!("ln-exp"; "(ln (exp ?x))" => "?x"),

        // exp(x) and E^x
        rewrite!("exp-pow"; "(^ E ?x)" => "(exp ?x)"),

        // exp(a + b) = exp(a) * exp(b)
        rewrite!("exp-add"; "(exp (+ ?a ?b))" => "(* (exp ?a) (exp ?b))"),
        rewrite!("exp-add-fold"; "(* (exp ?a) (exp ?b))" => "(exp (+ ?a ?b))"),

        // exp(n * x) = exp(x)^n
        rewrite!("exp-mul"; "(exp (* ?n ?x))" => "(^ (exp ?x) ?n)"),
        rewrite!("exp-mul-fold"; "(^ (exp ?x) ?n)" => "(exp (* ?n ?x))"),
    ]
}
