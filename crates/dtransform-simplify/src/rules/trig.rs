//! Trigonometric and hyperbolic simplification rules.

use egg::{rewrite, Rewrite};

use crate::language::ExprLang;

/// Returns trigonometric rewrite rules.
#[must_use]
pub fn rules() -> Vec<Rewrite<ExprLang, ()>> {
    vec![
        // Pythagorean identities
        rewrite!("pythag"; "(+ (^ (sin ?x) 2) (^ (cos ?x) 2))" => "1"),
        rewrite!("pythag-tan"; "(+ 1 (^ (tan ?x) 2))" => "(^ (cos ?x) -2)"),
        rewrite!("pythag-hyp"; "(+ (^ (cosh ?x) 2) (* -1 (^ (sinh ?x) 2)))" => "1"),
        rewrite!("pythag-tanh"; "(+ 1 (* -1 (^ (tanh ?x) 2)))" => "(^ (cosh ?x) -2)"),

        // Quotient forms
        rewrite!("tan-def"; "(tan ?x)" => "(* (sin ?x) (^ (cos ?x) -1))"),
        rewrite!("tan-fold"; "(* (sin ?x) (^ (cos ?x) -1))" => "(tan ?x)"),
        rewrite!("tanh-fold"; "(* (sinh ?x) (^ (cosh ?x) -1))" => "(tanh ?x)"),

        // Parity
        rewrite!("sin-neg"; "(sin (* -1 ?x))" => "(* -1 (sin ?x))"),
        rewrite!("cos-neg"; "(cos (* -1 ?x))" => "(cos ?x)"),
        rewrite!("tan-neg"; "(tan (* -1 ?x))" => "(* -1 (tan ?x))"),
        rewrite!("sinh-neg"; "(sinh (* -1 ?x))" => "(* -1 (sinh ?x))"),
        rewrite!("cosh-neg"; "(cosh (* -1 ?x))" => "(cosh ?x)"),

        // Double angle
        rewrite!("sin-double"; "(* 2 (* (sin ?x) (cos ?x)))" => "(sin (* 2 ?x))"),

        // Inverse function compositions
        rewrite!("sin-asin"; "(sin (asin ?x))" => "?x"),
        rewrite!("cos-acos"; "(cos (acos ?x))" => "?x"),
        rewrite!("tan-atan"; "(tan (atan ?x))" => "?x"),
    ]
}
