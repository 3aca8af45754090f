//! The expression language for egg-based simplification.
//!
//! Arena sums and products are n-ary; here they are binary and nested to
//! the right. Named constants travel as the symbols `pi` and `E`.

use dtransform_integers::Rational;
use egg::{define_language, Id, Symbol};

define_language! {
    /// The symbolic expression language seen by the e-graph.
    pub enum ExprLang {
        // Exact literals
        Num(Rational),
        // Variables and named constants
        Symbol(Symbol),

        // Basic arithmetic
        "+" = Add([Id; 2]),
        "-" = Sub([Id; 2]),
        "*" = Mul([Id; 2]),
        "/" = Div([Id; 2]),
        "neg" = Neg(Id),
        "^" = Pow([Id; 2]),

        // Trigonometric functions
        "sin" = Sin(Id),
        "cos" = Cos(Id),
        "tan" = Tan(Id),
        "asin" = Asin(Id),
        "acos" = Acos(Id),
        "atan" = Atan(Id),

        // Exponential and logarithmic
        "exp" = Exp(Id),
        "ln" = Ln(Id),

        // Hyperbolic functions
        "sinh" = Sinh(Id),
        "cosh" = Cosh(Id),
        "tanh" = Tanh(Id),
    }
}

impl ExprLang {
    /// Returns true for function applications.
    #[must_use]
    pub fn is_function(&self) -> bool {
        matches!(
            self,
            ExprLang::Sin(_)
                | ExprLang::Cos(_)
                | ExprLang::Tan(_)
                | ExprLang::Asin(_)
                | ExprLang::Acos(_)
                | ExprLang::Atan(_)
                | ExprLang::Exp(_)
                | ExprLang::Ln(_)
                | ExprLang::Sinh(_)
                | ExprLang::Cosh(_)
                | ExprLang::Tanh(_)
        )
    }
}
