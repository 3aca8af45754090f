//! Basic algebraic simplification rules.

use egg::{rewrite, Rewrite};

use crate::language::ExprLang;

/// Returns basic arithmetic rewrite rules.
#[must_use]
pub fn rules() -> Vec<Rewrite<ExprLang, ()>> {
    vec![
        // Additive identity
        rewrite!("add-zero"; "(+ ?a 0)" => "?a"),

        // Multiplicative identity and zero
        rewrite!("mul-one"; "(* ?a 1)" => "?a"),
        rewrite!("mul-zero"; "(* ?a 0)" => "0"),

        // Negation and subtraction in the arena's spelling
        rewrite!("neg-to-mul"; "(neg ?a)" => "(* -1 ?a)"),
        rewrite!("sub-to-add"; "(- ?a ?b)" => "(+ ?a (* -1 ?b))"),
        rewrite!("add-inverse"; "(+ ?a (* -1 ?a))" => "0"),

        // Commutativity
        rewrite!("add-comm"; "(+ ?a ?b)" => "(+ ?b ?a)"),
        rewrite!("mul-comm"; "(* ?a ?b)" => "(* ?b ?a)"),

        // Associativity
        rewrite!("add-assoc-l"; "(+ (+ ?a ?b) ?c)" => "(+ ?a (+ ?b ?c))"),
        rewrite!("add-assoc-r"; "(+ ?a (+ ?b ?c))" => "(+ (+ ?a ?b) ?c)"),
        rewrite!("mul-assoc-l"; "(* (* ?a ?b) ?c)" => "(* ?a (* ?b ?c))"),
        rewrite!("mul-assoc-r"; "(* ?a (* ?b ?c))" => "(* (* ?a ?b) ?c)"),

        // Distributivity and factoring
        rewrite!("dist"; "(* ?a (+ ?b ?c))" => "(+ (* ?a ?b) (* ?a ?c))"),
        rewrite!("factor"; "(+ (* ?a ?b) (* ?a ?c))" => "(* ?a (+ ?b ?c))"),

        // Powers
        rewrite!("pow-zero"; "(^ ?a 0)" => "1"),
        rewrite!("pow-one"; "(^ ?a 1)" => "?a"),
        rewrite!("pow-neg-one"; "(^ ?a -1)" => "(/ 1 ?a)"),
        rewrite!("div-to-pow"; "(/ ?a ?b)" => "(* ?a (^ ?b -1))"),
        rewrite!("mul-pow"; "(* (^ ?a ?m) (^ ?a ?n))" => "(^ ?a (+ ?m ?n))"),

        // Collecting equal operands
        rewrite!("add-same"; "(+ ?a ?a)" => "(* 2 ?a)"),
        rewrite!("mul-same"; "(* ?a ?a)" => "(^ ?a 2)"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use egg::Runner;

    fn best(start: &str) -> String {
        let rules = rules();
        let start = start.parse().unwrap();
        let runner = Runner::default()
            .with_expr(&start)
            .with_iter_limit(8)
            .run(&rules);
        let extractor = egg::Extractor::new(&runner.egraph, egg::AstSize);
        let (_, best) = extractor.find_best(runner.roots[0]);
        best.to_string()
    }

    #[test]
    fn test_add_zero() {
        assert_eq!(best("(+ 0 x)"), "x");
    }

    #[test]
    fn test_mul_zero() {
        assert_eq!(best("(* 0 x)"), "0");
    }

    #[test]
    fn test_cancellation() {
        assert_eq!(best("(- (* x y) (* x y))"), "0");
    }
}
