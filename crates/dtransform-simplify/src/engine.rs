//! The main simplification engine.
//!
//! This module provides the high-level API for simplifying expressions
//! using equality saturation.

use std::time::Duration;

use dtransform_core::{ExprArena, ExprHandle};
use egg::{Extractor, RecExpr, Rewrite, Runner};
use tracing::trace;

use crate::convert::{dag_size, lower, raise};
use crate::cost::WeightedSize;
use crate::language::ExprLang;
use crate::rules;

/// Configuration for the simplification engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimplifierConfig {
    /// Maximum number of iterations.
    pub iter_limit: usize,
    /// Maximum number of nodes in the e-graph.
    pub node_limit: usize,
    /// Time limit in seconds.
    pub time_limit_secs: u64,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self {
            iter_limit: 12,
            node_limit: 10_000,
            time_limit_secs: 5,
        }
    }
}

/// The main simplification engine.
#[derive(Clone)]
pub struct Simplifier {
    /// Configuration.
    config: SimplifierConfig,
    /// Rewrite rules.
    rules: Vec<Rewrite<ExprLang, ()>>,
}

impl Default for Simplifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Simplifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simplifier")
            .field("config", &self.config)
            .field("rules", &self.rules.len())
            .finish()
    }
}

impl Simplifier {
    /// Creates a new simplifier with default rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SimplifierConfig::default())
    }

    /// Creates a simplifier with custom configuration.
    #[must_use]
    pub fn with_config(config: SimplifierConfig) -> Self {
        Self {
            config,
            rules: rules::all_rules(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &SimplifierConfig {
        &self.config
    }

    /// Simplifies and returns both the result and statistics.
    #[must_use]
    pub fn simplify_with_stats(
        &self,
        expr: &RecExpr<ExprLang>,
    ) -> (RecExpr<ExprLang>, SimplificationStats) {
        let runner = Runner::default()
            .with_expr(expr)
            .with_iter_limit(self.config.iter_limit)
            .with_node_limit(self.config.node_limit)
            .with_time_limit(Duration::from_secs(self.config.time_limit_secs))
            .run(&self.rules);

        let stats = SimplificationStats {
            iterations: runner.iterations.len(),
            egraph_nodes: runner.egraph.total_number_of_nodes(),
            egraph_classes: runner.egraph.number_of_classes(),
            stop_reason: format!("{:?}", runner.stop_reason),
        };

        let extractor = Extractor::new(&runner.egraph, WeightedSize);
        let (_, best) = extractor.find_best(runner.roots[0]);

        (best, stats)
    }

    /// Simplifies an arena expression in place.
    ///
    /// The result is raised back through the arena's canonical
    /// constructors and kept only if it is smaller than `expr`.
    pub fn simplify_expr(&self, arena: &mut ExprArena, expr: ExprHandle) -> ExprHandle {
        if arena.get(expr).is_atom() {
            return expr;
        }

        let (best, stats) = self.simplify_with_stats(&lower(arena, expr));
        trace!(
            iterations = stats.iterations,
            nodes = stats.egraph_nodes,
            classes = stats.egraph_classes,
            stop = %stats.stop_reason,
            "simplifier run"
        );

        match raise(arena, &best) {
            Some(candidate) if dag_size(arena, candidate) < dag_size(arena, expr) => candidate,
            _ => expr,
        }
    }
}

/// Statistics about the simplification process.
#[derive(Clone, Debug)]
pub struct SimplificationStats {
    /// Number of iterations run.
    pub iterations: usize,
    /// Total nodes in the e-graph.
    pub egraph_nodes: usize,
    /// Number of equivalence classes.
    pub egraph_classes: usize,
    /// Reason the runner stopped.
    pub stop_reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(simplifier: &Simplifier, text: &str) -> String {
        let expr: RecExpr<ExprLang> = text.parse().unwrap();
        simplifier.simplify_with_stats(&expr).0.to_string()
    }

    #[test]
    fn test_simplify_basic() {
        let simplifier = Simplifier::new();

        assert_eq!(run(&simplifier, "(+ x 0)"), "x");
        assert_eq!(run(&simplifier, "(* x 1)"), "x");
        assert_eq!(run(&simplifier, "(* x 0)"), "0");
    }

    #[test]
    fn test_simplify_trig() {
        let simplifier = Simplifier::new();
        assert_eq!(run(&simplifier, "(+ (^ (sin x) 2) (^ (cos x) 2))"), "1");

        let expr: RecExpr<ExprLang> = "(ln (exp x))".parse().unwrap();
        let (best, stats) = simplifier.simplify_with_stats(&expr);
        assert_eq!(best.to_string(), "x");
        assert!(stats.iterations >= 1);
    }

    #[test]
    fn test_simplify_arena_expression() {
        let simplifier = Simplifier::new();
        let mut arena = ExprArena::new();

        let expr = arena.parse("sin(x)^2 + cos(x)^2 + y").unwrap();
        let simplified = simplifier.simplify_expr(&mut arena, expr);
        let expected = arena.parse("1 + y").unwrap();
        assert_eq!(simplified, expected);

        let expr = arena.parse("ln(exp(x))").unwrap();
        let x = arena.symbol("x");
        assert_eq!(simplifier.simplify_expr(&mut arena, expr), x);
    }

    #[test]
    fn test_never_grows() {
        let simplifier = Simplifier::new();
        let mut arena = ExprArena::new();
        let expr = arena.parse("1 + x*y").unwrap();
        assert_eq!(simplifier.simplify_expr(&mut arena, expr), expr);
    }

    #[test]
    fn test_custom_config() {
        let config = SimplifierConfig {
            iter_limit: 1,
            node_limit: 100,
            time_limit_secs: 1,
        };
        let simplifier = Simplifier::with_config(config.clone());
        assert_eq!(simplifier.config(), &config);
        assert_eq!(run(&simplifier, "(+ x 0)"), "x");
    }
}
