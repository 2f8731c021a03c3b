//! Branching variable selection.

use super::node::{BoundChange, SearchNode};
use crate::model::MipProblem;

/// A branching decision: one fractional variable split into two children.
#[derive(Debug, Clone)]
pub struct BranchDecision {
    /// Variable to branch on.
    pub var: usize,

    /// Current (fractional) relaxation value.
    pub value: f64,

    /// Bound change for the "down" child (x <= floor(value)).
    pub down: BoundChange,

    /// Bound change for the "up" child (x >= ceil(value)).
    pub up: BoundChange,

    /// Fractionality of the chosen variable (for logging).
    pub score: f64,
}

/// Selects the branching variable.
///
/// Rule: most fractional first (fractionality closest to 0.5), ties broken
/// by the lowest variable index. Together with the LIFO node stack this
/// makes the search order fully deterministic.
#[derive(Debug, Default)]
pub struct BranchingSelector;

impl BranchingSelector {
    /// Create a selector.
    pub fn new() -> Self {
        Self
    }

    /// Pick a branching variable at a relaxation point.
    ///
    /// Returns None if the point is integer-feasible within `tol`.
    pub fn select(
        &self,
        x: &[f64],
        node: &SearchNode,
        prob: &MipProblem,
        tol: f64,
    ) -> Option<BranchDecision> {
        let fractional = prob.fractional_vars(x, tol);

        // Candidates come in increasing index order, so keeping only
        // strict improvements breaks ties toward the lowest index.
        let mut best: Option<(usize, f64, f64)> = None;
        for &(var, value, frac) in &fractional {
            if best.map_or(true, |(_, _, best_frac)| frac > best_frac) {
                best = Some((var, value, frac));
            }
        }

        let (var, value, frac) = best?;
        Some(BranchDecision {
            var,
            value,
            down: BoundChange::down_branch(var, node.var_lb[var], value),
            up: BoundChange::up_branch(var, value, node.var_ub[var]),
            score: frac,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_core::{Model, Sense};

    fn problem_and_root() -> (MipProblem, SearchNode) {
        let mut model = Model::new();
        let a = model.add_binary("a").unwrap();
        let b = model.add_binary("b").unwrap();
        let c = model.add_integer(0.0, 10.0, "c").unwrap();
        model.set_objective(Sense::Minimize, a + b + c);
        let prob = MipProblem::snapshot(&model);
        let root = SearchNode::root(&prob);
        (prob, root)
    }

    #[test]
    fn test_most_fractional_selected() {
        let (prob, root) = problem_and_root();
        let selector = BranchingSelector::new();

        // Fractionalities: a = 0.1, b = 0.4, c = 0.2.
        let x = vec![0.1, 0.4, 3.2];
        let decision = selector.select(&x, &root, &prob, 1e-6).unwrap();
        assert_eq!(decision.var, 1);
        assert_eq!(decision.value, 0.4);
    }

    #[test]
    fn test_tie_breaks_to_lowest_index() {
        let (prob, root) = problem_and_root();
        let selector = BranchingSelector::new();

        // a and b both have fractionality 0.3.
        let x = vec![0.3, 0.7, 5.0];
        let decision = selector.select(&x, &root, &prob, 1e-6).unwrap();
        assert_eq!(decision.var, 0);
    }

    #[test]
    fn test_integer_feasible_returns_none() {
        let (prob, root) = problem_and_root();
        let selector = BranchingSelector::new();

        let x = vec![1.0, 0.0, 7.0];
        assert!(selector.select(&x, &root, &prob, 1e-6).is_none());
    }

    #[test]
    fn test_branch_bounds_from_node() {
        let (prob, root) = problem_and_root();
        let selector = BranchingSelector::new();

        let x = vec![0.0, 0.0, 4.5];
        let decision = selector.select(&x, &root, &prob, 1e-6).unwrap();
        assert_eq!(decision.var, 2);

        // Down child: c in [0, 4]; up child: c in [5, 10].
        assert_eq!(decision.down.lb, 0.0);
        assert_eq!(decision.down.ub, 4.0);
        assert_eq!(decision.up.lb, 5.0);
        assert_eq!(decision.up.ub, 10.0);
    }
}
