//! Search node representation.

use crate::model::MipProblem;

/// A variable's bounds in a child node after branching.
#[derive(Debug, Clone, Copy)]
pub struct BoundChange {
    /// Variable index.
    pub var: usize,

    /// Child lower bound.
    pub lb: f64,

    /// Child upper bound.
    pub ub: f64,
}

impl BoundChange {
    /// "Down" branch: x <= floor(value), lower bound unchanged.
    pub fn down_branch(var: usize, old_lb: f64, value: f64) -> Self {
        Self {
            var,
            lb: old_lb,
            ub: value.floor(),
        }
    }

    /// "Up" branch: x >= ceil(value), upper bound unchanged.
    pub fn up_branch(var: usize, value: f64, old_ub: f64) -> Self {
        Self {
            var,
            lb: value.ceil(),
            ub: old_ub,
        }
    }

    /// True if the change leaves an empty domain.
    pub fn is_infeasible(&self) -> bool {
        self.lb > self.ub + 1e-9
    }
}

/// A node in the branch-and-bound tree.
///
/// Owns its complete bound vectors; the relaxation is re-solved from
/// scratch against them, so nodes are independent of each other once
/// created. Nodes never escape the engine.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Unique node identifier (0 for the root).
    pub id: u64,

    /// Depth in the tree (0 for the root).
    pub depth: usize,

    /// Lower bounds for all variables at this node.
    pub var_lb: Vec<f64>,

    /// Upper bounds for all variables at this node.
    pub var_ub: Vec<f64>,

    /// Dual bound inherited from the parent relaxation (minimize space).
    pub bound: f64,
}

impl SearchNode {
    /// Create the root node from the problem snapshot.
    pub fn root(prob: &MipProblem) -> Self {
        Self {
            id: 0,
            depth: 0,
            var_lb: prob.var_lb.clone(),
            var_ub: prob.var_ub.clone(),
            bound: f64::NEG_INFINITY,
        }
    }

    /// Create a child with one variable's bounds replaced.
    pub fn child(&self, id: u64, change: &BoundChange, bound: f64) -> Self {
        let mut var_lb = self.var_lb.clone();
        let mut var_ub = self.var_ub.clone();
        var_lb[change.var] = change.lb;
        var_ub[change.var] = change.ub;
        Self {
            id,
            depth: self.depth + 1,
            var_lb,
            var_ub,
            bound,
        }
    }

    /// True if the node cannot contain a solution better than the incumbent.
    pub fn can_prune(&self, incumbent_obj: f64) -> bool {
        self.bound >= incumbent_obj - 1e-9
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_core::{Model, Sense};

    fn two_var_problem() -> MipProblem {
        let mut model = Model::new();
        let x = model.add_integer(0.0, 5.0, "x").unwrap();
        let y = model.add_integer(0.0, 5.0, "y").unwrap();
        model.set_objective(Sense::Minimize, x + y);
        MipProblem::snapshot(&model)
    }

    #[test]
    fn test_root_node() {
        let prob = two_var_problem();
        let root = SearchNode::root(&prob);

        assert_eq!(root.id, 0);
        assert_eq!(root.depth, 0);
        assert_eq!(root.var_lb, vec![0.0, 0.0]);
        assert_eq!(root.var_ub, vec![5.0, 5.0]);
        assert!(root.bound.is_infinite());
    }

    #[test]
    fn test_branch_bounds() {
        // Down branch on x = 2.7: x <= 2.
        let down = BoundChange::down_branch(0, 0.0, 2.7);
        assert_eq!(down.lb, 0.0);
        assert_eq!(down.ub, 2.0);
        assert!(!down.is_infeasible());

        // Up branch on x = 2.7: x >= 3.
        let up = BoundChange::up_branch(0, 2.7, 5.0);
        assert_eq!(up.lb, 3.0);
        assert_eq!(up.ub, 5.0);
        assert!(!up.is_infeasible());

        // Down branch below the current lower bound is an empty domain.
        let bad = BoundChange::down_branch(0, 3.0, 2.7);
        assert!(bad.is_infeasible());
    }

    #[test]
    fn test_child_inherits_and_tightens() {
        let prob = two_var_problem();
        let root = SearchNode::root(&prob);
        let change = BoundChange::up_branch(1, 1.5, 5.0);
        let child = root.child(7, &change, 4.0);

        assert_eq!(child.id, 7);
        assert_eq!(child.depth, 1);
        assert_eq!(child.var_lb, vec![0.0, 2.0]);
        assert_eq!(child.var_ub, vec![5.0, 5.0]);
        assert_eq!(child.bound, 4.0);
        // Parent untouched.
        assert_eq!(root.var_lb, vec![0.0, 0.0]);
    }

    #[test]
    fn test_pruning() {
        let prob = two_var_problem();
        let mut node = SearchNode::root(&prob);
        node.bound = 10.0;

        assert!(!node.can_prune(15.0));
        assert!(node.can_prune(10.0));
        assert!(node.can_prune(8.0));
    }
}
