//! lp-mip: branch-and-bound mixed-integer solver over `lp-core`.
//!
//! Explores integer-feasible solutions by branching on fractional integer
//! variables of LP relaxations solved by `lp_core::simplex`, pruning
//! subtrees whose relaxed bound cannot beat the best known solution. The
//! search is deterministic: depth-first node order (down branch first),
//! most-fractional branching with lowest-index tie-breaks, and a
//! Bland's-rule simplex underneath.
//!
//! Solve outcomes are statuses on the returned [`Solution`], never panics
//! or errors: `Optimal`, `Infeasible`, `Unbounded`, or one of the limit
//! statuses (node budget, time budget, relaxation iteration cap,
//! cooperative cancellation) carrying the best incumbent found so far.
//!
//! # Example
//!
//! ```
//! use lp_core::{Model, Sense};
//! use lp_mip::{solve, MipSettings};
//!
//! // max 3a + 4b  s.t.  2a + 3b <= 5,  a, b binary
//! let mut model = Model::new();
//! let a = model.add_binary("a").unwrap();
//! let b = model.add_binary("b").unwrap();
//! model.add_constraint((2.0 * a + 3.0 * b).leq(5.0));
//! model.set_objective(Sense::Maximize, 3.0 * a + 4.0 * b);
//!
//! let sol = solve(&model, &MipSettings::default());
//! assert!(sol.status.is_optimal());
//! assert!((sol.objective - 7.0).abs() < 1e-6);
//! ```

#![warn(missing_docs)]

pub mod model;
pub mod search;
pub mod settings;

pub use lp_core::{Solution, SolveStatus};
pub use model::{IncumbentTracker, MipProblem};
pub use search::{
    BoundChange, BranchAndBound, BranchDecision, BranchingSelector, NodeStack, SearchNode,
};
pub use settings::MipSettings;

use lp_core::simplex::solve_with_bounds;
use lp_core::{LpStatus, Model};

/// Solve a model to integer optimality by branch-and-bound.
///
/// Operates on a copy-on-solve snapshot of the model's bounds and
/// integrality, so the model may be mutated freely once this returns
/// (objective swaps, bound tightening for Pareto sweeps) and re-solved.
/// A model without integer variables reduces to a single relaxation
/// solve and returns the simplex result unchanged.
pub fn solve(model: &Model, settings: &MipSettings) -> Solution {
    let prob = MipProblem::snapshot(model);
    let mut tree = BranchAndBound::new(settings.clone());
    tree.initialize(&prob);

    let status = loop {
        if let Some(status) = tree.check_termination() {
            break status;
        }

        // check_termination() fires on an empty stack, so a missing node
        // just loops back into it.
        let Some(node) = tree.next_node() else {
            continue;
        };

        // The incumbent may have improved since this node was pushed.
        if node.can_prune(tree.incumbent.obj_val) {
            tree.node_pruned();
            continue;
        }

        let lp = solve_with_bounds(model, &node.var_lb, &node.var_ub, &settings.simplex);
        tree.node_explored();

        match lp.status {
            LpStatus::Infeasible => {
                tree.node_pruned();
            }
            LpStatus::Unbounded => {
                // An unbounded relaxation admits no finite bound anywhere in
                // this subtree; report the whole problem unbounded.
                break SolveStatus::Unbounded;
            }
            LpStatus::IterationLimit => {
                break SolveStatus::IterationLimit;
            }
            LpStatus::Optimal => {
                let bound = prob.to_min(lp.obj);
                if bound >= tree.incumbent.obj_val - 1e-9 {
                    tree.node_pruned();
                } else if let Some(decision) = tree.select_branching(&lp.x, &node, &prob) {
                    tree.branch(&node, &decision, bound);
                } else {
                    // Integer feasible: round exactly and recompute the
                    // objective so the stored value matches the rounded point.
                    let mut x = lp.x;
                    prob.round_integers(&mut x);
                    let obj = prob.to_min(model.objective().expr.evaluate(&x));
                    tree.update_incumbent(&x, obj);
                }
            }
        }

        tree.log_progress();
    };

    tree.finalize(status, model, &prob)
}
