//! Branch-and-bound tree controller.

use std::sync::atomic::Ordering;
use std::time::Instant;

use lp_core::{relative_gap, Model, Solution, SolveStatus};

use super::branching::{BranchDecision, BranchingSelector};
use super::node::SearchNode;
use super::stack::NodeStack;
use crate::model::{IncumbentTracker, MipProblem};
use crate::settings::MipSettings;

/// Branch-and-bound controller.
///
/// Owns the pending-node stack, the incumbent, the counters and the
/// termination checks; the solve driver in the crate root feeds it
/// relaxation results.
pub struct BranchAndBound {
    /// Pending nodes (depth-first).
    stack: NodeStack,

    /// Branching variable selector.
    branching: BranchingSelector,

    /// Incumbent solution tracker (minimize space).
    pub incumbent: IncumbentTracker,

    /// Next node ID to assign (0 is the root).
    next_node_id: u64,

    /// Nodes explored (relaxations solved).
    nodes_explored: u64,

    /// Nodes pruned without branching.
    nodes_pruned: u64,

    /// Solve start time.
    start_time: Instant,

    /// Settings.
    settings: MipSettings,
}

impl BranchAndBound {
    /// Create a controller and start the clock.
    pub fn new(settings: MipSettings) -> Self {
        Self {
            stack: NodeStack::new(),
            branching: BranchingSelector::new(),
            incumbent: IncumbentTracker::new(),
            next_node_id: 1,
            nodes_explored: 0,
            nodes_pruned: 0,
            start_time: Instant::now(),
            settings,
        }
    }

    /// Push the root node.
    pub fn initialize(&mut self, prob: &MipProblem) {
        self.stack.push(SearchNode::root(prob));
    }

    /// Pop the next node to process.
    pub fn next_node(&mut self) -> Option<SearchNode> {
        self.stack.pop()
    }

    /// Record a solved relaxation.
    pub fn node_explored(&mut self) {
        self.nodes_explored += 1;
    }

    /// Record a pruned node.
    pub fn node_pruned(&mut self) {
        self.nodes_pruned += 1;
    }

    /// Select a branching variable at a relaxation point.
    pub fn select_branching(
        &self,
        x: &[f64],
        node: &SearchNode,
        prob: &MipProblem,
    ) -> Option<BranchDecision> {
        self.branching
            .select(x, node, prob, self.settings.int_feas_tol)
    }

    /// Expand a node into its children and push the viable ones.
    ///
    /// The up child is pushed first so the down branch is explored first.
    /// Children whose bounds cross are discarded without an LP solve.
    pub fn branch(&mut self, parent: &SearchNode, decision: &BranchDecision, parent_bound: f64) {
        for change in [&decision.up, &decision.down] {
            if change.is_infeasible() {
                self.nodes_pruned += 1;
                continue;
            }
            let id = self.next_node_id;
            self.next_node_id += 1;
            self.stack.push(parent.child(id, change, parent_bound));
        }
    }

    /// Install an improving incumbent and prune dominated pending nodes.
    ///
    /// Returns true if the incumbent changed.
    pub fn update_incumbent(&mut self, x: &[f64], obj: f64) -> bool {
        let improved = self.incumbent.update(x, obj);
        if improved {
            let pruned = self.stack.prune_by_bound(obj);
            self.nodes_pruned += pruned as u64;
            if self.settings.verbose {
                log::info!("new incumbent: obj={obj:.6e}, pruned {pruned} pending nodes");
            }
        }
        improved
    }

    /// Best dual bound over the remaining search (minimize space).
    pub fn best_bound(&self) -> f64 {
        self.stack.best_bound().min(self.incumbent.obj_val)
    }

    /// Current relative gap.
    pub fn gap(&self) -> f64 {
        self.incumbent.gap(self.best_bound())
    }

    /// Elapsed solve time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    /// Check the termination conditions.
    ///
    /// Returns Some(status) when the search must stop.
    pub fn check_termination(&self) -> Option<SolveStatus> {
        if let Some(ref flag) = self.settings.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(SolveStatus::Interrupted);
            }
        }

        if let Some(limit) = self.settings.time_limit_ms {
            if self.elapsed_ms() >= limit {
                return Some(SolveStatus::TimeLimit);
            }
        }

        if self.nodes_explored >= self.settings.max_nodes {
            return Some(SolveStatus::NodeLimit);
        }

        if self.stack.is_empty() {
            return Some(if self.incumbent.has_incumbent() {
                SolveStatus::Optimal
            } else {
                SolveStatus::Infeasible
            });
        }

        None
    }

    /// Emit a progress line when verbose.
    pub fn log_progress(&self) {
        if !self.settings.verbose || self.nodes_explored % self.settings.log_freq != 0 {
            return;
        }
        log::info!(
            "nodes: {} ({} open) | bound: {:.6e} | incumbent: {:.6e} | gap: {:.2}% | time: {:.1}s",
            self.nodes_explored,
            self.stack.len(),
            self.best_bound(),
            self.incumbent.obj_val,
            self.gap() * 100.0,
            self.elapsed_ms() as f64 / 1000.0,
        );
    }

    /// Assemble the final solution.
    ///
    /// The stored objective is recomputed from the model's objective
    /// expression over the (integer-rounded) incumbent, so evaluating the
    /// objective against the returned solution reproduces it exactly.
    pub fn finalize(&self, status: SolveStatus, model: &Model, prob: &MipProblem) -> Solution {
        let values = self.incumbent.solution.clone().unwrap_or_default();

        let objective = if values.is_empty() {
            match prob.sense {
                lp_core::Sense::Minimize => f64::INFINITY,
                lp_core::Sense::Maximize => f64::NEG_INFINITY,
            }
        } else {
            model.objective().expr.evaluate(&values)
        };

        let bound_min = if status == SolveStatus::Optimal && self.incumbent.has_incumbent() {
            self.incumbent.obj_val
        } else {
            self.best_bound()
        };

        Solution {
            status,
            values,
            objective,
            best_bound: prob.from_min(bound_min),
            gap: relative_gap(self.incumbent.obj_val, bound_min),
            nodes_explored: self.nodes_explored,
            solve_time_ms: self.elapsed_ms(),
            incumbent_updates: self.incumbent.update_count,
            revision: model.revision(),
        }
    }

    /// Nodes pruned so far.
    pub fn nodes_pruned(&self) -> u64 {
        self.nodes_pruned
    }

    /// Nodes explored so far.
    pub fn nodes_explored(&self) -> u64 {
        self.nodes_explored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_core::{Model, Sense};
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    fn toy_problem() -> (Model, MipProblem) {
        let mut model = Model::new();
        let x = model.add_integer(0.0, 5.0, "x").unwrap();
        model.set_objective(Sense::Minimize, 1.0 * x);
        let prob = MipProblem::snapshot(&model);
        (model, prob)
    }

    #[test]
    fn test_initialize_pushes_root() {
        let (_, prob) = toy_problem();
        let mut tree = BranchAndBound::new(MipSettings::default());
        tree.initialize(&prob);

        assert!(tree.next_node().is_some());
        assert!(tree.next_node().is_none());
    }

    #[test]
    fn test_incumbent_prunes_stack(){
        let (_, prob) = toy_problem();
        let mut tree = BranchAndBound::new(MipSettings::default());
        tree.initialize(&prob);

        // Leave a dominated node pending.
        let mut dominated = SearchNode::root(&prob);
        dominated.id = 1;
        dominated.bound = 50.0;
        let mut tight = SearchNode::root(&prob);
        tight.id = 2;
        tight.bound = 1.0;
        tree.stack.push(dominated);
        tree.stack.push(tight);

        assert!(tree.update_incumbent(&[3.0], 3.0));
        // The bound-50 node is gone, the bound-1 node survives.
        assert_eq!(tree.stack.len(), 2); // root + tight
        assert!(!tree.update_incumbent(&[4.0], 4.0));
    }

    #[test]
    fn test_termination_empty_stack() {
        let (_, prob) = toy_problem();
        let mut tree = BranchAndBound::new(MipSettings::default());
        tree.initialize(&prob);

        // Nothing explored yet: no termination while the root is pending.
        assert_eq!(tree.check_termination(), None);

        tree.next_node();
        // Empty stack, no incumbent: proven infeasible.
        assert_eq!(tree.check_termination(), Some(SolveStatus::Infeasible));

        tree.update_incumbent(&[2.0], 2.0);
        assert_eq!(tree.check_termination(), Some(SolveStatus::Optimal));
    }

    #[test]
    fn test_termination_node_limit() {
        let (_, prob) = toy_problem();
        let settings = MipSettings::default().with_max_nodes(1);
        let mut tree = BranchAndBound::new(settings);
        tree.initialize(&prob);

        tree.node_explored();
        assert_eq!(tree.check_termination(), Some(SolveStatus::NodeLimit));
    }

    #[test]
    fn test_termination_cancellation() {
        let (_, prob) = toy_problem();
        let flag = Arc::new(AtomicBool::new(false));
        let settings = MipSettings::default().with_cancel_flag(flag.clone());
        let mut tree = BranchAndBound::new(settings);
        tree.initialize(&prob);

        assert_eq!(tree.check_termination(), None);
        flag.store(true, Ordering::Relaxed);
        assert_eq!(tree.check_termination(), Some(SolveStatus::Interrupted));
    }

    #[test]
    fn test_finalize_roundtrip_objective() {
        let (model, prob) = toy_problem();
        let mut tree = BranchAndBound::new(MipSettings::default());
        tree.initialize(&prob);
        tree.next_node();
        tree.update_incumbent(&[2.0], 2.0);

        let sol = tree.finalize(SolveStatus::Optimal, &model, &prob);
        assert_eq!(sol.status, SolveStatus::Optimal);
        assert_eq!(sol.values, vec![2.0]);
        assert_eq!(sol.objective, 2.0);
        assert_eq!(model.eval(&model.objective().expr.clone(), &sol).unwrap(), 2.0);
        assert!(sol.gap < 1e-12);
    }
}
