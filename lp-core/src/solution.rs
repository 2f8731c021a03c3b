//! Solve statuses and the solution container.

use std::fmt;
use std::ops::Index;

use crate::model::Variable;

/// Outcome of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Optimal solution found within tolerance.
    Optimal,

    /// Problem proven infeasible.
    Infeasible,

    /// Problem proven unbounded.
    Unbounded,

    /// Node budget exhausted; best solution found so far returned.
    NodeLimit,

    /// Time budget exhausted; best solution found so far returned.
    TimeLimit,

    /// Relaxation solver hit its iteration cap; best solution so far returned.
    IterationLimit,

    /// Cooperative cancellation was requested.
    Interrupted,
}

impl SolveStatus {
    /// True if optimality was proven.
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }

    /// True if the solve stopped at a resource limit or cancellation,
    /// as opposed to a proven infeasible/unbounded/optimal outcome.
    pub fn is_limit(&self) -> bool {
        matches!(
            self,
            SolveStatus::NodeLimit
                | SolveStatus::TimeLimit
                | SolveStatus::IterationLimit
                | SolveStatus::Interrupted
        )
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::Unbounded => write!(f, "Unbounded"),
            SolveStatus::NodeLimit => write!(f, "NodeLimit"),
            SolveStatus::TimeLimit => write!(f, "TimeLimit"),
            SolveStatus::IterationLimit => write!(f, "IterationLimit"),
            SolveStatus::Interrupted => write!(f, "Interrupted"),
        }
    }
}

/// Solution returned by a solve, with diagnostics.
///
/// Superseded entirely by the next solve of the same model; the stored
/// revision ties it to the model state it was produced against.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Solve status.
    pub status: SolveStatus,

    /// Per-variable values in declaration order (empty if no solution).
    pub values: Vec<f64>,

    /// Achieved objective value in the model's sense.
    pub objective: f64,

    /// Best bound on the optimal objective proven during the solve,
    /// in the model's sense.
    pub best_bound: f64,

    /// Relative gap between objective and best bound.
    pub gap: f64,

    /// Branch-and-bound nodes explored (0 for pure relaxation solves).
    pub nodes_explored: u64,

    /// Total solve time in milliseconds.
    pub solve_time_ms: u64,

    /// Number of incumbent improvements during the solve.
    pub incumbent_updates: u64,

    /// Model revision this solution was produced against.
    pub revision: u64,
}

impl Default for Solution {
    fn default() -> Self {
        Self {
            status: SolveStatus::Infeasible,
            values: Vec::new(),
            objective: f64::INFINITY,
            best_bound: f64::NEG_INFINITY,
            gap: f64::INFINITY,
            nodes_explored: 0,
            solve_time_ms: 0,
            incumbent_updates: 0,
            revision: 0,
        }
    }
}

impl Solution {
    /// True if the solution carries variable values.
    pub fn has_solution(&self) -> bool {
        !self.values.is_empty()
    }

    /// Value of a variable. Panics if the solution carries no values.
    pub fn value(&self, var: Variable) -> f64 {
        self.values[var.idx()]
    }

    /// Value of a variable, or `None` if the solution carries no values.
    pub fn get(&self, var: Variable) -> Option<f64> {
        self.values.get(var.idx()).copied()
    }

    /// Iterate over values in variable declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (Variable::new(i), v))
    }
}

impl Index<Variable> for Solution {
    type Output = f64;

    fn index(&self, var: Variable) -> &f64 {
        &self.values[var.idx()]
    }
}

/// Relative gap between a primal objective and a dual bound.
pub fn relative_gap(primal: f64, bound: f64) -> f64 {
    if primal.is_infinite() || bound.is_infinite() {
        return f64::INFINITY;
    }
    let denom = primal.abs().max(1e-10);
    (primal - bound).abs() / denom
}
