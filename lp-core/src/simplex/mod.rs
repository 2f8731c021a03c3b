//! LP relaxation solver.
//!
//! Solves the continuous relaxation of a model (integrality ignored) with
//! a two-phase primal simplex. The solver is deterministic: identical
//! models and bound vectors produce identical vertices, which the
//! branch-and-bound layer relies on. Each call re-solves from scratch, so
//! callers may pass per-node bound overrides freely.

mod standard_form;
mod tableau;

use crate::model::Model;
use standard_form::BuildOutcome;
use tableau::TableauStatus;

/// Simplex solver parameters.
#[derive(Debug, Clone)]
pub struct SimplexOptions {
    /// Pivot / reduced-cost tolerance.
    pub tol: f64,

    /// Phase-1 infeasibility threshold.
    pub tol_feas: f64,

    /// Iteration cap across both phases. Bland's rule already prevents
    /// cycling; this bounds worst-case degenerate stalls.
    pub max_iter: usize,
}

impl Default for SimplexOptions {
    fn default() -> Self {
        Self {
            tol: 1e-9,
            tol_feas: 1e-7,
            max_iter: 10_000,
        }
    }
}

/// Status of an LP relaxation solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LpStatus {
    /// Optimal vertex found.
    Optimal,

    /// Relaxation is infeasible.
    Infeasible,

    /// Relaxation is unbounded in the objective direction.
    Unbounded,

    /// Iteration cap reached without convergence.
    IterationLimit,
}

/// Result of an LP relaxation solve.
#[derive(Debug, Clone)]
pub struct LpResult {
    /// Solve status.
    pub status: LpStatus,

    /// Optimal point in original variable space (empty unless optimal).
    pub x: Vec<f64>,

    /// Objective value at `x`, in the model's sense.
    pub obj: f64,

    /// Simplex iterations used.
    pub iters: usize,
}

impl LpResult {
    fn without_solution(status: LpStatus, iters: usize) -> Self {
        Self {
            status,
            x: Vec::new(),
            obj: f64::NAN,
            iters,
        }
    }
}

/// Solve the continuous relaxation using the model's own bounds.
pub fn solve_relaxation(model: &Model, opts: &SimplexOptions) -> LpResult {
    let (lb, ub): (Vec<f64>, Vec<f64>) = model.vars().map(|(_, d)| (d.lb, d.ub)).unzip();
    solve_with_bounds(model, &lb, &ub, opts)
}

/// Solve the continuous relaxation with explicit bound vectors.
///
/// The bound vectors override the model's declared bounds; branch-and-bound
/// nodes pass their tightened copies here.
pub fn solve_with_bounds(model: &Model, var_lb: &[f64], var_ub: &[f64], opts: &SimplexOptions) -> LpResult {
    let sf = match standard_form::build(model, var_lb, var_ub) {
        BuildOutcome::Form(f) => f,
        BuildOutcome::InfeasibleBounds => {
            return LpResult::without_solution(LpStatus::Infeasible, 0);
        }
    };

    let res = tableau::solve_two_phase(&sf, opts);
    match res.status {
        TableauStatus::Optimal => {
            let x = sf.map_back(&res.y);
            let obj = model.objective().expr.evaluate(&x);
            LpResult {
                status: LpStatus::Optimal,
                x,
                obj,
                iters: res.iters,
            }
        }
        TableauStatus::Infeasible => LpResult::without_solution(LpStatus::Infeasible, res.iters),
        TableauStatus::Unbounded => LpResult::without_solution(LpStatus::Unbounded, res.iters),
        TableauStatus::IterationLimit => {
            LpResult::without_solution(LpStatus::IterationLimit, res.iters)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Model, Sense};

    #[test]
    fn test_maximize_sense_restored() {
        // max 3x + 2y  s.t.  x + y <= 4, x <= 2  ->  x = 2, y = 2, obj = 10.
        let mut model = Model::new();
        let x = model.add_continuous(0.0, 2.0, "x").unwrap();
        let y = model.add_continuous(0.0, f64::INFINITY, "y").unwrap();
        model.add_constraint((x + y).leq(4.0));
        model.set_objective(Sense::Maximize, 3.0 * x + 2.0 * y);

        let res = solve_relaxation(&model, &SimplexOptions::default());
        assert_eq!(res.status, LpStatus::Optimal);
        assert!((res.obj - 10.0).abs() < 1e-8, "obj = {}", res.obj);
        assert!((res.x[0] - 2.0).abs() < 1e-8);
        assert!((res.x[1] - 2.0).abs() < 1e-8);
    }

    #[test]
    fn test_objective_constant_included() {
        // min x + 7  with x >= 2  ->  obj = 9.
        let mut model = Model::new();
        let x = model.add_continuous(2.0, f64::INFINITY, "x").unwrap();
        model.set_objective(Sense::Minimize, x + 7.0);

        let res = solve_relaxation(&model, &SimplexOptions::default());
        assert_eq!(res.status, LpStatus::Optimal);
        assert!((res.obj - 9.0).abs() < 1e-8);
    }

    #[test]
    fn test_bound_overrides() {
        // Same model, tightened bounds through the override path.
        let mut model = Model::new();
        let x = model.add_continuous(0.0, 10.0, "x").unwrap();
        model.set_objective(Sense::Maximize, 1.0 * x);

        let res = solve_relaxation(&model, &SimplexOptions::default());
        assert!((res.obj - 10.0).abs() < 1e-8);

        let res = solve_with_bounds(&model, &[0.0], &[4.0], &SimplexOptions::default());
        assert!((res.obj - 4.0).abs() < 1e-8);
        assert!((res.x[x.idx()] - 4.0).abs() < 1e-8);
    }

    #[test]
    fn test_crossed_override_bounds_infeasible() {
        let mut model = Model::new();
        model.add_continuous(0.0, 10.0, "x").unwrap();
        let res = solve_with_bounds(&model, &[5.0], &[3.0], &SimplexOptions::default());
        assert_eq!(res.status, LpStatus::Infeasible);
        assert!(res.x.is_empty());
    }

    #[test]
    fn test_deterministic_resolve() {
        let mut model = Model::new();
        let x = model.add_continuous(0.0, f64::INFINITY, "x").unwrap();
        let y = model.add_continuous(0.0, f64::INFINITY, "y").unwrap();
        model.add_constraint((2.0 * x + y).leq(10.0));
        model.add_constraint((x + 3.0 * y).leq(15.0));
        model.set_objective(Sense::Maximize, x + y);

        let first = solve_relaxation(&model, &SimplexOptions::default());
        let second = solve_relaxation(&model, &SimplexOptions::default());
        assert_eq!(first.status, second.status);
        assert_eq!(first.x, second.x);
        assert_eq!(first.obj, second.obj);
        assert_eq!(first.iters, second.iters);
    }

    #[test]
    fn test_empty_model() {
        // No variables, no constraints: trivially optimal at the constant.
        let mut model = Model::new();
        model.set_objective(Sense::Minimize, 5.0);
        let res = solve_relaxation(&model, &SimplexOptions::default());
        assert_eq!(res.status, LpStatus::Optimal);
        assert!((res.obj - 5.0).abs() < 1e-12);
    }
}
