//! Copy-on-solve snapshot of the model's integrality data.

use lp_core::{Model, Sense, VarKind};

/// Snapshot of the integer structure of a model, taken at the start of a
/// solve.
///
/// Captures the bound vectors and integrality classification so that
/// mutating the model after the solve returns (a Pareto sweep, say) can
/// never interact with an in-flight exploration.
#[derive(Debug, Clone)]
pub struct MipProblem {
    /// Indices of integer variables (includes binaries).
    pub integer_vars: Vec<usize>,

    /// Indices of binary variables (subset of `integer_vars`).
    pub binary_vars: Vec<usize>,

    /// Lower bounds for all variables at snapshot time.
    pub var_lb: Vec<f64>,

    /// Upper bounds for all variables at snapshot time.
    pub var_ub: Vec<f64>,

    /// Objective direction at snapshot time.
    pub sense: Sense,
}

impl MipProblem {
    /// Capture the integrality snapshot of `model`.
    pub fn snapshot(model: &Model) -> Self {
        let n = model.num_vars();
        let mut integer_vars = Vec::new();
        let mut binary_vars = Vec::new();
        let mut var_lb = Vec::with_capacity(n);
        let mut var_ub = Vec::with_capacity(n);

        for (var, data) in model.vars() {
            match data.kind {
                VarKind::Integer => integer_vars.push(var.idx()),
                VarKind::Binary => {
                    integer_vars.push(var.idx());
                    binary_vars.push(var.idx());
                }
                VarKind::Continuous => {}
            }
            var_lb.push(data.lb);
            var_ub.push(data.ub);
        }

        Self {
            integer_vars,
            binary_vars,
            var_lb,
            var_ub,
            sense: model.objective().sense,
        }
    }

    /// Number of variables.
    pub fn num_vars(&self) -> usize {
        self.var_lb.len()
    }

    /// Number of integer variables (including binaries).
    pub fn num_integers(&self) -> usize {
        self.integer_vars.len()
    }

    /// Map an objective value into minimize space.
    pub fn to_min(&self, obj: f64) -> f64 {
        match self.sense {
            Sense::Minimize => obj,
            Sense::Maximize => -obj,
        }
    }

    /// Map a minimize-space value back to the model's sense.
    pub fn from_min(&self, obj: f64) -> f64 {
        // Negation is its own inverse, so the mapping is symmetric.
        self.to_min(obj)
    }

    /// Distance of a value to the nearest integer.
    pub fn fractionality(val: f64) -> f64 {
        let frac = val.fract().abs();
        frac.min(1.0 - frac)
    }

    /// Check whether a point satisfies all integrality requirements.
    pub fn is_integer_feasible(&self, x: &[f64], tol: f64) -> bool {
        self.integer_vars
            .iter()
            .all(|&i| (x[i] - x[i].round()).abs() <= tol)
    }

    /// Fractional integer variables at a point.
    ///
    /// Returns (index, value, fractionality) in increasing index order.
    pub fn fractional_vars(&self, x: &[f64], tol: f64) -> Vec<(usize, f64, f64)> {
        let mut result = Vec::new();
        for &i in &self.integer_vars {
            let frac = Self::fractionality(x[i]);
            if frac > tol {
                result.push((i, x[i], frac));
            }
        }
        result
    }

    /// Round all integer variables of a point to the nearest integer.
    pub fn round_integers(&self, x: &mut [f64]) {
        for &i in &self.integer_vars {
            x[i] = x[i].round();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_core::{Model, Sense};

    fn sample_model() -> Model {
        let mut model = Model::new();
        let b = model.add_binary("b").unwrap();
        let i = model.add_integer(0.0, 10.0, "i").unwrap();
        let c = model.add_continuous(0.0, 1.0, "c").unwrap();
        model.set_objective(Sense::Minimize, b + i + c);
        model
    }

    #[test]
    fn test_snapshot_isolated_from_later_mutation() {
        let mut model = Model::new();
        let b = model.add_binary("b").unwrap();
        let i = model.add_integer(0.0, 10.0, "i").unwrap();
        model.set_objective(Sense::Minimize, b + i);
        let prob = MipProblem::snapshot(&model);

        model.set_var_bounds(i, 0.0, 3.0).unwrap();

        // The snapshot keeps the bounds from capture time.
        assert_eq!(prob.var_ub[1], 10.0);
    }

    #[test]
    fn test_snapshot_classification() {
        let prob = MipProblem::snapshot(&sample_model());

        assert_eq!(prob.num_vars(), 3);
        assert_eq!(prob.integer_vars, vec![0, 1]);
        assert_eq!(prob.binary_vars, vec![0]);
        assert_eq!(prob.var_lb, vec![0.0, 0.0, 0.0]);
        assert_eq!(prob.var_ub, vec![1.0, 10.0, 1.0]);
    }

    #[test]
    fn test_integer_feasibility() {
        let prob = MipProblem::snapshot(&sample_model());

        assert!(prob.is_integer_feasible(&[1.0, 4.0, 0.5], 1e-6));
        assert!(!prob.is_integer_feasible(&[0.5, 4.0, 0.5], 1e-6));
        assert!(prob.is_integer_feasible(&[0.9999999, 4.0, 0.5], 1e-6));
    }

    #[test]
    fn test_fractionality() {
        assert!((MipProblem::fractionality(0.5) - 0.5).abs() < 1e-12);
        assert!((MipProblem::fractionality(0.3) - 0.3).abs() < 1e-12);
        assert!((MipProblem::fractionality(2.7) - 0.3).abs() < 1e-12);
        assert!(MipProblem::fractionality(3.0) < 1e-12);
    }

    #[test]
    fn test_fractional_vars_in_index_order() {
        let prob = MipProblem::snapshot(&sample_model());
        let fractional = prob.fractional_vars(&[0.3, 4.5, 0.7], 1e-6);

        let indices: Vec<usize> = fractional.iter().map(|&(i, _, _)| i).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_sense_mapping() {
        let mut model = sample_model();
        model.set_objective(Sense::Maximize, lp_core::LinExpr::new());
        let prob = MipProblem::snapshot(&model);

        assert_eq!(prob.to_min(5.0), -5.0);
        assert_eq!(prob.from_min(-5.0), 5.0);
    }
}
