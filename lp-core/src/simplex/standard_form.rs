//! Conversion of a model into simplex standard form.
//!
//! Rewrites the model over nonnegative variables with equality-ready rows:
//! finitely-bounded variables are shifted to lower bound zero, variables
//! with only an upper bound are negated, free variables are split into a
//! difference of two nonnegative columns. Two-sided bounds become explicit
//! rows, each inequality gets a slack or surplus column, and right-hand
//! sides are normalized to be nonnegative.

use sprs::{CsMat, TriMat};

use crate::expr::RelOp;
use crate::model::{Model, Sense};

/// How a structural variable maps into standard-form columns.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ColMap {
    /// `x = shift + y`, `y >= 0`.
    Shifted { col: usize, shift: f64 },

    /// `x = shift - y`, `y >= 0` (only an upper bound was finite).
    Negated { col: usize, shift: f64 },

    /// `x = y_pos - y_neg`, both nonnegative (free variable).
    Split { pos: usize, neg: usize },
}

/// Standard-form problem data handed to the tableau solver.
#[derive(Debug, Clone)]
pub(crate) struct StandardForm {
    /// Number of rows.
    pub rows: usize,

    /// Number of columns (structural plus slack/surplus).
    pub cols: usize,

    /// Row-oriented constraint matrix (rows x cols).
    pub a: CsMat<f64>,

    /// Right-hand side, normalized nonnegative.
    pub b: Vec<f64>,

    /// Minimize-space cost vector (length `cols`, zero on slack columns).
    pub cost: Vec<f64>,

    /// Per-variable column mapping.
    pub maps: Vec<ColMap>,

    /// Per row: slack column usable as the initial basic variable, if its
    /// coefficient is +1 after rhs normalization.
    pub basis_seed: Vec<Option<usize>>,
}

impl StandardForm {
    /// Map a standard-form point back to original variable space.
    pub fn map_back(&self, y: &[f64]) -> Vec<f64> {
        self.maps
            .iter()
            .map(|map| match *map {
                ColMap::Shifted { col, shift } => shift + y[col],
                ColMap::Negated { col, shift } => shift - y[col],
                ColMap::Split { pos, neg } => y[pos] - y[neg],
            })
            .collect()
    }
}

/// Outcome of standard-form construction.
pub(crate) enum BuildOutcome {
    Form(Box<StandardForm>),

    /// A variable's bounds cross; no LP needs to be solved.
    InfeasibleBounds,
}

/// Build the standard form of `model` with the given bound vectors.
///
/// The bound vectors override the model's own bounds (branch-and-bound
/// nodes pass tightened copies); lengths must equal the variable count.
pub(crate) fn build(model: &Model, var_lb: &[f64], var_ub: &[f64]) -> BuildOutcome {
    let n = model.num_vars();
    assert_eq!(var_lb.len(), n);
    assert_eq!(var_ub.len(), n);

    for j in 0..n {
        if var_lb[j] > var_ub[j] {
            return BuildOutcome::InfeasibleBounds;
        }
    }

    // Column mapping and rows for two-sided bounds.
    let mut maps = Vec::with_capacity(n);
    let mut bound_rows: Vec<(usize, f64)> = Vec::new();
    let mut num_y = 0;
    for j in 0..n {
        let (l, u) = (var_lb[j], var_ub[j]);
        if l.is_finite() {
            maps.push(ColMap::Shifted { col: num_y, shift: l });
            if u.is_finite() {
                bound_rows.push((num_y, u - l));
            }
            num_y += 1;
        } else if u.is_finite() {
            maps.push(ColMap::Negated { col: num_y, shift: u });
            num_y += 1;
        } else {
            maps.push(ColMap::Split {
                pos: num_y,
                neg: num_y + 1,
            });
            num_y += 2;
        }
    }

    // Minimize-space objective over the mapped columns.
    let objective = model.objective();
    let sense_sign = match objective.sense {
        Sense::Minimize => 1.0,
        Sense::Maximize => -1.0,
    };
    let mut cost = vec![0.0; num_y];
    for (var, coeff) in objective.expr.terms() {
        let c = sense_sign * coeff;
        match maps[var.idx()] {
            ColMap::Shifted { col, .. } => cost[col] += c,
            ColMap::Negated { col, .. } => cost[col] -= c,
            ColMap::Split { pos, neg } => {
                cost[pos] += c;
                cost[neg] -= c;
            }
        }
    }

    // Assemble rows: model constraints first, then bound rows.
    let mut raw_rows: Vec<(Vec<(usize, f64)>, RelOp, f64)> = Vec::new();
    for con in model.constraints() {
        let mut coeffs: Vec<(usize, f64)> = Vec::new();
        let mut rhs = con.rhs;
        for (var, a) in con.expr.terms() {
            match maps[var.idx()] {
                ColMap::Shifted { col, shift } => {
                    coeffs.push((col, a));
                    rhs -= a * shift;
                }
                ColMap::Negated { col, shift } => {
                    coeffs.push((col, -a));
                    rhs -= a * shift;
                }
                ColMap::Split { pos, neg } => {
                    coeffs.push((pos, a));
                    coeffs.push((neg, -a));
                }
            }
        }
        raw_rows.push((coeffs, con.op, rhs));
    }
    for &(col, range) in &bound_rows {
        raw_rows.push((vec![(col, 1.0)], RelOp::Le, range));
    }

    // Slack/surplus columns, rhs normalization and initial-basis seeds.
    let rows = raw_rows.len();
    let num_slack = raw_rows
        .iter()
        .filter(|(_, op, _)| *op != RelOp::Eq)
        .count();
    let cols = num_y + num_slack;
    cost.resize(cols, 0.0);

    let mut tri = TriMat::new((rows, cols));
    let mut b = Vec::with_capacity(rows);
    let mut basis_seed = Vec::with_capacity(rows);
    let mut next_slack = num_y;
    for (i, (coeffs, op, rhs)) in raw_rows.iter().enumerate() {
        let sign = if *rhs < 0.0 { -1.0 } else { 1.0 };
        for &(col, val) in coeffs {
            tri.add_triplet(i, col, sign * val);
        }
        b.push(sign * rhs);

        let seed = match op {
            RelOp::Le => {
                let s = next_slack;
                next_slack += 1;
                tri.add_triplet(i, s, sign);
                (sign > 0.0).then_some(s)
            }
            RelOp::Ge => {
                let s = next_slack;
                next_slack += 1;
                tri.add_triplet(i, s, -sign);
                (sign < 0.0).then_some(s)
            }
            RelOp::Eq => None,
        };
        basis_seed.push(seed);
    }

    BuildOutcome::Form(Box::new(StandardForm {
        rows,
        cols,
        a: tri.to_csc(),
        b,
        cost,
        maps,
        basis_seed,
    }))
}
