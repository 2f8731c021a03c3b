//! Two-phase primal simplex on a dense tableau.
//!
//! Phase 1 minimizes the sum of artificial variables to find a basic
//! feasible solution; phase 2 minimizes the actual cost. Entering columns
//! are picked by Bland's rule (lowest eligible index) and ratio-test ties
//! break on the lowest basic-variable index, which rules out cycling.
//! Artificial columns never re-enter the basis.

use nalgebra::DMatrix;

use super::standard_form::StandardForm;
use super::SimplexOptions;

/// Result of a tableau solve, in standard-form (column) space.
pub(crate) struct TableauResult {
    pub status: TableauStatus,
    pub y: Vec<f64>,
    pub iters: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TableauStatus {
    Optimal,
    Infeasible,
    Unbounded,
    IterationLimit,
}

enum Step {
    Optimal,
    Unbounded,
    IterationLimit,
}

/// Solve a standard-form problem with the two-phase method.
pub(crate) fn solve_two_phase(sf: &StandardForm, opts: &SimplexOptions) -> TableauResult {
    let m = sf.rows;
    let n_real = sf.cols;

    // Rows without a usable slack seed get an artificial column.
    let art_rows: Vec<usize> = sf
        .basis_seed
        .iter()
        .enumerate()
        .filter_map(|(i, seed)| seed.is_none().then_some(i))
        .collect();
    let n_art = art_rows.len();
    let ncols = n_real + n_art;

    let mut a = DMatrix::<f64>::zeros(m, ncols);
    for (val, (row, col)) in sf.a.iter() {
        a[(row, col)] = *val;
    }
    let mut b = sf.b.clone();
    let mut basis = vec![0usize; m];
    for (i, seed) in sf.basis_seed.iter().enumerate() {
        if let Some(s) = seed {
            basis[i] = *s;
        }
    }
    for (k, &row) in art_rows.iter().enumerate() {
        a[(row, n_real + k)] = 1.0;
        basis[row] = n_real + k;
    }

    let mut iters = 0;

    // Phase 1: drive artificials to zero.
    if n_art > 0 {
        let mut phase1_cost = vec![0.0; ncols];
        for c in phase1_cost.iter_mut().skip(n_real) {
            *c = 1.0;
        }
        match run(&mut a, &mut b, &mut basis, &phase1_cost, n_real, opts, &mut iters) {
            Step::Optimal => {}
            // Phase 1 cost is bounded below by zero, so an unbounded report
            // can only be numerical; give up rather than loop.
            Step::Unbounded | Step::IterationLimit => {
                return TableauResult {
                    status: TableauStatus::IterationLimit,
                    y: Vec::new(),
                    iters,
                };
            }
        }

        let infeas: f64 = basis
            .iter()
            .zip(b.iter())
            .filter(|(&col, _)| col >= n_real)
            .map(|(_, &bi)| bi)
            .sum();
        if infeas > opts.tol_feas {
            return TableauResult {
                status: TableauStatus::Infeasible,
                y: Vec::new(),
                iters,
            };
        }

        drive_out_artificials(&mut a, &mut b, &mut basis, n_real, opts.tol);
    }

    // Phase 2: minimize the real cost. Artificial columns are priced out
    // permanently (entering candidates stop at n_real).
    let mut phase2_cost = sf.cost.clone();
    phase2_cost.resize(ncols, 0.0);
    let status = match run(&mut a, &mut b, &mut basis, &phase2_cost, n_real, opts, &mut iters) {
        Step::Optimal => TableauStatus::Optimal,
        Step::Unbounded => TableauStatus::Unbounded,
        Step::IterationLimit => TableauStatus::IterationLimit,
    };

    let mut y = vec![0.0; n_real];
    if status == TableauStatus::Optimal {
        for (i, &col) in basis.iter().enumerate() {
            if col < n_real {
                y[col] = b[i];
            }
        }
    }

    TableauResult { status, y, iters }
}

/// Run simplex iterations until optimal, unbounded or the iteration cap.
///
/// Only columns below `enter_limit` may enter the basis.
fn run(
    a: &mut DMatrix<f64>,
    b: &mut [f64],
    basis: &mut [usize],
    cost: &[f64],
    enter_limit: usize,
    opts: &SimplexOptions,
    iters: &mut usize,
) -> Step {
    let m = b.len();
    loop {
        if *iters >= opts.max_iter {
            return Step::IterationLimit;
        }

        // Entering column: lowest index with negative reduced cost (Bland).
        let mut entering = None;
        for j in 0..enter_limit {
            let mut reduced = cost[j];
            for i in 0..m {
                let cb = cost[basis[i]];
                if cb != 0.0 {
                    reduced -= cb * a[(i, j)];
                }
            }
            if reduced < -opts.tol {
                entering = Some(j);
                break;
            }
        }
        let Some(col) = entering else {
            return Step::Optimal;
        };

        // Ratio test; ties break on the lowest basic-variable index (Bland).
        let mut leaving: Option<usize> = None;
        let mut best_ratio = f64::INFINITY;
        for i in 0..m {
            let aij = a[(i, col)];
            if aij > opts.tol {
                let ratio = b[i] / aij;
                let replace = match leaving {
                    None => true,
                    Some(cur) => {
                        ratio < best_ratio - opts.tol
                            || ((ratio - best_ratio).abs() <= opts.tol && basis[i] < basis[cur])
                    }
                };
                if replace {
                    leaving = Some(i);
                    best_ratio = ratio;
                }
            }
        }
        let Some(row) = leaving else {
            return Step::Unbounded;
        };

        pivot(a, b, basis, row, col);
        *iters += 1;
    }
}

/// Gauss-Jordan pivot on (row, col).
fn pivot(a: &mut DMatrix<f64>, b: &mut [f64], basis: &mut [usize], row: usize, col: usize) {
    let m = b.len();
    let ncols = a.ncols();

    let p = a[(row, col)];
    for j in 0..ncols {
        a[(row, j)] /= p;
    }
    b[row] /= p;
    a[(row, col)] = 1.0;

    for i in 0..m {
        if i == row {
            continue;
        }
        let factor = a[(i, col)];
        if factor == 0.0 {
            continue;
        }
        for j in 0..ncols {
            a[(i, j)] -= factor * a[(row, j)];
        }
        b[i] -= factor * b[row];
        a[(i, col)] = 0.0;
        // Roundoff can push a feasible rhs a hair below zero.
        if b[i] < 0.0 && b[i] > -1e-9 {
            b[i] = 0.0;
        }
    }

    basis[row] = col;
}

/// Pivot artificial variables out of the basis after phase 1.
///
/// A basic artificial at zero is swapped for any real column with a
/// nonzero entry in its row; if none exists the row is redundant and the
/// artificial stays basic at zero (it can never re-enter elsewhere).
fn drive_out_artificials(
    a: &mut DMatrix<f64>,
    b: &mut [f64],
    basis: &mut [usize],
    n_real: usize,
    tol: f64,
) {
    let m = b.len();
    for row in 0..m {
        if basis[row] < n_real {
            continue;
        }
        let mut col = None;
        for j in 0..n_real {
            if a[(row, j)].abs() > tol {
                col = Some(j);
                break;
            }
        }
        if let Some(c) = col {
            pivot(a, b, basis, row, c);
        }
    }
}
