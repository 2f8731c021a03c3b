//! Simple LP example demonstrating the relaxation solver.
//!
//! Solves:
//!   maximize    3a + 5b
//!   subject to  a <= 4
//!               2b <= 12
//!               3a + 2b <= 18
//!               a, b >= 0
//!
//! Optimal solution: a = 2, b = 6, objective = 36.

use lp_core::simplex::solve_relaxation;
use lp_core::{Model, Sense, SimplexOptions};

fn main() {
    let mut model = Model::new();
    let a = model.add_continuous(0.0, f64::INFINITY, "a").unwrap();
    let b = model.add_continuous(0.0, f64::INFINITY, "b").unwrap();

    model.add_constraint(a.leq(4.0).named("capacity_a"));
    model.add_constraint((2.0 * b).leq(12.0).named("capacity_b"));
    model.add_constraint((3.0 * a + 2.0 * b).leq(18.0).named("shared_capacity"));
    model.set_objective(Sense::Maximize, 3.0 * a + 5.0 * b);

    let result = solve_relaxation(&model, &SimplexOptions::default());

    println!("=== Simple LP ===");
    println!("Status:     {:?}", result.status);
    println!("a = {:.6}", result.x[a.idx()]);
    println!("b = {:.6}", result.x[b.idx()]);
    println!("Objective:  {:.6}", result.obj);
    println!("Iterations: {}", result.iters);
}
