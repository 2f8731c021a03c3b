//! lp-core: linear program model builder and relaxation solver.
//!
//! This crate provides the model-representation layer for small integer and
//! linear programs together with a correctness-oriented LP solver:
//!
//! - **Expression algebra**: sparse linear expressions built from variables
//!   and constants with the usual operators; comparisons yield constraints.
//! - **Model**: owns variables (continuous, integer, binary), constraints,
//!   one objective, and named KPI expressions for post-solve reporting.
//! - **Simplex**: two-phase primal simplex solving the continuous
//!   relaxation, with Bland's rule for deterministic, cycle-free pivoting.
//!
//! Mixed-integer solving over this layer lives in the companion `lp-mip`
//! crate, which drives the relaxation solver from a branch-and-bound tree.
//!
//! # Example
//!
//! ```
//! use lp_core::{Model, Sense, SimplexOptions, simplex};
//!
//! // max 3x + 2y  s.t.  x + y <= 4,  0 <= x <= 2,  y >= 0
//! let mut model = Model::new();
//! let x = model.add_continuous(0.0, 2.0, "x").unwrap();
//! let y = model.add_continuous(0.0, f64::INFINITY, "y").unwrap();
//! model.add_constraint((x + y).leq(4.0));
//! model.set_objective(Sense::Maximize, 3.0 * x + 2.0 * y);
//!
//! let res = simplex::solve_relaxation(&model, &SimplexOptions::default());
//! assert!((res.obj - 10.0).abs() < 1e-6);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod expr;
pub mod model;
pub mod simplex;
pub mod solution;

pub use error::{ModelError, ModelResult};
pub use expr::{Constraint, LinExpr, RelOp};
pub use model::{ConstraintHandle, Model, Objective, Sense, VarData, VarKind, Variable};
pub use simplex::{LpResult, LpStatus, SimplexOptions};
pub use solution::{relative_gap, Solution, SolveStatus};
