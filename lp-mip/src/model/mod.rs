//! Problem snapshot and incumbent types for the MIP solver.

mod problem;
mod solution;

pub use problem::MipProblem;
pub use solution::IncumbentTracker;
