//! Error types for model construction and evaluation.

use thiserror::Error;

/// Errors raised while building a model or evaluating against a solution.
///
/// Solve outcomes (infeasible, unbounded, limit reached) are never errors;
/// they are statuses on [`crate::Solution`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Variable bounds or kind rejected at declaration time.
    #[error("invalid variable domain: {0}")]
    Domain(String),

    /// KPI name already registered on this model.
    #[error("duplicate KPI name: {0}")]
    DuplicateKpi(String),

    /// The solution predates a model mutation and can no longer be evaluated.
    #[error("stale solution: model was modified after this solution was produced")]
    StaleSolution,

    /// KPI name not registered on this model.
    #[error("unknown KPI name: {0}")]
    UnknownKpi(String),

    /// The solution carries no variable values (no incumbent was found).
    #[error("solution has no values (status: {0})")]
    MissingSolution(String),
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
