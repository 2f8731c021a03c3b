//! Model representation: variables, constraints, objective and KPIs.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ModelError, ModelResult};
use crate::expr::{Constraint, LinExpr};
use crate::solution::Solution;

/// Handle to a variable declared on a [`Model`].
///
/// Dense index into the owning model's variable sequence. Only meaningful
/// for the model that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable(usize);

impl Variable {
    pub(crate) fn new(idx: usize) -> Self {
        Self(idx)
    }

    /// Index of this variable in its model.
    pub fn idx(&self) -> usize {
        self.0
    }

    /// Build the constraint `self <= rhs`.
    pub fn leq(self, rhs: impl Into<LinExpr>) -> Constraint {
        LinExpr::from(self).leq(rhs)
    }

    /// Build the constraint `self >= rhs`.
    pub fn geq(self, rhs: impl Into<LinExpr>) -> Constraint {
        LinExpr::from(self).geq(rhs)
    }

    /// Build the constraint `self == rhs`.
    pub fn eq(self, rhs: impl Into<LinExpr>) -> Constraint {
        LinExpr::from(self).eq(rhs)
    }
}

/// Handle to a constraint added to a [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintHandle(usize);

impl ConstraintHandle {
    /// Index of this constraint in its model.
    pub fn idx(&self) -> usize {
        self.0
    }
}

/// Domain kind of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    /// Real-valued variable.
    Continuous,
    /// Integer-valued variable.
    Integer,
    /// Binary variable (0 or 1).
    Binary,
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Minimize the objective expression.
    Minimize,
    /// Maximize the objective expression.
    Maximize,
}

/// Objective: direction plus linear expression.
#[derive(Debug, Clone)]
pub struct Objective {
    /// Optimization direction.
    pub sense: Sense,

    /// Objective expression (may carry a constant term).
    pub expr: LinExpr,
}

impl Default for Objective {
    fn default() -> Self {
        Self {
            sense: Sense::Minimize,
            expr: LinExpr::new(),
        }
    }
}

/// Per-variable data stored by the model.
#[derive(Debug, Clone)]
pub struct VarData {
    /// Domain kind.
    pub kind: VarKind,

    /// Lower bound (may be -inf).
    pub lb: f64,

    /// Upper bound (may be +inf).
    pub ub: f64,

    /// Declared name.
    pub name: String,
}

/// An integer/linear optimization model.
///
/// Owns the ordered variable and constraint sequences, one objective and a
/// map of named KPIs. The model is mutable between solves (objective and
/// bounds may change, as in a Pareto sweep); every mutation bumps an
/// internal revision counter so solutions taken before the change are
/// rejected by [`Model::eval`].
#[derive(Debug, Clone, Default)]
pub struct Model {
    vars: Vec<VarData>,
    constraints: Vec<Constraint>,
    objective: Objective,
    kpis: BTreeMap<String, LinExpr>,
    constraint_names: BTreeSet<String>,
    revision: u64,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of declared variables.
    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    /// Number of constraints.
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Current revision counter. Bumped on every mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Declare a variable.
    ///
    /// Fails with [`ModelError::Domain`] if `lb > ub`, a bound is NaN, or
    /// the kind is [`VarKind::Binary`] with bounds outside `[0, 1]`.
    pub fn add_var(
        &mut self,
        kind: VarKind,
        lb: f64,
        ub: f64,
        name: impl Into<String>,
    ) -> ModelResult<Variable> {
        let name = name.into();
        Self::check_domain(kind, lb, ub, &name)?;
        let var = Variable(self.vars.len());
        self.vars.push(VarData { kind, lb, ub, name });
        self.revision += 1;
        Ok(var)
    }

    /// Declare a continuous variable.
    pub fn add_continuous(&mut self, lb: f64, ub: f64, name: impl Into<String>) -> ModelResult<Variable> {
        self.add_var(VarKind::Continuous, lb, ub, name)
    }

    /// Declare an integer variable.
    pub fn add_integer(&mut self, lb: f64, ub: f64, name: impl Into<String>) -> ModelResult<Variable> {
        self.add_var(VarKind::Integer, lb, ub, name)
    }

    /// Declare a binary variable with bounds `[0, 1]`.
    pub fn add_binary(&mut self, name: impl Into<String>) -> ModelResult<Variable> {
        self.add_var(VarKind::Binary, 0.0, 1.0, name)
    }

    fn check_domain(kind: VarKind, lb: f64, ub: f64, name: &str) -> ModelResult<()> {
        if lb.is_nan() || ub.is_nan() {
            return Err(ModelError::Domain(format!("variable {name}: NaN bound")));
        }
        if lb > ub {
            return Err(ModelError::Domain(format!(
                "variable {name}: lower bound {lb} exceeds upper bound {ub}"
            )));
        }
        if kind == VarKind::Binary && (lb < 0.0 || ub > 1.0) {
            return Err(ModelError::Domain(format!(
                "variable {name}: binary bounds [{lb}, {ub}] not within [0, 1]"
            )));
        }
        Ok(())
    }

    /// Replace a variable's bounds. Bumps the revision.
    pub fn set_var_bounds(&mut self, var: Variable, lb: f64, ub: f64) -> ModelResult<()> {
        let data = &mut self.vars[var.idx()];
        Self::check_domain(data.kind, lb, ub, &data.name)?;
        data.lb = lb;
        data.ub = ub;
        self.revision += 1;
        Ok(())
    }

    /// Data of a declared variable.
    pub fn var(&self, var: Variable) -> &VarData {
        &self.vars[var.idx()]
    }

    /// Bounds of a declared variable.
    pub fn var_bounds(&self, var: Variable) -> (f64, f64) {
        let data = &self.vars[var.idx()];
        (data.lb, data.ub)
    }

    /// Iterate over declared variables in declaration order.
    pub fn vars(&self) -> impl Iterator<Item = (Variable, &VarData)> {
        self.vars.iter().enumerate().map(|(i, d)| (Variable(i), d))
    }

    /// Append a constraint.
    ///
    /// Duplicate constraint names are allowed; they are logged at warn
    /// level for diagnostics but never rejected.
    pub fn add_constraint(&mut self, constraint: Constraint) -> ConstraintHandle {
        if let Some(max_idx) = constraint.expr.max_var_index() {
            assert!(
                max_idx < self.vars.len(),
                "constraint references variable index {} but model has {} variables",
                max_idx,
                self.vars.len()
            );
        }
        if let Some(ref name) = constraint.name {
            if !self.constraint_names.insert(name.clone()) {
                log::warn!("duplicate constraint name: {name}");
            }
        }
        let handle = ConstraintHandle(self.constraints.len());
        self.constraints.push(constraint);
        self.revision += 1;
        handle
    }

    /// The constraint sequence.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Replace the objective.
    pub fn set_objective(&mut self, sense: Sense, expr: impl Into<LinExpr>) {
        self.objective = Objective {
            sense,
            expr: expr.into(),
        };
        self.revision += 1;
    }

    /// The current objective.
    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    /// Register a named KPI expression for post-solve reporting.
    ///
    /// Fails with [`ModelError::DuplicateKpi`] on a name collision.
    pub fn add_kpi(&mut self, name: impl Into<String>, expr: impl Into<LinExpr>) -> ModelResult<()> {
        let name = name.into();
        if self.kpis.contains_key(&name) {
            return Err(ModelError::DuplicateKpi(name));
        }
        self.kpis.insert(name, expr.into());
        Ok(())
    }

    /// Iterate over registered KPIs in name order.
    pub fn kpis(&self) -> impl Iterator<Item = (&str, &LinExpr)> {
        self.kpis.iter().map(|(n, e)| (n.as_str(), e))
    }

    /// Evaluate an expression against a solution of this model.
    ///
    /// Fails with [`ModelError::StaleSolution`] if the model changed since
    /// the solution was produced, and [`ModelError::MissingSolution`] if
    /// the solution carries no values.
    pub fn eval(&self, expr: &LinExpr, solution: &Solution) -> ModelResult<f64> {
        if solution.revision != self.revision {
            return Err(ModelError::StaleSolution);
        }
        if !solution.has_solution() {
            return Err(ModelError::MissingSolution(solution.status.to_string()));
        }
        Ok(expr.evaluate(&solution.values))
    }

    /// Evaluate a registered KPI against a solution of this model.
    pub fn kpi_value(&self, name: &str, solution: &Solution) -> ModelResult<f64> {
        let expr = self
            .kpis
            .get(name)
            .ok_or_else(|| ModelError::UnknownKpi(name.to_string()))?;
        self.eval(expr, solution)
    }
}
