#![forbid(unsafe_code)]
//! Constraint-satisfaction solver for multi-week staff shift schedules.
//!
//! The entry point is [`solver::solve`]: given a partially pre-filled
//! [`model::Schedule`] and an [`model::EmployeePool`], it runs a four-phase
//! pipeline (greedy simulated annealing, repair, minimum-hours fill and a
//! final absolute-violation sweep) and returns a [`error::SolverOutcome`].

pub mod config;
pub mod constraint;
pub mod defaults;
pub mod error;
pub mod evaluator;
pub mod feasibility;
pub mod model;
mod solver;

pub use config::SolverConfig;
pub use constraint::{Constraint, ConstraintKind, GlobalConstraintKind, Severity};
pub use defaults::{default_constraints, deny, override_constraint};
pub use error::{SolverError, SolverOutcome, UnresolvedViolation};
pub use evaluator::{count_violations, score, ViolationCounts};
pub use feasibility::FeasibilityReport;
pub use model::{Employee, EmployeeId, EmployeePool, Schedule, Slot, Weekday};
pub use solver::solve;
