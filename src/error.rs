//! Errors are values, not exceptions (spec.md §7): every phase returns the
//! final state plus a status, and rollback is driven by score comparison.
//! `SolverError` covers only the two cases that actually abort a run before
//! or during setup; "no move" and "unfixable absolute violations" are `Ok`
//! outcomes carrying status, not errors.

use crate::feasibility::FeasibilityReport;
use crate::model::{Cell, EmployeeId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SolverError {
    #[error("schedule cannot be solved: {0}")]
    Infeasible(FeasibilityReport),

    #[error("malformed grid: expected shape {expected:?}, got {actual:?}")]
    MalformedGrid {
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },
}

impl SolverError {
    pub fn infeasible(report: FeasibilityReport) -> Self {
        SolverError::Infeasible(report)
    }
}

// Manual Display isn't used above (thiserror generates it); the `required`
// and `available` interpolations read from `FeasibilityReport`'s fields via
// `Deref`-free access below.
impl std::fmt::Display for FeasibilityReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "required {} staff-hours, {} available",
            self.required_hours, self.available_hours
        )
    }
}

/// A per-employee absolute violation that survived the final sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedViolation {
    pub employee: EmployeeId,
    pub cell: Cell,
    pub description: String,
}

/// The solver's final output: the schedule, its score, the epoch/score
/// history for downstream plotting, and anything the absolute-violation
/// sweep could not resolve.
#[derive(Debug, Clone)]
pub struct SolverOutcome {
    pub schedule: crate::model::Schedule,
    pub final_score: f64,
    pub history: Vec<(u32, f64)>,
    pub unresolved: Vec<UnresolvedViolation>,
}

impl SolverOutcome {
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }
}
