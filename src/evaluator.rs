//! The shared oracle: counts constraint violations and turns them into the
//! single scalar score the rest of the solver optimizes against.

use crate::config::{SolverConfig, UNFILLED_PENALTY};
use crate::constraint::{d2_required, GlobalConstraintKind, Severity};
use crate::model::{EmployeePool, Schedule, Slot};

/// Violation tally for one schedule, split by scope (global vs per-employee)
/// and severity, plus human-readable descriptions for reporting.
#[derive(Debug, Clone, Default)]
pub struct ViolationCounts {
    pub global_absolute: u32,
    pub global_relative: u32,
    pub staff_absolute: u32,
    pub staff_relative: u32,
    pub descriptions: Vec<String>,
}

impl ViolationCounts {
    pub fn total_absolute(&self) -> u32 {
        self.global_absolute + self.staff_absolute
    }

    pub fn total_relative(&self) -> u32 {
        self.global_relative + self.staff_relative
    }
}

/// Walks all global constraints once, then every non-UNFILLED cell against
/// every per-employee constraint, classifying failures by severity.
pub fn count_violations(schedule: &Schedule, pool: &EmployeePool, config: &SolverConfig) -> ViolationCounts {
    let mut counts = ViolationCounts::default();

    for global in GlobalConstraintKind::ALL {
        if !global.is_satisfied(schedule) {
            counts.global_absolute += 1;
            counts.descriptions.push(format!("global absolute violation: {global}"));
        }
    }

    // All global rules are ABSOLUTE by definition (spec.md §3); there is no
    // global-relative case to walk.

    for cell in schedule.cells() {
        let emp = schedule.get(cell.0, cell.1, cell.2);
        if emp.is_unfilled() {
            continue;
        }
        let employee = pool.get(emp);
        for constraint in &employee.constraints {
            if constraint.is_satisfied(schedule, cell, config.shift_length_hours) {
                continue;
            }
            match constraint.severity {
                Severity::Absolute => {
                    counts.staff_absolute += 1;
                    counts.descriptions.push(format!(
                        "{} absolute violation {} on ({},{},{})",
                        employee.name, constraint.kind, cell.0, cell.1, cell.2
                    ));
                }
                Severity::Relative => {
                    counts.staff_relative += 1;
                    counts.descriptions.push(format!(
                        "{} relative violation {} on ({},{},{})",
                        employee.name, constraint.kind, cell.0, cell.1, cell.2
                    ));
                }
            }
        }
    }

    counts
}

/// Whether (week, day, slot) is a cell that must be filled for the schedule
/// to be considered complete. Excludes D2 on Tue/Fri and D2 on weekend-off
/// weeks, matching the exceptions baked into `D2_FILLED`.
pub fn is_required_cell(week: usize, day: usize, slot: usize) -> bool {
    if slot == Slot::D2.index() {
        d2_required(week, day)
    } else {
        true
    }
}

/// `(g_abs + s_abs) * ABS_PENALTY + g_rel + s_rel + UNFILLED_PENALTY *
/// unfilled_required_cells`. A single scalar with a penalty cliff at
/// `ABS_PENALTY` ensures any absolute-violating move is always worse than
/// any absolute-clean move, regardless of relative cost.
pub fn score(schedule: &Schedule, pool: &EmployeePool, config: &SolverConfig) -> f64 {
    let counts = count_violations(schedule, pool, config);
    let unfilled_required = schedule
        .cells()
        .filter(|&(w, d, s)| is_required_cell(w, d, s) && schedule.get(w, d, s).is_unfilled())
        .count();

    f64::from(counts.total_absolute()) * config.abs_penalty
        + f64::from(counts.total_relative())
        + UNFILLED_PENALTY * unfilled_required as f64
}
