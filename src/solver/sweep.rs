//! Final absolute-violation sweep, mirroring `Solver.finalPass`.

use super::hours::HoursLedger;
use super::selector::select_employee_for_slot;
use crate::config::SolverConfig;
use crate::constraint::Severity;
use crate::error::UnresolvedViolation;
use crate::evaluator::score;
use crate::model::{Cell, EmployeePool, Schedule, Weekday};

/// First non-UNFILLED weekday cell where the occupant fails one of their
/// own ABSOLUTE constraints, or a global ABSOLUTE rule fails, scanned in
/// grid order.
fn first_absolute_violation(schedule: &Schedule, pool: &EmployeePool, config: &SolverConfig) -> Option<Cell> {
    schedule
        .cells()
        .filter(|&(_w, d, _s)| !Weekday::from_index(d).is_weekend())
        .find(|&cell| {
            let emp = schedule.get(cell.0, cell.1, cell.2);
            if emp.is_unfilled() {
                return false;
            }
            pool.get(emp)
                .constraints
                .iter()
                .filter(|c| c.severity == Severity::Absolute)
                .any(|c| !c.is_satisfied(schedule, cell, config.shift_length_hours))
        })
}

/// While staff-level absolute violations remain: try a fresh candidate at
/// the first offending cell, then a pairwise swap across the whole grid.
/// Gives up and reports whatever is left after a full scan finds no fix.
pub(super) fn sweep(schedule: &mut Schedule, pool: &EmployeePool, config: &SolverConfig) -> Vec<UnresolvedViolation> {
    loop {
        let Some(cell) = first_absolute_violation(schedule, pool, config) else {
            return Vec::new();
        };

        if try_replace(schedule, pool, config, cell) {
            continue;
        }
        if try_swap_anywhere(schedule, pool, config, cell) {
            continue;
        }

        return collect_unresolved(schedule, pool, config);
    }
}

fn try_replace(schedule: &mut Schedule, pool: &EmployeePool, config: &SolverConfig, cell: Cell) -> bool {
    let hours = HoursLedger::from_schedule(schedule, pool.len(), config.shift_length_hours);
    let current_score = score(schedule, pool, config);
    let previous = schedule.get(cell.0, cell.1, cell.2);

    schedule.set(cell.0, cell.1, cell.2, crate::model::EmployeeId::UNFILLED);
    let candidate = select_employee_for_slot(schedule, pool, config, &hours, current_score, cell);
    if candidate.is_unfilled() {
        schedule.set(cell.0, cell.1, cell.2, previous);
        false
    } else {
        schedule.set(cell.0, cell.1, cell.2, candidate);
        true
    }
}

fn try_swap_anywhere(schedule: &mut Schedule, pool: &EmployeePool, config: &SolverConfig, cell: Cell) -> bool {
    let candidates: Vec<Cell> = schedule
        .cells()
        .filter(|&(_w, d, _s)| !Weekday::from_index(d).is_weekend())
        .filter(|&other| other != cell)
        .collect();

    for other in candidates {
        let emp_cell = schedule.get(cell.0, cell.1, cell.2);
        let emp_other = schedule.get(other.0, other.1, other.2);
        if emp_cell == emp_other {
            continue;
        }

        schedule.set(cell.0, cell.1, cell.2, emp_other);
        schedule.set(other.0, other.1, other.2, emp_cell);

        let ok = absolute_ok(pool, emp_other, schedule, cell, config) && absolute_ok(pool, emp_cell, schedule, other, config);
        if ok {
            return true;
        }

        schedule.set(cell.0, cell.1, cell.2, emp_cell);
        schedule.set(other.0, other.1, other.2, emp_other);
    }

    false
}

fn absolute_ok(pool: &EmployeePool, employee: crate::model::EmployeeId, schedule: &Schedule, cell: Cell, config: &SolverConfig) -> bool {
    if employee.is_unfilled() {
        return true;
    }
    pool.get(employee)
        .constraints
        .iter()
        .filter(|c| c.severity == Severity::Absolute)
        .all(|c| c.is_satisfied(schedule, cell, config.shift_length_hours))
}

/// Public so the orchestrator can recompute the unresolved list if it rolls
/// the sweep phase back to its pre-sweep snapshot.
pub(super) fn collect_unresolved(schedule: &Schedule, pool: &EmployeePool, config: &SolverConfig) -> Vec<UnresolvedViolation> {
    schedule
        .cells()
        .filter(|&(_w, d, _s)| !Weekday::from_index(d).is_weekend())
        .filter_map(|cell| {
            let emp = schedule.get(cell.0, cell.1, cell.2);
            if emp.is_unfilled() {
                return None;
            }
            let employee = pool.get(emp);
            let failing = employee
                .constraints
                .iter()
                .filter(|c| c.severity == Severity::Absolute)
                .find(|c| !c.is_satisfied(schedule, cell, config.shift_length_hours))?;

            Some(UnresolvedViolation {
                employee: emp,
                cell,
                description: format!("{} violates {}", employee.name, failing.kind),
            })
        })
        .collect()
}
