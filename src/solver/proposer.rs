//! Move proposer: fill an empty slot, or swap two violating ones.
//! Mirrors `Solver._propose_move` / `_find_violating_cells`.

use super::hours::HoursLedger;
use super::ordering::slot_order;
use super::selector::select_employee_for_slot;
use crate::config::SolverConfig;
use crate::constraint::Severity;
use crate::model::{Cell, EmployeeId, EmployeePool, Schedule, Weekday};
use rand::rngs::StdRng;
use rand::Rng;

/// A move already committed to `schedule`; holds what's needed to revert it
/// if the annealing driver rejects it.
pub(super) enum Move {
    Fill { cell: Cell, previous: EmployeeId },
    Swap { a: Cell, b: Cell, previous_a: EmployeeId, previous_b: EmployeeId },
}

impl Move {
    pub(super) fn revert(self, schedule: &mut Schedule) {
        match self {
            Move::Fill { cell, previous } => schedule.set(cell.0, cell.1, cell.2, previous),
            Move::Swap { a, b, previous_a, previous_b } => {
                schedule.set(a.0, a.1, a.2, previous_a);
                schedule.set(b.0, b.1, b.2, previous_b);
            }
        }
    }
}

/// Every non-UNFILLED weekday cell where the occupant fails one of their own
/// constraints. Weekends are excluded throughout repair/swap, same as the
/// fill/ordering pipeline.
pub(super) fn violating_cells(schedule: &Schedule, pool: &EmployeePool, config: &SolverConfig) -> Vec<Cell> {
    schedule
        .cells()
        .filter(|&(week, day, _slot)| !Weekday::from_index(day).is_weekend())
        .filter(|&cell| {
            let emp = schedule.get(cell.0, cell.1, cell.2);
            if emp.is_unfilled() {
                return false;
            }
            let employee = pool.get(emp);
            employee
                .constraints
                .iter()
                .any(|c| !c.is_satisfied(schedule, cell, config.shift_length_hours))
        })
        .collect()
}

/// Proposes and commits the next move directly onto `schedule`. The caller
/// (the annealing driver) decides whether to keep it or call
/// [`Move::revert`]. `last_filled` remembers the previously returned fill
/// slot so a single unfillable slot doesn't livelock the search: it is
/// pushed to the back of the candidate ordering on the following call.
pub(super) fn propose_move(
    schedule: &mut Schedule,
    pool: &EmployeePool,
    config: &SolverConfig,
    hours: &HoursLedger,
    current_score: f64,
    rng: &mut StdRng,
    last_filled: &mut Option<Cell>,
) -> Option<Move> {
    if let Some(mv) = propose_fill(schedule, pool, config, hours, current_score, last_filled) {
        return Some(mv);
    }
    propose_swap(schedule, pool, config, hours, current_score, rng)
}

fn propose_fill(
    schedule: &mut Schedule,
    pool: &EmployeePool,
    config: &SolverConfig,
    hours: &HoursLedger,
    current_score: f64,
    last_filled: &mut Option<Cell>,
) -> Option<Move> {
    let mut order = slot_order(schedule, pool, config);
    if let Some(deprioritized) = *last_filled {
        if let Some(pos) = order.iter().position(|&c| c == deprioritized) {
            let cell = order.remove(pos);
            order.push(cell);
        }
    }

    for cell in order {
        if !schedule.get(cell.0, cell.1, cell.2).is_unfilled() {
            continue;
        }
        let candidate = select_employee_for_slot(schedule, pool, config, hours, current_score, cell);
        if candidate.is_unfilled() {
            continue;
        }
        schedule.set(cell.0, cell.1, cell.2, candidate);
        *last_filled = Some(cell);
        return Some(Move::Fill {
            cell,
            previous: EmployeeId::UNFILLED,
        });
    }
    None
}

fn propose_swap(
    schedule: &mut Schedule,
    pool: &EmployeePool,
    config: &SolverConfig,
    hours: &HoursLedger,
    current_score: f64,
    rng: &mut StdRng,
) -> Option<Move> {
    let violating = violating_cells(schedule, pool, config);
    if violating.is_empty() {
        return None;
    }

    if violating.len() == 1 {
        let cell = violating[0];
        let previous = schedule.get(cell.0, cell.1, cell.2);
        schedule.set(cell.0, cell.1, cell.2, EmployeeId::UNFILLED);
        let candidate = select_employee_for_slot(schedule, pool, config, hours, current_score, cell);
        if candidate.is_unfilled() || candidate == previous {
            schedule.set(cell.0, cell.1, cell.2, previous);
            return None;
        }
        schedule.set(cell.0, cell.1, cell.2, candidate);
        return Some(Move::Fill { cell, previous });
    }

    const ATTEMPTS: usize = 200;
    for _ in 0..ATTEMPTS {
        let i = rng.random_range(0..violating.len());
        let mut j = rng.random_range(0..violating.len());
        if j == i {
            j = (j + 1) % violating.len();
        }
        let a = violating[i];
        let b = violating[j];
        if a == b {
            continue;
        }

        let emp_a = schedule.get(a.0, a.1, a.2);
        let emp_b = schedule.get(b.0, b.1, b.2);
        schedule.set(a.0, a.1, a.2, emp_b);
        schedule.set(b.0, b.1, b.2, emp_a);

        let ok_a = pool
            .get(emp_b)
            .constraints
            .iter()
            .filter(|c| c.severity == Severity::Absolute)
            .all(|c| c.is_satisfied(schedule, a, config.shift_length_hours));
        let ok_b = pool
            .get(emp_a)
            .constraints
            .iter()
            .filter(|c| c.severity == Severity::Absolute)
            .all(|c| c.is_satisfied(schedule, b, config.shift_length_hours));

        if ok_a && ok_b {
            return Some(Move::Swap {
                a,
                b,
                previous_a: emp_a,
                previous_b: emp_b,
            });
        }

        schedule.set(a.0, a.1, a.2, emp_a);
        schedule.set(b.0, b.1, b.2, emp_b);
    }

    None
}
