//! Most-constrained-first slot ordering, mirroring `Solver.slot_order`.

use crate::config::SolverConfig;
use crate::constraint::Severity;
use crate::model::{Cell, EmployeePool, Schedule, Weekday, DAYS_PER_WEEK};

/// D1 and N fill before D2; matches the original's `SLOT_ORDER` table.
fn slot_priority(slot: usize) -> u32 {
    match slot {
        0 => 0, // D1
        2 => 1, // N
        1 => 2, // D2
        other => panic!("invalid slot index {other}"),
    }
}

/// Thursday first, then Wednesday, then Monday, everything else last.
fn day_priority(day: usize) -> u32 {
    match Weekday::from_index(day) {
        Weekday::Thursday => 0,
        Weekday::Wednesday => 1,
        Weekday::Monday => 2,
        _ => 3,
    }
}

#[derive(Debug, Clone, Copy)]
struct Ranked {
    cell: Cell,
    hard_ok: usize,
    pri: u32,
    min_soft: u32,
}

/// Ranks every open (weekday, non-D2-exempt) slot by how constrained it is:
/// fewest hard-feasible candidates first, then day-of-week priority, then
/// the lowest minimum soft-violation count among those candidates.
///
/// Weekends are never returned: they are pre-seeded externally and the
/// search pipeline never touches them (spec.md §4.3/§4.5).
pub(super) fn slot_order(schedule: &mut Schedule, pool: &EmployeePool, config: &SolverConfig) -> Vec<Cell> {
    let mut ranked = Vec::new();

    for week in 0..schedule.weeks() {
        for day in 0..DAYS_PER_WEEK {
            let weekday = Weekday::from_index(day);
            if weekday.is_weekend() {
                continue;
            }
            for slot in 0..crate::model::SLOTS_PER_DAY {
                if slot == 1 && matches!(weekday, Weekday::Tuesday | Weekday::Friday) {
                    continue;
                }

                let cell = (week, day, slot);
                let (hard_ok, min_soft) = rank_candidates(schedule, pool, config, cell);
                let pri = slot_priority(slot) * 10 + day_priority(day);
                ranked.push(Ranked {
                    cell,
                    hard_ok,
                    pri,
                    min_soft,
                });
            }
        }
    }

    ranked.sort_by_key(|r| (r.hard_ok, r.pri, r.min_soft));
    ranked.into_iter().map(|r| r.cell).collect()
}

/// Returns (count of employees whose ABSOLUTE constraints would all hold if
/// tentatively placed here, the minimum RELATIVE-violation count among
/// those same employees). Every tentative placement is restored before the
/// next candidate is tried, via the `TrialAssignment` guard.
fn rank_candidates(schedule: &mut Schedule, pool: &EmployeePool, config: &SolverConfig, cell: Cell) -> (usize, u32) {
    let mut hard_ok = 0usize;
    let mut min_soft = u32::MAX;

    for employee in pool.iter() {
        let trial = schedule.trial_assign(cell, employee.id);
        let all_absolute_ok = employee
            .constraints
            .iter()
            .filter(|c| c.severity == Severity::Absolute)
            .all(|c| c.is_satisfied(&trial, cell, config.shift_length_hours));

        if all_absolute_ok {
            hard_ok += 1;
            // Unlike the §4.4 selector's soft_cost, the ordering tie-break
            // counts every RELATIVE violation including MINIMUM_HOURS
            // (original_source/Solver.py's slot_order soft_violations has
            // no such exclusion; only _soft_cost_eval does).
            let soft = employee
                .constraints
                .iter()
                .filter(|c| c.severity == Severity::Relative)
                .filter(|c| !c.is_satisfied(&trial, cell, config.shift_length_hours))
                .count() as u32;
            min_soft = min_soft.min(soft);
        }
        drop(trial);
    }

    if min_soft == u32::MAX {
        min_soft = 0;
    }
    (hard_ok, min_soft)
}

/// Re-exported for the selector/proposer, which need the same wrap rule
/// used by [`crate::constraint::ConstraintKind::NoDayAfterNight`].
pub(super) fn previous_day_night_cell(week: usize, day: usize) -> Option<Cell> {
    if day > 0 {
        Some((week, day - 1, 2))
    } else if week > 0 {
        Some((week - 1, 6, 2))
    } else {
        None
    }
}
