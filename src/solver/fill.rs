//! Minimum-hours fill phase, mirroring `Solver.finalFillMinimums`.

use super::hours::HoursLedger;
use crate::config::SolverConfig;
use crate::constraint::ConstraintKind;
use crate::evaluator::score;
use crate::model::{Cell, EmployeeId, EmployeePool, Schedule, Weekday, DAYS_PER_WEEK};

const CROSS_THRESHOLD_BONUS: f64 = -500.0;
const PARTIAL_PROGRESS_BONUS: f64 = -100.0;

/// For each employee with a `MINIMUM_HOURS` shortfall in some pay period,
/// tentatively fills an open hole within that period and keeps the plan if
/// its score delta (including the threshold bonuses) is negative. Iterates
/// until no further improving placement exists.
pub(super) fn fill_minimums(schedule: &mut Schedule, pool: &EmployeePool, config: &SolverConfig) {
    loop {
        let hours = HoursLedger::from_schedule(schedule, pool.len(), config.shift_length_hours);
        let current_score = score(schedule, pool, config);

        let mut best_plan: Option<(Cell, EmployeeId, f64)> = None;

        for employee in pool.iter() {
            let min = employee.constraints.iter().find_map(|c| match c.kind {
                ConstraintKind::MinimumHours(min) => Some(min),
                _ => None,
            });
            let cap = employee.constraints.iter().find_map(|c| match c.kind {
                ConstraintKind::HoursPerPayPeriod(cap) => Some(cap),
                _ => None,
            });
            let (Some(min), Some(cap)) = (min, cap) else { continue };

            for pay_period_start in (0..schedule.weeks()).step_by(2) {
                let end = (pay_period_start + 1).min(schedule.weeks().saturating_sub(1));
                let before = hours.pay_period_hours(end, employee.id);
                if before >= min {
                    continue;
                }

                for week in pay_period_start..=end {
                    for day in 0..DAYS_PER_WEEK {
                        if Weekday::from_index(day).is_weekend() {
                            continue;
                        }
                        for slot in 0..crate::model::SLOTS_PER_DAY {
                            let cell = (week, day, slot);
                            if !schedule.get(week, day, slot).is_unfilled() {
                                continue;
                            }
                            if schedule.day_slots(week, day).contains(&employee.id) {
                                continue;
                            }

                            let after = before + config.shift_length_hours;
                            if after > cap {
                                continue;
                            }

                            let delta_score = {
                                let trial = schedule.trial_assign(cell, employee.id);
                                score(&trial, pool, config) - current_score
                            };

                            let bonus = if before < min && min <= after {
                                CROSS_THRESHOLD_BONUS
                            } else if before < after && after < min {
                                PARTIAL_PROGRESS_BONUS
                            } else {
                                0.0
                            };

                            let delta = delta_score + bonus;
                            if delta < 0.0 {
                                let better = match &best_plan {
                                    None => true,
                                    Some((_, _, best_delta)) => delta < *best_delta,
                                };
                                if better {
                                    best_plan = Some((cell, employee.id, delta));
                                }
                            }
                        }
                    }
                }
            }
        }

        match best_plan {
            Some((cell, employee, _delta)) => {
                schedule.set(cell.0, cell.1, cell.2, employee);
            }
            None => break,
        }
    }
}
