//! Pre-solve capacity check: does total employee staff-hour capacity even
//! cover the required shift-hours for the run? Mirrors the original
//! implementation's feasibility gate; the solver itself is never invoked
//! when this fails (spec.md §7).

use crate::config::SolverConfig;
use crate::constraint::ConstraintKind;
use crate::model::EmployeePool;

/// Result of the pre-solve capacity check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeasibilityReport {
    pub required_hours: f64,
    pub available_hours: f64,
}

impl FeasibilityReport {
    pub fn is_feasible(&self) -> bool {
        self.available_hours >= self.required_hours
    }
}

/// Computes the staff-hours required to cover `weeks` of schedule (weekday
/// D1/D2/N per the biweekly D2 pattern, plus a fixed weekend allotment) and
/// compares it against the sum of every employee's `HOURS_PER_PAY_PERIOD`
/// cap across the run.
pub fn check(pool: &EmployeePool, weeks: usize, config: &SolverConfig) -> FeasibilityReport {
    let even_weeks = weeks / 2;
    let odd_weeks = weeks - even_weeks;

    // Weekdays (Mon-Fri): even weeks get D1+D2+N = 3 shifts/day, odd weeks
    // drop D2 on Tue/Fri (3 of 5 weekdays keep it) -- approximated, like the
    // original, as a flat "2 shifts/day average" on odd weeks.
    let weekday_shifts = even_weeks * (3 * 5) + odd_weeks * (2 * 5);
    // Weekends: 2 days * 2 shifts/day (D1/N; D2 never runs on weekends).
    let weekend_shifts = weeks * (2 * 2);

    let required_hours = (weekday_shifts + weekend_shifts) as f64 * config.shift_length_hours;

    let pay_periods = (weeks as f64 / 2.0).ceil();
    let available_hours: f64 = pool
        .iter()
        .filter_map(|employee| {
            employee.constraints.iter().find_map(|c| match c.kind {
                ConstraintKind::HoursPerPayPeriod(cap) => Some(cap),
                _ => None,
            })
        })
        .map(|cap| cap * pay_periods)
        .sum();

    FeasibilityReport {
        required_hours,
        available_hours,
    }
}
