//! Shared test roster: David/Josh/Kati/Britt/Liz/Megan/Ashley, matching the
//! per-employee overrides from the source this constraint set was
//! distilled from. Exercises every override path: David's
//! Mon/Tue/Fri-and-night ban, Kati's no-nights, Britt's no-Wednesday plus a
//! widened consecutive-days cap, Liz/Ashley's all-zero day-shift ban.

#![allow(dead_code)]

use shift_solver::{default_constraints, deny, override_constraint, Constraint, ConstraintKind, EmployeeId, EmployeePool, Schedule, Severity, Weekday};
use std::collections::HashMap;

pub struct Roster {
    pub pool: EmployeePool,
    pub ids: HashMap<&'static str, EmployeeId>,
}

pub fn build_roster(enable_min_rest: bool) -> Roster {
    let mut pool = EmployeePool::new();
    let mut ids = HashMap::new();

    let mut insert = |pool: &mut EmployeePool, name: &'static str, fte: f64, constraints: Vec<Constraint>| {
        let id = pool.insert(name, fte, constraints);
        ids.insert(name, id);
    };

    let mut david = default_constraints(0.5, enable_min_rest);
    override_constraint(&mut david, Constraint::absolute(ConstraintKind::NightShiftsPerWeek(0)));
    deny(&mut david, ConstraintKind::CanWork(Weekday::Monday, false));
    deny(&mut david, ConstraintKind::CanWork(Weekday::Tuesday, false));
    deny(&mut david, ConstraintKind::CanWork(Weekday::Friday, false));
    insert(&mut pool, "David", 0.5, david);

    insert(&mut pool, "Josh", 1.0, default_constraints(1.0, enable_min_rest));

    let mut kati = default_constraints(1.0, enable_min_rest);
    override_constraint(&mut kati, Constraint::absolute(ConstraintKind::NightShiftsPerWeek(0)));
    insert(&mut pool, "Kati", 1.0, kati);

    let mut britt = default_constraints(1.0, enable_min_rest);
    override_constraint(&mut britt, Constraint::absolute(ConstraintKind::NightShiftsPerWeek(0)));
    deny(&mut britt, ConstraintKind::CanWork(Weekday::Wednesday, false));
    override_constraint(&mut britt, Constraint::absolute(ConstraintKind::ConsecutiveDays(5)));
    insert(&mut pool, "Britt", 1.0, britt);

    let mut liz = default_constraints(1.0, enable_min_rest);
    override_constraint(&mut liz, Constraint::absolute(ConstraintKind::DayShiftsPerWeek(0)));
    insert(&mut pool, "Liz", 1.0, liz);

    insert(&mut pool, "Megan", 1.0, default_constraints(1.0, enable_min_rest));

    let mut ashley = default_constraints(1.0, enable_min_rest);
    override_constraint(&mut ashley, Constraint::absolute(ConstraintKind::DayShiftsPerWeek(0)));
    insert(&mut pool, "Ashley", 1.0, ashley);

    Roster { pool, ids }
}

/// Returns `true` if `severity` is [`Severity::Absolute`]; convenience for
/// tests that filter a constraint list down to hard rules.
pub fn is_absolute(severity: Severity) -> bool {
    matches!(severity, Severity::Absolute)
}

/// Seeds every Saturday/Sunday cell of `schedule`, the way the external
/// templater is expected to (spec.md §6: "pre-populated for weekends").
/// Alternates the D1/D2/N weekend rosters week-to-week so no employee
/// works two consecutive weekends (`WEEKEND_ROTATION <= 1`, the default).
/// D2 is only seeded on even weeks, matching `d2_required`'s biweekly
/// weekend-off pattern.
pub fn seed_weekends(schedule: &mut Schedule, roster: &Roster) {
    let day_pool = [roster.ids["Josh"], roster.ids["Megan"]];
    let d2_pool = [roster.ids["Britt"], roster.ids["Kati"]];
    let night_pool = [roster.ids["Liz"], roster.ids["Ashley"]];

    for week in 0..schedule.weeks() {
        let day = day_pool[week % 2];
        let night = night_pool[week % 2];
        for &weekend_day in &[Weekday::Saturday.index(), Weekday::Sunday.index()] {
            schedule.set(week, weekend_day, 0, day);
            schedule.set(week, weekend_day, 2, night);
            if week % 2 == 0 {
                schedule.set(week, weekend_day, 1, d2_pool[(week / 2) % 2]);
            }
        }
    }
}
