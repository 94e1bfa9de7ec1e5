//! Default per-employee constraint set and the override mechanism callers
//! use to specialize individual employees, mirroring
//! `Employee.setDefaultConstraints` / `changeConstraint` from the source
//! this crate's rules were distilled from.

use crate::constraint::{Constraint, ConstraintKind, Severity};
use crate::model::Weekday;

/// The constraint set every non-UNFILLED employee receives unless
/// overridden (spec.md SPEC_FULL §3). `enable_min_rest` gates the optional
/// `MinRest` rule behind `SolverConfig::enable_min_rest`.
pub fn default_constraints(fte: f64, enable_min_rest: bool) -> Vec<Constraint> {
    let mut constraints = vec![
        Constraint::absolute(ConstraintKind::HoursPerPayPeriod(80.0 * fte)),
        Constraint::relative(ConstraintKind::DayShiftsPerWeek(3)),
        Constraint::relative(ConstraintKind::NightShiftsPerWeek(3)),
        Constraint::absolute(ConstraintKind::WeekendRotation(1)),
        Constraint::absolute(ConstraintKind::NoDayAfterNight),
        Constraint::relative(ConstraintKind::ConsecutiveDays(3)),
        Constraint::relative(ConstraintKind::MinimumHours(80.0 * fte * 0.8)),
        Constraint::absolute(ConstraintKind::OnePerDay),
    ];

    if enable_min_rest {
        constraints.push(Constraint::relative(ConstraintKind::MinRest));
    }

    for day in Weekday::ALL {
        constraints.push(Constraint::relative(ConstraintKind::CanWork(day, true)));
    }

    constraints
}

/// Identifies a constraint's rule independent of its parameter, so
/// [`override_constraint`] can replace "the DayShiftsPerWeek rule" without
/// needing to know its current cap, and replace "CanWork(Monday)"
/// specifically without touching the other six weekdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleKey {
    HoursPerPayPeriod,
    MinimumHours,
    OnePerDay,
    DayShiftsPerWeek,
    NightShiftsPerWeek,
    WeekendRotation,
    ConsecutiveDays,
    NoDayAfterNight,
    CanWork(Weekday),
    Overloaded,
    MinRest,
    Unknown,
}

fn rule_key(kind: &ConstraintKind) -> RuleKey {
    match kind {
        ConstraintKind::HoursPerPayPeriod(_) => RuleKey::HoursPerPayPeriod,
        ConstraintKind::MinimumHours(_) => RuleKey::MinimumHours,
        ConstraintKind::OnePerDay => RuleKey::OnePerDay,
        ConstraintKind::DayShiftsPerWeek(_) => RuleKey::DayShiftsPerWeek,
        ConstraintKind::NightShiftsPerWeek(_) => RuleKey::NightShiftsPerWeek,
        ConstraintKind::WeekendRotation(_) => RuleKey::WeekendRotation,
        ConstraintKind::ConsecutiveDays(_) => RuleKey::ConsecutiveDays,
        ConstraintKind::NoDayAfterNight => RuleKey::NoDayAfterNight,
        ConstraintKind::CanWork(day, _) => RuleKey::CanWork(*day),
        ConstraintKind::Overloaded(_) => RuleKey::Overloaded,
        ConstraintKind::MinRest => RuleKey::MinRest,
        ConstraintKind::Unknown(_) => RuleKey::Unknown,
    }
}

/// Replaces any existing constraint of the same rule (see [`RuleKey`]) with
/// `replacement`, or appends it if the employee didn't have one yet.
pub fn override_constraint(constraints: &mut Vec<Constraint>, replacement: Constraint) {
    let key = rule_key(&replacement.kind);
    constraints.retain(|c| rule_key(&c.kind) != key);
    constraints.push(replacement);
}

/// Convenience for the common case of denying/forbidding a rule outright
/// (e.g. "no night shifts", "cannot work Mondays") with ABSOLUTE severity.
pub fn deny(constraints: &mut Vec<Constraint>, kind: ConstraintKind) {
    override_constraint(constraints, Constraint::new(kind, Severity::Absolute));
}
