//! The constraint catalogue: a tagged variant per rule, each carrying its
//! own parameter and implementing its own predicate. This replaces the
//! name-keyed conditional dispatch of the rule's original form with an
//! exhaustively-matched enum, per the "Constraint dispatch" design note.

use crate::model::{Cell, Schedule, Weekday};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Controls only scoring, never predicate semantics: an ABSOLUTE and a
/// RELATIVE constraint of the same kind and parameter evaluate identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Severity {
    Absolute,
    Relative,
}

/// One rule from the per-employee catalogue (spec.md §3), parameterized.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConstraintKind {
    /// Total hours across the pay period containing `week` must not exceed
    /// this cap. Evaluated only at odd weeks.
    HoursPerPayPeriod(f64),
    /// Symmetric lower bound on pay-period hours, evaluated only at odd
    /// weeks.
    MinimumHours(f64),
    /// At most one slot per day for this employee.
    OnePerDay,
    /// Upper bound on day-shift (D1+D2) count this week.
    DayShiftsPerWeek(u32),
    /// Upper bound on night-shift count this week.
    NightShiftsPerWeek(u32),
    /// Maximum run length of consecutive weeks with any weekend cell worked.
    WeekendRotation(u32),
    /// Longest run of worked days within one week.
    ConsecutiveDays(u32),
    /// No night shift in the 1-2 days before a day shift, and no day shift
    /// the day after a night shift, wrapping across week boundaries.
    NoDayAfterNight,
    /// Whether this employee may work on the given weekday at all.
    CanWork(Weekday, bool),
    /// Upper bound on total shifts (any slot) this week.
    Overloaded(u32),
    /// No two slots same day, and at least one full rest day between
    /// worked stretches. Optional, gated behind `SolverConfig::enable_min_rest`.
    MinRest,
    /// A constraint kind unrecognised by this build (e.g. loaded from a
    /// newer config file). Always satisfied; logged once per evaluation.
    Unknown(String),
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::HoursPerPayPeriod(cap) => write!(f, "hours per pay period <= {cap}"),
            ConstraintKind::MinimumHours(min) => write!(f, "minimum hours >= {min}"),
            ConstraintKind::OnePerDay => write!(f, "one slot per day"),
            ConstraintKind::DayShiftsPerWeek(cap) => write!(f, "day shifts per week <= {cap}"),
            ConstraintKind::NightShiftsPerWeek(cap) => write!(f, "night shifts per week <= {cap}"),
            ConstraintKind::WeekendRotation(cap) => write!(f, "weekend rotation <= {cap} consecutive weeks"),
            ConstraintKind::ConsecutiveDays(cap) => write!(f, "consecutive days <= {cap}"),
            ConstraintKind::NoDayAfterNight => write!(f, "no day shift after night"),
            ConstraintKind::CanWork(day, allowed) => write!(f, "can work {day} = {allowed}"),
            ConstraintKind::Overloaded(cap) => write!(f, "shifts per week <= {cap}"),
            ConstraintKind::MinRest => write!(f, "minimum rest between stretches"),
            ConstraintKind::Unknown(name) => write!(f, "unknown constraint {name}"),
        }
    }
}

/// A constraint attached to one employee: rule plus severity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub severity: Severity,
}

impl Constraint {
    pub fn new(kind: ConstraintKind, severity: Severity) -> Self {
        Self { kind, severity }
    }

    pub fn absolute(kind: ConstraintKind) -> Self {
        Self::new(kind, Severity::Absolute)
    }

    pub fn relative(kind: ConstraintKind) -> Self {
        Self::new(kind, Severity::Relative)
    }

    /// Evaluates the predicate for the employee currently occupying `cell`.
    /// Returns `true` (the rule does not apply) if that cell is UNFILLED.
    /// Never mutates `schedule`.
    pub fn is_satisfied(&self, schedule: &Schedule, cell: Cell, shift_length_hours: f64) -> bool {
        let (week, day, slot) = cell;
        let emp = schedule.get(week, day, slot);
        if emp.is_unfilled() {
            return true;
        }

        match &self.kind {
            ConstraintKind::OnePerDay => schedule.day_slots(week, day).iter().filter(|&&e| e == emp).count() <= 1,

            ConstraintKind::DayShiftsPerWeek(cap) => {
                let count = (0..crate::model::DAYS_PER_WEEK)
                    .flat_map(|d| [0usize, 1usize].into_iter().map(move |s| (d, s)))
                    .filter(|&(d, s)| schedule.get(week, d, s) == emp)
                    .count();
                count as u32 <= *cap
            }

            ConstraintKind::NightShiftsPerWeek(cap) => {
                let count = (0..crate::model::DAYS_PER_WEEK).filter(|&d| schedule.get(week, d, 2) == emp).count();
                count as u32 <= *cap
            }

            ConstraintKind::WeekendRotation(cap) => weekend_rotation_satisfied(schedule, emp, *cap),

            ConstraintKind::ConsecutiveDays(cap) => {
                let mut max_run = 0u32;
                let mut run = 0u32;
                for d in 0..crate::model::DAYS_PER_WEEK {
                    if schedule.day_slots(week, d).contains(&emp) {
                        run += 1;
                        max_run = max_run.max(run);
                    } else {
                        run = 0;
                    }
                }
                max_run <= *cap
            }

            ConstraintKind::NoDayAfterNight => no_day_after_night_satisfied(schedule, emp, week, day, slot),

            ConstraintKind::CanWork(target_day, allowed) => {
                if Weekday::from_index(day) == *target_day && !*allowed {
                    false
                } else {
                    true
                }
            }

            ConstraintKind::Overloaded(cap) => {
                let count = (0..crate::model::DAYS_PER_WEEK)
                    .flat_map(|d| (0..crate::model::SLOTS_PER_DAY).map(move |s| (d, s)))
                    .filter(|&(d, s)| schedule.get(week, d, s) == emp)
                    .count();
                count as u32 <= *cap
            }

            ConstraintKind::HoursPerPayPeriod(cap) => {
                if week % 2 == 0 {
                    return true;
                }
                pay_period_hours(schedule, emp, week, shift_length_hours) <= *cap
            }

            ConstraintKind::MinimumHours(min) => {
                if week % 2 == 0 {
                    return true;
                }
                pay_period_hours(schedule, emp, week, shift_length_hours) >= *min
            }

            ConstraintKind::MinRest => min_rest_satisfied(schedule, emp, week, day, slot),

            ConstraintKind::Unknown(name) => {
                tracing::debug!(constraint = %name, "unhandled constraint kind, treating as satisfied");
                true
            }
        }
    }
}

/// Two-week pay period window `[w-1, w]` for an odd week `w` (spec.md §9
/// resolves the original's inconsistent `[w-1,w+1)` / `[w,w+2)` windows to
/// this inclusive two-week span).
fn pay_period_hours(schedule: &Schedule, emp: crate::model::EmployeeId, week: usize, shift_length_hours: f64) -> f64 {
    debug_assert!(week % 2 == 1);
    let start = week - 1;
    let mut shifts = 0u32;
    for w in start..=week {
        for d in 0..crate::model::DAYS_PER_WEEK {
            for s in 0..crate::model::SLOTS_PER_DAY {
                if schedule.get(w, d, s) == emp {
                    shifts += 1;
                }
            }
        }
    }
    f64::from(shifts) * shift_length_hours
}

fn weekend_rotation_satisfied(schedule: &Schedule, emp: crate::model::EmployeeId, cap: u32) -> bool {
    let worked_weekend = |w: usize| -> bool {
        [Weekday::Saturday.index(), Weekday::Sunday.index()]
            .into_iter()
            .any(|d| schedule.day_slots(w, d).contains(&emp))
    };

    let weeks: Vec<usize> = (0..schedule.weeks()).filter(|&w| worked_weekend(w)).collect();
    if weeks.is_empty() {
        return true;
    }

    let mut max_run = 1u32;
    let mut run = 1u32;
    for pair in weeks.windows(2) {
        if pair[1] == pair[0] + 1 {
            run += 1;
        } else {
            run = 1;
        }
        max_run = max_run.max(run);
    }
    max_run <= cap
}

fn no_day_after_night_satisfied(
    schedule: &Schedule,
    emp: crate::model::EmployeeId,
    week: usize,
    day: usize,
    slot: usize,
) -> bool {
    if slot == 0 || slot == 1 {
        if day > 0 {
            schedule.get(week, day - 1, 2) != emp
        } else if week > 0 {
            schedule.get(week - 1, 6, 2) != emp
        } else {
            true
        }
    } else {
        // slot == 2 (night): no day shift the following day.
        if day < crate::model::DAYS_PER_WEEK - 1 {
            schedule.get(week, day + 1, 0) != emp && schedule.get(week, day + 1, 1) != emp
        } else if week + 1 < schedule.weeks() {
            schedule.get(week + 1, 0, 0) != emp && schedule.get(week + 1, 0, 1) != emp
        } else {
            true
        }
    }
}

fn min_rest_satisfied(schedule: &Schedule, emp: crate::model::EmployeeId, week: usize, day: usize, slot: usize) -> bool {
    let today = schedule.day_slots(week, day);
    let same_day_conflict = match slot {
        0 => today[1] == emp || today[2] == emp,
        1 => today[0] == emp || today[2] == emp,
        _ => today[1] == emp || today[0] == emp,
    };
    if same_day_conflict {
        return false;
    }

    if week == 0 && day == 0 {
        return true;
    }

    if day > 1 {
        let prev1 = schedule.day_slots(week, day - 1);
        let prev2 = schedule.day_slots(week, day - 2);
        if !prev1.contains(&emp) && prev2.contains(&emp) {
            return false;
        }
    } else if week > 0 {
        let prev_sunday = schedule.day_slots(week - 1, 6);
        let prev_saturday = schedule.day_slots(week - 1, 5);
        if !prev_sunday.contains(&emp) && prev_saturday.contains(&emp) {
            return false;
        }
    }

    true
}

/// The three whole-grid coverage rules, always ABSOLUTE (spec.md §3's
/// "Global" catalogue). Kept as a distinct, closed enum rather than folded
/// into [`ConstraintKind`] since they are evaluated once globally and never
/// attached to an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalConstraintKind {
    D1Filled,
    D2Filled,
    NFilled,
}

impl GlobalConstraintKind {
    pub const ALL: [GlobalConstraintKind; 3] = [
        GlobalConstraintKind::D1Filled,
        GlobalConstraintKind::D2Filled,
        GlobalConstraintKind::NFilled,
    ];

    pub fn is_satisfied(self, schedule: &Schedule) -> bool {
        match self {
            GlobalConstraintKind::D1Filled => {
                (0..schedule.weeks()).all(|w| (0..crate::model::DAYS_PER_WEEK).all(|d| !schedule.get(w, d, 0).is_unfilled()))
            }
            GlobalConstraintKind::D2Filled => (0..schedule.weeks()).all(|w| {
                (0..crate::model::DAYS_PER_WEEK).all(|d| {
                    if !d2_required(w, d) {
                        true
                    } else {
                        !schedule.get(w, d, 1).is_unfilled()
                    }
                })
            }),
            GlobalConstraintKind::NFilled => {
                (0..schedule.weeks()).all(|w| (0..crate::model::DAYS_PER_WEEK).all(|d| !schedule.get(w, d, 2).is_unfilled()))
            }
        }
    }
}

impl fmt::Display for GlobalConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GlobalConstraintKind::D1Filled => "D1 coverage",
            GlobalConstraintKind::D2Filled => "D2 coverage",
            GlobalConstraintKind::NFilled => "N coverage",
        };
        write!(f, "{name}")
    }
}

/// Whether D2 exists at all on (week, day): absent Tue/Fri, and absent on
/// weekend days of odd-indexed weeks (the biweekly weekend-off pattern).
pub fn d2_required(week: usize, day: usize) -> bool {
    let weekday = Weekday::from_index(day);
    if matches!(weekday, Weekday::Tuesday | Weekday::Friday) {
        return false;
    }
    if weekday.is_weekend() && week % 2 == 1 {
        return false;
    }
    true
}
