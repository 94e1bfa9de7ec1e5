//! End-to-end scenarios from spec.md §8, run against the public `solve`
//! entry point and the roster shared with `tests/invariants.rs`.

mod common;

use common::{build_roster, seed_weekends};
use shift_solver::{feasibility, score, ConstraintKind, Schedule, SolverConfig, Weekday};

/// Scenario 1 (standard roster): seeded weekends, 4 weeks, the full
/// David/Josh/Kati/Britt/Liz/Megan/Ashley roster. The orchestrator's
/// snapshot/rollback discipline guarantees the final score never exceeds
/// the seeded starting score (spec.md §8 property 7), regardless of how
/// far the heuristic search gets within the epoch budget.
#[test]
fn standard_roster_four_weeks_never_regresses_past_seed() {
    let roster = build_roster(false);
    let mut schedule = Schedule::new(4);
    seed_weekends(&mut schedule, &roster);

    let config = SolverConfig::default();
    let seeded_score = score(&schedule, &roster.pool, &config);

    let outcome = shift_solver::solve(schedule, &roster.pool, &config, 1234).expect("feasible roster should solve");

    assert!(
        outcome.final_score <= seeded_score,
        "final score {} regressed past the seeded score {}",
        outcome.final_score,
        seeded_score
    );
    assert!(outcome.final_score >= 0.0);
    // Bounded by the grid size: `unresolved` only ever lists weekday
    // cells, so it can never exceed the number of weekday cells that
    // exist at all (4 weeks * 5 weekdays * 3 slots).
    let weekday_cells = 4 * 5 * 3;
    assert!(
        outcome.unresolved.len() <= weekday_cells,
        "unresolved count {} exceeds total weekday cells {}",
        outcome.unresolved.len(),
        weekday_cells
    );
}

/// Scenario 2 (David-style restriction): David cannot work Monday, Tuesday,
/// Friday, or any night shift. Checked directly against the constraint
/// predicates David actually carries, independent of solver convergence.
#[test]
fn david_restriction_constraints_reject_forbidden_placements() {
    let roster = build_roster(false);
    let david = roster.ids["David"];
    let mut schedule = Schedule::new(2);

    let night_cap = roster
        .pool
        .get(david)
        .constraints
        .iter()
        .find(|c| matches!(c.kind, ConstraintKind::NightShiftsPerWeek(0)))
        .expect("David has an absolute zero-nights constraint");
    let monday_ban = roster
        .pool
        .get(david)
        .constraints
        .iter()
        .find(|c| matches!(c.kind, ConstraintKind::CanWork(Weekday::Monday, false)))
        .expect("David has an absolute Monday ban");

    schedule.set(0, Weekday::Monday.index(), 0, david);
    assert!(!monday_ban.is_satisfied(&schedule, (0, Weekday::Monday.index(), 0), 12.0));

    schedule.set(0, Weekday::Monday.index(), 0, shift_solver::EmployeeId::UNFILLED);
    schedule.set(0, Weekday::Wednesday.index(), 2, david);
    assert!(!night_cap.is_satisfied(&schedule, (0, Weekday::Wednesday.index(), 2), 12.0));
}

/// Scenario 3 (all-zero DAYSHIFTS_PER_WEEK): Liz's absolute
/// `DayShiftsPerWeek(0)` rejects any D1 or D2 placement, so she can only
/// ever legally appear in a night cell.
#[test]
fn zero_dayshifts_employee_cannot_occupy_day_slots() {
    let roster = build_roster(false);
    let liz = roster.ids["Liz"];
    let mut schedule = Schedule::new(1);

    let day_cap = roster
        .pool
        .get(liz)
        .constraints
        .iter()
        .find(|c| matches!(c.kind, ConstraintKind::DayShiftsPerWeek(0)))
        .expect("Liz has an absolute zero-dayshifts constraint");

    schedule.set(0, Weekday::Wednesday.index(), 0, liz);
    assert!(!day_cap.is_satisfied(&schedule, (0, Weekday::Wednesday.index(), 0), 12.0));

    schedule.set(0, Weekday::Wednesday.index(), 0, shift_solver::EmployeeId::UNFILLED);
    schedule.set(0, Weekday::Thursday.index(), 1, liz);
    assert!(!day_cap.is_satisfied(&schedule, (0, Weekday::Thursday.index(), 1), 12.0));

    // A night placement never touches DayShiftsPerWeek at all.
    schedule.set(0, Weekday::Thursday.index(), 1, shift_solver::EmployeeId::UNFILLED);
    schedule.set(0, Weekday::Friday.index(), 2, liz);
    assert!(day_cap.is_satisfied(&schedule, (0, Weekday::Friday.index(), 2), 12.0));
}

/// Scenario 4 (impossible feasibility): total staff-hour capacity far
/// below the required shift-hours. The feasibility pre-check must catch
/// this before the solver is ever invoked (spec.md §7).
#[test]
fn infeasible_roster_is_rejected_before_solving() {
    let mut pool = shift_solver::EmployeePool::new();
    // A single half-FTE employee: 40h cap per pay period, nowhere near
    // enough to cover even two weeks of a full roster's worth of shifts.
    pool.insert("Solo", 0.5, shift_solver::default_constraints(0.5, false));

    let config = SolverConfig::default();
    let report = feasibility::check(&pool, 8, &config);
    assert!(!report.is_feasible());
    assert!(report.required_hours > report.available_hours);

    let schedule = Schedule::new(8);
    let result = shift_solver::solve(schedule, &pool, &config, 1);
    assert!(matches!(result, Err(shift_solver::SolverError::Infeasible(_))));
}

/// Scenario 5 (single remaining violation): a schedule with exactly one
/// violating weekday cell and everything else valid should be resolvable
/// without the rest of the grid regressing -- repair's single-violation
/// path is the same machinery as the proposer's (spec.md §4.5/§4.7).
#[test]
fn single_violation_does_not_regress_the_rest_of_the_grid() {
    let roster = build_roster(false);
    let mut schedule = Schedule::new(2);
    seed_weekends(&mut schedule, &roster);

    // Josh on five consecutive weekdays breaches his relative
    // ConsecutiveDays(3) cap once, but not any ABSOLUTE rule -- this seeds
    // a RELATIVE violation for repair/annealing to clean up, not a
    // conflicting assignment the solver must undo elsewhere.
    let josh = roster.ids["Josh"];
    for day in 0..5 {
        schedule.set(0, day, 0, josh);
    }

    let config = SolverConfig::default();
    let seeded_score = score(&schedule, &roster.pool, &config);
    let outcome = shift_solver::solve(schedule, &roster.pool, &config, 7).expect("feasible roster should solve");
    assert!(outcome.final_score <= seeded_score);
}
