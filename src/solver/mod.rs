//! The solver proper: greedy annealing, repair, minimum-hours fill and the
//! final absolute-violation sweep, each phase snapshotted and rolled back
//! on regression. Mirrors `Solver.run` / `stateHandler` from the source
//! this pipeline was distilled from.

mod annealing;
mod fill;
mod hours;
mod ordering;
mod proposer;
mod repair;
mod selector;
mod sweep;

use crate::config::SolverConfig;
use crate::error::{SolverError, SolverOutcome};
use crate::evaluator::score;
use crate::feasibility;
use crate::model::{EmployeePool, Schedule, DAYS_PER_WEEK, SLOTS_PER_DAY};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Runs the full four-phase pipeline against `schedule` and returns the
/// final outcome. Fails fast with [`SolverError::Infeasible`] if the
/// pre-solve capacity check doesn't clear, and with
/// [`SolverError::MalformedGrid`] if `schedule`'s shape doesn't match
/// `pool`'s expectations (spec.md §7 validates at entry).
pub fn solve(mut schedule: Schedule, pool: &EmployeePool, config: &SolverConfig, seed: u64) -> Result<SolverOutcome, SolverError> {
    validate_shape(&schedule)?;

    let report = feasibility::check(pool, schedule.weeks(), config);
    if !report.is_feasible() {
        return Err(SolverError::infeasible(report));
    }

    let mut rng = StdRng::seed_from_u64(seed);

    tracing::info!(weeks = schedule.weeks(), employees = pool.len(), "starting greedy annealing phase");
    let annealed = annealing::run(schedule.clone(), pool, config, &mut rng);
    let mut history = annealed.history;
    let pre_repair_snapshot = (annealed.schedule.clone(), annealed.score);
    schedule = annealed.schedule;

    tracing::info!(score = pre_repair_snapshot.1, "starting repair phase");
    repair::repair(&mut schedule, pool, config);
    let repaired_score = score(&schedule, pool, config);
    if repaired_score > pre_repair_snapshot.1 {
        tracing::info!(before = pre_repair_snapshot.1, after = repaired_score, "repair regressed, rolling back");
        schedule = pre_repair_snapshot.0;
    }
    let pre_fill_snapshot = (schedule.clone(), score(&schedule, pool, config));

    tracing::info!(score = pre_fill_snapshot.1, "starting minimum-hours fill phase");
    fill::fill_minimums(&mut schedule, pool, config);
    let filled_score = score(&schedule, pool, config);
    if filled_score > pre_fill_snapshot.1 {
        tracing::info!(before = pre_fill_snapshot.1, after = filled_score, "minimum-hours fill regressed, rolling back");
        schedule = pre_fill_snapshot.0;
    }
    let pre_sweep_snapshot = (schedule.clone(), score(&schedule, pool, config));

    tracing::info!(score = pre_sweep_snapshot.1, "starting absolute-violation sweep");
    let mut unresolved = sweep::sweep(&mut schedule, pool, config);
    let swept_score = score(&schedule, pool, config);
    if swept_score > pre_sweep_snapshot.1 {
        tracing::info!(before = pre_sweep_snapshot.1, after = swept_score, "sweep regressed, rolling back");
        schedule = pre_sweep_snapshot.0;
        unresolved = sweep::collect_unresolved(&schedule, pool, config);
    }

    let final_score = score(&schedule, pool, config);
    history.push((config.epoch_limit, final_score));

    if !unresolved.is_empty() {
        tracing::warn!(count = unresolved.len(), "absolute violations remain after sweep");
    }
    tracing::info!(final_score, "solver finished");

    Ok(SolverOutcome {
        schedule,
        final_score,
        history,
        unresolved,
    })
}

fn validate_shape(schedule: &Schedule) -> Result<(), SolverError> {
    if schedule.weeks() == 0 {
        return Err(SolverError::MalformedGrid {
            expected: (1, DAYS_PER_WEEK, SLOTS_PER_DAY),
            actual: (0, DAYS_PER_WEEK, SLOTS_PER_DAY),
        });
    }
    Ok(())
}
