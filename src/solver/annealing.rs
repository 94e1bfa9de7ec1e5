//! Greedy simulated-annealing phase, mirroring `Solver.run` / `_anneal`.

use super::hours::HoursLedger;
use super::proposer::propose_move;
use crate::config::SolverConfig;
use crate::evaluator::score;
use crate::model::{Cell, EmployeePool, Schedule};
use rand::rngs::StdRng;
use rand::Rng;

/// Outcome of the greedy phase: the best schedule seen (not necessarily the
/// last one visited), its score, and the epoch/score history for callers
/// that want to plot convergence.
pub(super) struct AnnealResult {
    pub(super) schedule: Schedule,
    pub(super) score: f64,
    pub(super) history: Vec<(u32, f64)>,
}

/// Clips `cooling_base * (1 - (accept_rate - 0.5) / 2)` to `[0.9, 1.1]`,
/// the self-tuning cooling factor from the original's annealing loop.
fn cooling_factor(config: &SolverConfig, accept_rate: f64) -> f64 {
    let raw = config.cooling_base * (1.0 - (accept_rate - 0.5) / 2.0);
    raw.clamp(0.9, 1.1)
}

pub(super) fn run(schedule: Schedule, pool: &EmployeePool, config: &SolverConfig, rng: &mut StdRng) -> AnnealResult {
    let mut current = schedule;
    let mut hours = HoursLedger::from_schedule(&current, pool.len(), config.shift_length_hours);
    let mut current_score = score(&current, pool, config);

    let mut best = current.clone();
    let mut best_score = current_score;

    let mut temperature = config.initial_temperature;
    let mut epochs_without_improvement = 0u32;
    let mut accepted = 0u32;
    let mut attempted = 0u32;
    let mut last_filled: Option<Cell> = None;
    let mut history = Vec::new();

    for epoch in 0..config.epoch_limit {
        if epochs_without_improvement >= config.patience {
            current = best.clone();
            current_score = best_score;
            hours = HoursLedger::from_schedule(&current, pool.len(), config.shift_length_hours);
            temperature = config.initial_temperature;
            epochs_without_improvement = 0;
        }

        let Some(mv) = propose_move(&mut current, pool, config, &hours, current_score, rng, &mut last_filled) else {
            break;
        };
        attempted += 1;

        let candidate_score = score(&current, pool, config);
        let delta = candidate_score - current_score;
        let accept = delta < 0.0 || rng.random::<f64>() < (-delta / temperature).exp();

        if accept {
            apply_hours_delta(&mut hours, &current, config, &mv);
            current_score = candidate_score;
            accepted += 1;
            epochs_without_improvement = 0;
        } else {
            mv.revert(&mut current);
            epochs_without_improvement += 1;
        }

        if current_score < best_score {
            best = current.clone();
            best_score = current_score;
        }

        if epoch % 100 == 0 {
            tracing::info!(epoch, score = current_score, best = best_score, temperature, "annealing progress");
            history.push((epoch, current_score));
        }

        let accept_rate = if attempted > 0 { f64::from(accepted) / f64::from(attempted) } else { 0.5 };
        temperature *= cooling_factor(config, accept_rate);
    }

    history.push((config.epoch_limit, best_score));
    tracing::info!(final_score = best_score, "annealing phase complete");

    AnnealResult {
        schedule: best,
        score: best_score,
        history,
    }
}

/// Rebuilds the ledger entries touched by an accepted move rather than
/// recomputing the whole ledger from scratch every epoch.
fn apply_hours_delta(hours: &mut HoursLedger, schedule: &Schedule, config: &SolverConfig, mv: &super::proposer::Move) {
    use super::proposer::Move;
    match mv {
        Move::Fill { cell, previous } => {
            let now = schedule.get(cell.0, cell.1, cell.2);
            if !previous.is_unfilled() {
                hours.subtract(cell.0, *previous, config.shift_length_hours);
            }
            if !now.is_unfilled() {
                hours.add(cell.0, now, config.shift_length_hours);
            }
        }
        Move::Swap { a, b, previous_a, previous_b } => {
            if !previous_a.is_unfilled() {
                hours.subtract(a.0, *previous_a, config.shift_length_hours);
            }
            if !previous_b.is_unfilled() {
                hours.subtract(b.0, *previous_b, config.shift_length_hours);
            }
            let now_a = schedule.get(a.0, a.1, a.2);
            let now_b = schedule.get(b.0, b.1, b.2);
            if !now_a.is_unfilled() {
                hours.add(a.0, now_a, config.shift_length_hours);
            }
            if !now_b.is_unfilled() {
                hours.add(b.0, now_b, config.shift_length_hours);
            }
        }
    }
}
