//! Recognised solver configuration options (spec.md §6).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunables for one solver run. Defaults mirror the original implementation's
/// module-level constants exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Per-absolute-violation weight in scoring.
    pub abs_penalty: f64,
    /// Maximum greedy annealing iterations.
    pub epoch_limit: u32,
    /// Starting temperature for the Metropolis acceptance criterion.
    pub initial_temperature: f64,
    /// Base multiplicative cooling rate applied each epoch.
    pub cooling_base: f64,
    /// Epochs without improvement before an impatient restart.
    pub patience: u32,
    /// Hours represented by a single shift. All hours arithmetic derives
    /// from this constant, never from wall-clock time.
    pub shift_length_hours: f64,
    /// Gates the optional `MinRest` constraint (absent from the source's
    /// default employee catalogue; spec.md §9 leaves it as a flag).
    pub enable_min_rest: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            abs_penalty: 10_000.0,
            epoch_limit: 1_000,
            initial_temperature: 1_000.0,
            cooling_base: 0.9995,
            patience: 300,
            shift_length_hours: 12.0,
            enable_min_rest: false,
        }
    }
}

/// Per-unfilled-required-slot scoring penalty. Not a recognised
/// configuration option (spec.md §6 enumerates only the tunables above);
/// fixed at the value spec.md §4.2 specifies.
pub const UNFILLED_PENALTY: f64 = 50.0;
