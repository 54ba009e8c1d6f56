use serde::{Deserialize, Serialize};

use crate::planner::constants::{EARLY_STOP_FRACTION, PORTION_COST_FACTOR};

/// Tunables for meal allocation and budget costing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Stop filling a slot once it reaches this fraction of its target.
    pub early_stop_fraction: f64,
    /// Share of a food's price counted per portion.
    pub portion_cost_factor: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            early_stop_fraction: EARLY_STOP_FRACTION,
            portion_cost_factor: PORTION_COST_FACTOR,
        }
    }
}
