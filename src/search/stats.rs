//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one decision cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// States produced by the transition function.
    pub nodes_evaluated: u64,

    /// Random playouts completed.
    pub depth_charges: u64,

    /// Strategy iterations (UCT iterations, Monte Carlo rounds).
    pub iterations: u64,

    /// Deepest playout or tree ply reached.
    pub max_depth: u32,

    /// Alpha-beta cutoffs taken.
    pub pruned: u64,

    /// Total time spent deciding (microseconds).
    pub time_us: u64,

    /// Whether the deadline cut the search short.
    pub interrupted: bool,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record how deep a search or playout reached.
    pub fn observe_depth(&mut self, depth: u32) {
        self.max_depth = self.max_depth.max(depth);
    }

    /// Calculate depth charges per second.
    #[must_use]
    pub fn charges_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.depth_charges as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Calculate states evaluated per second.
    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes_evaluated as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
