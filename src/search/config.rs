//! Search configuration parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::strategy::Strategy;

/// Search configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Safety margin before the deadline for the tree searches
    /// (minimax, alpha-beta, heuristic), in milliseconds.
    pub minimax_margin_ms: u64,

    /// Safety margin for pure Monte Carlo rollouts, in milliseconds.
    pub monte_carlo_margin_ms: u64,

    /// Safety margin for UCT, in milliseconds.
    pub uct_margin_ms: u64,

    /// Ply at which depth-limited search applies its heuristic.
    pub level_limit: u32,

    /// UCT exploration constant on the 0..100 reward scale.
    pub exploration_constant: f64,

    /// Cap on rollout rounds per move for pure Monte Carlo.
    pub depth_charges: u32,

    /// Rollouts launched from each state UCT expands.
    pub charges_per_expansion: u32,

    /// Random seed. Same seed produces deterministic searches.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            minimax_margin_ms: 50,
            monte_carlo_margin_ms: 100,
            uct_margin_ms: 100,
            level_limit: 9,
            exploration_constant: 10.0,
            depth_charges: 1000,
            charges_per_expansion: 1,
            seed: 42,
        }
    }
}

impl SearchConfig {
    /// Set the tree-search margin.
    pub fn with_minimax_margin(mut self, ms: u64) -> Self {
        self.minimax_margin_ms = ms;
        self
    }

    /// Set the Monte Carlo margin.
    pub fn with_monte_carlo_margin(mut self, ms: u64) -> Self {
        self.monte_carlo_margin_ms = ms;
        self
    }

    /// Set the UCT margin.
    pub fn with_uct_margin(mut self, ms: u64) -> Self {
        self.uct_margin_ms = ms;
        self
    }

    /// Set the heuristic cutoff ply.
    pub fn with_level_limit(mut self, level: u32) -> Self {
        self.level_limit = level;
        self
    }

    /// Set the UCT exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Set the per-move rollout cap.
    pub fn with_depth_charges(mut self, charges: u32) -> Self {
        self.depth_charges = charges;
        self
    }

    /// Set rollouts per UCT expansion.
    pub fn with_charges_per_expansion(mut self, charges: u32) -> Self {
        self.charges_per_expansion = charges;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Safety margin a strategy keeps before the deadline.
    #[must_use]
    pub fn margin(&self, strategy: &Strategy) -> Duration {
        let ms = match strategy {
            Strategy::Legal | Strategy::Random => 0,
            Strategy::Minimax | Strategy::AlphaBeta | Strategy::Heuristic(_) => {
                self.minimax_margin_ms
            }
            Strategy::MonteCarlo => self.monte_carlo_margin_ms,
            Strategy::Uct => self.uct_margin_ms,
        };
        Duration::from_millis(ms)
    }
}
