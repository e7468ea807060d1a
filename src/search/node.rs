//! Per-state statistics for Monte Carlo tree search.
//!
//! Nodes are keyed by [`GameState`] rather than by position in a tree:
//! transpositions reached by different joint moves share one entry.

use crate::core::{GameState, JointMove, Move, RoleId};

/// A joint move from a parent state and the state it leads to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Child {
    pub joint: JointMove,
    pub state: GameState,
}

impl Child {
    /// Check whether `role` plays `mv` in this child's joint move.
    #[must_use]
    pub fn played_by(&self, role: RoleId, mv: &Move) -> bool {
        self.joint.get(role) == Some(mv)
    }
}

/// Visit count, cumulative reward and cached successors of one state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeStats {
    /// Number of rollouts backed up through this state.
    pub visits: u64,

    /// Sum of rollout goal values (0..100 each).
    pub total_reward: f64,

    /// Successors, filled in when the state is expanded.
    pub children: Option<Vec<Child>>,
}

impl NodeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Average reward, 0 while unvisited.
    #[must_use]
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / self.visits as f64
        }
    }

    #[must_use]
    pub fn is_visited(&self) -> bool {
        self.visits > 0
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.children.is_some()
    }

    /// Add `visits` rollouts worth `reward` in total.
    pub fn record(&mut self, visits: u64, reward: f64) {
        self.visits += visits;
        self.total_reward += reward;
    }
}
