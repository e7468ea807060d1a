//! Search policies for selection and simulation.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: Which successor UCT descends into
//! - `SimulationPolicy`: How playouts are run from a state

use crate::core::{GameRng, GameState, RoleId};
use crate::error::Result;
use crate::rules::StateMachine;

use super::config::SearchConfig;
use super::deadline::Deadline;
use super::node::NodeStats;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for selecting which successor to explore.
pub trait SelectionPolicy: Send + Sync {
    /// Select a child index.
    ///
    /// `children[i]` is `None` when the i-th successor has no table entry.
    fn select(
        &self,
        parent: &NodeStats,
        children: &[Option<&NodeStats>],
        config: &SearchConfig,
    ) -> usize;
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Formula: mean + c * sqrt(2 ln(N) / n). Unvisited and unregistered
/// children score infinity; the first of equal scores wins.
#[derive(Clone, Debug, Default)]
pub struct Ucb1;

impl Ucb1 {
    /// Score of one child under a parent with `parent_visits` visits.
    #[must_use]
    pub fn score(child: Option<&NodeStats>, parent_visits: u64, c: f64) -> f64 {
        match child {
            Some(child) if child.visits > 0 => {
                let ln_parent = (parent_visits.max(1) as f64).ln();
                child.mean_reward() + c * (2.0 * ln_parent / child.visits as f64).sqrt()
            }
            _ => f64::INFINITY,
        }
    }
}

impl SelectionPolicy for Ucb1 {
    fn select(
        &self,
        parent: &NodeStats,
        children: &[Option<&NodeStats>],
        config: &SearchConfig,
    ) -> usize {
        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (i, child) in children.iter().enumerate() {
            let score = Self::score(*child, parent.visits, config.exploration_constant);
            if score > best_score {
                best = i;
                best_score = score;
            }
        }
        best
    }
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Outcome of one completed playout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rollout {
    /// Goal of the searching role in the terminal state.
    pub goal: u8,
    /// Joint moves played to reach it.
    pub depth: u32,
}

/// Policy for running playouts (depth charges) to a terminal state.
pub trait SimulationPolicy<M: StateMachine>: Send + Sync {
    /// Play from `state` to the end of the game.
    ///
    /// Returns `Ok(None)` if the deadline expires first.
    fn simulate(
        &self,
        machine: &M,
        state: &GameState,
        role: RoleId,
        rng: &mut GameRng,
        deadline: &Deadline,
    ) -> Result<Option<Rollout>>;
}

/// Random playout policy.
///
/// Plays uniformly random legal joint moves until terminal.
#[derive(Clone, Debug, Default)]
pub struct RandomRollout;

impl<M: StateMachine> SimulationPolicy<M> for RandomRollout {
    fn simulate(
        &self,
        machine: &M,
        state: &GameState,
        role: RoleId,
        rng: &mut GameRng,
        deadline: &Deadline,
    ) -> Result<Option<Rollout>> {
        let mut current = state.clone();
        let mut depth = 0;

        loop {
            if machine.is_terminal(&current) {
                let goal = machine.goal(&current, role)?;
                return Ok(Some(Rollout { goal, depth }));
            }
            if deadline.expired() {
                return Ok(None);
            }
            current = machine.random_next_state(&current, rng)?;
            depth += 1;
        }
    }
}
