//! State shared by the strategies during one decision cycle.

use crate::core::{GameRng, GameState, JointMove, Move, RoleId};
use crate::error::Result;
use crate::rules::StateMachine;

use super::config::SearchConfig;
use super::deadline::Deadline;
use super::policy::{SelectionPolicy, SimulationPolicy};
use super::stats::SearchStats;

/// Everything a strategy needs to search on behalf of one role.
///
/// Borrowed from the [`Player`](super::Player) for the length of one
/// `select_move` call.
pub struct SearchContext<'a, M: StateMachine> {
    pub machine: &'a M,
    pub role: RoleId,
    pub deadline: Deadline,
    pub config: &'a SearchConfig,
    pub rng: &'a mut GameRng,
    pub stats: &'a mut SearchStats,
    pub selection: &'a dyn SelectionPolicy,
    pub simulation: &'a dyn SimulationPolicy<M>,
}

impl<'a, M: StateMachine> SearchContext<'a, M> {
    /// Poll the deadline, noting in the stats when it cut the search.
    pub fn expired(&mut self) -> bool {
        let expired = self.deadline.expired();
        if expired {
            self.stats.interrupted = true;
        }
        expired
    }

    /// Joint move where the searching role plays `mv` and others no-op.
    #[must_use]
    pub fn placeholder_joint(&self, mv: &Move) -> JointMove {
        JointMove::with_placeholder(self.machine.role_count(), self.role, mv)
    }

    /// Apply a joint move, counting the evaluation.
    pub fn next_state(&mut self, state: &GameState, joint: &JointMove) -> Result<GameState> {
        self.stats.nodes_evaluated += 1;
        self.machine.next_state(state, joint)
    }

    /// Goal of the searching role.
    pub fn goal(&self, state: &GameState) -> Result<u8> {
        self.machine.goal(state, self.role)
    }

    /// Run one playout from `state` through the simulation policy.
    ///
    /// Returns `Ok(None)` when the deadline expired mid-playout.
    pub fn depth_charge(&mut self, state: &GameState) -> Result<Option<u8>> {
        let rollout =
            self.simulation
                .simulate(self.machine, state, self.role, self.rng, &self.deadline)?;
        match rollout {
            Some(rollout) => {
                self.stats.depth_charges += 1;
                self.stats.observe_depth(rollout.depth);
                Ok(Some(rollout.goal))
            }
            None => {
                self.stats.interrupted = true;
                Ok(None)
            }
        }
    }
}

/// Best move found so far.
///
/// Starts at the first legal move with a floor score; only a strictly
/// greater score replaces it, so the earliest move wins ties.
#[derive(Clone, Debug)]
pub struct Incumbent<S> {
    pub mv: Move,
    pub score: S,
}

impl<S: PartialOrd + Copy> Incumbent<S> {
    pub fn new(first: &Move, floor: S) -> Self {
        Self {
            mv: first.clone(),
            score: floor,
        }
    }

    /// Offer a scored move. Returns true if it replaced the incumbent.
    pub fn offer(&mut self, mv: &Move, score: S) -> bool {
        if score > self.score {
            self.mv = mv.clone();
            self.score = score;
            true
        } else {
            false
        }
    }

    pub fn into_move(self) -> Move {
        self.mv
    }
}
