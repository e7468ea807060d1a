//! Evaluation functions applied at the depth-limited search cutoff.

use serde::{Deserialize, Serialize};

use crate::core::GameState;
use crate::error::Result;
use crate::rules::StateMachine;

use super::context::SearchContext;

/// Static estimate of a non-terminal state's value on the 0..100 scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heuristic {
    /// The searching role's goal value in the cutoff state.
    GoalProximity,
    /// Share of `feasible` moves the role has, capped at 100.
    Mobility { feasible: u32 },
    /// 100 minus mobility: prefers states that restrict the role.
    Focus { feasible: u32 },
    /// Average goal of `charges` random playouts from the state.
    MonteCarlo { charges: u32 },
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::Mobility { feasible: 4 }
    }
}

impl Heuristic {
    /// Evaluate `state` for the context's role.
    ///
    /// Returns `Ok(None)` if a playout was cut short by the deadline.
    pub fn evaluate<M: StateMachine>(
        &self,
        ctx: &mut SearchContext<'_, M>,
        state: &GameState,
    ) -> Result<Option<u8>> {
        match *self {
            Heuristic::GoalProximity => ctx.goal(state).map(Some),
            Heuristic::Mobility { feasible } => {
                let n = ctx.machine.legal_moves(state, ctx.role)?.len();
                Ok(Some(mobility(n, feasible)))
            }
            Heuristic::Focus { feasible } => {
                let n = ctx.machine.legal_moves(state, ctx.role)?.len();
                Ok(Some(100 - mobility(n, feasible)))
            }
            Heuristic::MonteCarlo { charges } => {
                let charges = charges.max(1);
                let mut total = 0u32;
                for _ in 0..charges {
                    match ctx.depth_charge(state)? {
                        Some(goal) => total += u32::from(goal),
                        None => return Ok(None),
                    }
                }
                Ok(Some((total / charges) as u8))
            }
        }
    }
}

/// `n` legal moves out of `feasible` as a percentage, capped at 100.
fn mobility(n: usize, feasible: u32) -> u8 {
    let feasible = feasible as usize;
    if n < feasible {
        (n * 100 / feasible) as u8
    } else {
        100
    }
}
