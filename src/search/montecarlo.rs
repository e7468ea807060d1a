//! Pure Monte Carlo move evaluation.
//!
//! Moves take turns: each round launches one playout per move, starting
//! from the successor under a random joint move in which the searching
//! role plays that move. Rounds stop at the deadline or the configured cap.
//! No statistics are shared between moves.

use tracing::trace;

use crate::core::{GameState, Move};
use crate::error::Result;
use crate::rules::StateMachine;

use super::context::{Incumbent, SearchContext};

/// Pick the move with the highest average playout goal.
///
/// Moves that never finished a playout are not candidates; the first legal
/// move stands if none did.
pub(crate) fn search<M: StateMachine>(
    ctx: &mut SearchContext<'_, M>,
    state: &GameState,
    moves: &[Move],
) -> Result<Move> {
    let mut totals = vec![0u64; moves.len()];
    let mut samples = vec![0u64; moves.len()];

    'rounds: for round in 0..ctx.config.depth_charges {
        for (i, mv) in moves.iter().enumerate() {
            if ctx.expired() {
                break 'rounds;
            }
            let joint = ctx
                .machine
                .random_joint_move_for(state, ctx.role, mv, ctx.rng)?;
            let next = ctx.next_state(state, &joint)?;
            let Some(goal) = ctx.depth_charge(&next)? else {
                break 'rounds;
            };
            totals[i] += u64::from(goal);
            samples[i] += 1;
        }
        ctx.stats.iterations += 1;
        trace!(round, "monte carlo round complete");
    }

    let mut best = Incumbent::new(&moves[0], f64::NEG_INFINITY);
    for (i, mv) in moves.iter().enumerate() {
        if samples[i] > 0 {
            best.offer(mv, totals[i] as f64 / samples[i] as f64);
        }
    }
    Ok(best.into_move())
}
