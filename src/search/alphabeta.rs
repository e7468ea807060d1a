//! Alpha-beta search over the full joint-move space.
//!
//! Max nodes range over the searching role's legal moves; min nodes range
//! over every legal joint move consistent with the chosen move. With a
//! cutoff heuristic the search stops at `level_limit` plies and scores the
//! frontier statically.
//!
//! Pruned branches return a bound, not the exact value. Bounds are only
//! used to compare moves.

use crate::core::{GameState, Move};
use crate::error::Result;
use crate::rules::StateMachine;

use super::context::{Incumbent, SearchContext};
use super::heuristic::Heuristic;

/// Pick the move with the best alpha-beta value.
///
/// Each move is searched with alpha at the incumbent's score, so a move
/// that cannot beat it is refuted as cheaply as possible.
pub(crate) fn search<M: StateMachine>(
    ctx: &mut SearchContext<'_, M>,
    state: &GameState,
    moves: &[Move],
    cutoff: Option<Heuristic>,
) -> Result<Move> {
    let mut best = Incumbent::new(&moves[0], 0u8);
    for mv in moves {
        let Some(score) = min_score(ctx, state, mv, best.score, 100, 0, cutoff)? else {
            break;
        };
        if score == 100 {
            return Ok(mv.clone());
        }
        best.offer(mv, score);
        if ctx.expired() {
            break;
        }
    }
    Ok(best.into_move())
}

fn max_score<M: StateMachine>(
    ctx: &mut SearchContext<'_, M>,
    state: &GameState,
    mut alpha: u8,
    beta: u8,
    level: u32,
    cutoff: Option<Heuristic>,
) -> Result<Option<u8>> {
    if ctx.expired() {
        return Ok(None);
    }
    ctx.stats.observe_depth(level);
    if ctx.machine.is_terminal(state) {
        return ctx.goal(state).map(Some);
    }
    if let Some(heuristic) = cutoff {
        if level >= ctx.config.level_limit {
            return heuristic.evaluate(ctx, state);
        }
    }

    for mv in ctx.machine.nonempty_legal_moves(state, ctx.role)? {
        let Some(score) = min_score(ctx, state, &mv, alpha, beta, level, cutoff)? else {
            return Ok(None);
        };
        alpha = alpha.max(score);
        if alpha >= beta {
            ctx.stats.pruned += 1;
            return Ok(Some(beta));
        }
    }
    Ok(Some(alpha))
}

fn min_score<M: StateMachine>(
    ctx: &mut SearchContext<'_, M>,
    state: &GameState,
    mv: &Move,
    alpha: u8,
    mut beta: u8,
    level: u32,
    cutoff: Option<Heuristic>,
) -> Result<Option<u8>> {
    if ctx.expired() {
        return Ok(None);
    }

    for joint in ctx.machine.legal_joint_moves_for(state, ctx.role, mv)? {
        let next = ctx.next_state(state, &joint)?;
        let Some(score) = max_score(ctx, &next, alpha, beta, level + 1, cutoff)? else {
            return Ok(None);
        };
        beta = beta.min(score);
        if beta <= alpha {
            ctx.stats.pruned += 1;
            return Ok(Some(alpha));
        }
    }
    Ok(Some(beta))
}
