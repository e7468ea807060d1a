//! Exhaustive minimax with no-op placeholders.
//!
//! The searching role's moves are tried with every other role playing
//! no-op. Replies are enumerated one opponent at a time, again with the
//! remaining roles on no-op. This is exact for alternating two-role games
//! and an approximation with more roles.

use crate::core::{GameState, JointMove, Move, RoleId};
use crate::error::Result;
use crate::rules::StateMachine;

use super::context::{Incumbent, SearchContext};

/// Pick the move with the best minimax value.
///
/// A move worth 100 is returned at once. A move whose evaluation the
/// deadline interrupted is discarded.
pub(crate) fn search<M: StateMachine>(
    ctx: &mut SearchContext<'_, M>,
    state: &GameState,
    moves: &[Move],
) -> Result<Move> {
    let mut best = Incumbent::new(&moves[0], 0u8);
    for mv in moves {
        let Some(score) = min_score(ctx, state, mv, 0)? else {
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
    depth: u32,
) -> Result<Option<u8>> {
    if ctx.expired() {
        return Ok(None);
    }
    ctx.stats.observe_depth(depth);
    if ctx.machine.is_terminal(state) {
        return ctx.goal(state).map(Some);
    }

    let mut best = 0;
    for mv in ctx.machine.nonempty_legal_moves(state, ctx.role)? {
        let Some(score) = min_score(ctx, state, &mv, depth)? else {
            return Ok(None);
        };
        best = best.max(score);
        if best == 100 {
            break;
        }
    }
    Ok(Some(best))
}

fn min_score<M: StateMachine>(
    ctx: &mut SearchContext<'_, M>,
    state: &GameState,
    mv: &Move,
    depth: u32,
) -> Result<Option<u8>> {
    if ctx.expired() {
        return Ok(None);
    }

    let mut worst = 100;
    for joint in replies(ctx, state, mv)? {
        let next = ctx.next_state(state, &joint)?;
        let Some(score) = max_score(ctx, &next, depth + 1)? else {
            return Ok(None);
        };
        worst = worst.min(score);
        if worst == 0 {
            break;
        }
    }
    Ok(Some(worst))
}

/// Joint moves answering `mv`: each opponent move in turn, all other roles
/// on no-op. With no opponents the placeholder joint move alone.
fn replies<M: StateMachine>(
    ctx: &SearchContext<'_, M>,
    state: &GameState,
    mv: &Move,
) -> Result<Vec<JointMove>> {
    let role_count = ctx.machine.role_count();
    let base = ctx.placeholder_joint(mv);
    let mut out = Vec::new();

    for opponent in RoleId::all(role_count).filter(|&r| r != ctx.role) {
        for reply in ctx.machine.nonempty_legal_moves(state, opponent)? {
            let mut joint = base.clone();
            joint.moves[opponent.index()] = reply;
            out.push(joint);
        }
    }
    if out.is_empty() {
        out.push(base);
    }
    Ok(out)
}
