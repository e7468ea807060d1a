//! Interchangeable move-selection strategies.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Move};
use crate::error::Result;
use crate::rules::StateMachine;

use super::context::SearchContext;
use super::heuristic::Heuristic;
use super::{alphabeta, minimax, montecarlo, uct};

/// Which search a [`Player`](super::Player) runs each turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum Strategy {
    /// Always the first legal move.
    Legal,
    /// A uniformly random legal move.
    Random,
    /// Exhaustive minimax with no-op placeholders for other roles.
    Minimax,
    /// Alpha-beta over full joint moves, searched to terminal states.
    AlphaBeta,
    /// Alpha-beta cut off at the level limit and scored by a heuristic.
    Heuristic(Heuristic),
    /// Average of random playouts per move.
    MonteCarlo,
    /// Monte Carlo tree search with UCB1 selection.
    #[default]
    Uct,
}

impl Strategy {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Legal => "legal",
            Strategy::Random => "random",
            Strategy::Minimax => "minimax",
            Strategy::AlphaBeta => "alpha-beta",
            Strategy::Heuristic(_) => "heuristic",
            Strategy::MonteCarlo => "monte-carlo",
            Strategy::Uct => "uct",
        }
    }

    /// Choose one of `moves`, which must be non-empty.
    pub(crate) fn search<M: StateMachine>(
        &self,
        ctx: &mut SearchContext<'_, M>,
        state: &GameState,
        moves: &[Move],
    ) -> Result<Move> {
        match self {
            Strategy::Legal => Ok(moves[0].clone()),
            Strategy::Random => Ok(ctx.rng.choose(moves).unwrap_or(&moves[0]).clone()),
            Strategy::Minimax => minimax::search(ctx, state, moves),
            Strategy::AlphaBeta => alphabeta::search(ctx, state, moves, None),
            Strategy::Heuristic(h) => alphabeta::search(ctx, state, moves, Some(*h)),
            Strategy::MonteCarlo => montecarlo::search(ctx, state, moves),
            Strategy::Uct => uct::search(ctx, state, moves),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Heuristic(h) => write!(f, "heuristic({h:?})"),
            other => f.write_str(other.name()),
        }
    }
}
