//! The decision loop: one strategy, one state machine, one move per call.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::core::{GameRng, GameState, Move, RoleId};
use crate::error::{Error, Result};
use crate::rules::StateMachine;

use super::config::SearchConfig;
use super::context::SearchContext;
use super::deadline::Deadline;
use super::policy::{RandomRollout, SelectionPolicy, SimulationPolicy, Ucb1};
use super::stats::SearchStats;
use super::strategy::Strategy;

/// Outcome of one decision cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedMove {
    /// Every legal move the role had.
    pub legal_moves: Vec<Move>,
    /// The move chosen.
    pub selection: Move,
    /// Wall-clock time spent deciding.
    pub elapsed: Duration,
}

/// Receives each decision as it is made.
pub trait MoveObserver {
    fn move_selected(&mut self, role: RoleId, selected: &SelectedMove);
}

impl<F: FnMut(RoleId, &SelectedMove)> MoveObserver for F {
    fn move_selected(&mut self, role: RoleId, selected: &SelectedMove) {
        self(role, selected)
    }
}

/// A game-playing agent.
///
/// Generic over the state machine. Owns the configuration and policies;
/// everything a search builds is scoped to a single [`select_move`] call.
///
/// [`select_move`]: Player::select_move
pub struct Player<M: StateMachine> {
    machine: M,
    config: SearchConfig,
    strategy: Strategy,
    rng: GameRng,
    selection: Box<dyn SelectionPolicy>,
    simulation: Box<dyn SimulationPolicy<M>>,
    observer: Option<Box<dyn MoveObserver>>,
    stats: SearchStats,
}

impl<M: StateMachine> Player<M> {
    /// Create a player with UCB1 selection and random playouts.
    pub fn new(machine: M, strategy: Strategy, config: SearchConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            machine,
            config,
            strategy,
            rng,
            selection: Box::new(Ucb1),
            simulation: Box::new(RandomRollout),
            observer: None,
            stats: SearchStats::default(),
        }
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<S: SimulationPolicy<M> + 'static>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Notify `observer` of every selected move.
    pub fn with_observer<O: MoveObserver + 'static>(mut self, observer: O) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Choose a move for `role` in `state` before `deadline`.
    ///
    /// Always returns one of the role's legal moves unless the game
    /// description is inconsistent. Running out of time is not an error:
    /// the best move found so far, or the first legal move, is returned.
    pub fn select_move(
        &mut self,
        role: RoleId,
        state: &GameState,
        deadline: Instant,
    ) -> Result<SelectedMove> {
        let start = Instant::now();
        self.stats.reset();

        let legal_moves = self.machine.legal_moves(state, role)?;
        if legal_moves.is_empty() {
            return Err(Error::NoLegalMoves { role });
        }

        let selection = if legal_moves.len() == 1 {
            legal_moves[0].clone()
        } else {
            let deadline =
                Deadline::new(deadline).with_margin(self.config.margin(&self.strategy));
            let mut rng = self.rng.fork();
            let mut ctx = SearchContext {
                machine: &self.machine,
                role,
                deadline,
                config: &self.config,
                rng: &mut rng,
                stats: &mut self.stats,
                selection: self.selection.as_ref(),
                simulation: self.simulation.as_ref(),
            };
            self.strategy.search(&mut ctx, state, &legal_moves)?
        };

        let elapsed = start.elapsed();
        self.stats.time_us = elapsed.as_micros() as u64;

        info!(
            %role,
            strategy = %self.strategy,
            selection = %selection,
            legal = legal_moves.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            interrupted = self.stats.interrupted,
            "move selected"
        );
        debug!(stats = ?self.stats, "search stats");

        let selected = SelectedMove {
            legal_moves,
            selection,
            elapsed,
        };
        if let Some(observer) = self.observer.as_mut() {
            observer.move_selected(role, &selected);
        }
        Ok(selected)
    }

    /// Statistics from the most recent decision.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the state machine reference.
    pub fn machine(&self) -> &M {
        &self.machine
    }

    /// Get the configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Switch strategy between decisions.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }
}
