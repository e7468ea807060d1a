//! Time-bounded adversarial search.
//!
//! ## Overview
//!
//! A [`Player`] picks a move for one role by running a [`Strategy`] against
//! any [`StateMachine`](crate::rules::StateMachine) until a deadline:
//!
//! - **Legal / Random**: Baselines that do no search
//! - **Minimax**: Exhaustive, with no-op placeholders for other roles
//! - **AlphaBeta**: Full joint-move enumeration with window pruning
//! - **Heuristic**: Alpha-beta cut off at a ply limit
//! - **MonteCarlo**: Average of random playouts per move
//! - **Uct**: Monte Carlo tree search over a per-call visit table
//!
//! Every strategy polls the deadline (less a per-strategy margin) after each
//! unit of work and at every recursive call, and falls back to the best move
//! found so far. All policies run on a single thread.
//!
//! ## Usage
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use rust_ggp::core::RoleId;
//! use rust_ggp::games::nim::NimBuilder;
//! use rust_ggp::rules::StateMachine;
//! use rust_ggp::search::{Player, SearchConfig, Strategy};
//!
//! let machine = NimBuilder::new(5).build().unwrap();
//! let state = machine.initial_state();
//! let mut player = Player::new(machine, Strategy::AlphaBeta, SearchConfig::default());
//!
//! let deadline = Instant::now() + Duration::from_secs(5);
//! let selected = player.select_move(RoleId::new(0), &state, deadline).unwrap();
//! assert_eq!(selected.selection.name(), "take2");
//! ```

pub mod alphabeta;
pub mod config;
pub mod context;
pub mod deadline;
pub mod heuristic;
pub mod minimax;
pub mod montecarlo;
pub mod node;
pub mod player;
pub mod policy;
pub mod stats;
pub mod strategy;
pub mod tree;
pub mod uct;

pub use config::SearchConfig;
pub use context::{Incumbent, SearchContext};
pub use deadline::Deadline;
pub use heuristic::Heuristic;
pub use node::{Child, NodeStats};
pub use player::{MoveObserver, Player, SelectedMove};
pub use policy::{RandomRollout, Rollout, SelectionPolicy, SimulationPolicy, Ucb1};
pub use stats::SearchStats;
pub use strategy::Strategy;
pub use tree::{TableStats, VisitTable};
