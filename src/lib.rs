//! # rust-ggp
//!
//! A general game playing engine: a propositional-network state machine
//! plus a family of time-bounded adversarial searches.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: Games arrive as compiled component graphs. No rule
//!    is hardcoded; roles, facts and moves are opaque names.
//!
//! 2. **Pure Evaluation**: Every query computes a fresh assignment from the
//!    state and joint move it is given. Nothing is mutated in place, so
//!    asking twice gives the same answer.
//!
//! 3. **Deadline-Driven**: Searches poll a wall-clock deadline and always
//!    return a legal move, falling back to the first one if nothing was
//!    evaluated in time.
//!
//! ## Architecture
//!
//! - **Fixed-Point Ordering**: Dependent components are ordered by repeated
//!   passes; a pass that makes no progress reports a cycle.
//!
//! - **Persistent Data Structures**: States are `im` sets with O(1) cloning,
//!   hashed to key the per-decision visit tables of Monte Carlo search.
//!
//! ## Modules
//!
//! - `core`: Roles, moves, states, RNG
//! - `propnet`: Component graph, builder, orderer, state machine
//! - `rules`: `StateMachine` trait every strategy queries
//! - `search`: Strategies, policies, deadlines and the `Player`
//! - `games`: Built-in games for tests and benchmarks

pub mod core;
pub mod error;
pub mod games;
pub mod propnet;
pub mod rules;
pub mod search;

// Re-export commonly used types
pub use crate::core::{FactId, GameRng, GameState, JointMove, Move, Role, RoleId, RoleMap};

pub use crate::error::{Error, Result};

pub use crate::propnet::{
    Assignment, Component, ComponentId, ComponentKind, PropNet, PropNetBuilder,
    PropNetStateMachine,
};

pub use crate::rules::StateMachine;

pub use crate::search::{
    Deadline, Heuristic, MoveObserver, Player, RandomRollout, SearchConfig, SearchStats,
    SelectedMove, SelectionPolicy, SimulationPolicy, Strategy, Ucb1,
};
