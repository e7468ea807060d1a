//! Core types: roles, moves, states, RNG.
//!
//! These are game-agnostic; a compiled graph gives them meaning.

pub mod moves;
pub mod rng;
pub mod role;
pub mod state;

pub use moves::{JointMove, Move};
pub use rng::GameRng;
pub use role::{Role, RoleId, RoleMap};
pub use state::{FactId, GameState};
