//! Propositional networks.
//!
//! A propnet is a circuit of boolean components compiled from a game's
//! rules:
//! - **Propositions** hold facts. Base propositions make up a state, input
//!   propositions encode moves, and legal/goal/terminal propositions are read
//!   back as query answers.
//! - **Gates** (AND, OR, NOT) and constants combine them.
//! - **Transitions** feed each base proposition its value in the next state.
//!
//! [`PropNetStateMachine`] orders the dependent components once and then
//! answers every [`StateMachine`](crate::rules::StateMachine) query by a pure
//! propagation pass.

pub mod builder;
pub mod component;
pub mod machine;
pub mod net;
pub mod ordering;

pub use builder::PropNetBuilder;
pub use component::{Assignment, Component, ComponentId, ComponentKind};
pub use machine::PropNetStateMachine;
pub use net::PropNet;
pub use ordering::{order, verify_order};
