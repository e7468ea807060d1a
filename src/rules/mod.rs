//! State machine trait for game evaluators.
//!
//! Games expose `StateMachine` to define:
//! - Terminal states and per-role goal values
//! - Legal moves for each role
//! - The transition function over joint moves
//!
//! Search strategies call into `StateMachine` but never inspect the
//! evaluator's internals.

pub mod machine;

pub use machine::StateMachine;
