//! Subtraction game for testing the engine.
//!
//! A minimal two-role game compiled by hand into a propnet:
//! - A pile starts with N objects; white moves first
//! - On your turn: take one or two objects; the other role plays no-op
//! - Whoever takes the last object scores 100, the other 0
//!
//! The first player wins exactly when N is not a multiple of 3.

mod game;

pub use game::NimBuilder;
