//! Error types for rust-ggp.
//!
//! Configuration errors surface while building or loading a graph and make
//! the state machine impossible to construct. Goal and move definition
//! errors surface from individual queries and abort the current decision
//! cycle. Running out of time is not an error.

use thiserror::Error;

use crate::core::{Move, RoleId};
use crate::propnet::{ComponentId, ComponentKind};

/// Main error type for the rust-ggp crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("dependency cycle: {unordered} component(s) could not be ordered (first: {first})")]
    CyclicDependency { unordered: usize, first: String },

    #[error("game has no roles")]
    NoRoles,

    #[error("game has {count} roles, at most 255 are supported")]
    TooManyRoles { count: usize },

    #[error("no terminal proposition designated")]
    MissingTerminal,

    #[error("role '{role}' has no goal propositions")]
    MissingGoals { role: String },

    #[error("role '{role}' has no legal propositions")]
    MissingLegals { role: String },

    #[error("component {id} does not exist")]
    UnknownComponent { id: ComponentId },

    #[error("{kind} component {id} has {inputs} input(s), expected {expected}")]
    InvalidArity {
        id: ComponentId,
        kind: ComponentKind,
        inputs: usize,
        expected: &'static str,
    },

    #[error("base proposition {id} must be fed by a transition, found {found}")]
    InvalidBaseInput { id: ComponentId, found: ComponentKind },

    #[error("role index {index} is out of range for {count} role(s)")]
    UnknownRole { index: usize, count: usize },

    #[error("goal value {value} for role '{role}' is outside 0..=100")]
    InvalidGoalValue { role: String, value: u8 },

    #[error("goal for {role} is ill-defined: {true_count} goal propositions are true")]
    GoalDefinition { role: RoleId, true_count: usize },

    #[error("move '{mv}' has no input proposition for {role}")]
    MoveDefinition { role: RoleId, mv: Move },

    #[error("joint move has {got} entries, expected {expected}")]
    JointMoveArity { expected: usize, got: usize },

    #[error("{role} has no legal moves in a non-terminal state")]
    NoLegalMoves { role: RoleId },

    #[error("graph serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error comes from a malformed graph.
    ///
    /// Such errors are never fixed by retrying with another state.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::CyclicDependency { .. }
                | Error::NoRoles
                | Error::TooManyRoles { .. }
                | Error::MissingTerminal
                | Error::MissingGoals { .. }
                | Error::MissingLegals { .. }
                | Error::UnknownComponent { .. }
                | Error::InvalidArity { .. }
                | Error::InvalidBaseInput { .. }
                | Error::UnknownRole { .. }
                | Error::InvalidGoalValue { .. }
        )
    }
}
