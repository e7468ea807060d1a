//! Move representation: per-role moves and positional joint moves.
//!
//! A `Move` is an opaque action name scoped to one role. A `JointMove`
//! holds one move per role, aligned with the compiled role order, and is
//! the only valid input to a state transition.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::Index;

use super::role::RoleId;

/// An opaque action identifier for one role.
///
/// ## Example
///
/// ```
/// use rust_ggp::core::Move;
///
/// let mark = Move::new("(mark 1 1)");
/// assert!(!mark.is_noop());
/// assert!(Move::noop().is_noop());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Move(pub String);

impl Move {
    /// Name of the distinguished no-operation move.
    pub const NOOP: &'static str = "noop";

    /// Create a move from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The no-operation placeholder move.
    #[must_use]
    pub fn noop() -> Self {
        Self(Self::NOOP.to_string())
    }

    /// Check if this is the no-operation move.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.0 == Self::NOOP
    }

    /// The move's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One move per role, positionally aligned to the role list.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JointMove {
    /// Moves indexed by role.
    /// SmallVec avoids a heap allocation for games with up to 4 roles.
    pub moves: SmallVec<[Move; 4]>,
}

impl JointMove {
    /// Create a joint move from per-role moves in role order.
    pub fn new(moves: impl IntoIterator<Item = Move>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }

    /// Joint move where `role` plays `mv` and every other role plays no-op.
    ///
    /// This is an approximation used by searches that reason about one
    /// role's move while holding the others fixed.
    #[must_use]
    pub fn with_placeholder(role_count: usize, role: RoleId, mv: &Move) -> Self {
        Self {
            moves: RoleId::all(role_count)
                .map(|r| if r == role { mv.clone() } else { Move::noop() })
                .collect(),
        }
    }

    /// Number of entries (one per role).
    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Check if the joint move has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Get the move assigned to a role.
    #[must_use]
    pub fn get(&self, role: RoleId) -> Option<&Move> {
        self.moves.get(role.index())
    }

    /// Iterate over (RoleId, &Move) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (RoleId, &Move)> {
        self.moves
            .iter()
            .enumerate()
            .map(|(i, m)| (RoleId(i as u8), m))
    }
}

impl Index<RoleId> for JointMove {
    type Output = Move;

    fn index(&self, role: RoleId) -> &Self::Output {
        &self.moves[role.index()]
    }
}

impl std::fmt::Display for JointMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, mv) in self.moves.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", mv)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_noop() {
        assert!(Move::noop().is_noop());
        assert!(Move::new("noop").is_noop());
        assert!(!Move::new("(mark 1 1)").is_noop());
    }

    #[test]
    fn test_joint_move_placeholder() {
        let mv = Move::new("take1");
        let joint = JointMove::with_placeholder(3, RoleId::new(1), &mv);

        assert_eq!(joint.len(), 3);
        assert!(joint[RoleId::new(0)].is_noop());
        assert_eq!(joint[RoleId::new(1)], mv);
        assert!(joint[RoleId::new(2)].is_noop());
    }

    #[test]
    fn test_joint_move_get_and_iter() {
        let joint = JointMove::new([Move::new("a"), Move::new("b")]);

        assert_eq!(joint.get(RoleId::new(1)), Some(&Move::new("b")));
        assert_eq!(joint.get(RoleId::new(2)), None);

        let roles: Vec<_> = joint.iter().map(|(r, _)| r).collect();
        assert_eq!(roles, vec![RoleId::new(0), RoleId::new(1)]);
    }

    #[test]
    fn test_joint_move_display() {
        let joint = JointMove::new([Move::new("a"), Move::noop()]);
        assert_eq!(joint.to_string(), "[a, noop]");
    }

    #[test]
    fn test_joint_move_serialization() {
        let joint = JointMove::new([Move::new("a"), Move::new("b")]);
        let json = serde_json::to_string(&joint).unwrap();
        let deserialized: JointMove = serde_json::from_str(&json).unwrap();

        assert_eq!(joint, deserialized);
    }
}
