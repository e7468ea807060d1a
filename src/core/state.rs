//! Game state: an immutable set of true base facts.
//!
//! ## FactId
//!
//! Base facts are identified by their position in the compiled graph's
//! base proposition list. The graph resolves ids back to fact names.
//!
//! ## GameState
//!
//! Two states holding the same fact set are equal regardless of how they
//! were reached, so states key the visit tables used by Monte Carlo search.
//! Uses an `im` persistent set for O(1) cloning.

use im::OrdSet;
use serde::{Deserialize, Serialize};

/// Identifier of a base fact (index into the base proposition list).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FactId(pub u32);

impl FactId {
    /// Create a new fact ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for FactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fact({})", self.0)
    }
}

/// An immutable set of true base facts.
///
/// States are produced by a state machine's transition function or
/// designated as the initial state; they are never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    facts: OrdSet<FactId>,
}

impl GameState {
    /// Create a state from the facts that hold in it.
    pub fn new(facts: impl IntoIterator<Item = FactId>) -> Self {
        Self {
            facts: facts.into_iter().collect(),
        }
    }

    /// The state in which no base fact holds.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check whether a fact holds.
    #[must_use]
    pub fn contains(&self, fact: FactId) -> bool {
        self.facts.contains(&fact)
    }

    /// Number of true facts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Check if no fact holds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Iterate over true facts in ascending id order.
    pub fn facts(&self) -> impl Iterator<Item = FactId> + '_ {
        self.facts.iter().copied()
    }
}

impl FromIterator<FactId> for GameState {
    fn from_iter<I: IntoIterator<Item = FactId>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, fact) in self.facts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", fact.0)?;
        }
        f.write_str("}")
    }
}
