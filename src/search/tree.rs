//! Visit table for one UCT decision cycle.
//!
//! The table is created inside a single `select_move` call and dropped when
//! it returns. Entries from an earlier root would bias the next search, so
//! it is never kept between turns.

use rustc_hash::FxHashMap;

use crate::core::GameState;

use super::node::NodeStats;

/// Mapping from visited state to its statistics.
#[derive(Clone, Debug, Default)]
pub struct VisitTable {
    nodes: FxHashMap<GameState, NodeStats>,
}

impl VisitTable {
    /// Create a table holding only `root`.
    pub fn with_root(root: &GameState) -> Self {
        let mut table = Self::default();
        table.register(root);
        table
    }

    #[inline]
    #[must_use]
    pub fn get(&self, state: &GameState) -> Option<&NodeStats> {
        self.nodes.get(state)
    }

    #[inline]
    pub fn get_mut(&mut self, state: &GameState) -> Option<&mut NodeStats> {
        self.nodes.get_mut(state)
    }

    /// Insert `state` with zero counts unless already present.
    pub fn register(&mut self, state: &GameState) -> &mut NodeStats {
        self.nodes.entry(state.clone()).or_default()
    }

    #[must_use]
    pub fn contains(&self, state: &GameState) -> bool {
        self.nodes.contains_key(state)
    }

    /// Visit count of a state, 0 when unknown.
    #[must_use]
    pub fn visits(&self, state: &GameState) -> u64 {
        self.nodes.get(state).map_or(0, |n| n.visits)
    }

    /// Number of registered states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add one backup to every state on `path`.
    pub fn backpropagate(&mut self, path: &[GameState], visits: u64, reward: f64) {
        for state in path {
            self.register(state).record(visits, reward);
        }
    }

    /// Summary of the table's contents.
    #[must_use]
    pub fn stats(&self) -> TableStats {
        TableStats {
            states: self.nodes.len(),
            visited: self.nodes.values().filter(|n| n.is_visited()).count(),
            expanded: self.nodes.values().filter(|n| n.is_expanded()).count(),
        }
    }
}

/// Statistics about a visit table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    pub states: usize,
    pub visited: usize,
    pub expanded: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FactId;

    fn state(n: u32) -> GameState {
        GameState::new([FactId::new(n)])
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut table = VisitTable::with_root(&state(0));
        table.register(&state(0)).record(2, 100.0);
        table.register(&state(0));

        assert_eq!(table.len(), 1);
        assert_eq!(table.visits(&state(0)), 2);
    }

    #[test]
    fn test_backpropagate_path() {
        let mut table = VisitTable::with_root(&state(0));
        table.register(&state(1));
        table.register(&state(2));

        table.backpropagate(&[state(0), state(1)], 1, 80.0);
        table.backpropagate(&[state(0), state(2)], 1, 20.0);

        assert_eq!(table.visits(&state(0)), 2);
        assert_eq!(table.get(&state(0)).unwrap().mean_reward(), 50.0);
        assert_eq!(table.visits(&state(1)), 1);
        assert_eq!(table.visits(&state(3)), 0);
        assert!(!table.contains(&state(3)));
    }

    #[test]
    fn test_table_stats() {
        let mut table = VisitTable::with_root(&state(0));
        table.register(&state(1));
        table.get_mut(&state(0)).unwrap().children = Some(vec![]);
        table.backpropagate(&[state(0)], 1, 0.0);

        assert_eq!(
            table.stats(),
            TableStats {
                states: 2,
                visited: 1,
                expanded: 1
            }
        );
    }
}
