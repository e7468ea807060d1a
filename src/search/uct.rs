//! Monte Carlo tree search with UCB1 selection.
//!
//! Each iteration:
//! 1. **Select** from the root, descending into the child chosen by the
//!    selection policy, until reaching a terminal state, a state with no
//!    visits yet, or a state already on the path.
//! 2. **Expand** that state by registering every successor across the full
//!    legal joint-move set.
//! 3. **Simulate** playouts from it.
//! 4. **Backpropagate** the summed goal and the playout count to every
//!    state on the path.
//!
//! The visit table lives for one call only.

use tracing::trace;

use crate::core::{GameState, Move};
use crate::error::Result;
use crate::rules::StateMachine;

use super::context::{Incumbent, SearchContext};
use super::node::{Child, NodeStats};
use super::tree::VisitTable;

/// Run UCT until the deadline and pick the move whose successors have the
/// highest average reward.
///
/// Successors never visited do not count, and a move none of whose
/// successors was visited is never preferred over one that was.
pub(crate) fn search<M: StateMachine>(
    ctx: &mut SearchContext<'_, M>,
    state: &GameState,
    moves: &[Move],
) -> Result<Move> {
    let mut table = VisitTable::with_root(state);

    while !ctx.expired() {
        if !iterate(ctx, &mut table, state)? {
            break;
        }
        ctx.stats.iterations += 1;
    }

    let table_stats = table.stats();
    trace!(
        states = table_stats.states,
        visited = table_stats.visited,
        expanded = table_stats.expanded,
        "uct table"
    );

    Ok(best_move(ctx, &table, state, moves))
}

/// One select/expand/simulate/backpropagate pass.
///
/// Returns false if the deadline interrupted the playout; nothing is
/// backed up in that case.
fn iterate<M: StateMachine>(
    ctx: &mut SearchContext<'_, M>,
    table: &mut VisitTable,
    root: &GameState,
) -> Result<bool> {
    let mut path = vec![root.clone()];
    let mut current = root.clone();

    loop {
        if ctx.expired() {
            return Ok(false);
        }
        if ctx.machine.is_terminal(&current) {
            let goal = ctx.goal(&current)?;
            table.backpropagate(&path, 1, f64::from(goal));
            return Ok(true);
        }

        let Some(node) = table.get(&current).filter(|n| n.is_visited()) else {
            break;
        };
        let Some(children) = node.children.as_ref().filter(|c| !c.is_empty()) else {
            break;
        };
        let child_stats: Vec<Option<&NodeStats>> =
            children.iter().map(|c| table.get(&c.state)).collect();
        let idx = ctx.selection.select(node, &child_stats, ctx.config);
        let next = children[idx].state.clone();
        // A repeated state ends the descent; `current` becomes the leaf.
        if path.contains(&next) {
            break;
        }

        path.push(next.clone());
        current = next;
    }
    ctx.stats.observe_depth(path.len() as u32 - 1);

    expand(ctx, table, &current)?;

    let charges = ctx.config.charges_per_expansion.max(1);
    let mut total = 0.0;
    for _ in 0..charges {
        match ctx.depth_charge(&current)? {
            Some(goal) => total += f64::from(goal),
            None => return Ok(false),
        }
    }
    table.backpropagate(&path, u64::from(charges), total);
    Ok(true)
}

/// Register every successor of `state` with zero counts.
fn expand<M: StateMachine>(
    ctx: &mut SearchContext<'_, M>,
    table: &mut VisitTable,
    state: &GameState,
) -> Result<()> {
    if table.get(state).is_some_and(NodeStats::is_expanded) {
        return Ok(());
    }

    let mut children = Vec::new();
    for joint in ctx.machine.legal_joint_moves(state)? {
        let next = ctx.next_state(state, &joint)?;
        table.register(&next);
        children.push(Child { joint, state: next });
    }
    table.register(state).children = Some(children);
    Ok(())
}

fn best_move<M: StateMachine>(
    ctx: &SearchContext<'_, M>,
    table: &VisitTable,
    root: &GameState,
    moves: &[Move],
) -> Move {
    let children = table
        .get(root)
        .and_then(|n| n.children.as_deref())
        .unwrap_or(&[]);

    let mut best = Incumbent::new(&moves[0], f64::NEG_INFINITY);
    for mv in moves {
        let (visits, reward) = children
            .iter()
            .filter(|c| c.played_by(ctx.role, mv))
            .filter_map(|c| table.get(&c.state))
            .fold((0u64, 0.0), |(v, r), n| (v + n.visits, r + n.total_reward));
        if visits > 0 {
            best.offer(mv, reward / visits as f64);
        }
    }
    best.into_move()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::{FactId, GameRng, JointMove, Role, RoleId};
    use crate::search::config::SearchConfig;
    use crate::search::deadline::Deadline;
    use crate::search::policy::{RandomRollout, Ucb1};
    use crate::search::stats::SearchStats;

    /// States 0 and 1 toggle into each other. Stopping at 0 ends in state 2
    /// worth 100; stopping at 1 ends in state 3 worth 0.
    struct Toggle {
        roles: Vec<Role>,
    }

    fn at(n: u32) -> GameState {
        GameState::new([FactId::new(n)])
    }

    fn value(state: &GameState) -> u32 {
        state.facts().next().map_or(0, |f| f.0)
    }

    impl StateMachine for Toggle {
        fn roles(&self) -> &[Role] {
            &self.roles
        }

        fn initial_state(&self) -> GameState {
            at(0)
        }

        fn is_terminal(&self, state: &GameState) -> bool {
            value(state) >= 2
        }

        fn goal(&self, state: &GameState, _role: RoleId) -> Result<u8> {
            Ok(if value(state) == 2 { 100 } else { 0 })
        }

        fn legal_moves(&self, _state: &GameState, _role: RoleId) -> Result<Vec<Move>> {
            Ok(vec![Move::new("toggle"), Move::new("stop")])
        }

        fn next_state(&self, state: &GameState, joint: &JointMove) -> Result<GameState> {
            let v = value(state);
            Ok(match joint[RoleId::new(0)].name() {
                "toggle" => at(1 - v),
                _ => at(v + 2),
            })
        }
    }

    #[test]
    fn test_cycle_backs_up_once_per_iteration() {
        let machine = Toggle {
            roles: vec![Role::new("solo")],
        };
        let config = SearchConfig::default();
        let mut rng = GameRng::new(11);
        let mut stats = SearchStats::new();
        let mut ctx = SearchContext {
            machine: &machine,
            role: RoleId::new(0),
            deadline: Deadline::after(Duration::from_secs(60)),
            config: &config,
            rng: &mut rng,
            stats: &mut stats,
            selection: &Ucb1,
            simulation: &RandomRollout,
        };

        let root = at(0);
        let mut table = VisitTable::with_root(&root);
        for _ in 0..300 {
            assert!(iterate(&mut ctx, &mut table, &root).unwrap());
        }

        assert_eq!(table.visits(&root), 300);
        assert!(table.visits(&at(1)) <= 300);
        assert!(ctx.stats.max_depth >= 1);
    }
}
