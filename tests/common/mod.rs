//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::time::Duration;

use rust_ggp::core::{GameState, JointMove, Move, Role, RoleId};
use rust_ggp::error::{Error, Result};
use rust_ggp::propnet::{PropNet, PropNetBuilder};
use rust_ggp::rules::StateMachine;

pub const FIRST: RoleId = RoleId::new(0);
pub const SECOND: RoleId = RoleId::new(1);

/// Route engine logs to the test harness. Set `RUST_LOG` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One simultaneous turn: the first role plays `win` or `lose`, the second
/// `a` or `b`. The first role scores 100 exactly when it played `win`.
pub fn one_shot() -> PropNet {
    let mut b = PropNetBuilder::new(["chooser", "bystander"]);
    let done = b.base("done");
    let won = b.base("won");

    let win = b.input(FIRST, "win");
    let lose = b.input(FIRST, "lose");
    b.input(SECOND, "a");
    b.input(SECOND, "b");

    let played = b.or(&[win, lose]);
    b.next(done, played);
    b.next(won, win);

    let open = b.not(done);
    for (role, mv) in [(FIRST, "win"), (FIRST, "lose"), (SECOND, "a"), (SECOND, "b")] {
        let legal = b.legal(role, mv);
        b.wire(open, legal);
    }

    let lost = b.not(won);
    let first_wins = b.goal(FIRST, 100);
    b.wire(won, first_wins);
    let first_loses = b.goal(FIRST, 0);
    b.wire(lost, first_loses);
    let second_loses = b.goal(SECOND, 0);
    b.wire(won, second_loses);
    let second_wins = b.goal(SECOND, 100);
    b.wire(lost, second_wins);

    let terminal = b.terminal();
    b.wire(done, terminal);
    b.build().expect("one-shot net is valid")
}

/// Init makes `p` and `q` true and leaves `r` false.
pub fn initial_graph() -> PropNet {
    let mut b = PropNetBuilder::new(["solo"]);
    let init = b.init();
    let p = b.base("p");
    let q = b.base("q");
    let r = b.base("r");

    b.next(p, init);
    let q_next = b.or(&[init, p]);
    b.next(q, q_next);
    b.next(r, r);

    let always = b.constant(true);
    let wait = b.legal(FIRST, "wait");
    b.wire(always, wait);

    let win = b.goal(FIRST, 100);
    b.wire(q, win);
    let not_q = b.not(q);
    let lose = b.goal(FIRST, 0);
    b.wire(not_q, lose);

    let terminal = b.terminal();
    b.wire(r, terminal);
    b.build().expect("initial graph is valid")
}

/// One role, two moves, and a terminal state where both the 100 and the 0
/// goal hold.
pub fn ill_defined_goals() -> PropNet {
    let mut b = PropNetBuilder::new(["solo"]);
    let done = b.base("done");
    let a = b.input(FIRST, "a");
    let bb = b.input(FIRST, "b");
    let played = b.or(&[a, bb]);
    b.next(done, played);

    let open = b.not(done);
    for mv in ["a", "b"] {
        let legal = b.legal(FIRST, mv);
        b.wire(open, legal);
    }

    let win = b.goal(FIRST, 100);
    b.wire(done, win);
    let lose = b.goal(FIRST, 0);
    b.wire(done, lose);

    let terminal = b.terminal();
    b.wire(done, terminal);
    b.build().expect("goal overlap passes validation")
}

// =============================================================================
// Game Trees
// =============================================================================

/// A node of an explicit two-role game tree.
#[derive(Clone, Debug)]
pub enum Node {
    /// Terminal; the first role scores the value, the second its complement.
    Leaf(u8),
    /// `role` picks a child while the other role waits.
    Turn { role: RoleId, children: Vec<usize> },
    /// Both roles move; `children[i][j]` follows `(m{i+1}, r{j+1})`.
    Both { children: Vec<Vec<usize>> },
}

/// A [`StateMachine`] over an explicit tree. State `{n}` is node `n`.
///
/// The first role's moves are named `m1, m2, ..`; the second's `r1, r2, ..`.
pub struct TreeGame {
    roles: Vec<Role>,
    nodes: Vec<Node>,
}

fn move_name(role: RoleId, i: usize) -> Move {
    let prefix = if role == FIRST { 'm' } else { 'r' };
    Move::new(format!("{prefix}{}", i + 1))
}

fn move_index(mv: &Move) -> Option<usize> {
    mv.name().get(1..)?.parse::<usize>().ok()?.checked_sub(1)
}

impl TreeGame {
    /// Node 0 is the root.
    pub fn new(nodes: Vec<Node>) -> Self {
        Self {
            roles: vec![Role::new("max"), Role::new("min")],
            nodes,
        }
    }

    /// The node a state stands for.
    pub fn node(state: &GameState) -> usize {
        state.facts().next().map_or(0, |f| f.index())
    }

    pub fn state(node: usize) -> GameState {
        GameState::new([rust_ggp::core::FactId::new(node as u32)])
    }

    fn lookup(&self, state: &GameState) -> &Node {
        &self.nodes[Self::node(state)]
    }

    /// Random alternating tree from a stream of choices in 0..=99.
    ///
    /// The root is the first role's turn. Branching is 2-3 and every path
    /// ends in a leaf by `depth`.
    pub fn alternating(depth: u32, choices: &[u8]) -> Self {
        let mut nodes = Vec::new();
        let mut cursor = 0usize;
        let mut next = || {
            let value = choices.get(cursor % choices.len().max(1)).copied().unwrap_or(50);
            cursor += 1;
            value
        };
        Self::grow(&mut nodes, FIRST, depth, &mut next);
        Self::new(nodes)
    }

    fn grow(nodes: &mut Vec<Node>, role: RoleId, depth: u32, next: &mut impl FnMut() -> u8) -> usize {
        let id = nodes.len();
        if depth == 0 {
            nodes.push(Node::Leaf(next() % 101));
            return id;
        }
        nodes.push(Node::Leaf(0));
        let branching = 2 + usize::from(next() % 2);
        let other = if role == FIRST { SECOND } else { FIRST };
        let mut children = Vec::with_capacity(branching);
        for _ in 0..branching {
            children.push(Self::grow(nodes, other, depth - 1, next));
        }
        nodes[id] = Node::Turn { role, children };
        id
    }
}

impl StateMachine for TreeGame {
    fn roles(&self) -> &[Role] {
        &self.roles
    }

    fn initial_state(&self) -> GameState {
        Self::state(0)
    }

    fn is_terminal(&self, state: &GameState) -> bool {
        matches!(self.lookup(state), Node::Leaf(_))
    }

    fn goal(&self, state: &GameState, role: RoleId) -> Result<u8> {
        match self.lookup(state) {
            Node::Leaf(v) if role == FIRST => Ok(*v),
            Node::Leaf(v) => Ok(100 - *v),
            _ => Err(Error::GoalDefinition { role, true_count: 0 }),
        }
    }

    fn legal_moves(&self, state: &GameState, role: RoleId) -> Result<Vec<Move>> {
        Ok(match self.lookup(state) {
            Node::Leaf(_) => Vec::new(),
            Node::Turn { role: mover, children } if *mover == role => {
                (0..children.len()).map(|i| move_name(role, i)).collect()
            }
            Node::Turn { .. } => vec![Move::noop()],
            Node::Both { children } => {
                let n = if role == FIRST {
                    children.len()
                } else {
                    children[0].len()
                };
                (0..n).map(|i| move_name(role, i)).collect()
            }
        })
    }

    fn next_state(&self, state: &GameState, joint: &JointMove) -> Result<GameState> {
        let bad = |role: RoleId| Error::MoveDefinition {
            role,
            mv: joint[role].clone(),
        };
        let child = match self.lookup(state) {
            Node::Leaf(_) => return Err(bad(FIRST)),
            Node::Turn { role, children } => {
                let i = move_index(&joint[*role]).ok_or_else(|| bad(*role))?;
                *children.get(i).ok_or_else(|| bad(*role))?
            }
            Node::Both { children } => {
                let i = move_index(&joint[FIRST]).ok_or_else(|| bad(FIRST))?;
                let j = move_index(&joint[SECOND]).ok_or_else(|| bad(SECOND))?;
                *children
                    .get(i)
                    .and_then(|row| row.get(j))
                    .ok_or_else(|| bad(FIRST))?
            }
        };
        Ok(Self::state(child))
    }
}

/// Exact minimax value of the first role at `node`.
pub fn tree_value(game: &TreeGame, node: usize) -> u8 {
    match &game.nodes[node] {
        Node::Leaf(v) => *v,
        Node::Turn { role, children } => {
            let values = children.iter().map(|&c| tree_value(game, c));
            if *role == FIRST {
                values.max().unwrap_or(0)
            } else {
                values.min().unwrap_or(100)
            }
        }
        Node::Both { children } => children
            .iter()
            .map(|row| row.iter().map(|&c| tree_value(game, c)).min().unwrap_or(100))
            .max()
            .unwrap_or(0),
    }
}

/// Value of the first role's move `i` at the root.
pub fn root_move_value(game: &TreeGame, i: usize) -> u8 {
    match &game.nodes[0] {
        Node::Turn { children, .. } => tree_value(game, children[i]),
        Node::Both { children } => children[i]
            .iter()
            .map(|&c| tree_value(game, c))
            .min()
            .unwrap_or(100),
        Node::Leaf(v) => *v,
    }
}

// =============================================================================
// Wrappers
// =============================================================================

/// Records every joint move passed to `next_state`.
pub struct CountingMachine<M> {
    pub inner: M,
    pub joints: RefCell<Vec<(GameState, JointMove)>>,
}

impl<M: StateMachine> CountingMachine<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            joints: RefCell::new(Vec::new()),
        }
    }

    /// Whether `joint` was ever applied to `state`.
    pub fn evaluated(&self, state: &GameState, joint: &JointMove) -> bool {
        self.joints
            .borrow()
            .iter()
            .any(|(s, j)| s == state && j == joint)
    }

    /// Whether any applied joint move had `role` playing `mv`.
    pub fn played(&self, role: RoleId, mv: &str) -> bool {
        self.joints
            .borrow()
            .iter()
            .any(|(_, j)| j[role].name() == mv)
    }
}

impl<M: StateMachine> StateMachine for CountingMachine<M> {
    fn roles(&self) -> &[Role] {
        self.inner.roles()
    }

    fn initial_state(&self) -> GameState {
        self.inner.initial_state()
    }

    fn is_terminal(&self, state: &GameState) -> bool {
        self.inner.is_terminal(state)
    }

    fn goal(&self, state: &GameState, role: RoleId) -> Result<u8> {
        self.inner.goal(state, role)
    }

    fn legal_moves(&self, state: &GameState, role: RoleId) -> Result<Vec<Move>> {
        self.inner.legal_moves(state, role)
    }

    fn next_state(&self, state: &GameState, joint: &JointMove) -> Result<GameState> {
        self.joints
            .borrow_mut()
            .push((state.clone(), joint.clone()));
        self.inner.next_state(state, joint)
    }
}

/// Sleeps on every transition to make searches slow.
pub struct SlowMachine<M> {
    pub inner: M,
    pub delay: Duration,
}

impl<M: StateMachine> StateMachine for SlowMachine<M> {
    fn roles(&self) -> &[Role] {
        self.inner.roles()
    }

    fn initial_state(&self) -> GameState {
        self.inner.initial_state()
    }

    fn is_terminal(&self, state: &GameState) -> bool {
        self.inner.is_terminal(state)
    }

    fn goal(&self, state: &GameState, role: RoleId) -> Result<u8> {
        self.inner.goal(state, role)
    }

    fn legal_moves(&self, state: &GameState, role: RoleId) -> Result<Vec<Move>> {
        self.inner.legal_moves(state, role)
    }

    fn next_state(&self, state: &GameState, joint: &JointMove) -> Result<GameState> {
        std::thread::sleep(self.delay);
        self.inner.next_state(state, joint)
    }
}
