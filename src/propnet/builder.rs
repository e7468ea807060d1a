//! Builder for component graphs.
//!
//! This is the hand-off point from a rule compiler: declare roles, facts,
//! moves and outputs, connect them with gates, then [`build`] to validate.
//!
//! ```
//! use rust_ggp::core::RoleId;
//! use rust_ggp::propnet::PropNetBuilder;
//!
//! let mut b = PropNetBuilder::new(["robot"]);
//! let robot = RoleId::new(0);
//! let done = b.base("done");
//! let init = b.init();
//! let push = b.input(robot, "push");
//! let went = b.or(&[init, push]);
//! b.next(done, went);
//! let legal = b.legal(robot, "push");
//! let not_done = b.not(done);
//! b.wire(not_done, legal);
//! let win = b.goal(robot, 100);
//! b.wire(done, win);
//! let lose = b.goal(robot, 0);
//! b.wire(not_done, lose);
//! let terminal = b.terminal();
//! b.wire(done, terminal);
//!
//! let net = b.build().unwrap();
//! assert_eq!(net.bases().len(), 1);
//! ```
//!
//! [`build`]: PropNetBuilder::build

use rustc_hash::FxHashMap;

use crate::core::{Move, Role, RoleId, RoleMap};
use crate::error::{Error, Result};

use super::component::{Component, ComponentId, ComponentKind};
use super::net::PropNet;

/// Incrementally constructs a [`PropNet`].
#[derive(Clone, Debug)]
pub struct PropNetBuilder {
    roles: Vec<Role>,
    components: Vec<Component>,
    init: ComponentId,
    bases: Vec<ComponentId>,
    inputs: Vec<(RoleId, Move, ComponentId)>,
    legals: Vec<(RoleId, Move, ComponentId)>,
    goals: Vec<(RoleId, u8, ComponentId)>,
    terminal: Option<ComponentId>,
    /// Wiring requests naming components that do not exist.
    dangling: Vec<ComponentId>,
}

impl PropNetBuilder {
    /// Start a graph for the given ordered roles.
    ///
    /// The init marker is created up front.
    pub fn new<S: Into<String>>(roles: impl IntoIterator<Item = S>) -> Self {
        let mut builder = Self {
            roles: roles.into_iter().map(Role::new).collect(),
            components: Vec::new(),
            init: ComponentId(0),
            bases: Vec::new(),
            inputs: Vec::new(),
            legals: Vec::new(),
            goals: Vec::new(),
            terminal: None,
            dangling: Vec::new(),
        };
        builder.init = builder.push(Component::named(ComponentKind::Proposition, "init"));
        builder
    }

    fn push(&mut self, component: Component) -> ComponentId {
        let id = ComponentId(self.components.len() as u32);
        self.components.push(component);
        id
    }

    fn proposition(&mut self, name: String) -> ComponentId {
        self.push(Component::named(ComponentKind::Proposition, name))
    }

    fn gate(&mut self, kind: ComponentKind, inputs: &[ComponentId]) -> ComponentId {
        let id = self.push(Component::new(kind));
        for &src in inputs {
            self.wire(src, id);
        }
        id
    }

    /// The initial-state marker.
    #[must_use]
    pub fn init(&self) -> ComponentId {
        self.init
    }

    /// Number of components declared so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Declare a base fact. Facts are numbered in declaration order.
    pub fn base(&mut self, name: impl Into<String>) -> ComponentId {
        let id = self.proposition(name.into());
        self.bases.push(id);
        id
    }

    /// Declare the proposition "`role` plays `mv`".
    pub fn input(&mut self, role: RoleId, mv: impl Into<String>) -> ComponentId {
        let mv = Move::new(mv);
        let id = self.proposition(format!("does {} {}", role.0, mv));
        self.inputs.push((role, mv, id));
        id
    }

    /// Declare the proposition "`mv` is legal for `role`".
    pub fn legal(&mut self, role: RoleId, mv: impl Into<String>) -> ComponentId {
        let mv = Move::new(mv);
        let id = self.proposition(format!("legal {} {}", role.0, mv));
        self.legals.push((role, mv, id));
        id
    }

    /// Declare the proposition "`role` scores `value`".
    pub fn goal(&mut self, role: RoleId, value: u8) -> ComponentId {
        let id = self.proposition(format!("goal {} {}", role.0, value));
        self.goals.push((role, value, id));
        id
    }

    /// Declare the terminal proposition. A second call replaces the first.
    pub fn terminal(&mut self) -> ComponentId {
        let id = self.proposition("terminal".to_string());
        self.terminal = Some(id);
        id
    }

    /// Declare an intermediate named proposition.
    pub fn view(&mut self, name: impl Into<String>) -> ComponentId {
        self.proposition(name.into())
    }

    pub fn and(&mut self, inputs: &[ComponentId]) -> ComponentId {
        self.gate(ComponentKind::And, inputs)
    }

    pub fn or(&mut self, inputs: &[ComponentId]) -> ComponentId {
        self.gate(ComponentKind::Or, inputs)
    }

    pub fn not(&mut self, input: ComponentId) -> ComponentId {
        self.gate(ComponentKind::Not, &[input])
    }

    pub fn constant(&mut self, value: bool) -> ComponentId {
        self.push(Component::new(ComponentKind::Constant(value)))
    }

    /// Connect `src` as an input of `dst`.
    pub fn wire(&mut self, src: ComponentId, dst: ComponentId) {
        if src.index() >= self.components.len() {
            self.dangling.push(src);
        }
        match self.components.get_mut(dst.index()) {
            Some(c) => c.inputs.push(src),
            None => self.dangling.push(dst),
        }
    }

    /// Make `src` hold in the next state exactly when `base` should.
    ///
    /// Creates the transition feeding `base` and returns it.
    pub fn next(&mut self, base: ComponentId, src: ComponentId) -> ComponentId {
        let transition = self.gate(ComponentKind::Transition, &[src]);
        self.wire(transition, base);
        transition
    }

    /// Validate and freeze the graph.
    pub fn build(self) -> Result<PropNet> {
        let count = self.roles.len();
        if count == 0 {
            return Err(Error::NoRoles);
        }
        if count > usize::from(u8::MAX) {
            return Err(Error::TooManyRoles { count });
        }
        if let Some(&id) = self.dangling.first() {
            return Err(Error::UnknownComponent { id });
        }
        let terminal = self.terminal.ok_or(Error::MissingTerminal)?;

        let check_role = |role: RoleId| {
            if role.index() < count {
                Ok(())
            } else {
                Err(Error::UnknownRole {
                    index: role.index(),
                    count,
                })
            }
        };

        let mut inputs: RoleMap<FxHashMap<Move, ComponentId>> = RoleMap::with_default(count);
        for (role, mv, id) in self.inputs {
            check_role(role)?;
            inputs[role].insert(mv, id);
        }
        let mut legals: RoleMap<Vec<(Move, ComponentId)>> = RoleMap::with_default(count);
        for (role, mv, id) in self.legals {
            check_role(role)?;
            legals[role].push((mv, id));
        }
        let mut goals: RoleMap<Vec<(u8, ComponentId)>> = RoleMap::with_default(count);
        for (role, value, id) in self.goals {
            check_role(role)?;
            goals[role].push((value, id));
        }

        let net = PropNet {
            roles: self.roles,
            components: self.components,
            init: self.init,
            bases: self.bases,
            inputs,
            legals,
            goals,
            terminal,
        };
        net.validate()?;
        Ok(net)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R0: RoleId = RoleId::new(0);

    /// Smallest graph that passes validation.
    fn minimal() -> PropNetBuilder {
        let mut b = PropNetBuilder::new(["solo"]);
        let t = b.constant(true);
        let legal = b.legal(R0, "wait");
        b.wire(t, legal);
        let goal = b.goal(R0, 50);
        b.wire(t, goal);
        let terminal = b.terminal();
        b.wire(t, terminal);
        b
    }

    #[test]
    fn test_minimal_builds() {
        let net = minimal().build().unwrap();
        assert_eq!(net.role_count(), 1);
        assert_eq!(net.legals(R0).len(), 1);
        assert_eq!(net.goals(R0), &[(50, ComponentId(3))]);
    }

    #[test]
    fn test_no_roles() {
        let b = PropNetBuilder::new(Vec::<String>::new());
        assert!(matches!(b.build(), Err(Error::NoRoles)));
    }

    #[test]
    fn test_missing_terminal() {
        let mut b = PropNetBuilder::new(["solo"]);
        b.legal(R0, "wait");
        b.goal(R0, 0);
        assert!(matches!(b.build(), Err(Error::MissingTerminal)));
    }

    #[test]
    fn test_missing_goals_and_legals() {
        let mut b = PropNetBuilder::new(["solo"]);
        b.legal(R0, "wait");
        b.terminal();
        assert!(matches!(b.build(), Err(Error::MissingGoals { role }) if role == "solo"));

        let mut b = PropNetBuilder::new(["solo"]);
        b.goal(R0, 0);
        b.terminal();
        assert!(matches!(b.build(), Err(Error::MissingLegals { role }) if role == "solo"));
    }

    #[test]
    fn test_unknown_role() {
        let mut b = minimal();
        b.legal(RoleId::new(3), "wait");
        assert!(matches!(
            b.build(),
            Err(Error::UnknownRole { index: 3, count: 1 })
        ));
    }

    #[test]
    fn test_goal_value_range() {
        let mut b = minimal();
        b.goal(R0, 101);
        assert!(matches!(
            b.build(),
            Err(Error::InvalidGoalValue { value: 101, .. })
        ));
    }

    #[test]
    fn test_dangling_wire() {
        let mut b = minimal();
        let terminal = b.terminal();
        b.wire(ComponentId(999), terminal);
        assert!(matches!(
            b.build(),
            Err(Error::UnknownComponent { id: ComponentId(999) })
        ));
    }

    #[test]
    fn test_arity_errors() {
        let mut b = minimal();
        b.and(&[]);
        assert!(matches!(
            b.build(),
            Err(Error::InvalidArity {
                kind: ComponentKind::And,
                inputs: 0,
                ..
            })
        ));

        let mut b = minimal();
        let t = b.constant(true);
        let not = b.not(t);
        b.wire(t, not);
        assert!(matches!(
            b.build(),
            Err(Error::InvalidArity {
                kind: ComponentKind::Not,
                inputs: 2,
                ..
            })
        ));

        let mut b = minimal();
        let t = b.constant(true);
        let input = b.input(R0, "wait");
        b.wire(t, input);
        assert!(matches!(
            b.build(),
            Err(Error::InvalidArity {
                kind: ComponentKind::Proposition,
                inputs: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_base_must_be_fed_by_transition() {
        let mut b = minimal();
        let t = b.constant(true);
        let base = b.base("p");
        b.wire(t, base);
        assert!(matches!(
            b.build(),
            Err(Error::InvalidBaseInput {
                found: ComponentKind::Constant(true),
                ..
            })
        ));
    }

    #[test]
    fn test_base_without_transition_is_allowed() {
        let mut b = minimal();
        b.base("never");
        assert!(b.build().is_ok());
    }

    #[test]
    fn test_input_lookup() {
        let mut b = minimal();
        let id = b.input(R0, "wait");
        let net = b.build().unwrap();

        assert_eq!(net.input(R0, &Move::new("wait")), Some(id));
        assert_eq!(net.input(R0, &Move::new("jump")), None);
        assert_eq!(net.input(RoleId::new(1), &Move::new("wait")), None);
    }

    fn many_roles(count: usize) -> PropNetBuilder {
        let mut b = PropNetBuilder::new((0..count).map(|i| format!("r{i}")));
        let t = b.constant(true);
        for role in RoleId::all(count.min(255)) {
            let legal = b.legal(role, "wait");
            b.wire(t, legal);
            let goal = b.goal(role, 50);
            b.wire(t, goal);
        }
        let terminal = b.terminal();
        b.wire(t, terminal);
        b
    }

    #[test]
    fn test_role_limit() {
        assert!(many_roles(255).build().is_ok());
        assert!(matches!(
            many_roles(256).build(),
            Err(Error::TooManyRoles { count: 256 })
        ));
    }
}
