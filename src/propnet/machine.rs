//! State machine backed by a propositional network.
//!
//! Every query builds a fresh [`Assignment`]: base facts and moves are
//! marked, then the dependent components are computed in evaluation order.
//! The graph itself is never mutated, so answers depend only on the query.

use tracing::{debug, warn};

use crate::core::{FactId, GameState, JointMove, Move, Role, RoleId};
use crate::error::{Error, Result};
use crate::rules::StateMachine;

use super::component::{Assignment, ComponentId};
use super::net::PropNet;
use super::ordering::order;

/// Evaluator over a compiled, ordered graph.
#[derive(Clone, Debug)]
pub struct PropNetStateMachine {
    net: PropNet,
    order: Vec<ComponentId>,
    initial: GameState,
}

impl PropNetStateMachine {
    /// Validate and order the graph, then compute the initial state.
    ///
    /// Fails on a dependency cycle or a missing designation.
    pub fn new(net: PropNet) -> Result<Self> {
        net.validate()?;
        let order = order(&net)?;
        let mut machine = Self {
            net,
            order,
            initial: GameState::empty(),
        };
        machine.initial = machine.compute_initial_state();
        debug!(
            components = machine.net.len(),
            ordered = machine.order.len(),
            initial_facts = machine.initial.len(),
            "propnet state machine ready"
        );
        Ok(machine)
    }

    /// The underlying graph.
    #[must_use]
    pub fn net(&self) -> &PropNet {
        &self.net
    }

    /// The evaluation order of dependent components.
    #[must_use]
    pub fn order(&self) -> &[ComponentId] {
        &self.order
    }

    /// Evaluate every component for `state` and an optional joint move.
    ///
    /// Without a joint move every input proposition reads false.
    pub fn evaluate(&self, state: &GameState, joint: Option<&JointMove>) -> Result<Assignment> {
        let mut values = Assignment::new(self.net.len());
        self.mark_state(&mut values, state);
        if let Some(joint) = joint {
            self.mark_joint_move(&mut values, joint)?;
        }
        self.propagate(&mut values);
        Ok(values)
    }

    fn evaluate_state(&self, state: &GameState) -> Assignment {
        let mut values = Assignment::new(self.net.len());
        self.mark_state(&mut values, state);
        self.propagate(&mut values);
        values
    }

    /// Base propositions take their membership in `state`; facts unknown to
    /// the graph are ignored.
    fn mark_state(&self, values: &mut Assignment, state: &GameState) {
        for fact in state.facts() {
            if let Some(&base) = self.net.bases().get(fact.index()) {
                values.set(base, true);
            }
        }
    }

    /// An input proposition is true when its role plays its move. A no-op
    /// without an input proposition marks nothing.
    fn mark_joint_move(&self, values: &mut Assignment, joint: &JointMove) -> Result<()> {
        let expected = self.net.role_count();
        if joint.len() != expected {
            return Err(Error::JointMoveArity {
                expected,
                got: joint.len(),
            });
        }
        for (role, mv) in joint.iter() {
            match self.net.input(role, mv) {
                Some(id) => values.set(id, true),
                None if mv.is_noop() => {}
                None => {
                    return Err(Error::MoveDefinition {
                        role,
                        mv: mv.clone(),
                    })
                }
            }
        }
        Ok(())
    }

    fn propagate(&self, values: &mut Assignment) {
        let components = self.net.components();
        for &id in &self.order {
            let value = components[id.index()].compute(values);
            values.set(id, value);
        }
    }

    /// Read the next state from each base proposition's transition.
    fn read_next_state(&self, values: &Assignment) -> GameState {
        let components = self.net.components();
        self.net
            .bases()
            .iter()
            .enumerate()
            .filter(|(_, base)| {
                components[base.index()]
                    .inputs
                    .first()
                    .is_some_and(|&transition| values.get(transition))
            })
            .map(|(i, _)| FactId(i as u32))
            .collect()
    }

    /// Force the init marker true over an empty state and read the result.
    ///
    /// The marker lives only in this throwaway assignment, so it reads false
    /// in every later evaluation.
    fn compute_initial_state(&self) -> GameState {
        let mut values = Assignment::new(self.net.len());
        values.set(self.net.init(), true);
        self.propagate(&mut values);
        self.read_next_state(&values)
    }

    fn check_role(&self, role: RoleId) -> Result<()> {
        let count = self.net.role_count();
        if role.index() < count {
            Ok(())
        } else {
            Err(Error::UnknownRole {
                index: role.index(),
                count,
            })
        }
    }
}

impl StateMachine for PropNetStateMachine {
    fn roles(&self) -> &[Role] {
        self.net.roles()
    }

    fn initial_state(&self) -> GameState {
        self.initial.clone()
    }

    fn is_terminal(&self, state: &GameState) -> bool {
        self.evaluate_state(state).get(self.net.terminal())
    }

    fn goal(&self, state: &GameState, role: RoleId) -> Result<u8> {
        self.check_role(role)?;
        let values = self.evaluate_state(state);
        let mut true_goals = self
            .net
            .goals(role)
            .iter()
            .filter(|(_, id)| values.get(*id))
            .map(|(value, _)| *value);

        match (true_goals.next(), true_goals.next()) {
            (Some(value), None) => Ok(value),
            (first, second) => {
                let true_count =
                    usize::from(first.is_some()) + usize::from(second.is_some()) + true_goals.count();
                warn!(
                    %role,
                    true_count,
                    state = %self.net.describe(state),
                    "goal is ill-defined"
                );
                Err(Error::GoalDefinition { role, true_count })
            }
        }
    }

    fn legal_moves(&self, state: &GameState, role: RoleId) -> Result<Vec<Move>> {
        self.check_role(role)?;
        let values = self.evaluate_state(state);
        Ok(self
            .net
            .legals(role)
            .iter()
            .filter(|(_, id)| values.get(*id))
            .map(|(mv, _)| mv.clone())
            .collect())
    }

    fn next_state(&self, state: &GameState, joint: &JointMove) -> Result<GameState> {
        let values = self.evaluate(state, Some(joint))?;
        Ok(self.read_next_state(&values))
    }

    fn role_index(&self, name: &str) -> Option<RoleId> {
        self.net.role_index(name)
    }
}
