//! The compiled component graph and its designated node sets.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{FactId, GameState, Move, Role, RoleId, RoleMap};
use crate::error::{Error, Result};

use super::component::{Component, ComponentId, ComponentKind};

/// A validated propositional network.
///
/// Produced by [`PropNetBuilder`](super::PropNetBuilder) or loaded with
/// [`PropNet::from_bytes`]. Base propositions are listed in fact order, so
/// `FactId(i)` names `bases[i]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PropNet {
    pub(super) roles: Vec<Role>,
    pub(super) components: Vec<Component>,
    pub(super) init: ComponentId,
    pub(super) bases: Vec<ComponentId>,
    pub(super) inputs: RoleMap<FxHashMap<Move, ComponentId>>,
    /// Legal propositions in declaration order.
    pub(super) legals: RoleMap<Vec<(Move, ComponentId)>>,
    pub(super) goals: RoleMap<Vec<(u8, ComponentId)>>,
    pub(super) terminal: ComponentId,
}

impl PropNet {
    /// The ordered role list.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    #[must_use]
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// Look up a role by name.
    #[must_use]
    pub fn role_index(&self, name: &str) -> Option<RoleId> {
        self.roles
            .iter()
            .position(|r| r.name() == name)
            .map(|i| RoleId(i as u8))
    }

    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    #[must_use]
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.index())
    }

    /// Number of components in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// The initial-state marker.
    #[must_use]
    pub fn init(&self) -> ComponentId {
        self.init
    }

    #[must_use]
    pub fn terminal(&self) -> ComponentId {
        self.terminal
    }

    /// Base propositions indexed by fact.
    #[must_use]
    pub fn bases(&self) -> &[ComponentId] {
        &self.bases
    }

    /// Input proposition for a role playing a move.
    #[must_use]
    pub fn input(&self, role: RoleId, mv: &Move) -> Option<ComponentId> {
        self.inputs.get(role)?.get(mv).copied()
    }

    /// Legal propositions of a role, in declaration order.
    #[must_use]
    pub fn legals(&self, role: RoleId) -> &[(Move, ComponentId)] {
        self.legals.get(role).map_or(&[], Vec::as_slice)
    }

    /// Goal propositions of a role with their values.
    #[must_use]
    pub fn goals(&self, role: RoleId) -> &[(u8, ComponentId)] {
        self.goals.get(role).map_or(&[], Vec::as_slice)
    }

    /// Name of a base fact.
    #[must_use]
    pub fn fact_name(&self, fact: FactId) -> Option<&str> {
        let id = self.bases.get(fact.index())?;
        self.component(*id)?.name.as_deref()
    }

    /// Find a base fact by name.
    #[must_use]
    pub fn fact_id(&self, name: &str) -> Option<FactId> {
        self.bases
            .iter()
            .position(|&id| {
                self.component(id)
                    .and_then(|c| c.name.as_deref())
                    .is_some_and(|n| n == name)
            })
            .map(|i| FactId(i as u32))
    }

    /// Build a state from fact names. Unknown names are skipped.
    pub fn state_of<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> GameState {
        names.into_iter().filter_map(|n| self.fact_id(n)).collect()
    }

    /// Human-readable state, facts in id order.
    #[must_use]
    pub fn describe(&self, state: &GameState) -> String {
        let names: Vec<String> = state
            .facts()
            .map(|f| {
                self.fact_name(f)
                    .map_or_else(|| f.to_string(), str::to_string)
            })
            .collect();
        format!("{{{}}}", names.join(", "))
    }

    /// Component name, or kind and id for anonymous components.
    #[must_use]
    pub fn label(&self, id: ComponentId) -> String {
        match self.component(id) {
            Some(Component {
                name: Some(name), ..
            }) => name.clone(),
            Some(c) => format!("{}{}", c.kind, id),
            None => id.to_string(),
        }
    }

    /// Mask of components whose values are assigned externally.
    ///
    /// These are the init marker, base propositions, and input
    /// propositions. They are never ordered.
    #[must_use]
    pub fn independent_mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.components.len()];
        let mut mark = |id: ComponentId| {
            if let Some(slot) = mask.get_mut(id.index()) {
                *slot = true;
            }
        };
        mark(self.init);
        self.bases.iter().copied().for_each(&mut mark);
        for (_, inputs) in self.inputs.iter() {
            inputs.values().copied().for_each(&mut mark);
        }
        mask
    }

    /// Serialize the graph for caching between matches.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Load a graph written by [`PropNet::to_bytes`].
    ///
    /// The loaded graph is validated like a freshly built one.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let net: PropNet = bincode::deserialize(bytes)?;
        net.validate()?;
        Ok(net)
    }

    /// Check designations and component arity.
    pub(crate) fn validate(&self) -> Result<()> {
        let count = self.roles.len();
        if count == 0 {
            return Err(Error::NoRoles);
        }
        if count > usize::from(u8::MAX) {
            return Err(Error::TooManyRoles { count });
        }
        for map_count in [
            self.inputs.role_count(),
            self.legals.role_count(),
            self.goals.role_count(),
        ] {
            if map_count != count {
                return Err(Error::UnknownRole {
                    index: map_count.max(count) - 1,
                    count,
                });
            }
        }

        let n = self.components.len();
        let check = |id: ComponentId| {
            if id.index() < n {
                Ok(())
            } else {
                Err(Error::UnknownComponent { id })
            }
        };
        check(self.init)?;
        check(self.terminal)?;
        for &id in &self.bases {
            check(id)?;
        }
        for role in RoleId::all(count) {
            for &id in self.inputs[role].values() {
                check(id)?;
            }
            for (_, id) in &self.legals[role] {
                check(*id)?;
            }
            for (_, id) in &self.goals[role] {
                check(*id)?;
            }
        }
        for c in &self.components {
            for &input in &c.inputs {
                check(input)?;
            }
        }

        self.validate_arity()?;

        for (role, r) in self.roles.iter().enumerate() {
            let role = RoleId(role as u8);
            let goals = &self.goals[role];
            if goals.is_empty() {
                return Err(Error::MissingGoals {
                    role: r.name().to_string(),
                });
            }
            if let Some(&(value, _)) = goals.iter().find(|(v, _)| *v > 100) {
                return Err(Error::InvalidGoalValue {
                    role: r.name().to_string(),
                    value,
                });
            }
            if self.legals[role].is_empty() {
                return Err(Error::MissingLegals {
                    role: r.name().to_string(),
                });
            }
        }
        Ok(())
    }

    fn validate_arity(&self) -> Result<()> {
        let independent = self.independent_mask();
        let is_base = {
            let mut mask = vec![false; self.components.len()];
            for &id in &self.bases {
                mask[id.index()] = true;
            }
            mask
        };

        for (i, c) in self.components.iter().enumerate() {
            let id = ComponentId(i as u32);
            let inputs = c.inputs.len();

            if is_base[i] {
                if let Some(&src) = c.inputs.first() {
                    let found = self.components[src.index()].kind;
                    if found != ComponentKind::Transition {
                        return Err(Error::InvalidBaseInput { id, found });
                    }
                }
                if inputs > 1 {
                    return Err(arity(id, c.kind, inputs, "at most 1"));
                }
                continue;
            }

            let (ok, expected) = match c.kind {
                ComponentKind::Proposition if independent[i] => (inputs == 0, "none"),
                ComponentKind::Proposition => (inputs <= 1, "at most 1"),
                ComponentKind::And | ComponentKind::Or => (inputs >= 1, "at least 1"),
                ComponentKind::Not | ComponentKind::Transition => (inputs == 1, "exactly 1"),
                ComponentKind::Constant(_) => (inputs == 0, "none"),
            };
            if !ok {
                return Err(arity(id, c.kind, inputs, expected));
            }
        }
        Ok(())
    }
}

fn arity(id: ComponentId, kind: ComponentKind, inputs: usize, expected: &'static str) -> Error {
    Error::InvalidArity {
        id,
        kind,
        inputs,
        expected,
    }
}
