//! Circuit components and per-evaluation boolean assignments.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Index of a component in its graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId(pub u32);

impl ComponentId {
    /// Create a new component ID.
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

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a component computes from its inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    /// A named fact. Dependent propositions copy their single input.
    Proposition,
    /// True when every input is true.
    And,
    /// True when any input is true.
    Or,
    /// Negation of its single input.
    Not,
    /// Carries its input into the next state's base proposition.
    Transition,
    /// Fixed value.
    Constant(bool),
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentKind::Proposition => f.write_str("proposition"),
            ComponentKind::And => f.write_str("and"),
            ComponentKind::Or => f.write_str("or"),
            ComponentKind::Not => f.write_str("not"),
            ComponentKind::Transition => f.write_str("transition"),
            ComponentKind::Constant(v) => write!(f, "constant({v})"),
        }
    }
}

/// A node of the component graph.
///
/// Inputs are shared references by id; many components may read the same
/// input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub kind: ComponentKind,
    pub inputs: SmallVec<[ComponentId; 2]>,
    /// Fact or debugging name; gates are usually anonymous.
    pub name: Option<String>,
}

impl Component {
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            inputs: SmallVec::new(),
            name: None,
        }
    }

    pub fn named(kind: ComponentKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            inputs: SmallVec::new(),
            name: Some(name.into()),
        }
    }

    /// Compute this component's output from the current assignment.
    ///
    /// Inputs must already hold their values for this pass.
    #[inline]
    #[must_use]
    pub fn compute(&self, values: &Assignment) -> bool {
        match self.kind {
            ComponentKind::And => self.inputs.iter().all(|&i| values.get(i)),
            ComponentKind::Or => self.inputs.iter().any(|&i| values.get(i)),
            ComponentKind::Not => !self.inputs.first().is_some_and(|&i| values.get(i)),
            ComponentKind::Proposition | ComponentKind::Transition => {
                self.inputs.first().is_some_and(|&i| values.get(i))
            }
            ComponentKind::Constant(v) => v,
        }
    }
}

/// Boolean value of every component for one evaluation.
///
/// A fresh assignment is built for each query, so evaluations never share
/// state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    values: Vec<bool>,
}

impl Assignment {
    /// All-false assignment for a graph of `len` components.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            values: vec![false; len],
        }
    }

    /// Value of a component. Unknown ids read false.
    #[inline]
    #[must_use]
    pub fn get(&self, id: ComponentId) -> bool {
        self.values.get(id.index()).copied().unwrap_or(false)
    }

    #[inline]
    pub(crate) fn set(&mut self, id: ComponentId, value: bool) {
        if let Some(slot) = self.values.get_mut(id.index()) {
            *slot = value;
        }
    }

    /// Number of true components.
    #[must_use]
    pub fn count_true(&self) -> usize {
        self.values.iter().filter(|&&v| v).count()
    }
}
