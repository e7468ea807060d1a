//! Role identification and per-role data storage.
//!
//! ## RoleId
//!
//! Positional role identifier. A game's role list is fixed when the graph
//! is compiled; `RoleId(i)` names the i-th entry.
//!
//! ## RoleMap
//!
//! Per-role data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `RoleId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Role identifier supporting 1-255 roles.
///
/// Role indices are 0-based and follow the compiled role order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoleId(pub u8);

impl RoleId {
    /// Create a new role ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw role index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all role IDs for a game with `role_count` roles.
    ///
    /// ```
    /// use rust_ggp::core::RoleId;
    ///
    /// let roles: Vec<_> = RoleId::all(3).collect();
    /// assert_eq!(roles, vec![RoleId::new(0), RoleId::new(1), RoleId::new(2)]);
    /// ```
    pub fn all(role_count: usize) -> impl Iterator<Item = RoleId> {
        (0..role_count as u8).map(RoleId)
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Role {}", self.0)
    }
}

/// A role's name as declared by the game description.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role(pub String);

impl Role {
    /// Create a role from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The role's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-role data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per role.
///
/// ## Example
///
/// ```
/// use rust_ggp::core::{RoleId, RoleMap};
///
/// let mut goals: RoleMap<u8> = RoleMap::with_value(2, 0);
/// goals[RoleId::new(1)] = 100;
/// assert_eq!(goals[RoleId::new(0)], 0);
/// assert_eq!(goals[RoleId::new(1)], 100);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleMap<T> {
    data: Vec<T>,
}

impl<T> RoleMap<T> {
    /// Create a new RoleMap with values from a factory function.
    pub fn new(role_count: usize, factory: impl Fn(RoleId) -> T) -> Self {
        assert!(role_count > 0, "Must have at least 1 role");
        assert!(role_count <= 255, "At most 255 roles supported");

        let data = (0..role_count as u8).map(|i| factory(RoleId(i))).collect();

        Self { data }
    }

    /// Create a new RoleMap with all entries set to the same value.
    pub fn with_value(role_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(role_count, |_| value.clone())
    }

    /// Create a new RoleMap with default values.
    pub fn with_default(role_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(role_count, |_| T::default())
    }

    /// Get the number of roles.
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a role's data, if the role exists.
    #[must_use]
    pub fn get(&self, role: RoleId) -> Option<&T> {
        self.data.get(role.index())
    }

    /// Get a mutable reference to a role's data, if the role exists.
    pub fn get_mut(&mut self, role: RoleId) -> Option<&mut T> {
        self.data.get_mut(role.index())
    }

    /// Iterate over (RoleId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (RoleId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (RoleId(i as u8), v))
    }

    /// Iterate over all role IDs.
    pub fn role_ids(&self) -> impl Iterator<Item = RoleId> {
        (0..self.data.len() as u8).map(RoleId)
    }
}

impl<T> Index<RoleId> for RoleMap<T> {
    type Output = T;

    fn index(&self, role: RoleId) -> &Self::Output {
        &self.data[role.index()]
    }
}

impl<T> IndexMut<RoleId> for RoleMap<T> {
    fn index_mut(&mut self, role: RoleId) -> &mut Self::Output {
        &mut self.data[role.index()]
    }
}
