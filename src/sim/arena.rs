//! Id-indexed entity storage
//!
//! Entities are addressed by a monotonically increasing [`EntityId`].
//! Iteration is always in id order so that the simulation stays deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Handle to an entity inside an [`Arena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Collection of entities of one kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena<T> {
    entries: BTreeMap<EntityId, T>,
    next_id: u32,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an entity and return its handle
    pub fn insert(&mut self, value: T) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, value);
        id
    }

    pub fn remove(&mut self, id: EntityId) -> Option<T> {
        self.entries.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in id order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.entries.iter().map(|(id, value)| (*id, value))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Keep entities matching `keep`; returns how many were removed
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, value| keep(value));
        before - self.entries.len()
    }

    /// Drop every entity. Ids keep counting so stale handles never alias.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
