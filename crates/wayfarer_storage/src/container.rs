//! Insertion-ordered entity containers.
//!
//! Room contents, inventories, and container items are [`Contents`];
//! worn gear is [`Equipment`], which additionally keys each entity by slot.
//! Both are backed by `im::Vector`, so cloning a world snapshot is cheap.

use wayfarer_foundation::EntityId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered collection of entities. Insertion order is scan order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contents(im::Vector<EntityId>);

impl Contents {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entity. Adding one that is already present is a no-op.
    pub fn insert(&mut self, id: EntityId) {
        if !self.contains(id) {
            self.0.push_back(id);
        }
    }

    /// Removes an entity, returning true if it was present.
    pub fn remove(&mut self, id: EntityId) -> bool {
        match self.0.index_of(&id) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns true if the entity is present.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.0.contains(&id)
    }

    /// Gets the entity at `index` in insertion order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<EntityId> {
        self.0.get(index).copied()
    }

    /// Iterates oldest-first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = EntityId> + '_ {
        self.0.iter().copied()
    }

    /// Iterates newest-first.
    pub fn newest_first(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.0.iter().rev().copied()
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copies the ids out, oldest-first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<EntityId> {
        self.iter().collect()
    }
}

impl FromIterator<EntityId> for Contents {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        let mut contents = Self::new();
        for id in iter {
            contents.insert(id);
        }
        contents
    }
}

/// Slot-keyed gear, ordered by the time each slot was filled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equipment(im::Vector<(String, EntityId)>);

impl Equipment {
    /// Creates an empty equipment map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `id` in `slot`. Returns false, changing nothing, if the slot is taken.
    pub fn insert(&mut self, slot: &str, id: EntityId) -> bool {
        if self.get(slot).is_some() {
            return false;
        }
        self.0.push_back((slot.to_string(), id));
        true
    }

    /// Empties `slot`, returning what was in it.
    pub fn remove(&mut self, slot: &str) -> Option<EntityId> {
        let index = self.0.iter().position(|(s, _)| s == slot)?;
        Some(self.0.remove(index).1)
    }

    /// Removes `id` from whatever slot holds it, returning the slot name.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<String> {
        let index = self.0.iter().position(|(_, e)| *e == id)?;
        Some(self.0.remove(index).0)
    }

    /// What is worn in `slot`.
    #[must_use]
    pub fn get(&self, slot: &str) -> Option<EntityId> {
        self.0.iter().find(|(s, _)| s == slot).map(|(_, id)| *id)
    }

    /// Which slot holds `id`.
    #[must_use]
    pub fn slot_of(&self, id: EntityId) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, e)| *e == id)
            .map(|(slot, _)| slot.as_str())
    }

    /// Returns true if `id` is worn in any slot.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.slot_of(id).is_some()
    }

    /// Iterates `(slot, entity)` pairs in fill order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, EntityId)> {
        self.0.iter().map(|(slot, id)| (slot.as_str(), *id))
    }

    /// Number of filled slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing is worn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
