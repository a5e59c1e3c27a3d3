//! Entity records with generational indices.
//!
//! The `EntityStore` allocates ids, owns every entity record, and tracks
//! generations to detect stale references to destroyed entities.

// Allow u64 to usize casts - we target 64-bit systems
#![allow(clippy::cast_possible_truncation)]

use wayfarer_foundation::{EntityId, Error, Result};

use crate::record::Entity;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One slot of the store. Odd generations are alive, even ones free.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Owns every entity record.
///
/// Slots of destroyed entities go on a free list and are reused with a
/// bumped generation.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityStore {
    slots: Vec<Slot>,
    free_list: Vec<u64>,
    live_count: usize,
}

impl EntityStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an id and stores the record `build` returns for it.
    pub fn spawn(&mut self, build: impl FnOnce(EntityId) -> Entity) -> EntityId {
        self.live_count += 1;

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation += 1;
            let id = EntityId::new(index, slot.generation);
            slot.entity = Some(build(id));
            id
        } else {
            let index = self.slots.len() as u64;
            let id = EntityId::new(index, 1);
            self.slots.push(Slot {
                generation: 1,
                entity: Some(build(id)),
            });
            id
        }
    }

    /// Destroys an entity and returns its record.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is stale or was never allocated.
    pub fn destroy(&mut self, id: EntityId) -> Result<Entity> {
        self.validate(id)?;

        let slot = &mut self.slots[id.index as usize];
        slot.generation += 1;
        let entity = slot
            .entity
            .take()
            .ok_or_else(|| Error::entity_not_found(id))?;
        self.free_list.push(id.index);
        self.live_count -= 1;
        Ok(entity)
    }

    /// Checks that an id refers to a live entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is stale or was never allocated.
    pub fn validate(&self, id: EntityId) -> Result<()> {
        let Some(slot) = self.slots.get(id.index as usize) else {
            return Err(Error::entity_not_found(id));
        };
        if slot.generation != id.generation {
            return Err(Error::stale_entity(id));
        }
        if slot.generation % 2 == 0 || slot.entity.is_none() {
            return Err(Error::entity_not_found(id));
        }
        Ok(())
    }

    /// Returns true if the id refers to a live entity.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.validate(id).is_ok()
    }

    /// Gets an entity record.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is stale or was never allocated.
    pub fn get(&self, id: EntityId) -> Result<&Entity> {
        self.validate(id)?;
        self.slots[id.index as usize]
            .entity
            .as_ref()
            .ok_or_else(|| Error::entity_not_found(id))
    }

    /// Gets a mutable entity record.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is stale or was never allocated.
    pub fn get_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        self.validate(id)?;
        self.slots[id.index as usize]
            .entity
            .as_mut()
            .ok_or_else(|| Error::entity_not_found(id))
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live_count
    }

    /// Returns true if there are no live entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Iterates live entities in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.slots.iter().filter_map(|slot| slot.entity.as_ref())
    }
}
