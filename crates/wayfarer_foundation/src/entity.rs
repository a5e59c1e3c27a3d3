//! Entity identifiers with generational indices.
//!
//! Every addressable game object (character, item, room) is named by an
//! [`EntityId`]. When an entity is destroyed its slot may be reused, so the
//! id also carries a generation to catch references that outlived it.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Generational identifier for a character, item, or room.
///
/// # Layout
/// - `index`: slot in the entity store
/// - `generation`: bumped every time the slot is recycled
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityId {
    /// Slot in the entity store.
    pub index: u64,
    /// Generation of the slot when this id was issued.
    pub generation: u32,
}

impl EntityId {
    /// Creates an id from its raw parts.
    #[must_use]
    pub const fn new(index: u64, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns true if `other` names the same slot, regardless of generation.
    #[must_use]
    pub const fn same_slot(self, other: Self) -> bool {
        self.index == other.index
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId(#{}v{})", self.index, self.generation)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}
