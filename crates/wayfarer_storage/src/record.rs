//! Entity records: what the store holds for each character, item, and room.

use wayfarer_foundation::{EntityId, EntityKind, ItemType, Keywords, Role};

use crate::barrier::Barrier;
use crate::container::{Contents, Equipment};
use crate::party::PartyId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default number of items a character can carry.
pub const DEFAULT_INVENTORY_CAPACITY: usize = 20;

/// A stored entity.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Entity {
    /// Identifier.
    pub id: EntityId,
    /// Display name, e.g. "a brass key" or "Alice".
    pub name: String,
    /// Tokens the reference resolver matches against.
    pub keywords: Keywords,
    /// Kind-specific state.
    pub data: EntityData,
}

impl Entity {
    /// The entity kind.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self.data {
            EntityData::Character(_) => EntityKind::Character,
            EntityData::Item(_) => EntityKind::Item,
            EntityData::Room(_) => EntityKind::Room,
        }
    }

    /// Character data, if this is a character.
    #[must_use]
    pub fn as_character(&self) -> Option<&Character> {
        match &self.data {
            EntityData::Character(c) => Some(c),
            _ => None,
        }
    }

    /// Item data, if this is an item.
    #[must_use]
    pub fn as_item(&self) -> Option<&Item> {
        match &self.data {
            EntityData::Item(i) => Some(i),
            _ => None,
        }
    }

    /// Room data, if this is a room.
    #[must_use]
    pub fn as_room(&self) -> Option<&Room> {
        match &self.data {
            EntityData::Room(r) => Some(r),
            _ => None,
        }
    }

    pub(crate) fn as_character_mut(&mut self) -> Option<&mut Character> {
        match &mut self.data {
            EntityData::Character(c) => Some(c),
            _ => None,
        }
    }

    pub(crate) fn as_item_mut(&mut self) -> Option<&mut Item> {
        match &mut self.data {
            EntityData::Item(i) => Some(i),
            _ => None,
        }
    }

    pub(crate) fn as_room_mut(&mut self) -> Option<&mut Room> {
        match &mut self.data {
            EntityData::Room(r) => Some(r),
            _ => None,
        }
    }
}

/// Kind-specific entity state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntityData {
    /// A player or NPC.
    Character(Character),
    /// A carryable thing.
    Item(Item),
    /// A location.
    Room(Room),
}

/// A player or NPC.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Character {
    /// Privilege tier.
    pub role: Role,
    /// NPCs never hold a session.
    pub npc: bool,
    /// Current room, `None` while unplaced.
    pub room: Option<EntityId>,
    /// Carried items.
    pub inventory: Contents,
    /// Worn items.
    pub equipment: Equipment,
    /// Party membership.
    pub party: Option<PartyId>,
    /// Maximum carried items.
    pub capacity: usize,
}

impl Character {
    /// Creates a player character with the given role.
    #[must_use]
    pub fn player(role: Role) -> Self {
        Self {
            role,
            npc: false,
            room: None,
            inventory: Contents::new(),
            equipment: Equipment::new(),
            party: None,
            capacity: DEFAULT_INVENTORY_CAPACITY,
        }
    }

    /// Creates a non-player character.
    #[must_use]
    pub fn npc() -> Self {
        Self {
            npc: true,
            ..Self::player(Role::Player)
        }
    }

    /// Sets the carry capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Where an item currently is. An item is in exactly one place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ItemLocation {
    /// Not placed anywhere yet.
    #[default]
    Nowhere,
    /// Lying in a room.
    Room(EntityId),
    /// Carried by a character.
    Inventory(EntityId),
    /// Worn by a character in a slot.
    Equipped {
        /// The wearer.
        owner: EntityId,
        /// The slot name.
        slot: String,
    },
    /// Inside a container item.
    Inside(EntityId),
}

/// A carryable thing.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    /// Behavioural category.
    pub item_type: ItemType,
    /// Definition this item was made from; keys are matched by prototype.
    pub prototype: Option<String>,
    /// Current location.
    pub location: ItemLocation,
    /// Held items, for containers.
    pub contents: Contents,
    /// Lid state, for closeable containers.
    pub barrier: Option<Barrier>,
    /// Maximum held items, for containers.
    pub capacity: usize,
    /// Cannot be picked up.
    pub irretrievable: bool,
    /// Slots it can be worn in, in preference order. Empty if not wearable.
    pub slots: Vec<String>,
}

impl Item {
    /// Creates an item of the given type.
    #[must_use]
    pub fn new(item_type: ItemType) -> Self {
        Self {
            item_type,
            prototype: None,
            location: ItemLocation::Nowhere,
            contents: Contents::new(),
            barrier: None,
            capacity: if item_type == ItemType::Container { 10 } else { 0 },
            irretrievable: false,
            slots: Vec::new(),
        }
    }

    /// Sets the prototype.
    #[must_use]
    pub fn with_prototype(mut self, prototype: impl Into<String>) -> Self {
        self.prototype = Some(prototype.into());
        self
    }

    /// Gives the item a lid.
    #[must_use]
    pub fn with_barrier(mut self, barrier: Barrier) -> Self {
        self.barrier = Some(barrier);
        self
    }

    /// Sets the container capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Adds a slot the item can be worn in.
    #[must_use]
    pub fn worn_on(mut self, slot: impl Into<String>) -> Self {
        self.slots.push(slot.into());
        self
    }

    /// Returns true if the item can be worn somewhere.
    #[must_use]
    pub fn is_wearable(&self) -> bool {
        !self.slots.is_empty()
    }

    /// Makes the item impossible to pick up.
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.irretrievable = true;
        self
    }

    /// Returns true for container items.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.item_type == ItemType::Container
    }

    /// Returns true if the lid is shut.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.barrier.as_ref().is_some_and(|b| b.state.is_closed())
    }
}

/// A named exit from a room.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Exit {
    /// Direction word, e.g. "north".
    pub direction: String,
    /// Destination room.
    pub to: EntityId,
}

/// A location.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Room {
    /// Title shown by `look` and `where`.
    pub title: String,
    /// Area the room belongs to.
    pub area: String,
    /// Items on the floor.
    pub items: Contents,
    /// Characters present.
    pub occupants: Contents,
    /// Exits in listing order.
    pub exits: Vec<Exit>,
}

impl Room {
    /// Creates an empty room.
    #[must_use]
    pub fn new(title: impl Into<String>, area: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            area: area.into(),
            items: Contents::new(),
            occupants: Contents::new(),
            exits: Vec::new(),
        }
    }
}
