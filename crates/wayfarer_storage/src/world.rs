//! World state management.
//!
//! The `World` is the unified interface to all storage systems: entity
//! records, doors, parties, and the list of connected actors. Stores sit
//! behind `Arc`, so cloning a world is O(1); a command can work on a clone
//! and the caller commits it only once the command has finished.

use std::sync::Arc;

use tracing::trace;
use wayfarer_foundation::{
    EntityId, EntityKind, Error, ErrorKind, ItemType, Keywords, Result,
};

use crate::barrier::{Barrier, DoorStore, LockState};
use crate::container::Contents;
use crate::entity::EntityStore;
use crate::party::{PartyId, PartyStore};
use crate::record::{Character, Entity, EntityData, Exit, Item, ItemLocation, Room};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Snapshot of every piece of shared game state.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct World {
    /// Entity records.
    entities: Arc<EntityStore>,
    /// Doors between rooms.
    doors: Arc<DoorStore>,
    /// Party membership.
    parties: Arc<PartyStore>,
    /// Connected actors in connection order.
    sessions: Contents,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Creation
    // -------------------------------------------------------------------------

    fn spawn(&mut self, name: &str, data: EntityData) -> EntityId {
        let name = name.to_string();
        let keywords = Keywords::from_name(&name);
        Arc::make_mut(&mut self.entities).spawn(|id| Entity {
            id,
            name,
            keywords,
            data,
        })
    }

    /// Creates a room.
    pub fn create_room(&mut self, title: &str, area: &str) -> EntityId {
        self.spawn(title, EntityData::Room(Room::new(title, area)))
    }

    /// Creates an item. It starts out [`ItemLocation::Nowhere`].
    pub fn create_item(&mut self, name: &str, mut item: Item) -> EntityId {
        item.location = ItemLocation::Nowhere;
        self.spawn(name, EntityData::Item(item))
    }

    /// Creates a character. It starts out unplaced.
    pub fn create_character(&mut self, name: &str, mut character: Character) -> EntityId {
        character.room = None;
        self.spawn(name, EntityData::Character(character))
    }

    /// Adds an extra keyword to an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn add_keyword(&mut self, id: EntityId, token: &str) -> Result<()> {
        Arc::make_mut(&mut self.entities)
            .get_mut(id)?
            .keywords
            .insert(token);
        Ok(())
    }

    /// Destroys an entity, detaching it from wherever it is.
    ///
    /// Items held by a destroyed character or container are left
    /// [`ItemLocation::Nowhere`]. Exits and doors leading to a destroyed
    /// room are left dangling and reported as errors when used.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist or the world is
    /// inconsistent.
    pub fn destroy(&mut self, id: EntityId) -> Result<()> {
        match self.entity(id)?.kind() {
            EntityKind::Item => {
                self.detach_item(id)?;
                for inner in self.item(id)?.contents.to_vec() {
                    self.item_mut(inner)?.location = ItemLocation::Nowhere;
                }
            }
            EntityKind::Character => {
                if let Some(room) = self.character(id)?.room {
                    self.room_mut(room)?.occupants.remove(id);
                }
                self.sessions.remove(id);
                self.leave_party(id)?;
                let character = self.character(id)?;
                let held: Vec<EntityId> = character
                    .inventory
                    .iter()
                    .chain(character.equipment.iter().map(|(_, e)| e))
                    .collect();
                for item in held {
                    self.item_mut(item)?.location = ItemLocation::Nowhere;
                }
            }
            EntityKind::Room => {}
        }
        Arc::make_mut(&mut self.entities).destroy(id)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterates every live entity.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.iter()
    }

    /// Returns true if the id refers to a live entity.
    #[must_use]
    pub fn exists(&self, id: EntityId) -> bool {
        self.entities.exists(id)
    }

    /// Gets an entity record.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn entity(&self, id: EntityId) -> Result<&Entity> {
        self.entities.get(id)
    }

    /// Display name of an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn name(&self, id: EntityId) -> Result<&str> {
        Ok(self.entity(id)?.name.as_str())
    }

    /// Keywords of an entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist.
    pub fn keywords(&self, id: EntityId) -> Result<&Keywords> {
        Ok(&self.entity(id)?.keywords)
    }

    /// Gets a character record.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist or is not a character.
    pub fn character(&self, id: EntityId) -> Result<&Character> {
        let entity = self.entity(id)?;
        entity
            .as_character()
            .ok_or_else(|| Error::wrong_kind(id, EntityKind::Character, entity.kind()))
    }

    /// Gets an item record.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist or is not an item.
    pub fn item(&self, id: EntityId) -> Result<&Item> {
        let entity = self.entity(id)?;
        entity
            .as_item()
            .ok_or_else(|| Error::wrong_kind(id, EntityKind::Item, entity.kind()))
    }

    /// Gets a room record.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist or is not a room.
    pub fn room(&self, id: EntityId) -> Result<&Room> {
        let entity = self.entity(id)?;
        entity
            .as_room()
            .ok_or_else(|| Error::wrong_kind(id, EntityKind::Room, entity.kind()))
    }

    fn character_mut(&mut self, id: EntityId) -> Result<&mut Character> {
        let entity = Arc::make_mut(&mut self.entities).get_mut(id)?;
        let kind = entity.kind();
        entity
            .as_character_mut()
            .ok_or_else(|| Error::wrong_kind(id, EntityKind::Character, kind))
    }

    fn item_mut(&mut self, id: EntityId) -> Result<&mut Item> {
        let entity = Arc::make_mut(&mut self.entities).get_mut(id)?;
        let kind = entity.kind();
        entity
            .as_item_mut()
            .ok_or_else(|| Error::wrong_kind(id, EntityKind::Item, kind))
    }

    fn room_mut(&mut self, id: EntityId) -> Result<&mut Room> {
        let entity = Arc::make_mut(&mut self.entities).get_mut(id)?;
        let kind = entity.kind();
        entity
            .as_room_mut()
            .ok_or_else(|| Error::wrong_kind(id, EntityKind::Room, kind))
    }

    // -------------------------------------------------------------------------
    // Sessions
    // -------------------------------------------------------------------------

    /// Marks a player character as connected. Connecting twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not a character or is an NPC.
    pub fn connect(&mut self, actor: EntityId) -> Result<()> {
        if self.character(actor)?.npc {
            return Err(Error::internal(format!(
                "NPC {actor} cannot hold a session"
            )));
        }
        self.sessions.insert(actor);
        Ok(())
    }

    /// Marks a character as disconnected. Returns true if it was connected.
    pub fn disconnect(&mut self, actor: EntityId) -> bool {
        self.sessions.remove(actor)
    }

    /// Returns true if the actor holds a session.
    #[must_use]
    pub fn is_connected(&self, actor: EntityId) -> bool {
        self.sessions.contains(actor)
    }

    /// Connected actors in connection order.
    pub fn connected(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.sessions.iter()
    }

    /// Finds a connected actor by exact name, ignoring case.
    #[must_use]
    pub fn find_connected(&self, name: &str) -> Option<EntityId> {
        self.connected().find(|&actor| {
            self.name(actor)
                .is_ok_and(|actor_name| actor_name.eq_ignore_ascii_case(name))
        })
    }

    // -------------------------------------------------------------------------
    // Rooms and movement
    // -------------------------------------------------------------------------

    /// Moves a character into a room, leaving its previous room.
    ///
    /// # Errors
    ///
    /// Returns an error if either entity is missing or of the wrong kind.
    pub fn place_character(&mut self, actor: EntityId, room: EntityId) -> Result<()> {
        self.room(room)?;
        if let Some(previous) = self.character(actor)?.room {
            self.room_mut(previous)?.occupants.remove(actor);
        }
        self.character_mut(actor)?.room = Some(room);
        self.room_mut(room)?.occupants.insert(actor);
        trace!(%actor, %room, "character placed");
        Ok(())
    }

    /// The room a character is in.
    ///
    /// # Errors
    ///
    /// Returns an error if the character is missing or unplaced.
    pub fn room_of(&self, actor: EntityId) -> Result<EntityId> {
        self.character(actor)?
            .room
            .ok_or_else(|| Error::new(ErrorKind::NotPlaced(actor)))
    }

    /// Characters present in a room, in arrival order.
    ///
    /// # Errors
    ///
    /// Returns an error if the room does not exist.
    pub fn occupants(&self, room: EntityId) -> Result<&Contents> {
        Ok(&self.room(room)?.occupants)
    }

    /// Area a room belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if the room does not exist.
    pub fn area_of(&self, room: EntityId) -> Result<&str> {
        Ok(self.room(room)?.area.as_str())
    }

    /// Adds a one-way exit.
    ///
    /// # Errors
    ///
    /// Returns an error if either room does not exist.
    pub fn link_exit(&mut self, from: EntityId, direction: &str, to: EntityId) -> Result<()> {
        self.room(to)?;
        let direction = direction.to_lowercase();
        let room = self.room_mut(from)?;
        room.exits.retain(|exit| exit.direction != direction);
        room.exits.push(Exit { direction, to });
        Ok(())
    }

    /// Adds a pair of exits, `a --forward--> b` and `b --back--> a`.
    ///
    /// # Errors
    ///
    /// Returns an error if either room does not exist.
    pub fn link_rooms(
        &mut self,
        a: EntityId,
        forward: &str,
        b: EntityId,
        back: &str,
    ) -> Result<()> {
        self.link_exit(a, forward, b)?;
        self.link_exit(b, back, a)
    }

    /// Finds an exit by direction: exact match first, then the first exit
    /// whose direction starts with `direction`.
    ///
    /// # Errors
    ///
    /// Returns an error if the room does not exist.
    pub fn find_exit(&self, room: EntityId, direction: &str) -> Result<Option<Exit>> {
        let direction = direction.to_lowercase();
        if direction.is_empty() {
            return Ok(None);
        }
        let exits = &self.room(room)?.exits;
        let exit = exits
            .iter()
            .find(|exit| exit.direction == direction)
            .or_else(|| exits.iter().find(|exit| exit.direction.starts_with(&direction)));
        Ok(exit.cloned())
    }

    // -------------------------------------------------------------------------
    // Doors
    // -------------------------------------------------------------------------

    /// Installs a door between two rooms.
    ///
    /// # Errors
    ///
    /// Returns an error if either room does not exist.
    pub fn add_door(&mut self, a: EntityId, b: EntityId, barrier: Barrier) -> Result<()> {
        self.room(a)?;
        self.room(b)?;
        Arc::make_mut(&mut self.doors).insert(a, b, barrier);
        Ok(())
    }

    /// The door between two rooms, if any. Either order gives the same door.
    ///
    /// # Errors
    ///
    /// Returns an error if either room no longer exists.
    pub fn door_between(&self, a: EntityId, b: EntityId) -> Result<Option<&Barrier>> {
        self.room(a)?;
        self.room(b)?;
        Ok(self.doors.get(a, b))
    }

    /// Sets the state of the door between two rooms.
    ///
    /// # Errors
    ///
    /// Returns an error if either room no longer exists or there is no door.
    pub fn set_door_state(&mut self, a: EntityId, b: EntityId, state: LockState) -> Result<()> {
        self.room(a)?;
        self.room(b)?;
        let door = Arc::make_mut(&mut self.doors)
            .get_mut(a, b)
            .ok_or_else(|| Error::new(ErrorKind::NoSuchDoor(a, b)))?;
        door.state = state;
        Ok(())
    }

    /// The door store.
    #[must_use]
    pub fn doors(&self) -> &DoorStore {
        &self.doors
    }

    /// Sets the lid state of a container item.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is missing or has no lid.
    pub fn set_item_state(&mut self, item: EntityId, state: LockState) -> Result<()> {
        let record = self.item_mut(item)?;
        let barrier = record
            .barrier
            .as_mut()
            .ok_or_else(|| Error::internal(format!("{item} has no lid")))?;
        barrier.state = state;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Items
    // -------------------------------------------------------------------------

    /// Where an item is.
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist.
    pub fn item_location(&self, item: EntityId) -> Result<&ItemLocation> {
        Ok(&self.item(item)?.location)
    }

    /// Moves an item to a new location. The item leaves its old container
    /// before it is added to the new one; on error nothing changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination is invalid (missing, wrong kind,
    /// occupied slot, not a container, or inside the item itself) or the
    /// item's recorded location does not list it.
    pub fn transfer_item(&mut self, item: EntityId, to: ItemLocation) -> Result<()> {
        self.check_destination(item, &to)?;
        self.detach_item(item)?;
        match &to {
            ItemLocation::Nowhere => {}
            ItemLocation::Room(room) => self.room_mut(*room)?.items.insert(item),
            ItemLocation::Inventory(owner) => self.character_mut(*owner)?.inventory.insert(item),
            ItemLocation::Equipped { owner, slot } => {
                let owner = *owner;
                if !self.character_mut(owner)?.equipment.insert(slot, item) {
                    return Err(Error::new(ErrorKind::SlotOccupied {
                        owner,
                        slot: slot.clone(),
                    }));
                }
            }
            ItemLocation::Inside(container) => self.item_mut(*container)?.contents.insert(item),
        }
        trace!(%item, location = ?to, "item transferred");
        self.item_mut(item)?.location = to;
        Ok(())
    }

    fn check_destination(&self, item: EntityId, to: &ItemLocation) -> Result<()> {
        self.item(item)?;
        match to {
            ItemLocation::Nowhere => Ok(()),
            ItemLocation::Room(room) => self.room(*room).map(|_| ()),
            ItemLocation::Inventory(owner) => self.character(*owner).map(|_| ()),
            ItemLocation::Equipped { owner, slot } => {
                match self.character(*owner)?.equipment.get(slot) {
                    Some(worn) if worn != item => Err(Error::new(ErrorKind::SlotOccupied {
                        owner: *owner,
                        slot: slot.clone(),
                    })),
                    _ => Ok(()),
                }
            }
            ItemLocation::Inside(container) => {
                if !self.item(*container)?.is_container() {
                    return Err(Error::new(ErrorKind::NotAContainer(*container)));
                }
                if self.is_within(*container, item)? {
                    return Err(Error::internal(format!(
                        "{item} cannot be put inside itself"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Returns true if `inner` is `outer` or nested anywhere inside it.
    fn is_within(&self, inner: EntityId, outer: EntityId) -> Result<bool> {
        let mut current = inner;
        loop {
            if current == outer {
                return Ok(true);
            }
            match self.item(current)?.location {
                ItemLocation::Inside(parent) => current = parent,
                _ => return Ok(false),
            }
        }
    }

    fn detach_item(&mut self, item: EntityId) -> Result<()> {
        let location = self.item(item)?.location.clone();
        let listed = match &location {
            ItemLocation::Nowhere => true,
            ItemLocation::Room(room) => self.room_mut(*room)?.items.remove(item),
            ItemLocation::Inventory(owner) => self.character_mut(*owner)?.inventory.remove(item),
            ItemLocation::Equipped { owner, slot } => {
                self.character_mut(*owner)?.equipment.remove(slot) == Some(item)
            }
            ItemLocation::Inside(container) => self.item_mut(*container)?.contents.remove(item),
        };
        if !listed {
            return Err(Error::internal(format!(
                "{item} records location {location:?} but is not listed there"
            )));
        }
        self.item_mut(item)?.location = ItemLocation::Nowhere;
        Ok(())
    }

    /// First item an actor holds with the given prototype, scanning the
    /// inventory and then equipment.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor or one of its items is missing.
    pub fn held_with_prototype(&self, actor: EntityId, prototype: &str) -> Result<Option<EntityId>> {
        self.find_held(actor, |item| item.prototype.as_deref() == Some(prototype))
    }

    /// First item an actor holds of the given type, scanning the inventory
    /// and then equipment.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor or one of its items is missing.
    pub fn held_of_type(&self, actor: EntityId, item_type: ItemType) -> Result<Option<EntityId>> {
        self.find_held(actor, |item| item.item_type == item_type)
    }

    fn find_held(
        &self,
        actor: EntityId,
        predicate: impl Fn(&Item) -> bool,
    ) -> Result<Option<EntityId>> {
        let character = self.character(actor)?;
        let held = character
            .inventory
            .iter()
            .chain(character.equipment.iter().map(|(_, id)| id));
        for id in held {
            if predicate(self.item(id)?) {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// Returns true if the actor carries as many items as it can.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not exist.
    pub fn inventory_full(&self, actor: EntityId) -> Result<bool> {
        let character = self.character(actor)?;
        Ok(character.inventory.len() >= character.capacity)
    }

    /// Returns true if the container holds as many items as it can.
    ///
    /// # Errors
    ///
    /// Returns an error if the item does not exist.
    pub fn container_full(&self, container: EntityId) -> Result<bool> {
        let item = self.item(container)?;
        Ok(item.contents.len() >= item.capacity)
    }

    // -------------------------------------------------------------------------
    // Parties
    // -------------------------------------------------------------------------

    /// Starts a party led by `leader`, leaving any current party first.
    ///
    /// # Errors
    ///
    /// Returns an error if the leader is not a character.
    pub fn form_party(&mut self, leader: EntityId) -> Result<PartyId> {
        self.leave_party(leader)?;
        let party = Arc::make_mut(&mut self.parties).form(leader);
        self.character_mut(leader)?.party = Some(party);
        Ok(party)
    }

    /// Adds a character to a party, leaving any current party first.
    ///
    /// # Errors
    ///
    /// Returns an error if the member is not a character or the party does
    /// not exist.
    pub fn join_party(&mut self, party: PartyId, member: EntityId) -> Result<()> {
        if self.parties.get(party).is_none() {
            return Err(Error::internal(format!("no such {party}")));
        }
        self.leave_party(member)?;
        Arc::make_mut(&mut self.parties).join(party, member);
        self.character_mut(member)?.party = Some(party);
        Ok(())
    }

    /// Removes a character from its party, returning the party it left.
    ///
    /// # Errors
    ///
    /// Returns an error if the member is not a character.
    pub fn leave_party(&mut self, member: EntityId) -> Result<Option<PartyId>> {
        let Some(party) = self.character(member)?.party else {
            return Ok(None);
        };
        Arc::make_mut(&mut self.parties).leave(party, member);
        self.character_mut(member)?.party = None;
        Ok(Some(party))
    }

    /// The party a character belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not a character.
    pub fn party_of(&self, actor: EntityId) -> Result<Option<PartyId>> {
        Ok(self.character(actor)?.party)
    }

    /// Members of a party in join order.
    #[must_use]
    pub fn party_members(&self, party: PartyId) -> &[EntityId] {
        self.parties.members(party)
    }
}
