//! Lock state for doors and lockable containers.
//!
//! A door between two rooms is a single [`Barrier`] keyed by the unordered
//! pair of rooms, so either side reads and writes the same record.
//! Containers carry their own `Barrier` on the item.

use wayfarer_foundation::EntityId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Open, closed, or closed and locked. Locked always implies closed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LockState {
    /// Passable.
    #[default]
    Open,
    /// Shut but not locked.
    Closed,
    /// Shut and locked.
    Locked,
}

impl LockState {
    /// True for `Closed` and `Locked`.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed | Self::Locked)
    }

    /// True only for `Locked`.
    #[must_use]
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Locked)
    }
}

/// State plus configuration of a door or container lid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Barrier {
    /// Current state.
    pub state: LockState,
    /// Prototype of the key item that locks and unlocks it. `None` means it
    /// cannot be locked at all.
    pub key: Option<String>,
    /// Whether it can be closed.
    pub closeable: bool,
}

impl Barrier {
    /// Creates a closeable barrier with no lock.
    #[must_use]
    pub fn new(state: LockState) -> Self {
        Self {
            state,
            key: None,
            closeable: true,
        }
    }

    /// Sets the key prototype.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Marks the barrier as one that cannot be closed.
    #[must_use]
    pub fn fixed_open(mut self) -> Self {
        self.closeable = false;
        self
    }

    /// Returns true if a key identity is configured.
    #[must_use]
    pub fn is_lockable(&self) -> bool {
        self.key.is_some()
    }
}

impl Default for Barrier {
    fn default() -> Self {
        Self::new(LockState::Closed)
    }
}

/// Unordered pair of rooms, stored smallest id first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DoorKey(EntityId, EntityId);

impl DoorKey {
    /// Builds the key for a door between `a` and `b`, in either order.
    #[must_use]
    pub fn new(a: EntityId, b: EntityId) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    /// The two rooms.
    #[must_use]
    pub const fn rooms(self) -> (EntityId, EntityId) {
        (self.0, self.1)
    }

    /// Returns true if `room` is one of the two sides.
    #[must_use]
    pub fn touches(self, room: EntityId) -> bool {
        self.0 == room || self.1 == room
    }

    /// Given one side, returns the other.
    #[must_use]
    pub fn other_side(self, room: EntityId) -> Option<EntityId> {
        if self.0 == room {
            Some(self.1)
        } else if self.1 == room {
            Some(self.0)
        } else {
            None
        }
    }
}

/// One barrier record per door.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct DoorRecord {
    key: DoorKey,
    barrier: Barrier,
}

/// All doors in the world.
///
/// Records are few and looked up by room pair, so a flat list is enough.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DoorStore {
    doors: Vec<DoorRecord>,
}

impl DoorStore {
    /// Creates an empty door store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs or replaces the door between `a` and `b`.
    pub fn insert(&mut self, a: EntityId, b: EntityId, barrier: Barrier) {
        let key = DoorKey::new(a, b);
        match self.doors.iter_mut().find(|record| record.key == key) {
            Some(record) => record.barrier = barrier,
            None => self.doors.push(DoorRecord { key, barrier }),
        }
    }

    /// The door between `a` and `b`, looked up from either side.
    #[must_use]
    pub fn get(&self, a: EntityId, b: EntityId) -> Option<&Barrier> {
        let key = DoorKey::new(a, b);
        self.doors
            .iter()
            .find(|record| record.key == key)
            .map(|record| &record.barrier)
    }

    /// Mutable access to the door between `a` and `b`.
    pub fn get_mut(&mut self, a: EntityId, b: EntityId) -> Option<&mut Barrier> {
        let key = DoorKey::new(a, b);
        self.doors
            .iter_mut()
            .find(|record| record.key == key)
            .map(|record| &mut record.barrier)
    }

    /// Removes the door between `a` and `b`.
    pub fn remove(&mut self, a: EntityId, b: EntityId) -> Option<Barrier> {
        let key = DoorKey::new(a, b);
        let index = self.doors.iter().position(|record| record.key == key)?;
        Some(self.doors.remove(index).barrier)
    }

    /// Every door touching `room`.
    pub fn touching(&self, room: EntityId) -> impl Iterator<Item = (DoorKey, &Barrier)> {
        self.doors
            .iter()
            .filter(move |record| record.key.touches(room))
            .map(|record| (record.key, &record.barrier))
    }

    /// Number of doors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.doors.len()
    }

    /// Returns true if there are no doors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.doors.is_empty()
    }
}
