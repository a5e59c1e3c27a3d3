//! Entity store, ordered containers, doors, parties, and world state for Wayfarer.
//!
//! This crate provides:
//! - [`EntityStore`] - Generational entity allocation holding entity records
//! - [`Contents`] / [`Equipment`] - Insertion-ordered entity containers
//! - [`DoorStore`] - One shared barrier per pair of rooms
//! - [`PartyStore`] - Ordered party membership
//! - [`World`] - The world state every command reads and mutates

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod barrier;
pub mod container;
pub mod entity;
pub mod party;
pub mod record;
pub mod world;

pub use barrier::{Barrier, DoorKey, DoorStore, LockState};
pub use container::{Contents, Equipment};
pub use entity::EntityStore;
pub use party::{Party, PartyId, PartyStore};
pub use record::{
    Character, DEFAULT_INVENTORY_CAPACITY, Entity, EntityData, Exit, Item, ItemLocation, Room,
};
pub use world::World;
