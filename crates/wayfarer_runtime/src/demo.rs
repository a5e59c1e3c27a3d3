//! A small playable world.
//!
//! Two rooms of a keep joined by a locked door. Alice carries the brass key
//! and a radio; Bob waits on the other side of the door with the second
//! radio, and the two of them share a party. Carol is a builder. Nobody is
//! connected yet.

use wayfarer_foundation::{EntityId, ItemType, Result, Role};
use wayfarer_storage::{
    Barrier, Character, DEFAULT_INVENTORY_CAPACITY, Item, ItemLocation, LockState, World,
};

/// The demo world and handles to the things tests and scripts poke at.
#[derive(Clone, Debug)]
pub struct DemoWorld {
    /// The seeded world.
    pub world: World,
    /// Starting room.
    pub gatehouse: EntityId,
    /// Room behind the locked door, east of the gatehouse.
    pub armory: EntityId,
    /// Admin, in the gatehouse, holding the key.
    pub alice: EntityId,
    /// Player, in the armory.
    pub bob: EntityId,
    /// Builder, in the gatehouse.
    pub carol: EntityId,
    /// NPC in the gatehouse.
    pub guard: EntityId,
    /// The key to the armory door.
    pub key: EntityId,
    /// Container on the gatehouse floor.
    pub bag: EntityId,
}

/// Builds the demo world with the default carry capacity.
///
/// # Errors
///
/// Returns an error if seeding hits inconsistent world data.
pub fn build_world() -> Result<DemoWorld> {
    build_world_with_capacity(DEFAULT_INVENTORY_CAPACITY)
}

/// Builds the demo world, giving every player `capacity` inventory slots.
///
/// # Errors
///
/// Returns an error if seeding hits inconsistent world data.
pub fn build_world_with_capacity(capacity: usize) -> Result<DemoWorld> {
    let mut world = World::new();

    let gatehouse = world.create_room("Gatehouse", "keep");
    let armory = world.create_room("Armory", "keep");
    world.link_rooms(gatehouse, "east", armory, "west")?;
    world.add_door(
        gatehouse,
        armory,
        Barrier::new(LockState::Locked).with_key("brass key"),
    )?;

    let player = |world: &mut World, name: &str, role: Role, room: EntityId| {
        let id = world.create_character(name, Character::player(role).with_capacity(capacity));
        world.place_character(id, room).map(|()| id)
    };
    let alice = player(&mut world, "Alice", Role::Admin, gatehouse)?;
    let bob = player(&mut world, "Bob", Role::Player, armory)?;
    let carol = player(&mut world, "Carol", Role::Builder, gatehouse)?;

    let guard = world.create_character("a gate guard", Character::npc());
    world.place_character(guard, gatehouse)?;

    let spawn_item = |world: &mut World, name: &str, item: Item, at: ItemLocation| {
        let id = world.create_item(name, item);
        world.transfer_item(id, at).map(|()| id)
    };

    let key = spawn_item(
        &mut world,
        "a brass key",
        Item::new(ItemType::Key).with_prototype("brass key"),
        ItemLocation::Inventory(alice),
    )?;
    for holder in [alice, bob] {
        spawn_item(
            &mut world,
            "a radio",
            Item::new(ItemType::Communicator).with_prototype("radio"),
            ItemLocation::Inventory(holder),
        )?;
    }

    let bag = spawn_item(
        &mut world,
        "a cloth bag",
        Item::new(ItemType::Container).with_barrier(Barrier::new(LockState::Open)),
        ItemLocation::Room(gatehouse),
    )?;
    for apple in ["a red apple", "a green apple"] {
        spawn_item(
            &mut world,
            apple,
            Item::new(ItemType::Object),
            ItemLocation::Inside(bag),
        )?;
    }
    spawn_item(
        &mut world,
        "a stone bench",
        Item::new(ItemType::Object).fixed(),
        ItemLocation::Room(gatehouse),
    )?;

    spawn_item(
        &mut world,
        "a short sword",
        Item::new(ItemType::Weapon).worn_on("right hand").worn_on("left hand"),
        ItemLocation::Room(armory),
    )?;
    spawn_item(
        &mut world,
        "an iron helm",
        Item::new(ItemType::Armor).worn_on("head"),
        ItemLocation::Room(armory),
    )?;

    let party = world.form_party(alice)?;
    world.join_party(party, bob)?;

    Ok(DemoWorld {
        world,
        gatehouse,
        armory,
        alice,
        bob,
        carol,
        guard,
        key,
        bag,
    })
}
