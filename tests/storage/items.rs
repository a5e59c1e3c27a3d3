//! Integration tests for item placement
//!
//! Tests that every item is in exactly one place and that invalid moves
//! leave the world unchanged.

use wayfarer_foundation::{EntityId, ErrorKind, ItemType, Role};
use wayfarer_storage::{Barrier, Character, Item, ItemLocation, LockState, World};

fn setup() -> (World, EntityId, EntityId) {
    let mut world = World::new();
    let room = world.create_room("Kitchen", "house");
    let cook = world.create_character("Cook", Character::player(Role::Player));
    world.place_character(cook, room).unwrap();
    (world, room, cook)
}

// =============================================================================
// Transfers
// =============================================================================

#[test]
fn new_items_are_nowhere() {
    let (mut world, _, _) = setup();
    let pan = world.create_item("a frying pan", Item::new(ItemType::Object));
    assert_eq!(world.item_location(pan).unwrap(), &ItemLocation::Nowhere);
}

#[test]
fn transfer_moves_between_lists() {
    let (mut world, room, cook) = setup();
    let pan = world.create_item("a frying pan", Item::new(ItemType::Object));
    world.transfer_item(pan, ItemLocation::Room(room)).unwrap();
    assert!(world.room(room).unwrap().items.contains(pan));

    world.transfer_item(pan, ItemLocation::Inventory(cook)).unwrap();
    assert!(!world.room(room).unwrap().items.contains(pan));
    assert!(world.character(cook).unwrap().inventory.contains(pan));
    assert_eq!(world.item_location(pan).unwrap(), &ItemLocation::Inventory(cook));
}

#[test]
fn contents_keep_insertion_order() {
    let (mut world, room, _) = setup();
    let bag = world.create_item("a sack", Item::new(ItemType::Container));
    world.transfer_item(bag, ItemLocation::Room(room)).unwrap();

    let apples: Vec<EntityId> = ["a red apple", "a green apple", "a banana"]
        .into_iter()
        .map(|name| {
            let id = world.create_item(name, Item::new(ItemType::Object));
            world.transfer_item(id, ItemLocation::Inside(bag)).unwrap();
            id
        })
        .collect();

    let contents = &world.item(bag).unwrap().contents;
    assert_eq!(contents.to_vec(), apples);
    assert_eq!(
        contents.newest_first().collect::<Vec<_>>(),
        apples.iter().rev().copied().collect::<Vec<_>>()
    );
}

// =============================================================================
// Invalid Moves
// =============================================================================

#[test]
fn only_containers_hold_items() {
    let (mut world, room, _) = setup();
    let spoon = world.create_item("a spoon", Item::new(ItemType::Object));
    let pan = world.create_item("a frying pan", Item::new(ItemType::Object));
    world.transfer_item(spoon, ItemLocation::Room(room)).unwrap();

    let err = world.transfer_item(spoon, ItemLocation::Inside(pan)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotAContainer(id) if id == pan));
    assert_eq!(world.item_location(spoon).unwrap(), &ItemLocation::Room(room));
}

#[test]
fn containers_cannot_hold_themselves() {
    let (mut world, _, _) = setup();
    let outer = world.create_item("a crate", Item::new(ItemType::Container));
    let inner = world.create_item("a box", Item::new(ItemType::Container));
    world.transfer_item(inner, ItemLocation::Inside(outer)).unwrap();

    assert!(world.transfer_item(outer, ItemLocation::Inside(outer)).is_err());
    assert!(world.transfer_item(outer, ItemLocation::Inside(inner)).is_err());
    assert_eq!(world.item_location(outer).unwrap(), &ItemLocation::Nowhere);
}

#[test]
fn occupied_slots_are_refused() {
    let (mut world, _, cook) = setup();
    let hat = world.create_item("a hat", Item::new(ItemType::Armor).worn_on("head"));
    let pot = world.create_item("a pot", Item::new(ItemType::Armor).worn_on("head"));
    let head = |owner| ItemLocation::Equipped {
        owner,
        slot: "head".to_string(),
    };

    world.transfer_item(hat, head(cook)).unwrap();
    let err = world.transfer_item(pot, head(cook)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SlotOccupied { .. }));
    assert_eq!(world.character(cook).unwrap().equipment.get("head"), Some(hat));
}

// =============================================================================
// Lookups
// =============================================================================

#[test]
fn held_with_prototype_scans_inventory_then_equipment() {
    let (mut world, _, cook) = setup();
    let key = world.create_item(
        "a pantry key",
        Item::new(ItemType::Key).with_prototype("pantry key"),
    );
    world
        .transfer_item(
            key,
            ItemLocation::Equipped {
                owner: cook,
                slot: "neck".to_string(),
            },
        )
        .unwrap();

    assert_eq!(world.held_with_prototype(cook, "pantry key").unwrap(), Some(key));
    assert_eq!(world.held_with_prototype(cook, "cellar key").unwrap(), None);
    assert_eq!(world.held_of_type(cook, ItemType::Key).unwrap(), Some(key));
}

#[test]
fn capacities_are_reported() {
    let (mut world, room, _) = setup();
    let tin = world.create_item(
        "a tin",
        Item::new(ItemType::Container)
            .with_capacity(1)
            .with_barrier(Barrier::new(LockState::Open)),
    );
    world.transfer_item(tin, ItemLocation::Room(room)).unwrap();
    assert!(!world.container_full(tin).unwrap());

    let biscuit = world.create_item("a biscuit", Item::new(ItemType::Object));
    world.transfer_item(biscuit, ItemLocation::Inside(tin)).unwrap();
    assert!(world.container_full(tin).unwrap());

    let porter = world.create_character("Porter", Character::player(Role::Player).with_capacity(0));
    assert!(world.inventory_full(porter).unwrap());
}

#[test]
fn destroying_a_container_strands_its_contents() {
    let (mut world, room, _) = setup();
    let bag = world.create_item("a sack", Item::new(ItemType::Container));
    let apple = world.create_item("an apple", Item::new(ItemType::Object));
    world.transfer_item(bag, ItemLocation::Room(room)).unwrap();
    world.transfer_item(apple, ItemLocation::Inside(bag)).unwrap();

    world.destroy(bag).unwrap();
    assert!(!world.exists(bag));
    assert!(world.room(room).unwrap().items.is_empty());
    assert_eq!(world.item_location(apple).unwrap(), &ItemLocation::Nowhere);
}
