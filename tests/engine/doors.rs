//! Integration tests for doors and containers
//!
//! A brass-keyed door joins a hall and a vault. Alice and Carol stand in
//! the hall; Bob waits in the vault.

use wayfarer_engine::{BarrierOp, BarrierTarget, Delivery, InvalidTransition, apply_barrier_op};
use wayfarer_foundation::{EntityId, ErrorKind, ItemType, Role};
use wayfarer_storage::{Barrier, Character, Item, ItemLocation, LockState, World};

struct Keep {
    world: World,
    hall: EntityId,
    vault: EntityId,
    alice: EntityId,
    bob: EntityId,
    carol: EntityId,
}

impl Keep {
    fn new(state: LockState) -> Self {
        let mut world = World::new();
        let hall = world.create_room("Hall", "keep");
        let vault = world.create_room("Vault", "keep");
        world.link_rooms(hall, "north", vault, "south").unwrap();
        world
            .add_door(hall, vault, Barrier::new(state).with_key("brass key"))
            .unwrap();

        let mut player = |name: &str, room| {
            let id = world.create_character(name, Character::player(Role::Player));
            world.place_character(id, room).unwrap();
            world.connect(id).unwrap();
            id
        };
        let alice = player("Alice", hall);
        let bob = player("Bob", vault);
        let carol = player("Carol", hall);
        Self {
            world,
            hall,
            vault,
            alice,
            bob,
            carol,
        }
    }

    fn give_key(&mut self, to: EntityId) {
        let key = self.world.create_item(
            "a brass key",
            Item::new(ItemType::Key).with_prototype("brass key"),
        );
        self.world
            .transfer_item(key, ItemLocation::Inventory(to))
            .unwrap();
    }

    fn north(&self) -> BarrierTarget {
        BarrierTarget::Door {
            direction: "north".to_string(),
            to: self.vault,
        }
    }

    fn door_state(&self) -> LockState {
        self.world
            .door_between(self.hall, self.vault)
            .unwrap()
            .unwrap()
            .state
    }
}

fn lines_for(deliveries: &[Delivery], recipient: EntityId) -> Vec<&str> {
    deliveries
        .iter()
        .filter(|d| d.recipient == recipient)
        .map(|d| d.text.as_str())
        .collect()
}

// =============================================================================
// Locking
// =============================================================================

#[test]
fn locking_without_the_key_is_refused() {
    let mut keep = Keep::new(LockState::Closed);
    let target = keep.north();

    let outcome = apply_barrier_op(&mut keep.world, keep.alice, BarrierOp::Lock, &target).unwrap();

    assert_eq!(outcome.result, Err(InvalidTransition::NoKey));
    assert_eq!(
        outcome.deliveries,
        vec![Delivery::new(
            keep.alice,
            "You don't have the key to lock the north exit."
        )]
    );
    assert_eq!(keep.door_state(), LockState::Closed);
}

#[test]
fn locking_with_the_key_tells_both_sides() {
    let mut keep = Keep::new(LockState::Closed);
    keep.give_key(keep.alice);
    let target = keep.north();

    let outcome = apply_barrier_op(&mut keep.world, keep.alice, BarrierOp::Lock, &target).unwrap();

    assert_eq!(outcome.result.unwrap().to, LockState::Locked);
    assert_eq!(keep.door_state(), LockState::Locked);
    assert_eq!(
        lines_for(&outcome.deliveries, keep.alice),
        vec!["You lock the north exit with a brass key."]
    );
    assert_eq!(
        lines_for(&outcome.deliveries, keep.carol),
        vec!["Alice locks the north exit with a brass key."]
    );
    assert_eq!(
        lines_for(&outcome.deliveries, keep.bob),
        vec!["Someone locks the north exit from the other side."]
    );
}

#[test]
fn the_far_side_shares_the_door() {
    let mut keep = Keep::new(LockState::Locked);
    keep.give_key(keep.bob);
    let south = BarrierTarget::Door {
        direction: "south".to_string(),
        to: keep.hall,
    };

    let outcome = apply_barrier_op(&mut keep.world, keep.bob, BarrierOp::Open, &south).unwrap();

    assert_eq!(keep.door_state(), LockState::Open);
    assert_eq!(
        lines_for(&outcome.deliveries, keep.bob),
        vec![
            "You unlock the south exit with a brass key.",
            "You open the south exit."
        ]
    );
    assert_eq!(
        lines_for(&outcome.deliveries, keep.alice),
        vec![
            "Someone unlocks the south exit from the other side.",
            "Someone opens the south exit from the other side."
        ]
    );
}

// =============================================================================
// Refusals
// =============================================================================

#[test]
fn refusals_repeat_without_changing_state() {
    let mut keep = Keep::new(LockState::Open);
    let target = keep.north();

    for _ in 0..2 {
        let outcome =
            apply_barrier_op(&mut keep.world, keep.alice, BarrierOp::Open, &target).unwrap();
        assert_eq!(outcome.result, Err(InvalidTransition::AlreadyOpen));
        assert_eq!(
            lines_for(&outcome.deliveries, keep.alice),
            vec!["The north exit is not closed."]
        );
        assert!(lines_for(&outcome.deliveries, keep.carol).is_empty());
    }
    assert_eq!(keep.door_state(), LockState::Open);
}

#[test]
fn trying_a_locked_door_is_seen() {
    let mut keep = Keep::new(LockState::Locked);
    let target = keep.north();

    let outcome = apply_barrier_op(&mut keep.world, keep.alice, BarrierOp::Open, &target).unwrap();

    assert_eq!(outcome.result, Err(InvalidTransition::LockedShut));
    assert_eq!(
        lines_for(&outcome.deliveries, keep.carol),
        vec!["Alice tries to open the north exit in vain."]
    );
    assert!(lines_for(&outcome.deliveries, keep.bob).is_empty());
}

#[test]
fn disconnected_onlookers_get_nothing() {
    let mut keep = Keep::new(LockState::Closed);
    keep.world.disconnect(keep.bob);
    let target = keep.north();

    let outcome = apply_barrier_op(&mut keep.world, keep.alice, BarrierOp::Open, &target).unwrap();

    assert!(outcome.deliveries.iter().all(|d| d.recipient != keep.bob));
    assert_eq!(keep.door_state(), LockState::Open);
}

// =============================================================================
// Containers
// =============================================================================

#[test]
fn container_lids_only_tell_the_room() {
    let mut keep = Keep::new(LockState::Open);
    let chest = keep.world.create_item(
        "a small chest",
        Item::new(ItemType::Container).with_barrier(Barrier::new(LockState::Open)),
    );
    keep.world
        .transfer_item(chest, ItemLocation::Room(keep.hall))
        .unwrap();

    let outcome = apply_barrier_op(
        &mut keep.world,
        keep.alice,
        BarrierOp::Close,
        &BarrierTarget::Item(chest),
    )
    .unwrap();

    assert!(keep.world.item(chest).unwrap().is_closed());
    assert_eq!(
        lines_for(&outcome.deliveries, keep.carol),
        vec!["Alice closes a small chest."]
    );
    assert!(lines_for(&outcome.deliveries, keep.bob).is_empty());
}

#[test]
fn non_containers_are_errors() {
    let mut keep = Keep::new(LockState::Open);
    let rock = keep.world.create_item("a rock", Item::new(ItemType::Object));

    let err = apply_barrier_op(
        &mut keep.world,
        keep.alice,
        BarrierOp::Open,
        &BarrierTarget::Item(rock),
    )
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotAContainer(_)));
}
