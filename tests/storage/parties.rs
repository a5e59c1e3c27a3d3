//! Integration tests for parties

use wayfarer_foundation::Role;
use wayfarer_storage::{Character, World};

#[test]
fn members_are_listed_in_join_order() {
    let mut world = World::new();
    let ann = world.create_character("Ann", Character::player(Role::Player));
    let ben = world.create_character("Ben", Character::player(Role::Player));
    let cy = world.create_character("Cy", Character::player(Role::Player));

    let party = world.form_party(ann).unwrap();
    world.join_party(party, cy).unwrap();
    world.join_party(party, ben).unwrap();

    assert_eq!(world.party_members(party), [ann, cy, ben]);
    assert_eq!(world.party_of(ben).unwrap(), Some(party));
}

#[test]
fn joining_leaves_the_old_party() {
    let mut world = World::new();
    let ann = world.create_character("Ann", Character::player(Role::Player));
    let ben = world.create_character("Ben", Character::player(Role::Player));
    let cy = world.create_character("Cy", Character::player(Role::Player));

    let first = world.form_party(ann).unwrap();
    world.join_party(first, cy).unwrap();
    let second = world.form_party(ben).unwrap();
    world.join_party(second, cy).unwrap();

    assert_eq!(world.party_members(first), [ann]);
    assert_eq!(world.party_members(second), [ben, cy]);
}

#[test]
fn leaving() {
    let mut world = World::new();
    let ann = world.create_character("Ann", Character::player(Role::Player));
    let party = world.form_party(ann).unwrap();

    assert_eq!(world.leave_party(ann).unwrap(), Some(party));
    assert_eq!(world.leave_party(ann).unwrap(), None);
    assert_eq!(world.party_of(ann).unwrap(), None);
}
