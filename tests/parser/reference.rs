//! Integration tests for reference resolution
//!
//! Tests ordinals, case folding, and source priority.

use proptest::prelude::*;
use wayfarer_foundation::{EntityId, ItemType};
use wayfarer_parser::{Reference, ReferenceResolver, Resolution, Source};
use wayfarer_storage::{Contents, Equipment, Item, World};

fn spawn(world: &mut World, name: &str) -> EntityId {
    world.create_item(name, Item::new(ItemType::Object))
}

/// A bag holding two apples and a banana, in that order.
fn bag_of_fruit() -> (World, Contents, [EntityId; 3]) {
    let mut world = World::new();
    let first = spawn(&mut world, "a red apple");
    let second = spawn(&mut world, "a green apple");
    let banana = spawn(&mut world, "a banana");
    let bag = [first, second, banana].into_iter().collect();
    (world, bag, [first, second, banana])
}

// =============================================================================
// Ordinals
// =============================================================================

#[test]
fn bare_keyword_finds_the_first_match() {
    let (world, bag, [first, _, _]) = bag_of_fruit();
    let found = ReferenceResolver::resolve("apple", &[Source::Contents(&bag)], &world);
    assert_eq!(found, Resolution::Found(first));
}

#[test]
fn ordinal_counts_matches_only() {
    let (world, bag, [_, second, _]) = bag_of_fruit();
    let found = ReferenceResolver::resolve("2.apple", &[Source::Contents(&bag)], &world);
    assert_eq!(found, Resolution::Found(second));
}

#[test]
fn ordinal_past_the_matches_finds_nothing() {
    let (world, bag, _) = bag_of_fruit();
    let found = ReferenceResolver::resolve("3.apple", &[Source::Contents(&bag)], &world);
    assert_eq!(found, Resolution::NoMatch);
    assert!(!found.is_match());
}

#[test]
fn malformed_tokens_find_nothing() {
    let (world, bag, _) = bag_of_fruit();
    for token in ["", "0.apple", "-1.apple", "+2.apple", "x.apple", "1.", "1.2.apple"] {
        let found = ReferenceResolver::resolve(token, &[Source::Contents(&bag)], &world);
        assert_eq!(found, Resolution::NoMatch, "token {token:?}");
    }
}

// =============================================================================
// Matching
// =============================================================================

#[test]
fn matching_ignores_case_and_accepts_prefixes() {
    let (world, bag, [_, second, banana]) = bag_of_fruit();
    let sources = [Source::Contents(&bag)];
    assert_eq!(
        ReferenceResolver::resolve("GREEN", &sources, &world).entity(),
        Some(second)
    );
    assert_eq!(ReferenceResolver::resolve("ban", &sources, &world).entity(), Some(banana));
    assert!(!ReferenceResolver::resolve("nana", &sources, &world).is_match());
}

#[test]
fn newest_first_reverses_the_scan() {
    let (world, bag, [first, second, _]) = bag_of_fruit();
    let sources = [Source::NewestFirst(&bag)];
    assert_eq!(ReferenceResolver::resolve("apple", &sources, &world).entity(), Some(second));
    assert_eq!(ReferenceResolver::resolve("2.apple", &sources, &world).entity(), Some(first));
}

// =============================================================================
// Source Priority
// =============================================================================

#[test]
fn first_source_with_enough_matches_wins() {
    let mut world = World::new();
    let floor_apple = spawn(&mut world, "a bruised apple");
    let held_one = spawn(&mut world, "a shiny apple");
    let held_two = spawn(&mut world, "a waxed apple");
    let floor: Contents = [floor_apple].into_iter().collect();
    let inventory: Contents = [held_one, held_two].into_iter().collect();
    let sources = [Source::Contents(&floor), Source::Contents(&inventory)];

    assert_eq!(
        ReferenceResolver::resolve("apple", &sources, &world),
        Resolution::Found(floor_apple)
    );
    // Each source counts on its own, so the floor has no second apple.
    assert_eq!(
        ReferenceResolver::resolve("2.apple", &sources, &world),
        Resolution::Found(held_two)
    );
}

#[test]
fn equipment_matches_report_their_slot() {
    let mut world = World::new();
    let helm = world.create_item("an iron helm", Item::new(ItemType::Armor).worn_on("head"));
    let ring = world.create_item("a gold ring", Item::new(ItemType::Armor).worn_on("finger"));
    let mut equipment = Equipment::new();
    equipment.insert("head", helm);
    equipment.insert("finger", ring);

    assert_eq!(
        ReferenceResolver::resolve("ring", &[Source::Equipment(&equipment)], &world),
        Resolution::Equipped {
            slot: "finger".to_string(),
            entity: ring,
        }
    );
    assert_eq!(
        ReferenceResolver::resolve_in_slots("helm", &equipment, &world),
        Some(("head".to_string(), helm))
    );
    assert_eq!(ReferenceResolver::resolve_in_slots("boot", &equipment, &world), None);
}

// =============================================================================
// Reference Parsing
// =============================================================================

proptest! {
    #[test]
    fn parsed_ordinals_round_trip(ordinal in 1usize..1000, keyword in "[a-z]{1,10}") {
        let reference = Reference::parse(&format!("{ordinal}.{keyword}")).unwrap();
        prop_assert_eq!(reference.ordinal, ordinal);
        prop_assert_eq!(reference.keyword, keyword);
    }

    #[test]
    fn keywords_are_lowercased(keyword in "[A-Za-z]{1,10}") {
        let reference = Reference::parse(&keyword).unwrap();
        prop_assert_eq!(reference.ordinal, 1);
        prop_assert_eq!(reference.keyword, keyword.to_lowercase());
    }
}
