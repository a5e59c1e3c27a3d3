//! `wear`, `remove`.

use wayfarer_foundation::{EntityId, ItemType, Result};
use wayfarer_parser::{ArgumentTokenizer, ReferenceResolver};
use wayfarer_storage::ItemLocation;

use super::{Context, info};
use crate::text::{capitalize, third_person};

/// The verb as it should read for this item: weapons are wielded, everything
/// else is worn, unless the player picked a more specific word.
fn wear_word(word: &str, item_type: ItemType) -> String {
    match (item_type, word) {
        (ItemType::Weapon, "wear" | "eq") => "wield".to_string(),
        (ItemType::Weapon, _) => word.to_string(),
        (_, "eq" | "wield" | "hold") => "wear".to_string(),
        _ => word.to_string(),
    }
}

fn remove_word(word: &str, item_type: ItemType) -> String {
    if item_type != ItemType::Weapon && word == "unhold" {
        "remove".to_string()
    } else {
        word.to_string()
    }
}

/// Wears a carried item, optionally in a named slot, or tries everything
/// carried.
pub(super) fn wear(cx: &mut Context<'_>, args: &str) -> Result<()> {
    if args.is_empty() {
        if cx.word == "eq" {
            return info::equipment(cx);
        }
        cx.what();
        return Ok(());
    }
    let Some((wanted, slot)) = ArgumentTokenizer::pair(args, &["on"]) else {
        cx.what();
        return Ok(());
    };

    if wanted.eq_ignore_ascii_case("all") {
        let carried = cx.world.character(cx.actor)?.inventory.to_vec();
        if carried.is_empty() {
            cx.say("There's nothing in your inventory.");
        }
        for item in carried {
            wear_one(cx, item, None)?;
        }
        return Ok(());
    }

    match cx.find_carried(wanted)? {
        Some(item) => wear_one(cx, item, slot),
        None => {
            cx.say("That isn't in your inventory.");
            Ok(())
        }
    }
}

fn wear_one(cx: &mut Context<'_>, item: EntityId, wanted_slot: Option<&str>) -> Result<()> {
    let record = cx.world.item(item)?;
    let item_type = record.item_type;
    let slots = record.slots.clone();
    let word = wear_word(&cx.word, item_type);
    let item_name = cx.name(item)?;

    if slots.is_empty() {
        cx.say(format!("You can't {word} {item_name}."));
        return Ok(());
    }

    let equipment = &cx.world.character(cx.actor)?.equipment;
    let slot = match wanted_slot {
        None => {
            let Some(free) = slots.iter().find(|slot| equipment.get(slot).is_none()) else {
                cx.say(format!(
                    "You have to remove something before you can {word} {item_name}."
                ));
                return Ok(());
            };
            free.clone()
        }
        Some(wanted) => {
            let wanted = wanted.to_lowercase();
            let Some(slot) = slots.iter().find(|slot| slot.contains(&wanted)) else {
                cx.say(format!("You can't {word} {item_name} there."));
                return Ok(());
            };
            if let Some(conflict) = equipment.get(slot) {
                let text = if slots.len() == 1 {
                    format!(
                        "You have to remove {} before you can {word} {item_name}.",
                        cx.name(conflict)?
                    )
                } else {
                    format!("You have to remove something before you can {word} {item_name}.")
                };
                cx.say(text);
                return Ok(());
            }
            slot.clone()
        }
    };

    cx.world.transfer_item(
        item,
        ItemLocation::Equipped {
            owner: cx.actor,
            slot: slot.clone(),
        },
    )?;
    let actor = cx.actor_name()?;
    let (on, their_on) = if item_type == ItemType::Weapon {
        ("in your", "in their")
    } else {
        ("on your", "on their")
    };
    cx.say(format!("You {word} {item_name} {on} {slot}."));
    cx.tell_room(&capitalize(&format!(
        "{actor} {} {item_name} {their_on} {slot}.",
        third_person(&word)
    )))
}

/// Takes off an item named by keyword or by slot, or everything worn.
pub(super) fn remove(cx: &mut Context<'_>, args: &str) -> Result<()> {
    if args.is_empty() {
        cx.what();
        return Ok(());
    }

    let worn: Vec<(String, EntityId)> = cx
        .world
        .character(cx.actor)?
        .equipment
        .iter()
        .map(|(slot, item)| (slot.to_string(), item))
        .collect();

    if args.eq_ignore_ascii_case("all") {
        if worn.is_empty() {
            cx.say("You aren't wearing anything.");
        }
        for (slot, item) in worn {
            if !remove_one(cx, item, &slot)? {
                break;
            }
        }
        return Ok(());
    }

    let equipment = &cx.world.character(cx.actor)?.equipment;
    let found = ReferenceResolver::resolve_in_slots(args, equipment, cx.world).or_else(|| {
        let wanted = args.to_lowercase();
        worn.iter()
            .find(|(slot, _)| slot.contains(&wanted))
            .cloned()
    });
    match found {
        Some((slot, item)) => remove_one(cx, item, &slot).map(|_| ()),
        None => {
            cx.say("You aren't wearing that.");
            Ok(())
        }
    }
}

/// Returns false if the item stayed on because the inventory is full.
fn remove_one(cx: &mut Context<'_>, item: EntityId, slot: &str) -> Result<bool> {
    let word = remove_word(&cx.word, cx.world.item(item)?.item_type);
    let item_name = cx.name(item)?;
    let actor = cx.actor_name()?;

    if cx.world.inventory_full(cx.actor)? {
        cx.say(format!(
            "You try to {word} {item_name} from {slot} but your inventory is full."
        ));
        cx.tell_room(&format!(
            "{actor} tries to {word} {item_name} from their {slot}, but their inventory is full."
        ))?;
        return Ok(false);
    }

    cx.world.transfer_item(item, ItemLocation::Inventory(cx.actor))?;
    cx.say(format!("You {word} {item_name} from your {slot}."));
    cx.tell_room(&capitalize(&format!(
        "{actor} {} {item_name} from their {slot}.",
        third_person(&word)
    )))?;
    Ok(true)
}
