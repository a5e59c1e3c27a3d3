//! `get`, `drop`, `give`, `put`.

use wayfarer_foundation::{EntityId, Result};
use wayfarer_parser::{ArgumentTokenizer, ReferenceResolver, Source};
use wayfarer_storage::{Contents, ItemLocation};

use super::Context;
use crate::text::{capitalize, third_person};

const INVENTORY_FULL: &str = "Your inventory is full.";
const NOTHING_CARRIED: &str = "There's nothing in your inventory.";

/// Picks up an item, or everything, from the floor or a container.
pub(super) fn get(cx: &mut Context<'_>, args: &str) -> Result<()> {
    if args.is_empty() {
        cx.what();
        return Ok(());
    }
    if cx.world.inventory_full(cx.actor)? {
        cx.say(INVENTORY_FULL);
        return Ok(());
    }
    let Some((wanted, from)) = ArgumentTokenizer::pair(args, &["from"]) else {
        cx.what();
        return Ok(());
    };

    let container = match from {
        None => None,
        Some(token) => {
            let Some(container) = cx.find_nearby(token)? else {
                cx.say(format!("You don't see {token} here."));
                return Ok(());
            };
            let record = cx.world.item(container)?;
            let (is_container, is_closed) = (record.is_container(), record.is_closed());
            let subject = capitalize(cx.world.name(container)?);
            if !is_container {
                cx.say(format!("{subject} isn't a container."));
                return Ok(());
            }
            if is_closed {
                cx.say(format!("{subject} is closed."));
                return Ok(());
            }
            Some(container)
        }
    };
    let source: Contents = match container {
        Some(container) => cx.world.item(container)?.contents.clone(),
        None => cx.world.room(cx.here()?)?.items.clone(),
    };
    let place = if container.is_some() { "there" } else { "here" };

    if wanted.eq_ignore_ascii_case("all") {
        if source.is_empty() {
            let text = format!("You see nothing to {} from {place}.", cx.word);
            cx.say(text);
            return Ok(());
        }
        for item in source.iter() {
            if cx.world.inventory_full(cx.actor)? {
                cx.say(INVENTORY_FULL);
                break;
            }
            get_one(cx, item, container)?;
        }
        return Ok(());
    }

    match ReferenceResolver::resolve(wanted, &[Source::NewestFirst(&source)], cx.world).entity() {
        Some(item) => get_one(cx, item, container),
        None if container.is_some() => {
            cx.say("You don't see that in there.");
            Ok(())
        }
        None => {
            cx.say("You don't see that here.");
            Ok(())
        }
    }
}

fn get_one(cx: &mut Context<'_>, item: EntityId, container: Option<EntityId>) -> Result<()> {
    let item_name = cx.name(item)?;
    if cx.world.item(item)?.irretrievable {
        let text = format!("You can't {} {item_name}.", cx.word);
        cx.say(text);
        return Ok(());
    }
    cx.world.transfer_item(item, ItemLocation::Inventory(cx.actor))?;

    let actor = cx.actor_name()?;
    let verbs = third_person(&cx.word);
    match container {
        Some(container) => {
            let container = cx.name(container)?;
            let text = format!("You {} {item_name} from {container}.", cx.word);
            cx.say(text);
            cx.tell_room(&capitalize(&format!(
                "{actor} {verbs} {item_name} from {container}."
            )))
        }
        None => {
            cx.say(format!("You get {item_name}."));
            cx.tell_room(&capitalize(&format!("{actor} {verbs} {item_name}.")))
        }
    }
}

/// Drops a carried item, or everything carried.
pub(super) fn drop(cx: &mut Context<'_>, args: &str) -> Result<()> {
    if args.is_empty() {
        cx.what();
        return Ok(());
    }
    if args.eq_ignore_ascii_case("all") {
        let carried = cx.world.character(cx.actor)?.inventory.to_vec();
        if carried.is_empty() {
            cx.say(NOTHING_CARRIED);
        }
        for item in carried {
            drop_one(cx, item)?;
        }
        return Ok(());
    }
    match cx.find_carried(args)? {
        Some(item) => drop_one(cx, item),
        None => {
            cx.say("That isn't in your inventory.");
            Ok(())
        }
    }
}

fn drop_one(cx: &mut Context<'_>, item: EntityId) -> Result<()> {
    let here = cx.here()?;
    cx.world.transfer_item(item, ItemLocation::Room(here))?;
    let item_name = cx.name(item)?;
    let actor = cx.actor_name()?;
    let text = format!("You {} {item_name}.", cx.word);
    cx.say(text);
    let text = format!("{actor} {} {item_name}.", third_person(&cx.word));
    cx.tell_room(&text)
}

/// Hands a carried item, or everything carried, to someone in the room.
/// Players are matched before NPCs.
pub(super) fn give(cx: &mut Context<'_>, args: &str) -> Result<()> {
    let Some((wanted, recipient)) = ArgumentTokenizer::pair(args, &["to"]) else {
        cx.say("Give what?");
        return Ok(());
    };
    let Some(recipient) = recipient else {
        cx.say("Give to whom?");
        return Ok(());
    };

    let all = wanted.eq_ignore_ascii_case("all");
    let item = if all { None } else { cx.find_carried(wanted)? };
    if !all && item.is_none() {
        cx.say("You don't have that.");
        return Ok(());
    }
    if recipient.eq_ignore_ascii_case("me") || recipient.eq_ignore_ascii_case("self") {
        cx.say("You can't give something to yourself.");
        return Ok(());
    }

    let Some(target) = find_recipient(cx, recipient)? else {
        cx.say("Give to whom?");
        return Ok(());
    };
    if target == cx.actor {
        cx.say("You can't give something to yourself.");
        return Ok(());
    }

    if let Some(item) = item {
        return give_one(cx, item, target);
    }
    let carried = cx.world.character(cx.actor)?.inventory.to_vec();
    if carried.is_empty() {
        cx.say(NOTHING_CARRIED);
    }
    for item in carried {
        give_one(cx, item, target)?;
    }
    Ok(())
}

fn find_recipient(cx: &Context<'_>, token: &str) -> Result<Option<EntityId>> {
    let mut players = Contents::new();
    let mut npcs = Contents::new();
    for occupant in cx.world.occupants(cx.here()?)?.iter() {
        if cx.world.character(occupant)?.npc {
            npcs.insert(occupant);
        } else {
            players.insert(occupant);
        }
    }
    Ok(ReferenceResolver::resolve(
        token,
        &[Source::Contents(&players), Source::Contents(&npcs)],
        cx.world,
    )
    .entity())
}

fn give_one(cx: &mut Context<'_>, item: EntityId, target: EntityId) -> Result<()> {
    let item_name = cx.name(item)?;
    let target_name = cx.name(target)?;
    let actor = cx.actor_name()?;
    let target_hears = cx.world.is_connected(target);

    if cx.world.inventory_full(target)? {
        cx.say(format!(
            "You try to give {item_name} to {target_name}, but they can't carry any more."
        ));
        cx.tell_room_except(
            &[target],
            &format!("{actor} tries to give {item_name} to {target_name}, but they can't carry any more."),
        )?;
        if target_hears {
            cx.out.to(
                target,
                format!("{actor} tries to give {item_name} to you, but you can't carry any more."),
            );
        }
        return Ok(());
    }

    cx.world.transfer_item(item, ItemLocation::Inventory(target))?;
    cx.say(format!("You give {item_name} to {target_name}."));
    cx.tell_room_except(
        &[target],
        &capitalize(&format!("{actor} gives {item_name} to {target_name}.")),
    )?;
    if target_hears {
        cx.out.to(target, format!("{actor} gives {item_name} to you."));
    }
    Ok(())
}

/// Puts a carried item, or everything carried, into a container.
pub(super) fn put(cx: &mut Context<'_>, args: &str) -> Result<()> {
    let words = ArgumentTokenizer::words(args, &["in", "into"]);
    let Some(&wanted) = words.first() else {
        cx.what();
        return Ok(());
    };
    let verb = capitalize(&cx.word);
    let all = wanted.eq_ignore_ascii_case("all");
    let item = if all { None } else { cx.find_carried(wanted)? };

    let Some(&into) = words.get(1) else {
        match item {
            Some(item) => {
                let text = format!("{verb} {} where?", cx.name(item)?);
                cx.say(text);
            }
            None if all => cx.say(format!("{verb} all where?")),
            None => cx.say("That isn't in your inventory."),
        }
        return Ok(());
    };
    let Some(container) = cx.find_nearby(into)? else {
        cx.say(format!("You don't see {into} here."));
        return Ok(());
    };

    if all {
        let carried = cx.world.character(cx.actor)?.inventory.to_vec();
        if carried.is_empty() {
            cx.say(NOTHING_CARRIED);
        }
        for item in carried {
            if can_put(cx, item, container)? {
                put_one(cx, item, container)?;
            }
        }
        return Ok(());
    }

    let Some(item) = item else {
        let text = format!("{verb} what in {}?", cx.name(container)?);
        cx.say(text);
        return Ok(());
    };
    if can_put(cx, item, container)? {
        put_one(cx, item, container)?;
    }
    Ok(())
}

fn preposition(word: &str) -> &'static str {
    if word == "stow" { "in" } else { "into" }
}

fn can_put(cx: &mut Context<'_>, item: EntityId, container: EntityId) -> Result<bool> {
    let container_name = cx.name(container)?;
    let record = cx.world.item(container)?;
    let refusal = if !record.is_container() {
        Some(format!("{} isn't a container.", capitalize(&container_name)))
    } else if item == container {
        Some(format!("You can't put {container_name} inside of itself."))
    } else if record.is_closed() {
        Some(format!("{} is closed.", capitalize(&container_name)))
    } else {
        None
    };
    if let Some(line) = refusal {
        cx.say(line);
        return Ok(false);
    }

    if cx.world.container_full(container)? {
        let item_name = cx.name(item)?;
        let actor = cx.actor_name()?;
        let word = cx.word.clone();
        let into = preposition(&word);
        cx.say(format!(
            "You try to {word} {item_name} {into} {container_name} but it's full."
        ));
        cx.tell_room(&format!(
            "{actor} tries to {word} {item_name} {into} {container_name} but it's full."
        ))?;
        return Ok(false);
    }
    Ok(true)
}

fn put_one(cx: &mut Context<'_>, item: EntityId, container: EntityId) -> Result<()> {
    cx.world.transfer_item(item, ItemLocation::Inside(container))?;
    let item_name = cx.name(item)?;
    let container_name = cx.name(container)?;
    let actor = cx.actor_name()?;
    let word = cx.word.clone();
    let into = preposition(&word);
    cx.say(format!("You {word} {item_name} {into} {container_name}."));
    cx.tell_room(&format!(
        "{actor} {} {item_name} {into} {container_name}.",
        third_person(&word)
    ))
}
