//! `look`, `inventory`, `equipment`, `who`, `where`.

use wayfarer_foundation::{EntityId, Result, Role};
use wayfarer_parser::{ArgumentTokenizer, ReferenceResolver, Source};
use wayfarer_storage::LockState;

use super::Context;

const WIDTH: usize = 80;

/// Describes the room, or a character or item in it.
pub(super) fn look(cx: &mut Context<'_>, args: &str) -> Result<()> {
    let words = ArgumentTokenizer::words(args, &["at", "in"]);
    match words.first() {
        None => describe_room(cx),
        Some(&token) if token.eq_ignore_ascii_case("me") || token.eq_ignore_ascii_case("self") => {
            cx.say("You look at yourself...");
            equipment(cx)
        }
        Some(&token) => {
            let here = cx.here()?;
            let occupants = cx.world.occupants(here)?;
            let person =
                ReferenceResolver::resolve(token, &[Source::Contents(occupants)], cx.world).entity();
            if let Some(target) = person {
                return look_at_character(cx, target);
            }
            match cx.find_nearby(token)? {
                Some(item) => look_at_item(cx, item),
                None => {
                    cx.say("You don't see that.");
                    Ok(())
                }
            }
        }
    }
}

fn describe_room(cx: &mut Context<'_>) -> Result<()> {
    let here = cx.here()?;
    let room = cx.world.room(here)?;

    let mut lines = vec![room.title.clone()];
    let mut exits = Vec::new();
    for exit in &room.exits {
        let shut = cx
            .world
            .door_between(here, exit.to)?
            .is_some_and(|door| door.state != LockState::Open);
        exits.push(if shut {
            format!("({})", exit.direction)
        } else {
            exit.direction.clone()
        });
    }
    if exits.is_empty() {
        exits.push("none".to_string());
    }
    lines.push(format!("[exits: {}]", exits.join(" ")));

    for occupant in room.occupants.iter().filter(|&id| id != cx.actor) {
        lines.push(format!("  {} is here", cx.world.name(occupant)?));
    }
    for item in room.items.iter() {
        lines.push(format!("  {}", cx.world.name(item)?));
    }

    for line in lines {
        cx.say(line);
    }
    Ok(())
}

fn look_at_character(cx: &mut Context<'_>, target: EntityId) -> Result<()> {
    if target == cx.actor {
        cx.say("You look at yourself...");
        return equipment(cx);
    }
    let name = cx.name(target)?;
    let actor = cx.actor_name()?;
    cx.say(format!("You look at {name}."));
    if cx.world.is_connected(target) {
        cx.out.to(target, format!("{actor} looks at you."));
    }
    cx.tell_room_except(&[target], &format!("{actor} looks at {name}."))?;
    list_equipment(cx, target, "They have equipped:")
}

fn look_at_item(cx: &mut Context<'_>, item: EntityId) -> Result<()> {
    let name = cx.name(item)?;
    let record = cx.world.item(item)?;
    if record.is_container() && record.is_closed() {
        cx.say("It is closed.");
        return Ok(());
    }
    let contents = record.is_container().then(|| record.contents.to_vec());
    cx.say(format!("You look at {name}."));
    if let Some(contents) = contents {
        cx.say("It contains:");
        list_names(cx, &contents)?;
    }
    Ok(())
}

fn list_names(cx: &mut Context<'_>, items: &[EntityId]) -> Result<()> {
    if items.is_empty() {
        cx.say("  nothing...");
    }
    for &item in items {
        let line = format!("  {}", cx.name(item)?);
        cx.say(line);
    }
    Ok(())
}

/// Lists carried items and how full the inventory is.
pub(super) fn inventory(cx: &mut Context<'_>) -> Result<()> {
    let character = cx.world.character(cx.actor)?;
    let carried = character.inventory.to_vec();
    let capacity = character.capacity;
    cx.say("You are carrying:");
    list_names(cx, &carried)?;
    cx.say(format!("({}/{capacity})", carried.len()));
    Ok(())
}

/// Lists worn items by slot.
pub(super) fn equipment(cx: &mut Context<'_>) -> Result<()> {
    list_equipment(cx, cx.actor, "You have equipped:")
}

fn list_equipment(cx: &mut Context<'_>, wearer: EntityId, heading: &str) -> Result<()> {
    let worn: Vec<(String, EntityId)> = cx
        .world
        .character(wearer)?
        .equipment
        .iter()
        .map(|(slot, item)| (format!("<{slot}>"), item))
        .collect();
    cx.say(heading);
    if worn.is_empty() {
        cx.say("  nothing...");
        return Ok(());
    }
    let width = worn.iter().map(|(slot, _)| slot.len()).max().unwrap_or(0) + 1;
    for (slot, item) in worn {
        let line = format!("{slot:>width$} {}", cx.name(item)?);
        cx.say(line);
    }
    Ok(())
}

fn role_tag(role: Role) -> &'static str {
    match role {
        Role::Player => "[ PLAYER  ]",
        Role::Builder => "[ BUILDER ]",
        Role::Admin => "[ ADMIN   ]",
    }
}

/// Lists connected players.
pub(super) fn who(cx: &mut Context<'_>) -> Result<()> {
    let mut lines = vec![
        "=".repeat(WIDTH),
        format!("{:^WIDTH$}", "WHO"),
        "=".repeat(WIDTH),
    ];
    let mut total = 0;
    for player in cx.world.connected() {
        let role = cx.world.character(player)?.role;
        lines.push(format!(
            " {:<67}{}",
            format!("* {}", cx.world.name(player)?),
            role_tag(role)
        ));
        total += 1;
    }
    lines.push(format!("{:^WIDTH$}", format!("{total:>3} TOTAL")));
    lines.push("=".repeat(WIDTH));
    for line in lines {
        cx.say(line);
    }
    Ok(())
}

/// "Alice", "Alice and Bob", "Alice, Bob, and Carol".
fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [one] => one.clone(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {last}", rest.join(", ")),
    }
}

/// Lists the rooms connected players are in.
pub(super) fn where_list(cx: &mut Context<'_>) -> Result<()> {
    // Rooms in order of first appearance among connected players.
    let mut rooms: Vec<(EntityId, Vec<String>)> = Vec::new();
    let mut total = 0;
    for player in cx.world.connected() {
        total += 1;
        let Some(room) = cx.world.character(player)?.room else {
            continue;
        };
        let name = cx.world.name(player)?.to_string();
        match rooms.iter_mut().find(|(id, _)| *id == room) {
            Some((_, names)) => names.push(name),
            None => rooms.push((room, vec![name])),
        }
    }

    let mut lines = vec![
        "=".repeat(WIDTH),
        format!("{:^WIDTH$}", "WHERE"),
        "=".repeat(WIDTH),
    ];
    for (room, names) in &rooms {
        let title = &cx.world.room(*room)?.title;
        lines.push(format!(" * {title} - {}", join_names(names)));
    }
    lines.push(format!("{:^WIDTH$}", format!("{total:>3} TOTAL")));
    lines.push("=".repeat(WIDTH));
    for line in lines {
        cx.say(line);
    }
    Ok(())
}
