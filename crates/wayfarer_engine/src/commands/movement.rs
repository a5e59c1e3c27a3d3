//! Walking between rooms.

use wayfarer_foundation::Result;
use wayfarer_storage::LockState;

use super::{Context, info};

/// Moves the actor through the exit matching `direction`.
pub(super) fn go(cx: &mut Context<'_>, direction: &str) -> Result<()> {
    if direction.is_empty() {
        cx.say("Go where?");
        return Ok(());
    }
    let here = cx.here()?;
    let Some(exit) = cx.world.find_exit(here, direction)? else {
        cx.say("You can't go that way!");
        return Ok(());
    };
    let door = cx.world.door_between(here, exit.to)?.map(|door| door.state);
    match door {
        Some(LockState::Locked) => {
            cx.say("The door is locked.");
            return Ok(());
        }
        Some(LockState::Closed) => {
            cx.say("The door is closed.");
            return Ok(());
        }
        Some(LockState::Open) | None => {}
    }

    let name = cx.actor_name()?;
    cx.tell_room(&format!("{name} leaves."))?;
    cx.world.place_character(cx.actor, exit.to)?;
    cx.tell_room(&format!("{name} enters."))?;
    info::look(cx, "")
}
