//! `open`, `close`, `lock`, `unlock`.

use wayfarer_foundation::Result;
use wayfarer_parser::ArgumentTokenizer;

use super::Context;
use crate::barrier::BarrierOp;
use crate::doors::{BarrierTarget, apply_barrier_op};

/// Applies `op` to the door on the named exit, or failing that to a nearby
/// container.
pub(super) fn operate(cx: &mut Context<'_>, op: BarrierOp, args: &str) -> Result<()> {
    let words = ArgumentTokenizer::words(args, &["door"]);
    let Some(&token) = words.first() else {
        cx.what();
        return Ok(());
    };

    let here = cx.here()?;
    if let Some(exit) = cx.world.find_exit(here, token)? {
        if cx.world.door_between(here, exit.to)?.is_some() {
            let target = BarrierTarget::Door {
                direction: exit.direction,
                to: exit.to,
            };
            return apply(cx, op, &target);
        }
    }

    let Some(item) = cx.find_nearby(token)? else {
        cx.what();
        return Ok(());
    };
    if !cx.world.item(item)?.is_container() {
        let text = format!("You can't {op} {}.", cx.name(item)?);
        cx.say(text);
        return Ok(());
    }
    apply(cx, op, &BarrierTarget::Item(item))
}

fn apply(cx: &mut Context<'_>, op: BarrierOp, target: &BarrierTarget) -> Result<()> {
    let outcome = apply_barrier_op(cx.world, cx.actor, op, target)?;
    cx.out.extend(outcome.deliveries);
    Ok(())
}
