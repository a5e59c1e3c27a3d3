//! Channel names used as verbs.

use wayfarer_foundation::Result;

use super::Context;
use crate::audience::Sender;
use crate::channel::{ChannelOutcome, ChannelRegistry, resolve_channel};
use crate::text::capitalize;

/// Sends `args` on `channel` and turns the outcome into lines.
pub(super) fn speak(
    cx: &mut Context<'_>,
    registry: &ChannelRegistry,
    channel: &str,
    args: &str,
) -> Result<()> {
    let outcome = resolve_channel(registry, cx.world, channel, Sender::Actor(cx.actor), args)?;
    match outcome {
        ChannelOutcome::Sent(lines) => cx.out.extend(lines),
        ChannelOutcome::SelfTarget(line) => cx.out.extend([line]),
        ChannelOutcome::NoTarget { name } => cx.say(format!("Cannot find {name}.")),
        ChannelOutcome::NoParty => cx.say("You aren't in a group."),
        ChannelOutcome::NoCommunicator => cx.say("You need a communicator to do that."),
        ChannelOutcome::NoMessage => {
            let text = format!("{} what?", capitalize(channel));
            cx.say(text);
        }
        ChannelOutcome::NotPermitted { required } => {
            cx.say(format!("You must be {required} or higher to use {channel}."));
        }
        ChannelOutcome::UnknownChannel => cx.say("Huh?"),
    }
    Ok(())
}
