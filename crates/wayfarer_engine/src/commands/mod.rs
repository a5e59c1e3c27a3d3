//! Player commands.
//!
//! [`CommandDispatcher`] splits a line into verb and arguments, looks the
//! verb up in its [`Vocabulary`], and runs it against a working copy of the
//! world. The caller gets the copy back together with the output lines and
//! decides whether to commit it; a command that fails part way leaves the
//! caller's world untouched.

mod barrier_verbs;
mod channels;
mod equipment;
mod info;
mod items;
mod movement;

use tracing::debug;
use wayfarer_foundation::{EntityId, Result};
use wayfarer_parser::{
    ArgumentTokenizer, Direction, ReferenceResolver, Resolution, Source, Vocabulary,
};
use wayfarer_storage::World;

use crate::barrier::BarrierOp;
use crate::channel::ChannelRegistry;
use crate::delivery::{Delivery, Outbox};
use crate::text::capitalize;

/// What a verb does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verb {
    /// Walk through an exit.
    Move(Direction),
    /// Walk through the exit named in the arguments.
    Go,
    /// Open, close, lock, or unlock a door or container.
    Barrier(BarrierOp),
    /// Pick something up.
    Get,
    /// Put something down.
    Drop,
    /// Hand something to someone in the room.
    Give,
    /// Put something into a container.
    Put,
    /// Wear or wield something.
    Wear,
    /// Take something off.
    Remove,
    /// List carried items.
    Inventory,
    /// List worn items.
    Equipment,
    /// Describe the room or something in it.
    Look,
    /// List connected players.
    Who,
    /// List where connected players are.
    Where,
    /// Speak on the named channel.
    Channel(String),
}

impl Verb {
    /// Returns true if the verb only makes sense inside a room.
    #[must_use]
    pub fn needs_room(&self) -> bool {
        !matches!(
            self,
            Self::Inventory | Self::Equipment | Self::Who | Self::Where | Self::Channel(_)
        )
    }
}

/// Lines produced by one command, in delivery order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Lines to deliver.
    pub deliveries: Vec<Delivery>,
}

impl CommandOutput {
    /// Lines addressed to `recipient`, in order.
    #[must_use]
    pub fn lines_for(&self, recipient: EntityId) -> Vec<&str> {
        self.deliveries
            .iter()
            .filter(|delivery| delivery.recipient == recipient)
            .map(|delivery| delivery.text.as_str())
            .collect()
    }
}

/// Verb table plus the channels that double as verbs.
#[derive(Clone, Debug)]
pub struct CommandDispatcher {
    vocabulary: Vocabulary<Verb>,
    channels: ChannelRegistry,
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::standard()
    }
}

impl CommandDispatcher {
    /// The standard verbs and channels.
    #[must_use]
    pub fn standard() -> Self {
        Self::with_channels(ChannelRegistry::standard())
    }

    /// The standard verbs plus every channel in `channels`.
    ///
    /// Movement is registered first so one- and two-letter prefixes resolve
    /// to directions.
    #[must_use]
    pub fn with_channels(channels: ChannelRegistry) -> Self {
        let mut vocabulary = Vocabulary::new();
        for direction in Direction::ALL {
            vocabulary.register(
                direction.name(),
                &[direction.abbreviation()],
                Verb::Move(direction),
            );
        }
        vocabulary.register("look", &["l", "examine"], Verb::Look);
        vocabulary.register("go", &[], Verb::Go);
        vocabulary.register("get", &["take", "retrieve"], Verb::Get);
        vocabulary.register("drop", &["relinquish"], Verb::Drop);
        vocabulary.register("give", &[], Verb::Give);
        vocabulary.register("put", &["stow"], Verb::Put);
        vocabulary.register("inventory", &["i"], Verb::Inventory);
        vocabulary.register("equipment", &["worn", "armor"], Verb::Equipment);
        vocabulary.register("wear", &["wield", "hold", "equip", "eq"], Verb::Wear);
        vocabulary.register("remove", &["unequip", "unhold"], Verb::Remove);
        for op in BarrierOp::ALL {
            vocabulary.register(op.verb(), &[], Verb::Barrier(op));
        }
        vocabulary.register("who", &[], Verb::Who);
        vocabulary.register("where", &[], Verb::Where);
        for channel in channels.iter() {
            let aliases: Vec<&str> = channel.aliases.iter().map(String::as_str).collect();
            vocabulary.register(&channel.name, &aliases, Verb::Channel(channel.name.clone()));
        }
        Self {
            vocabulary,
            channels,
        }
    }

    /// The verb table.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary<Verb> {
        &self.vocabulary
    }

    /// The channel table.
    #[must_use]
    pub fn channels(&self) -> &ChannelRegistry {
        &self.channels
    }

    /// Runs `line` for `actor` on a copy of `world`.
    ///
    /// Returns the modified copy and the lines to deliver. Refusals and
    /// unknown verbs are ordinary output, not errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not exist or the world is
    /// inconsistent. The caller's world is unchanged in that case.
    pub fn execute(&self, world: &World, actor: EntityId, line: &str) -> Result<(World, CommandOutput)> {
        let mut working = world.clone();
        let output = self.run(&mut working, actor, line)?;
        Ok((working, output))
    }

    fn run(&self, world: &mut World, actor: EntityId, line: &str) -> Result<CommandOutput> {
        world.character(actor)?;
        let Some(command) = ArgumentTokenizer::split_command(line) else {
            return Ok(CommandOutput::default());
        };

        let mut out = Outbox::new();
        let Some(entry) = self.vocabulary.lookup(&command.verb) else {
            out.to(actor, "Huh?");
            return Ok(CommandOutput {
                deliveries: out.into_deliveries(),
            });
        };
        debug!(%actor, verb = %entry.name, args = command.args, "dispatching command");

        // Messages echo the word typed when it names the verb outright.
        let word = if entry.name == command.verb || entry.aliases.contains(&command.verb) {
            command.verb.clone()
        } else {
            entry.name.clone()
        };
        let mut cx = Context {
            world,
            actor,
            word,
            out,
        };

        if entry.action.needs_room() && cx.world.character(actor)?.room.is_none() {
            let text = format!("You are unable to {} anything here.", cx.word);
            cx.say(text);
        } else {
            let args = command.args;
            match &entry.action {
                Verb::Move(direction) => movement::go(&mut cx, direction.name())?,
                Verb::Go => movement::go(&mut cx, args)?,
                Verb::Barrier(op) => barrier_verbs::operate(&mut cx, *op, args)?,
                Verb::Get => items::get(&mut cx, args)?,
                Verb::Drop => items::drop(&mut cx, args)?,
                Verb::Give => items::give(&mut cx, args)?,
                Verb::Put => items::put(&mut cx, args)?,
                Verb::Wear => equipment::wear(&mut cx, args)?,
                Verb::Remove => equipment::remove(&mut cx, args)?,
                Verb::Inventory => info::inventory(&mut cx)?,
                Verb::Equipment => info::equipment(&mut cx)?,
                Verb::Look => info::look(&mut cx, args)?,
                Verb::Who => info::who(&mut cx)?,
                Verb::Where => info::where_list(&mut cx)?,
                Verb::Channel(name) => channels::speak(&mut cx, &self.channels, name, args)?,
            }
        }

        Ok(CommandOutput {
            deliveries: cx.out.into_deliveries(),
        })
    }
}

/// State shared by the command handlers for one command.
struct Context<'w> {
    world: &'w mut World,
    actor: EntityId,
    /// The verb word as it appears in messages.
    word: String,
    out: Outbox,
}

impl Context<'_> {
    fn say(&mut self, text: impl Into<String>) {
        self.out.to(self.actor, text);
    }

    /// `"Get what?"`, using the word the player typed.
    fn what(&mut self) {
        let text = format!("{} what?", capitalize(&self.word));
        self.say(text);
    }

    fn here(&self) -> Result<EntityId> {
        self.world.room_of(self.actor)
    }

    fn actor_name(&self) -> Result<String> {
        self.name(self.actor)
    }

    fn name(&self, id: EntityId) -> Result<String> {
        Ok(self.world.name(id)?.to_string())
    }

    /// Tells everyone else connected in the actor's room.
    fn tell_room(&mut self, text: &str) -> Result<()> {
        self.tell_room_except(&[], text)
    }

    /// Tells everyone connected in the actor's room except the actor and
    /// `others`.
    fn tell_room_except(&mut self, others: &[EntityId], text: &str) -> Result<()> {
        let room = self.here()?;
        let mut except = vec![self.actor];
        except.extend_from_slice(others);
        self.out.to_room_except(self.world, room, &except, text)
    }

    /// Finds an item near the actor: room floor newest first, then the
    /// inventory newest first, then equipment in slot order.
    fn find_nearby(&self, token: &str) -> Result<Option<EntityId>> {
        let room = self.world.room(self.here()?)?;
        let character = self.world.character(self.actor)?;
        Ok(ReferenceResolver::resolve(
            token,
            &[
                Source::NewestFirst(&room.items),
                Source::NewestFirst(&character.inventory),
                Source::Equipment(&character.equipment),
            ],
            self.world,
        )
        .entity())
    }

    /// Finds an item in the actor's inventory, newest first.
    fn find_carried(&self, token: &str) -> Result<Option<EntityId>> {
        let character = self.world.character(self.actor)?;
        Ok(
            match ReferenceResolver::resolve(
                token,
                &[Source::NewestFirst(&character.inventory)],
                self.world,
            ) {
                Resolution::Found(item) => Some(item),
                _ => None,
            },
        )
    }
}
