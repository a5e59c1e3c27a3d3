//! Communication channels.
//!
//! A [`Channel`] pairs an [`Audience`] (who hears) with a [`Wording`] (how
//! it reads). Channels are looked up by name or alias in a
//! [`ChannelRegistry`]; [`resolve_channel`] turns a message into the exact
//! lines each recipient receives, without delivering anything.

use tracing::debug;
use wayfarer_foundation::{EntityId, Result, Role};
use wayfarer_parser::ArgumentTokenizer;
use wayfarer_storage::World;

use crate::audience::{Audience, AudienceTargets, Sender};
use crate::delivery::Delivery;
use crate::witness::WitnessLedger;

/// Who a line is about, resolved once per message.
#[derive(Clone, Debug)]
struct Speaker<'a> {
    system: bool,
    name: &'a str,
    role: Role,
    room: Option<EntityId>,
}

impl<'a> Speaker<'a> {
    fn of(world: &'a World, sender: Sender) -> Result<Self> {
        match sender {
            Sender::System => Ok(Self {
                system: true,
                name: "SYSTEM",
                role: Role::Admin,
                room: None,
            }),
            Sender::Actor(actor) => {
                let character = world.character(actor)?;
                Ok(Self {
                    system: false,
                    name: world.name(actor)?,
                    role: character.role,
                    room: character.room,
                })
            }
        }
    }

    fn ooc_prefix(&self) -> &'static str {
        match self.role {
            Role::Admin => "Admin ",
            Role::Builder => "Builder ",
            Role::Player => "",
        }
    }
}

/// How a channel's lines read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wording {
    /// Room speech.
    Say,
    /// Out-of-character private message.
    Tell,
    /// Quiet private speech.
    Whisper,
    /// Area-wide shout; distant listeners do not learn who yelled.
    Yell,
    /// Party speech through communicators.
    GroupTell,
    /// Global out-of-character chat.
    Ooc,
    /// Admin chatter.
    Admin,
    /// Builder chatter.
    Builder,
}

impl Wording {
    fn for_sender(
        self,
        speaker: &Speaker<'_>,
        target: Option<&str>,
        message: &str,
        communicator: &str,
    ) -> String {
        let target = target.unwrap_or("someone");
        let name = speaker.name;
        match self {
            Self::Say => format!("You say, \"{message}\""),
            Self::Tell => format!("You OOCly tell {target}, \"{message}\""),
            Self::Whisper => format!("You whisper to {target}, \"{message}\""),
            Self::Yell => format!("You yell, \"{message}\""),
            Self::GroupTell => format!("You say into your {communicator}, \"{message}\""),
            Self::Ooc => format!("[OOC] {}{name}: {message}", speaker.ooc_prefix()),
            Self::Admin => format!("[ADMIN] {name}: {message}"),
            Self::Builder => format!("[BUILDER] {name}: {message}"),
        }
    }

    fn for_target(
        self,
        speaker: &Speaker<'_>,
        listener_room: Option<EntityId>,
        message: &str,
        communicator: &str,
    ) -> String {
        if speaker.system {
            return message.to_string();
        }
        let name = speaker.name;
        let together = listener_room.is_some() && listener_room == speaker.room;
        match self {
            Self::Say => format!("{name} says, \"{message}\""),
            Self::Tell => format!("{name} OOCly tells you, \"{message}\""),
            Self::Whisper => format!("{name} whispers to you, \"{message}\""),
            Self::Yell if together => format!("{name} yells, \"{message}\""),
            Self::Yell => format!("Someone yells, \"{message}\""),
            Self::GroupTell if together => {
                format!("{name} echoes from your room and {communicator}, \"{message}\"")
            }
            Self::GroupTell => format!("{name} says through your {communicator}, \"{message}\""),
            Self::Ooc | Self::Admin | Self::Builder => {
                self.for_sender(speaker, None, message, communicator)
            }
        }
    }

    fn for_self(self, speaker: &Speaker<'_>, message: &str) -> String {
        match self {
            Self::Tell => format!("You OOCly tell yourself, \"{message}\""),
            Self::Whisper => format!("You whisper to yourself, \"{message}\""),
            _ => self.for_sender(speaker, Some("yourself"), message, ""),
        }
    }
}

/// A named channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Channel {
    /// Canonical name.
    pub name: String,
    /// Other names it answers to.
    pub aliases: Vec<String>,
    /// Who hears it.
    pub audience: Audience,
    /// Role needed to speak on it.
    pub min_role: Option<Role>,
    /// How lines read.
    pub wording: Wording,
}

impl Channel {
    /// Creates a channel open to every role.
    #[must_use]
    pub fn new(name: &str, audience: Audience, wording: Wording) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            audience,
            min_role: None,
            wording,
        }
    }

    /// Adds an alias.
    #[must_use]
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    /// Restricts speaking to `role` and above.
    #[must_use]
    pub fn with_min_role(mut self, role: Role) -> Self {
        self.min_role = Some(role);
        self
    }

    /// Returns true if `word` is this channel's name or an alias.
    #[must_use]
    pub fn answers_to(&self, word: &str) -> bool {
        self.name.eq_ignore_ascii_case(word)
            || self.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(word))
    }

    /// Resolves `message` from `sender` into lines.
    ///
    /// Lines are ordered: witness lines, then the sender's line, then one
    /// line per recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if the sender cannot use this audience (the system
    /// sender on a located channel) or the world is inconsistent.
    pub fn send(&self, world: &World, sender: Sender, message: &str) -> Result<ChannelOutcome> {
        let message = message.trim();
        if message.is_empty() {
            return Ok(ChannelOutcome::NoMessage);
        }
        let input = message;
        let speaker = Speaker::of(world, sender)?;
        if let Some(required) = self.min_role {
            if !speaker.system && speaker.role < required {
                return Ok(ChannelOutcome::NotPermitted { required });
            }
        }

        // Dropped on every return path below, so no sighting outlives the call.
        let mut ledger = WitnessLedger::new();
        let targets = self
            .audience
            .compute_targets(world, sender, message, &mut ledger)?;

        let (targets, witnesses, message, communicator) = match targets {
            AudienceTargets::Recipients {
                targets,
                witnesses,
                message,
                communicator,
            } => (targets, witnesses, message, communicator.unwrap_or_default()),
            AudienceTargets::SelfTarget { message } => {
                let Some(actor) = sender.actor() else {
                    return Ok(ChannelOutcome::NoMessage);
                };
                return Ok(ChannelOutcome::SelfTarget(Delivery::new(
                    actor,
                    self.wording.for_self(&speaker, &message),
                )));
            }
            AudienceTargets::NoTarget { name } => return Ok(ChannelOutcome::NoTarget { name }),
            AudienceTargets::NoParty => return Ok(ChannelOutcome::NoParty),
            AudienceTargets::NoCommunicator => return Ok(ChannelOutcome::NoCommunicator),
            AudienceTargets::NoMessage => return Ok(ChannelOutcome::NoMessage),
        };

        let mut lines = witnesses;
        if let Some(actor) = sender.actor() {
            let target_name = match targets.first() {
                _ if !self.audience.is_targeted() => None,
                Some(&first) => Some(world.name(first)?),
                None => addressee(world, input),
            };
            lines.push(Delivery::new(
                actor,
                self.wording
                    .for_sender(&speaker, target_name, &message, &communicator),
            ));
        }
        for target in targets {
            let listener_room = world.character(target)?.room;
            lines.push(Delivery::new(
                target,
                self.wording
                    .for_target(&speaker, listener_room, &message, &communicator),
            ));
        }

        debug!(channel = %self.name, lines = lines.len(), "channel resolved");
        Ok(ChannelOutcome::Sent(lines))
    }
}

/// The player a targeted message was addressed to, by display name when
/// they are connected, otherwise as typed.
fn addressee<'a>(world: &'a World, input: &'a str) -> Option<&'a str> {
    let (word, _) = ArgumentTokenizer::first_word(input)?;
    Some(
        world
            .find_connected(word)
            .and_then(|target| world.name(target).ok())
            .unwrap_or(word),
    )
}

/// Result of resolving a channel message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelOutcome {
    /// Lines to deliver, in order. An empty audience still sends the
    /// sender's own line; a whisper to someone in another room reaches
    /// nobody but the sender.
    Sent(Vec<Delivery>),
    /// The sender addressed themselves; one line for the sender only.
    SelfTarget(Delivery),
    /// A targeted channel could not find its recipient.
    NoTarget {
        /// The name as typed.
        name: String,
    },
    /// Party channel used outside a party.
    NoParty,
    /// Party channel used without a communicator.
    NoCommunicator,
    /// Nothing to say.
    NoMessage,
    /// The sender's role is too low.
    NotPermitted {
        /// Role needed.
        required: Role,
    },
    /// No channel answers to the name.
    UnknownChannel,
}

impl ChannelOutcome {
    /// Lines to deliver; empty for every outcome but `Sent` and `SelfTarget`.
    #[must_use]
    pub fn deliveries(&self) -> &[Delivery] {
        match self {
            Self::Sent(lines) => lines,
            Self::SelfTarget(line) => std::slice::from_ref(line),
            _ => &[],
        }
    }
}

/// Channels in lookup order.
#[derive(Clone, Debug, Default)]
pub struct ChannelRegistry {
    channels: Vec<Channel>,
}

impl ChannelRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard channel set.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Channel::new("say", Audience::Room, Wording::Say).with_alias("'"));
        registry.register(Channel::new("tell", Audience::Private, Wording::Tell).with_alias("ot"));
        registry.register(Channel::new("whisper", Audience::Whisper, Wording::Whisper));
        registry.register(Channel::new("yell", Audience::Area, Wording::Yell).with_alias("shout"));
        registry.register(
            Channel::new("gtell", Audience::PartyCommunicator, Wording::GroupTell)
                .with_alias("ptell"),
        );
        registry.register(
            Channel::new("ooc", Audience::World, Wording::Ooc)
                .with_alias("chat")
                .with_alias("."),
        );
        registry.register(
            Channel::new("admin", Audience::Role(Role::Admin), Wording::Admin)
                .with_min_role(Role::Admin),
        );
        registry.register(
            Channel::new("builder", Audience::Role(Role::Builder), Wording::Builder)
                .with_min_role(Role::Builder),
        );
        registry
    }

    /// Adds a channel, replacing one with the same name.
    pub fn register(&mut self, channel: Channel) {
        match self.channels.iter_mut().find(|c| c.name == channel.name) {
            Some(existing) => *existing = channel,
            None => self.channels.push(channel),
        }
    }

    /// Finds a channel by name or alias.
    #[must_use]
    pub fn find(&self, word: &str) -> Option<&Channel> {
        self.channels.iter().find(|channel| channel.answers_to(word))
    }

    /// Channels in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter()
    }
}

/// Resolves a message on the named channel.
///
/// # Errors
///
/// Returns an error if the sender cannot use the channel's audience or the
/// world is inconsistent.
pub fn resolve_channel(
    registry: &ChannelRegistry,
    world: &World,
    channel: &str,
    sender: Sender,
    message: &str,
) -> Result<ChannelOutcome> {
    match registry.find(channel) {
        Some(channel) => channel.send(world, sender, message),
        None => Ok(ChannelOutcome::UnknownChannel),
    }
}
