//! Audience topologies.
//!
//! An [`Audience`] decides who receives a channel message. It works on the
//! raw message and returns the recipients before any formatting, plus any
//! witness lines the topology produces on the way. Recipients are always
//! connected actors other than the sender, in a deterministic order:
//! connection order for world-wide audiences, arrival order for rooms, and
//! join order for parties.

use wayfarer_foundation::{EntityId, Error, ItemType, Result, Role};
use wayfarer_parser::ArgumentTokenizer;
use wayfarer_storage::World;

use crate::delivery::Delivery;
use crate::text::without_article;
use crate::witness::WitnessLedger;

/// Who is speaking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    /// A character.
    Actor(EntityId),
    /// The game itself. Its text is delivered verbatim.
    System,
}

impl Sender {
    /// The speaking character, if any.
    #[must_use]
    pub const fn actor(self) -> Option<EntityId> {
        match self {
            Self::Actor(actor) => Some(actor),
            Self::System => None,
        }
    }

    fn require_actor(self, audience: Audience) -> Result<EntityId> {
        self.actor().ok_or_else(|| {
            Error::internal(format!("{audience:?} audience needs an actor as sender"))
        })
    }
}

/// Recipient topology of a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Audience {
    /// Everyone connected.
    World,
    /// Everyone in rooms of the sender's area.
    Area,
    /// Everyone in the sender's room.
    Room,
    /// Everyone connected with at least this role.
    Role(Role),
    /// One named player anywhere.
    Private,
    /// One named player in the sender's room; everyone else there sees
    /// that a whisper happened.
    Whisper,
    /// Party members holding a communicator; bystanders in the sender's
    /// room hear the sender speak into theirs.
    PartyCommunicator,
}

/// Raw result of computing an audience.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudienceTargets {
    /// Message goes to these recipients.
    Recipients {
        /// Recipients in delivery order. May be empty.
        targets: Vec<EntityId>,
        /// Lines for bystanders, already rendered.
        witnesses: Vec<Delivery>,
        /// The message with any target name removed.
        message: String,
        /// Name of the sender's communicator, for party channels.
        communicator: Option<String>,
    },
    /// The sender addressed themselves.
    SelfTarget {
        /// The message with the target name removed.
        message: String,
    },
    /// The named recipient could not be found.
    NoTarget {
        /// The name as typed.
        name: String,
    },
    /// Party channel used outside a party.
    NoParty,
    /// Party channel used without a communicator.
    NoCommunicator,
    /// Nothing left to say once the target name is removed.
    NoMessage,
}

impl Audience {
    /// Returns true for audiences whose first message word names the target.
    #[must_use]
    pub const fn is_targeted(self) -> bool {
        matches!(self, Self::Private | Self::Whisper)
    }

    /// Computes recipients for `message` from `sender`.
    ///
    /// # Errors
    ///
    /// Returns an error if a located audience is used by the system sender,
    /// or if the world is inconsistent.
    pub fn compute_targets(
        self,
        world: &World,
        sender: Sender,
        message: &str,
        ledger: &mut WitnessLedger,
    ) -> Result<AudienceTargets> {
        match self {
            Self::World => Ok(broadcast(
                connected_except(world, sender.actor()).collect(),
                message,
            )),
            Self::Role(minimum) => {
                let mut targets = Vec::new();
                for actor in connected_except(world, sender.actor()) {
                    if world.character(actor)?.role >= minimum {
                        targets.push(actor);
                    }
                }
                Ok(broadcast(targets, message))
            }
            Self::Room => {
                let actor = sender.require_actor(self)?;
                let room = world.room_of(actor)?;
                let targets = world
                    .occupants(room)?
                    .iter()
                    .filter(|&occupant| occupant != actor && world.is_connected(occupant))
                    .collect();
                Ok(broadcast(targets, message))
            }
            Self::Area => {
                let actor = sender.require_actor(self)?;
                let area = world.area_of(world.room_of(actor)?)?;
                let mut targets = Vec::new();
                for listener in connected_except(world, Some(actor)) {
                    if let Some(room) = world.character(listener)?.room {
                        if world.area_of(room)? == area {
                            targets.push(listener);
                        }
                    }
                }
                Ok(broadcast(targets, message))
            }
            Self::Private => {
                let actor = sender.require_actor(self)?;
                Ok(match named_target(world, actor, message)? {
                    Named::Found { target, message } => broadcast(vec![target], &message),
                    Named::Other(outcome) => outcome,
                })
            }
            Self::Whisper => {
                let actor = sender.require_actor(self)?;
                whisper_targets(world, actor, message, ledger)
            }
            Self::PartyCommunicator => {
                let actor = sender.require_actor(self)?;
                party_targets(world, actor, message, ledger)
            }
        }
    }
}

fn broadcast(targets: Vec<EntityId>, message: &str) -> AudienceTargets {
    AudienceTargets::Recipients {
        targets,
        witnesses: Vec::new(),
        message: message.to_string(),
        communicator: None,
    }
}

fn connected_except(world: &World, sender: Option<EntityId>) -> impl Iterator<Item = EntityId> + '_ {
    world
        .connected()
        .filter(move |&actor| Some(actor) != sender)
}

enum Named {
    Found { target: EntityId, message: String },
    Other(AudienceTargets),
}

/// Splits the target name off `message` and looks it up among connected
/// players.
fn named_target(world: &World, actor: EntityId, message: &str) -> Result<Named> {
    let Some((name, rest)) = ArgumentTokenizer::first_word(message) else {
        return Ok(Named::Other(AudienceTargets::NoMessage));
    };

    let addresses_self = name.eq_ignore_ascii_case("me")
        || name.eq_ignore_ascii_case("self")
        || world.name(actor)?.eq_ignore_ascii_case(name);
    let target = world.find_connected(name);

    if addresses_self || target == Some(actor) {
        return Ok(Named::Other(if rest.is_empty() {
            AudienceTargets::NoMessage
        } else {
            AudienceTargets::SelfTarget {
                message: rest.to_string(),
            }
        }));
    }
    let Some(target) = target else {
        return Ok(Named::Other(AudienceTargets::NoTarget {
            name: name.to_string(),
        }));
    };
    if rest.is_empty() {
        return Ok(Named::Other(AudienceTargets::NoMessage));
    }
    Ok(Named::Found {
        target,
        message: rest.to_string(),
    })
}

fn whisper_targets(
    world: &World,
    actor: EntityId,
    message: &str,
    ledger: &mut WitnessLedger,
) -> Result<AudienceTargets> {
    let (target, message) = match named_target(world, actor, message)? {
        Named::Found { target, message } => (target, message),
        Named::Other(outcome) => return Ok(outcome),
    };

    let room = world.room_of(actor)?;
    if world.character(target)?.room != Some(room) {
        return Ok(AudienceTargets::Recipients {
            targets: Vec::new(),
            witnesses: Vec::new(),
            message,
            communicator: None,
        });
    }

    let sender_name = world.name(actor)?;
    let target_name = world.name(target)?;
    let event = format!("whisper:{}:{message}", target_name.to_lowercase());
    let mut witnesses = Vec::new();
    for occupant in world.occupants(room)?.iter() {
        if occupant == actor || occupant == target || !world.is_connected(occupant) {
            continue;
        }
        if ledger.first_sighting(occupant, &event) {
            witnesses.push(Delivery::new(
                occupant,
                format!("{sender_name} whispers something to {target_name}."),
            ));
        }
    }

    Ok(AudienceTargets::Recipients {
        targets: vec![target],
        witnesses,
        message,
        communicator: None,
    })
}

fn party_targets(
    world: &World,
    actor: EntityId,
    message: &str,
    ledger: &mut WitnessLedger,
) -> Result<AudienceTargets> {
    let Some(party) = world.party_of(actor)? else {
        return Ok(AudienceTargets::NoParty);
    };
    let Some(communicator) = world.held_of_type(actor, ItemType::Communicator)? else {
        return Ok(AudienceTargets::NoCommunicator);
    };
    let communicator = without_article(world.name(communicator)?).to_string();

    let mut linked = Vec::new();
    for &member in world.party_members(party) {
        if world.held_of_type(member, ItemType::Communicator)?.is_some() {
            linked.push(member);
        }
    }

    let sender_name = world.name(actor)?;
    let event = format!("gtell:{message}");
    let mut witnesses = Vec::new();
    for occupant in world.occupants(world.room_of(actor)?)?.iter() {
        if linked.contains(&occupant) || !world.is_connected(occupant) {
            continue;
        }
        if ledger.first_sighting(occupant, &event) {
            witnesses.push(Delivery::new(
                occupant,
                format!("{sender_name} says into their {communicator}, \"{message}.\""),
            ));
        }
    }

    let targets = linked
        .into_iter()
        .filter(|&member| member != actor && world.is_connected(member))
        .collect();

    Ok(AudienceTargets::Recipients {
        targets,
        witnesses,
        message: message.to_string(),
        communicator: Some(communicator),
    })
}
