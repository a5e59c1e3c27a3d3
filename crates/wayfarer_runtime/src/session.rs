//! Session state for the REPL.
//!
//! A [`Session`] owns the live world and runs commands against it: each line
//! executes on a copy, the copy is committed, and the output is fanned out to
//! per-character [`Mailbox`] queues. The REPL reads back whichever queue
//! belongs to the character being played.

use std::collections::BTreeMap;

use tracing::{debug, info};
use wayfarer_engine::{CommandDispatcher, DeliveryError, DeliverySink, FanoutReport, fan_out};
use wayfarer_foundation::{EntityId, Result};
use wayfarer_storage::World;

/// Queued output lines, one queue per connected character.
#[derive(Clone, Debug, Default)]
pub struct Mailbox {
    queues: BTreeMap<EntityId, Vec<String>>,
}

impl Mailbox {
    /// Creates a mailbox with no open queues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a queue. Opening an open queue keeps its lines.
    pub fn open(&mut self, recipient: EntityId) {
        self.queues.entry(recipient).or_default();
    }

    /// Closes a queue, discarding anything unread.
    pub fn close(&mut self, recipient: EntityId) -> bool {
        self.queues.remove(&recipient).is_some()
    }

    /// Returns true if the recipient has an open queue.
    #[must_use]
    pub fn is_open(&self, recipient: EntityId) -> bool {
        self.queues.contains_key(&recipient)
    }

    /// Unread lines for a recipient.
    #[must_use]
    pub fn pending(&self, recipient: EntityId) -> &[String] {
        self.queues.get(&recipient).map_or(&[], Vec::as_slice)
    }

    /// Takes every unread line for a recipient.
    pub fn drain(&mut self, recipient: EntityId) -> Vec<String> {
        self.queues
            .get_mut(&recipient)
            .map(std::mem::take)
            .unwrap_or_default()
    }
}

impl DeliverySink for Mailbox {
    fn deliver(&mut self, recipient: EntityId, text: &str) -> std::result::Result<(), DeliveryError> {
        match self.queues.get_mut(&recipient) {
            Some(queue) => {
                queue.push(text.to_string());
                Ok(())
            }
            None => Err(DeliveryError::Disconnected(recipient)),
        }
    }
}

/// The live world plus the character the REPL is playing.
#[derive(Clone, Debug, Default)]
pub struct Session {
    /// The committed world state.
    world: World,

    /// Verb table and channels.
    dispatcher: CommandDispatcher,

    /// The character commands run as.
    actor: Option<EntityId>,

    /// Output waiting to be read.
    mailbox: Mailbox,
}

impl Session {
    /// Creates a session over an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session over the given world. Characters the world already
    /// lists as connected get a mailbox.
    #[must_use]
    pub fn with_world(world: World) -> Self {
        let mut session = Self::default();
        session.replace_world(world);
        session
    }

    /// Uses a different dispatcher, for example one with extra channels.
    #[must_use]
    pub fn with_dispatcher(mut self, dispatcher: CommandDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Returns a reference to the current world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Returns the dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }

    /// Returns the mailbox.
    #[must_use]
    pub const fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    /// Swaps in a whole new world, such as a loaded snapshot. Mailboxes are
    /// rebuilt from the world's connected list; the active character is kept
    /// only if it is still connected.
    pub fn replace_world(&mut self, world: World) {
        self.world = world;
        self.mailbox = Mailbox::new();
        for actor in self.world.connected() {
            self.mailbox.open(actor);
        }
        if self.actor.is_some_and(|actor| !self.world.is_connected(actor)) {
            self.actor = None;
        }
    }

    /// The character commands currently run as.
    #[must_use]
    pub const fn actor(&self) -> Option<EntityId> {
        self.actor
    }

    /// Name of the active character.
    #[must_use]
    pub fn actor_name(&self) -> Option<&str> {
        self.actor.and_then(|actor| self.world.name(actor).ok())
    }

    /// Finds a player character by name, ignoring case. NPCs never match.
    #[must_use]
    pub fn find_player(&self, name: &str) -> Option<EntityId> {
        self.world
            .entities()
            .find(|entity| {
                entity.as_character().is_some_and(|c| !c.npc) && entity.name.eq_ignore_ascii_case(name)
            })
            .map(|entity| entity.id)
    }

    /// Connects a character and opens its mailbox.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not a player character.
    pub fn connect(&mut self, actor: EntityId) -> Result<()> {
        self.world.connect(actor)?;
        self.mailbox.open(actor);
        info!(%actor, name = self.world.name(actor)?, "session connected");
        Ok(())
    }

    /// Disconnects a character. Returns true if it was connected.
    pub fn disconnect(&mut self, actor: EntityId) -> bool {
        let was_connected = self.world.disconnect(actor);
        self.mailbox.close(actor);
        if self.actor == Some(actor) {
            self.actor = None;
        }
        if was_connected {
            info!(%actor, "session disconnected");
        }
        was_connected
    }

    /// Plays as a character, connecting it first if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not a player character.
    pub fn play_as(&mut self, actor: EntityId) -> Result<()> {
        if !self.world.is_connected(actor) {
            self.connect(actor)?;
        }
        self.actor = Some(actor);
        Ok(())
    }

    /// Runs one command line as `actor`, commits the result, and delivers
    /// the output. The world is left untouched if the command fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the command hits inconsistent world data.
    pub fn submit(&mut self, actor: EntityId, line: &str) -> Result<FanoutReport> {
        let (world, output) = self.dispatcher.execute(&self.world, actor, line)?;
        self.world = world;
        let report = fan_out(&mut self.mailbox, &output.deliveries);
        debug!(%actor, line, delivered = report.delivered, "command committed");
        Ok(report)
    }

    /// Takes every unread line for a character.
    pub fn drain(&mut self, actor: EntityId) -> Vec<String> {
        self.mailbox.drain(actor)
    }
}
