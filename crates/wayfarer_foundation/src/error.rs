//! Error types for Wayfarer.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Only faults belong here: stale ids, entities of the wrong kind, world data
//! that contradicts itself. Expected gameplay outcomes (nothing matched, no
//! such recipient, door already locked) are ordinary return values in the
//! layers that produce them.

use std::fmt;

use thiserror::Error;

use crate::entity::EntityId;
use crate::types::EntityKind;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Wayfarer operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(id: EntityId) -> Self {
        Self::new(ErrorKind::EntityNotFound(id))
    }

    /// Creates a stale entity reference error.
    #[must_use]
    pub fn stale_entity(id: EntityId) -> Self {
        Self::new(ErrorKind::StaleEntity(id))
    }

    /// Creates a wrong kind error.
    #[must_use]
    pub fn wrong_kind(entity: EntityId, expected: EntityKind, actual: EntityKind) -> Self {
        Self::new(ErrorKind::WrongKind {
            entity,
            expected,
            actual,
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Entity was not found in storage.
    #[error("entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// Entity reference is stale (generation mismatch).
    #[error("stale entity reference: {0:?}")]
    StaleEntity(EntityId),

    /// Entity exists but is not the kind the caller needed.
    #[error("{entity:?} is a {actual}, expected a {expected}")]
    WrongKind {
        /// The entity that was looked up.
        entity: EntityId,
        /// The kind the caller needed.
        expected: EntityKind,
        /// The kind it actually is.
        actual: EntityKind,
    },

    /// Character has no room.
    #[error("{0:?} is not placed in any room")]
    NotPlaced(EntityId),

    /// Equipment slot already holds an item.
    #[error("slot {slot} on {owner:?} is already occupied")]
    SlotOccupied {
        /// The wearer.
        owner: EntityId,
        /// The slot name.
        slot: String,
    },

    /// No door joins the two rooms.
    #[error("no door between {0:?} and {1:?}")]
    NoSuchDoor(EntityId, EntityId),

    /// Item cannot hold other items.
    #[error("{0:?} is not a container")]
    NotAContainer(EntityId),

    /// Snapshot encoding or decoding failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// File system failure.
    #[error("io error: {0}")]
    IoError(String),

    /// Invalid configuration or world definition value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Command or operation that was running.
    pub operation: Option<String>,
    /// Acting character, if any.
    pub actor: Option<EntityId>,
    /// Trail of nested steps.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Sets the acting character.
    #[must_use]
    pub fn with_actor(mut self, actor: EntityId) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "in {operation}")?;
            if let Some(actor) = self.actor {
                write!(f, " by {actor}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  at {frame}")?;
            }
        }
        Ok(())
    }
}
