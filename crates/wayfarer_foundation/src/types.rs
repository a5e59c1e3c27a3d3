//! Entity classification: kinds, player roles, and item types.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

/// What an entity is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntityKind {
    /// A player or NPC.
    Character,
    /// Anything that can be carried, worn, or placed.
    Item,
    /// A location.
    Room,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Character => write!(f, "character"),
            Self::Item => write!(f, "item"),
            Self::Room => write!(f, "room"),
        }
    }
}

/// Privilege tier of a character. Ordered: `Player < Builder < Admin`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Role {
    /// Ordinary player.
    #[default]
    Player,
    /// Area builder.
    Builder,
    /// Administrator.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Builder => write!(f, "builder"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "player" => Ok(Self::Player),
            "builder" => Ok(Self::Builder),
            "admin" => Ok(Self::Admin),
            other => Err(Error::new(ErrorKind::Config(format!("unknown role: {other}")))),
        }
    }
}

/// Behavioural category of an item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ItemType {
    /// Plain object.
    #[default]
    Object,
    /// Holds other items and may be closed or locked.
    Container,
    /// Wielded rather than worn.
    Weapon,
    /// Worn.
    Armor,
    /// Opens doors and containers by prototype.
    Key,
    /// Lets party members talk across rooms.
    Communicator,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Object => "object",
            Self::Container => "container",
            Self::Weapon => "weapon",
            Self::Armor => "armor",
            Self::Key => "key",
            Self::Communicator => "communicator",
        };
        f.write_str(name)
    }
}

impl FromStr for ItemType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "object" => Ok(Self::Object),
            "container" => Ok(Self::Container),
            "weapon" => Ok(Self::Weapon),
            "armor" => Ok(Self::Armor),
            "key" => Ok(Self::Key),
            "communicator" => Ok(Self::Communicator),
            other => Err(Error::new(ErrorKind::Config(format!(
                "unknown item type: {other}"
            )))),
        }
    }
}
