//! Reference resolution.
//!
//! Turns a token such as `sword` or `2.apple` into an entity by scanning
//! one or more ordered containers. Each container is searched on its own:
//! the ordinal counts matches within a single container, and the first
//! container that yields a match wins.

use wayfarer_foundation::EntityId;
use wayfarer_storage::{Contents, Equipment, World};

/// A parsed `<ordinal>.<keyword>` token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    /// 1-based position among matches.
    pub ordinal: usize,
    /// Lowercased keyword prefix.
    pub keyword: String,
}

impl Reference {
    /// Parses a token.
    ///
    /// A bare keyword has ordinal 1. Returns `None` for an empty keyword,
    /// more than one `.`, an ordinal that is not an optional `-` followed by
    /// ASCII digits, or an ordinal below 1.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        let mut parts = token.split('.');
        let (ordinal, keyword) = match (parts.next(), parts.next(), parts.next()) {
            (Some(keyword), None, None) => (1, keyword),
            (Some(ordinal), Some(keyword), None) => (ordinal_of(ordinal)?, keyword),
            _ => return None,
        };
        if ordinal == 0 || keyword.is_empty() {
            return None;
        }
        Some(Self {
            ordinal,
            keyword: keyword.to_lowercase(),
        })
    }

    /// Returns true if the entity's keywords match this reference's keyword.
    #[must_use]
    pub fn matches(&self, world: &World, id: EntityId) -> bool {
        world
            .keywords(id)
            .is_ok_and(|keywords| keywords.matches_prefix(&self.keyword))
    }

    /// The `ordinal`-th matching entity produced by `candidates`.
    fn nth_match<I>(&self, world: &World, candidates: I) -> Option<I::Item>
    where
        I: Iterator,
        I::Item: HasEntity,
    {
        candidates
            .filter(|candidate| self.matches(world, candidate.entity()))
            .nth(self.ordinal - 1)
    }
}

/// Digits with an optional leading `-`. Negative ordinals parse but never
/// convert to a position.
fn ordinal_of(text: &str) -> Option<usize> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let ordinal: i64 = text.parse().ok()?;
    usize::try_from(ordinal).ok()
}

/// Something a match can be read off.
trait HasEntity {
    fn entity(&self) -> EntityId;
}

impl HasEntity for EntityId {
    fn entity(&self) -> EntityId {
        *self
    }
}

impl HasEntity for (&str, EntityId) {
    fn entity(&self) -> EntityId {
        self.1
    }
}

/// One container to search, with its scan order.
#[derive(Clone, Copy, Debug)]
pub enum Source<'a> {
    /// Oldest entry first.
    Contents(&'a Contents),
    /// Newest entry first.
    NewestFirst(&'a Contents),
    /// Equipment in slot order; matches report their slot.
    Equipment(&'a Equipment),
}

/// Result of resolving a reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Matched an entity in an ordinary container.
    Found(EntityId),
    /// Matched an equipped entity.
    Equipped {
        /// Slot the entity is worn in.
        slot: String,
        /// The entity.
        entity: EntityId,
    },
    /// Nothing matched.
    NoMatch,
}

impl Resolution {
    /// The matched entity, if any.
    #[must_use]
    pub fn entity(&self) -> Option<EntityId> {
        match self {
            Self::Found(entity) | Self::Equipped { entity, .. } => Some(*entity),
            Self::NoMatch => None,
        }
    }

    /// Returns true if something matched.
    #[must_use]
    pub fn is_match(&self) -> bool {
        !matches!(self, Self::NoMatch)
    }
}

/// Resolves references against ordered containers.
pub struct ReferenceResolver;

impl ReferenceResolver {
    /// Resolves `token` against `sources` in order.
    ///
    /// Each source is searched independently with the full ordinal; the
    /// first source holding at least `ordinal` matches decides the result.
    #[must_use]
    pub fn resolve(token: &str, sources: &[Source<'_>], world: &World) -> Resolution {
        let Some(reference) = Reference::parse(token) else {
            return Resolution::NoMatch;
        };

        for source in sources {
            let found = match source {
                Source::Contents(contents) => reference
                    .nth_match(world, contents.iter())
                    .map(Resolution::Found),
                Source::NewestFirst(contents) => reference
                    .nth_match(world, contents.newest_first())
                    .map(Resolution::Found),
                Source::Equipment(equipment) => reference
                    .nth_match(world, equipment.iter())
                    .map(|(slot, entity)| Resolution::Equipped {
                        slot: slot.to_string(),
                        entity,
                    }),
            };
            if let Some(resolution) = found {
                return resolution;
            }
        }
        Resolution::NoMatch
    }

    /// Resolves `token` against equipment, returning the slot and entity.
    #[must_use]
    pub fn resolve_in_slots(
        token: &str,
        equipment: &Equipment,
        world: &World,
    ) -> Option<(String, EntityId)> {
        match Self::resolve(token, &[Source::Equipment(equipment)], world) {
            Resolution::Equipped { slot, entity } => Some((slot, entity)),
            _ => None,
        }
    }
}
