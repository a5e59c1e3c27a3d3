//! Party membership.

use std::fmt;

use wayfarer_foundation::EntityId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of a party.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartyId(pub u64);

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "party {}", self.0)
    }
}

/// A group of characters. Members are kept in join order, leader first.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Party {
    /// Party id.
    pub id: PartyId,
    /// Founding member.
    pub leader: EntityId,
    /// All members, leader included.
    pub members: Vec<EntityId>,
}

/// All parties.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartyStore {
    parties: Vec<Party>,
    next_id: u64,
}

impl PartyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a party led by `leader`.
    pub fn form(&mut self, leader: EntityId) -> PartyId {
        let id = PartyId(self.next_id);
        self.next_id += 1;
        self.parties.push(Party {
            id,
            leader,
            members: vec![leader],
        });
        id
    }

    /// Adds `member` to `party`. Returns false if the party does not exist.
    pub fn join(&mut self, party: PartyId, member: EntityId) -> bool {
        let Some(record) = self.parties.iter_mut().find(|p| p.id == party) else {
            return false;
        };
        if !record.members.contains(&member) {
            record.members.push(member);
        }
        true
    }

    /// Removes `member` from `party`. An emptied party is disbanded, and a
    /// departing leader hands over to the next member in join order.
    pub fn leave(&mut self, party: PartyId, member: EntityId) {
        let Some(index) = self.parties.iter().position(|p| p.id == party) else {
            return;
        };
        let record = &mut self.parties[index];
        record.members.retain(|m| *m != member);
        if record.members.is_empty() {
            self.parties.remove(index);
        } else if record.leader == member {
            record.leader = record.members[0];
        }
    }

    /// Looks up a party.
    #[must_use]
    pub fn get(&self, party: PartyId) -> Option<&Party> {
        self.parties.iter().find(|p| p.id == party)
    }

    /// Members of `party` in join order. Empty if it does not exist.
    #[must_use]
    pub fn members(&self, party: PartyId) -> &[EntityId] {
        self.get(party).map_or(&[], |p| p.members.as_slice())
    }

    /// Number of parties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parties.len()
    }

    /// Returns true if there are no parties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }
}
