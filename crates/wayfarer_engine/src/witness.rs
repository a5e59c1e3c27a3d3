//! Witness de-duplication.
//!
//! Some audiences announce a message to bystanders ("Alice whispers
//! something to Bob."). A [`WitnessLedger`] remembers which bystander has
//! already seen which event, so one resolution call announces each event to
//! each bystander at most once. The ledger lives only as long as the call
//! that owns it and nothing is written onto entities.

use std::collections::HashSet;

use wayfarer_foundation::EntityId;

/// Transient set of (witness, event) pairs already announced.
#[derive(Clone, Debug, Default)]
pub struct WitnessLedger {
    seen: HashSet<(EntityId, String)>,
}

impl WitnessLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `witness` saw `event`. Returns true the first time only.
    pub fn first_sighting(&mut self, witness: EntityId, event: &str) -> bool {
        self.seen.insert((witness, event.to_string()))
    }

    /// Number of recorded sightings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
