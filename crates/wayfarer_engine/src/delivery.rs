//! Output lines and their delivery.
//!
//! Resolution code only ever produces [`Delivery`] values. Pushing them to
//! sessions happens afterwards through a [`DeliverySink`], one recipient at
//! a time; a failure for one recipient is logged and the rest still go out.

use thiserror::Error;
use tracing::{debug, warn};
use wayfarer_foundation::{EntityId, Result};
use wayfarer_storage::World;

/// One line of text for one recipient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    /// Who receives the line.
    pub recipient: EntityId,
    /// The line.
    pub text: String,
}

impl Delivery {
    /// Creates a delivery.
    #[must_use]
    pub fn new(recipient: EntityId, text: impl Into<String>) -> Self {
        Self {
            recipient,
            text: text.into(),
        }
    }
}

/// Why a single delivery failed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DeliveryError {
    /// The recipient has no session.
    #[error("{0} is not connected")]
    Disconnected(EntityId),
    /// The session refused the line.
    #[error("delivery to {recipient} failed: {reason}")]
    Rejected {
        /// The recipient.
        recipient: EntityId,
        /// Reason given by the session.
        reason: String,
    },
}

/// Per-recipient delivery primitive.
pub trait DeliverySink {
    /// Delivers one line to one recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if this recipient could not receive the line.
    fn deliver(&mut self, recipient: EntityId, text: &str) -> std::result::Result<(), DeliveryError>;
}

impl DeliverySink for Vec<Delivery> {
    fn deliver(&mut self, recipient: EntityId, text: &str) -> std::result::Result<(), DeliveryError> {
        self.push(Delivery::new(recipient, text));
        Ok(())
    }
}

/// Outcome of a fan-out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FanoutReport {
    /// Lines delivered.
    pub delivered: usize,
    /// Lines that failed, in order.
    pub failed: Vec<DeliveryError>,
}

impl FanoutReport {
    /// Returns true if every line was delivered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Delivers every line in order. Failures are logged and skipped.
pub fn fan_out<S: DeliverySink + ?Sized>(sink: &mut S, deliveries: &[Delivery]) -> FanoutReport {
    let mut report = FanoutReport::default();
    for delivery in deliveries {
        match sink.deliver(delivery.recipient, &delivery.text) {
            Ok(()) => report.delivered += 1,
            Err(err) => {
                warn!(recipient = %delivery.recipient, error = %err, "delivery failed");
                report.failed.push(err);
            }
        }
    }
    debug!(
        delivered = report.delivered,
        failed = report.failed.len(),
        "fan-out finished"
    );
    report
}

/// Collects output lines for one command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outbox {
    deliveries: Vec<Delivery>,
}

impl Outbox {
    /// Creates an empty outbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a line for one recipient.
    pub fn to(&mut self, recipient: EntityId, text: impl Into<String>) {
        self.deliveries.push(Delivery::new(recipient, text));
    }

    /// Queues a line for every connected occupant of `room` not in `except`.
    ///
    /// # Errors
    ///
    /// Returns an error if the room does not exist.
    pub fn to_room_except(
        &mut self,
        world: &World,
        room: EntityId,
        except: &[EntityId],
        text: &str,
    ) -> Result<()> {
        for occupant in world.occupants(room)?.iter() {
            if !except.contains(&occupant) && world.is_connected(occupant) {
                self.to(occupant, text);
            }
        }
        Ok(())
    }

    /// Appends already-built lines.
    pub fn extend(&mut self, deliveries: impl IntoIterator<Item = Delivery>) {
        self.deliveries.extend(deliveries);
    }

    /// Queued lines in order.
    #[must_use]
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    /// Consumes the outbox.
    #[must_use]
    pub fn into_deliveries(self) -> Vec<Delivery> {
        self.deliveries
    }
}
