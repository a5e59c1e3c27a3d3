//! Barrier operations on doors and containers.
//!
//! A door is one record shared by the two rooms it joins, so an operation
//! from either side writes the same state. Everyone in the acting room
//! sees the acting phrasing and everyone on the far side hears it "from the
//! other side". Containers keep their state on the item and only the
//! acting room is told.

use tracing::debug;
use wayfarer_foundation::{EntityId, Error, ErrorKind, Result};
use wayfarer_storage::{Barrier, LockState, World};

use crate::barrier::{BarrierOp, InvalidTransition, Transition, transition};
use crate::delivery::{Delivery, Outbox};
use crate::text::capitalize;

/// What an operation acts on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BarrierTarget {
    /// The door on an exit of the actor's room.
    Door {
        /// Exit direction, as shown in messages.
        direction: String,
        /// Room on the other side.
        to: EntityId,
    },
    /// A container item.
    Item(EntityId),
}

/// Result of an operation plus the lines it produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BarrierOutcome {
    /// The change made, or why nothing changed.
    pub result: std::result::Result<Transition, InvalidTransition>,
    /// Lines for the actor and onlookers.
    pub deliveries: Vec<Delivery>,
}

/// Applies `op` to `target` on behalf of `actor`.
///
/// Refusals are reported in the outcome, not as errors.
///
/// # Errors
///
/// Returns an error if the actor is unplaced, the door or either of its
/// rooms no longer exists, or the item is not a container.
pub fn apply_barrier_op(
    world: &mut World,
    actor: EntityId,
    op: BarrierOp,
    target: &BarrierTarget,
) -> Result<BarrierOutcome> {
    let here = world.room_of(actor)?;
    let barrier = match target {
        BarrierTarget::Door { to, .. } => world
            .door_between(here, *to)?
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::NoSuchDoor(here, *to)))?,
        BarrierTarget::Item(item) => {
            let record = world.item(*item)?;
            if !record.is_container() {
                return Err(Error::new(ErrorKind::NotAContainer(*item)));
            }
            record
                .barrier
                .clone()
                .unwrap_or_else(|| Barrier::new(LockState::Open).fixed_open())
        }
    };

    let key = match &barrier.key {
        Some(prototype) => world.held_with_prototype(actor, prototype)?,
        None => None,
    };
    let result = transition(op, &barrier, key.is_some());

    let notices = Notices {
        world: &*world,
        actor,
        here,
        target,
    };
    let mut outbox = Outbox::new();
    match &result {
        Ok(change) => {
            let key_name = match key {
                Some(key) => Some(notices.world.name(key)?.to_string()),
                None => None,
            };
            for &step in change.steps {
                notices.success(&mut outbox, step, key_name.as_deref())?;
            }
        }
        Err(reason) => notices.refusal(&mut outbox, op, *reason)?,
    }

    if let Ok(change) = &result {
        match target {
            BarrierTarget::Door { to, .. } => world.set_door_state(here, *to, change.to)?,
            BarrierTarget::Item(item) => world.set_item_state(*item, change.to)?,
        }
    }
    debug!(%actor, ?op, ?target, ?result, "barrier operation");

    Ok(BarrierOutcome {
        result,
        deliveries: outbox.into_deliveries(),
    })
}

struct Notices<'a> {
    world: &'a World,
    actor: EntityId,
    here: EntityId,
    target: &'a BarrierTarget,
}

impl Notices<'_> {
    /// "the north exit" or "a small chest".
    fn object(&self) -> Result<String> {
        Ok(match self.target {
            BarrierTarget::Door { direction, .. } => format!("the {direction} exit"),
            BarrierTarget::Item(item) => self.world.name(*item)?.to_string(),
        })
    }

    fn success(&self, outbox: &mut Outbox, step: BarrierOp, key: Option<&str>) -> Result<()> {
        let object = self.object()?;
        let name = self.world.name(self.actor)?;
        let with = match key {
            Some(key) if step.uses_key() => format!(" with {key}"),
            _ => String::new(),
        };

        outbox.to(self.actor, format!("You {} {object}{with}.", step.verb()));
        outbox.to_room_except(
            self.world,
            self.here,
            &[self.actor],
            &format!("{name} {} {object}{with}.", step.third_person()),
        )?;
        if let BarrierTarget::Door { to, .. } = self.target {
            outbox.to_room_except(
                self.world,
                *to,
                &[self.actor],
                &format!("Someone {} {object} from the other side.", step.third_person()),
            )?;
        }
        Ok(())
    }

    fn refusal(&self, outbox: &mut Outbox, op: BarrierOp, reason: InvalidTransition) -> Result<()> {
        let object = self.object()?;
        let subject = capitalize(&object);
        let line = match reason {
            InvalidTransition::AlreadyOpen if op == BarrierOp::Open => {
                if matches!(self.target, BarrierTarget::Door { .. }) {
                    format!("{subject} is not closed.")
                } else {
                    format!("{subject} isn't closed.")
                }
            }
            InvalidTransition::AlreadyOpen => format!("{subject} is already open."),
            InvalidTransition::AlreadyClosed => format!("{subject} is already closed."),
            InvalidTransition::AlreadyLocked => format!("{subject} is already locked."),
            InvalidTransition::AlreadyUnlocked => format!("{subject} is already unlocked."),
            InvalidTransition::NoKey => format!("You don't have the key to {op} {object}."),
            InvalidTransition::NotLockable => format!("{subject} has no lock."),
            InvalidTransition::NotCloseable => format!("You can't close {object}."),
            InvalidTransition::LockedShut => {
                let name = self.world.name(self.actor)?;
                outbox.to(self.actor, format!("You try to open {object} in vain."));
                return outbox.to_room_except(
                    self.world,
                    self.here,
                    &[self.actor],
                    &format!("{name} tries to open {object} in vain."),
                );
            }
        };
        outbox.to(self.actor, line);
        Ok(())
    }
}
