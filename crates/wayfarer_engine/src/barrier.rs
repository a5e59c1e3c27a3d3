//! Open/close/lock/unlock state machine.
//!
//! [`transition`] is pure: it looks at a barrier, the requested operation,
//! and whether the actor holds the key, and either describes the resulting
//! change or gives the reason it cannot happen. Applying the change and
//! telling people about it is done in [`crate::doors`].
//!
//! ```text
//!          open              unlock
//!   OPEN <------ CLOSED <------------ LOCKED
//!        ------>        ------------>
//!         close              lock
//! ```
//!
//! Two requests expand into compound steps when the actor holds the key:
//! opening a locked barrier unlocks it first, and locking an open one
//! closes it first.

use std::fmt;

use thiserror::Error;
use wayfarer_storage::{Barrier, LockState};

/// An operation on a barrier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BarrierOp {
    /// Open it.
    Open,
    /// Close it.
    Close,
    /// Lock it.
    Lock,
    /// Unlock it.
    Unlock,
}

impl BarrierOp {
    /// Every operation.
    pub const ALL: [Self; 4] = [Self::Open, Self::Close, Self::Lock, Self::Unlock];

    /// The verb, e.g. `"unlock"`.
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Lock => "lock",
            Self::Unlock => "unlock",
        }
    }

    /// Third-person form, e.g. `"unlocks"`.
    #[must_use]
    pub const fn third_person(self) -> &'static str {
        match self {
            Self::Open => "opens",
            Self::Close => "closes",
            Self::Lock => "locks",
            Self::Unlock => "unlocks",
        }
    }

    /// Parses a verb.
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.verb().eq_ignore_ascii_case(word))
    }

    /// State after this single step.
    const fn target_state(self) -> LockState {
        match self {
            Self::Open => LockState::Open,
            Self::Close | Self::Unlock => LockState::Closed,
            Self::Lock => LockState::Locked,
        }
    }

    /// Returns true if this step uses the key.
    #[must_use]
    pub const fn uses_key(self) -> bool {
        matches!(self, Self::Lock | Self::Unlock)
    }
}

impl fmt::Display for BarrierOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// A permitted change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// State before.
    pub from: LockState,
    /// State after.
    pub to: LockState,
    /// Steps taken, in order. Usually one; two for compound requests.
    pub steps: &'static [BarrierOp],
}

/// Why an operation was refused.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum InvalidTransition {
    /// Open on an open barrier, or unlock on an open one.
    #[error("already open")]
    AlreadyOpen,
    /// Close on a closed or locked barrier.
    #[error("already closed")]
    AlreadyClosed,
    /// Lock on a locked barrier.
    #[error("already locked")]
    AlreadyLocked,
    /// Unlock on a closed, unlocked barrier.
    #[error("already unlocked")]
    AlreadyUnlocked,
    /// The key is required and the actor does not hold it.
    #[error("no key")]
    NoKey,
    /// Open on a locked barrier without the key.
    #[error("locked shut")]
    LockedShut,
    /// Lock or unlock on a barrier with no key identity.
    #[error("no lock")]
    NotLockable,
    /// Close, or lock while open, on a barrier that cannot close.
    #[error("cannot be closed")]
    NotCloseable,
}

/// Decides what `op` does to `barrier`.
///
/// # Errors
///
/// Returns the reason the operation is not permitted. The reason depends
/// only on the barrier and `key_held`, so repeating a refused operation
/// always gives the same reason.
pub fn transition(
    op: BarrierOp,
    barrier: &Barrier,
    key_held: bool,
) -> Result<Transition, InvalidTransition> {
    use BarrierOp::{Close, Lock, Open, Unlock};
    use InvalidTransition::{
        AlreadyClosed, AlreadyLocked, AlreadyOpen, AlreadyUnlocked, LockedShut, NoKey,
        NotCloseable, NotLockable,
    };

    let from = barrier.state;
    let lockable = barrier.is_lockable();
    let has_key = lockable && key_held;

    let steps: &'static [BarrierOp] = match (op, from) {
        (Lock | Unlock, _) if !lockable => return Err(NotLockable),

        (Open, LockState::Open) => return Err(AlreadyOpen),
        (Open, LockState::Closed) => &[Open],
        (Open, LockState::Locked) if has_key => &[Unlock, Open],
        (Open, LockState::Locked) => return Err(LockedShut),

        (Close, LockState::Closed | LockState::Locked) => return Err(AlreadyClosed),
        (Close, LockState::Open) if !barrier.closeable => return Err(NotCloseable),
        (Close, LockState::Open) => &[Close],

        (Lock, LockState::Locked) => return Err(AlreadyLocked),
        (Lock, _) if !has_key => return Err(NoKey),
        (Lock, LockState::Open) if !barrier.closeable => return Err(NotCloseable),
        (Lock, LockState::Open) => &[Close, Lock],
        (Lock, LockState::Closed) => &[Lock],

        (Unlock, LockState::Locked) if has_key => &[Unlock],
        (Unlock, LockState::Locked) => return Err(NoKey),
        (Unlock, LockState::Closed) => return Err(AlreadyUnlocked),
        (Unlock, LockState::Open) => return Err(AlreadyOpen),
    };

    let to = steps
        .last()
        .map_or(from, |step| step.target_state());
    Ok(Transition { from, to, steps })
}
