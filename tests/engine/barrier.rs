//! Integration tests for the barrier state machine

use proptest::prelude::*;
use wayfarer_engine::{BarrierOp, InvalidTransition, transition};
use wayfarer_storage::{Barrier, LockState};

fn keyed(state: LockState) -> Barrier {
    Barrier::new(state).with_key("brass key")
}

fn any_state() -> impl Strategy<Value = LockState> {
    prop_oneof![
        Just(LockState::Open),
        Just(LockState::Closed),
        Just(LockState::Locked),
    ]
}

fn any_op() -> impl Strategy<Value = BarrierOp> {
    prop_oneof![
        Just(BarrierOp::Open),
        Just(BarrierOp::Close),
        Just(BarrierOp::Lock),
        Just(BarrierOp::Unlock),
    ]
}

// =============================================================================
// Single Steps
// =============================================================================

#[test]
fn the_full_cycle_with_a_key() {
    let mut barrier = keyed(LockState::Open);
    for (op, expected) in [
        (BarrierOp::Close, LockState::Closed),
        (BarrierOp::Lock, LockState::Locked),
        (BarrierOp::Unlock, LockState::Closed),
        (BarrierOp::Open, LockState::Open),
    ] {
        let change = transition(op, &barrier, true).unwrap();
        assert_eq!(change.steps, &[op]);
        assert_eq!(change.to, expected);
        barrier.state = change.to;
    }
}

#[test]
fn locking_needs_the_key() {
    assert_eq!(
        transition(BarrierOp::Lock, &keyed(LockState::Closed), false),
        Err(InvalidTransition::NoKey)
    );
    assert_eq!(
        transition(BarrierOp::Unlock, &keyed(LockState::Locked), false),
        Err(InvalidTransition::NoKey)
    );
}

#[test]
fn opening_a_locked_barrier_without_the_key() {
    assert_eq!(
        transition(BarrierOp::Open, &keyed(LockState::Locked), false),
        Err(InvalidTransition::LockedShut)
    );
}

// =============================================================================
// Compound Steps
// =============================================================================

#[test]
fn open_unlocks_first_when_the_key_is_held() {
    let change = transition(BarrierOp::Open, &keyed(LockState::Locked), true).unwrap();
    assert_eq!(change.steps, &[BarrierOp::Unlock, BarrierOp::Open]);
    assert_eq!((change.from, change.to), (LockState::Locked, LockState::Open));
}

#[test]
fn lock_closes_first_when_open() {
    let change = transition(BarrierOp::Lock, &keyed(LockState::Open), true).unwrap();
    assert_eq!(change.steps, &[BarrierOp::Close, BarrierOp::Lock]);
    assert_eq!(change.to, LockState::Locked);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn barriers_without_a_key_have_no_lock() {
    let plain = Barrier::new(LockState::Closed);
    for op in [BarrierOp::Lock, BarrierOp::Unlock] {
        assert_eq!(transition(op, &plain, true), Err(InvalidTransition::NotLockable));
    }
}

#[test]
fn fixed_open_barriers_cannot_close() {
    let arch = keyed(LockState::Open).fixed_open();
    assert_eq!(
        transition(BarrierOp::Close, &arch, true),
        Err(InvalidTransition::NotCloseable)
    );
    assert_eq!(
        transition(BarrierOp::Lock, &arch, true),
        Err(InvalidTransition::NotCloseable)
    );
}

proptest! {
    #[test]
    fn refusals_repeat_and_successes_settle(
        op in any_op(),
        state in any_state(),
        key_held in any::<bool>(),
        lockable in any::<bool>(),
    ) {
        let barrier = if lockable { keyed(state) } else { Barrier::new(state) };
        match transition(op, &barrier, key_held) {
            Err(reason) => {
                prop_assert_eq!(transition(op, &barrier, key_held), Err(reason));
            }
            Ok(change) => {
                prop_assert_eq!(change.from, state);
                prop_assert!(!change.steps.is_empty());
                let settled = Barrier { state: change.to, ..barrier.clone() };
                // Doing it again is refused.
                prop_assert!(transition(op, &settled, key_held).is_err());
            }
        }
    }
}
