//! Audiences, channels, barriers, and command handling for Wayfarer.
//!
//! This crate provides:
//! - [`ChannelRegistry`] / [`resolve_channel`] - Who hears a message and how it reads
//! - [`WitnessLedger`] - Per-call de-duplication of witness lines
//! - [`transition`] - The pure open/close/lock/unlock state machine
//! - [`apply_barrier_op`] - Barrier operations on doors and containers with notices
//! - [`CommandDispatcher`] - Verb lookup and execution against a world copy
//! - [`fan_out`] - Best-effort delivery of output lines to a [`DeliverySink`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod audience;
pub mod barrier;
pub mod channel;
pub mod commands;
pub mod delivery;
pub mod doors;
pub mod text;
pub mod witness;

pub use audience::{Audience, AudienceTargets, Sender};
pub use barrier::{BarrierOp, InvalidTransition, Transition, transition};
pub use channel::{Channel, ChannelOutcome, ChannelRegistry, Wording, resolve_channel};
pub use commands::{CommandDispatcher, CommandOutput, Verb};
pub use delivery::{Delivery, DeliveryError, DeliverySink, FanoutReport, Outbox, fan_out};
pub use doors::{BarrierOutcome, BarrierTarget, apply_barrier_op};
pub use witness::WitnessLedger;
