//! REPL, CLI, sessions, and snapshots for Wayfarer.
//!
//! This crate provides:
//! - [`Session`] - The live world, the active character, and per-character mailboxes
//! - [`Repl`] - Interactive read-eval-print loop with `:` meta commands
//! - [`RuntimeConfig`] - Prompt, banner, logging, and snapshot settings
//! - [`demo::build_world`] - A small playable world
//! - World snapshots in `MessagePack` ([`serialize`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod demo;
pub mod editor;
pub mod repl;
pub mod serialize;
pub mod session;

pub use config::RuntimeConfig;
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use repl::{Repl, Reply};
pub use session::{Mailbox, Session};
