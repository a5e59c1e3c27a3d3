//! Wayfarer - Interaction core for a text-based multi-user world
//!
//! This crate re-exports all layers of the Wayfarer system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: wayfarer_runtime    - REPL, CLI, sessions, snapshots
//! Layer 3: wayfarer_engine     - Audiences, channels, barriers, commands
//! Layer 2: wayfarer_parser     - Reference resolver, arguments, vocabulary
//! Layer 1: wayfarer_storage    - Entity store, containers, doors, parties, world
//! Layer 0: wayfarer_foundation - Core types (EntityId, Keywords, Error)
//! ```

pub use wayfarer_engine as engine;
pub use wayfarer_foundation as foundation;
pub use wayfarer_parser as parser;
pub use wayfarer_runtime as runtime;
pub use wayfarer_storage as storage;
