//! End-to-end tests
//!
//! Drives the demo world through sessions, the REPL, and snapshots.

mod repl;
mod snapshots;
