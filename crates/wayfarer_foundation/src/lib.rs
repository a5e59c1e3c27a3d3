//! Core identifiers, kinds, keywords, and errors for Wayfarer.
//!
//! This crate provides:
//! - [`EntityId`] - Generational entity identifiers
//! - [`EntityKind`], [`Role`], [`ItemType`] - Entity classification
//! - [`Keywords`] - Lowercase match tokens used by reference resolution
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod entity;
pub mod error;
pub mod keywords;
pub mod types;

pub use entity::EntityId;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use keywords::Keywords;
pub use types::{EntityKind, ItemType, Role};
