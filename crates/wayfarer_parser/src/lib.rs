//! Player input handling for Wayfarer.
//!
//! This crate provides:
//! - [`ReferenceResolver`] - `<ordinal>.<keyword>` lookup over ordered containers
//! - [`ArgumentTokenizer`] - Verb/argument splitting and filler-word removal
//! - [`Vocabulary`] - Verb table with aliases and prefix lookup
//!
//! # Example
//!
//! ```text
//! get 2.apple from bag
//!  │    │         └── container reference, resolved in room then inventory
//!  │    └── second item whose keywords start with "apple"
//!  └── verb, looked up by name, alias, or prefix
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arguments;
pub mod reference;
pub mod vocabulary;

pub use arguments::{ArgumentTokenizer, CommandLine};
pub use reference::{Reference, ReferenceResolver, Resolution, Source};
pub use vocabulary::{Direction, VerbEntry, Vocabulary};
