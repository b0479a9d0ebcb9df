//! Domain types for the shelf catalog.
//!
//! - Entry: immutable description of a book or magazine
//! - EntryData: unvalidated input fields

pub mod entry;

pub use entry::{Entry, EntryData, EntryKind, ValidationError};
