//! The shelf catalog and its on-disk form.
//!
//! # File Format
//!
//! ```text
//! Книга: Магия утра, Хэл Элрод, 2014
//! Книга: Эссенциализм, Грег МакКеон, 2014
//! ```
//!
//! One `<title>, <author>, <year>` record per line, UTF-8, no header.

pub mod catalog;
pub mod store;

pub use catalog::{AddOutcome, AuthorIndex, Catalog};
pub use store::{parse_record, CatalogFile, LoadSummary, MalformedRecord, StoreError};
