//! shelf - Catalog of books and magazines
//!
//! An in-memory catalog that deduplicates entries, indexes them by author,
//! and round-trips through a flat text file.
//!
//! # Modules
//!
//! - `domain`: Entry value types and validation
//! - `library`: Catalog and its file persistence
//! - `config`: Layered configuration
//! - `cli`: Command-line interface and demo driver
//!
//! # Usage
//!
//! ```bash
//! # Run the demonstration sequence
//! shelf demo --file books.txt
//!
//! # List a saved catalog
//! shelf show --file books.txt --author "Хэл Элрод"
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;

// Re-export main types at crate root for convenience
pub use domain::{Entry, EntryData, EntryKind, ValidationError};
pub use library::{AddOutcome, Catalog, CatalogFile, LoadSummary, MalformedRecord, StoreError};
