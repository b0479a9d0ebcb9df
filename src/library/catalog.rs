//! Catalog of books and magazines.
//!
//! Keeps a deduplicated list of entries plus an author index. Both are
//! updated together inside every mutating call.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::domain::{Entry, EntryData, EntryKind, ValidationError};

/// Author name → entries by that author, in insertion order
pub type AuthorIndex = HashMap<String, Vec<Entry>>;

/// Result of an add call that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Entry was inserted
    Added,

    /// An equal entry was already present
    Duplicate,

    /// A magazine with the same title was already present
    TitleTaken,
}

impl AddOutcome {
    pub fn is_added(self) -> bool {
        self == AddOutcome::Added
    }
}

/// Deduplicating collection of entries
#[derive(Debug, Clone)]
pub struct Catalog {
    /// All entries, unique by full equality
    entries: Vec<Entry>,

    /// Entries grouped by author
    by_author: AuthorIndex,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        debug!("Catalog created");
        Self {
            entries: Vec::new(),
            by_author: HashMap::new(),
        }
    }

    /// Add a book. Skipped if an equal book is already present.
    pub fn add_book(&mut self, data: EntryData) -> Result<AddOutcome, ValidationError> {
        let book = Entry::book(data)?;
        log_addition(&book);

        Ok(self.insert(book))
    }

    /// Add a magazine. Skipped if any magazine with the same title is
    /// already present, regardless of author or year.
    pub fn add_magazine(&mut self, data: EntryData) -> Result<AddOutcome, ValidationError> {
        let magazine = Entry::magazine(data)?;
        log_addition(&magazine);

        let title_taken = self
            .entries
            .iter()
            .any(|e| e.kind() == EntryKind::Magazine && e.title() == magazine.title());
        if title_taken {
            info!("Magazine {} is already in the catalog", magazine.title());
            return Ok(AddOutcome::TitleTaken);
        }

        Ok(self.insert(magazine))
    }

    fn insert(&mut self, entry: Entry) -> AddOutcome {
        if self.contains(&entry) {
            debug!("Skipping duplicate: {}", entry);
            return AddOutcome::Duplicate;
        }

        self.by_author
            .entry(entry.author().to_string())
            .or_default()
            .push(entry.clone());
        self.entries.push(entry);

        AddOutcome::Added
    }

    /// Remove an entry, returning its description.
    ///
    /// Returns `None` if the entry is not in the catalog.
    pub fn remove(&mut self, entry: &Entry) -> Option<String> {
        let Some(pos) = self.entries.iter().position(|e| e == entry) else {
            info!("Entry not found in catalog: {}", entry);
            return None;
        };

        let removed = self.entries.remove(pos);

        if let Some(list) = self.by_author.get_mut(removed.author()) {
            if let Some(idx) = list.iter().position(|e| e == &removed) {
                list.remove(idx);
            }
            if list.is_empty() {
                self.by_author.remove(removed.author());
            }
        }

        let description = removed.describe();
        info!("Removed: {}", description);
        Some(description)
    }

    /// Check whether an equal entry is present
    pub fn contains(&self, entry: &Entry) -> bool {
        self.entries.contains(entry)
    }

    /// Iterate over all entries in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Lazily yield every entry whose author matches exactly.
    ///
    /// Scans the full collection on each call rather than using the index.
    pub fn entries_by_author<'a>(&'a self, author: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries.iter().filter(move |e| e.author() == author)
    }

    /// The author index
    pub fn author_index(&self) -> &AuthorIndex {
        &self.by_author
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Descriptions of an author's entries in index order, or `None` if the
    /// author has no entries in `index`.
    pub fn author_listing(author: &str, index: &AuthorIndex) -> Option<Vec<String>> {
        index
            .get(author)
            .map(|entries| entries.iter().map(Entry::describe).collect())
    }

    /// Print an author's entries to stdout
    pub fn print_by_author(author: &str, index: &AuthorIndex) {
        match Self::author_listing(author, index) {
            Some(lines) => {
                for line in lines {
                    println!("{}", line);
                }
            }
            None => println!("No entries found for author {}.", author),
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Logged for every add attempt that passes validation, before dedup runs
fn log_addition(entry: &Entry) {
    info!("Adding: {} (author: {})", entry.title(), entry.author());
}
