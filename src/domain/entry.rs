//! Catalog entries.
//!
//! An [`Entry`] is an immutable value describing one published work. Entries
//! are only built from validated [`EntryData`], so every `Entry` in a catalog
//! has a non-empty title and author.

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while validating entry data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field `{field}` must not be empty")]
    EmptyField { field: &'static str },
}

/// Kind of published work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Book
    Book,

    /// Magazine or journal
    Magazine,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Book => write!(f, "book"),
            EntryKind::Magazine => write!(f, "magazine"),
        }
    }
}

/// Raw entry fields as supplied by a caller, before validation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntryData {
    /// Title of the work
    pub title: String,

    /// Author (or publisher, for magazines)
    pub author: String,

    /// Year of publication
    pub year: i32,
}

impl EntryData {
    /// Create entry data from its three fields
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
        }
    }

    /// Check required fields
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "title" });
        }
        if self.author.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "author" });
        }
        Ok(())
    }
}

/// A catalogued work.
///
/// Equality and hashing cover all four fields, so a book and a magazine
/// with the same title, author and year are different entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    kind: EntryKind,
    title: String,
    author: String,
    year: i32,
}

impl Entry {
    /// Build an entry of the given kind from validated data
    pub fn new(kind: EntryKind, data: EntryData) -> Result<Self, ValidationError> {
        data.validate()?;

        Ok(Self {
            kind,
            title: data.title,
            author: data.author,
            year: data.year,
        })
    }

    /// Build a book entry
    pub fn book(data: EntryData) -> Result<Self, ValidationError> {
        Self::new(EntryKind::Book, data)
    }

    /// Build a magazine entry
    pub fn magazine(data: EntryData) -> Result<Self, ValidationError> {
        Self::new(EntryKind::Magazine, data)
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Human-readable description, e.g. `"A, Автор: X, Рік видання: 2000"`
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, Автор: {}, Рік видання: {}",
            self.title, self.author, self.year
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_describe_format() {
        let entry = Entry::book(EntryData::new("A", "X", 2000)).unwrap();
        assert_eq!(entry.describe(), "A, Автор: X, Рік видання: 2000");
        assert_eq!(entry.to_string(), entry.describe());
    }

    #[test]
    fn test_equality_covers_kind() {
        let book = Entry::book(EntryData::new("M", "Y", 2001)).unwrap();
        let magazine = Entry::magazine(EntryData::new("M", "Y", 2001)).unwrap();
        assert_ne!(book, magazine);

        let same = Entry::book(EntryData::new("M", "Y", 2001)).unwrap();
        assert_eq!(book, same);

        let set: HashSet<_> = [book.clone(), magazine, same].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&book));
    }

    #[test]
    fn test_empty_fields_rejected() {
        let result = Entry::book(EntryData::new("  ", "X", 2000));
        assert_eq!(result, Err(ValidationError::EmptyField { field: "title" }));

        let result = Entry::magazine(EntryData::new("A", "", 2000));
        assert_eq!(result, Err(ValidationError::EmptyField { field: "author" }));
    }

    #[test]
    fn test_entry_data_from_yaml() {
        let data: EntryData =
            serde_yaml::from_str("title: A\nauthor: X\nyear: 2000\n").unwrap();
        assert_eq!(data, EntryData::new("A", "X", 2000));

        // Missing or mistyped fields fail at the schema boundary
        assert!(serde_yaml::from_str::<EntryData>("title: A\nauthor: X\n").is_err());
        assert!(serde_yaml::from_str::<EntryData>("title: A\nauthor: X\nyear: soon\n").is_err());
    }

    #[test]
    fn test_kind_parsing() {
        let kind: EntryKind = serde_yaml::from_str("magazine").unwrap();
        assert_eq!(kind, EntryKind::Magazine);
        assert_eq!(EntryKind::Book.to_string(), "book");
    }
}
