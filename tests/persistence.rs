//! Persistence Integration Tests
//!
//! Round trips through the flat catalog file and the fail-fast read policy.

use shelf::cli::demo;
use shelf::{Catalog, CatalogFile, Entry, EntryData, LoadSummary, MalformedRecord, StoreError};
use tempfile::TempDir;

fn sample_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .add_book(EntryData::new("Книга: Магия утра", "Хэл Элрод", 2014))
        .unwrap();
    catalog
        .add_book(EntryData::new("Книга: Эссенциализм", "Грег МакКеон", 2014))
        .unwrap();
    catalog
        .add_book(EntryData::new("Книга: Магическая формула", "Хэл Элрод", 2019))
        .unwrap();
    catalog
}

#[test]
fn test_write_then_read_round_trip() {
    let temp = TempDir::new().unwrap();
    let file = CatalogFile::new(temp.path().join("books.txt"));

    let original = sample_catalog();
    assert_eq!(file.save(&original).unwrap(), 3);

    let mut restored = Catalog::new();
    let summary = file.load_into(&mut restored).unwrap();

    assert_eq!(summary, LoadSummary { records: 3, added: 3 });
    assert_eq!(restored.len(), original.len());
    for entry in &original {
        assert!(restored.contains(entry));
    }
}

#[test]
fn test_round_trip_keeps_padded_fields() {
    let temp = TempDir::new().unwrap();
    let file = CatalogFile::new(temp.path().join("books.txt"));

    let mut original = Catalog::new();
    original
        .add_book(EntryData::new(" Padded", "X", 2000))
        .unwrap();
    original
        .add_book(EntryData::new("Trailing ", " Spaced ", 2001))
        .unwrap();
    file.save(&original).unwrap();

    let mut restored = Catalog::new();
    file.load_into(&mut restored).unwrap();

    assert_eq!(restored.len(), 2);
    for entry in &original {
        assert!(restored.contains(entry), "lost {:?}", entry);
    }
}

#[test]
fn test_file_format() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("books.txt");

    let mut catalog = Catalog::new();
    catalog.add_book(EntryData::new("A", "X", 2000)).unwrap();
    catalog.add_magazine(EntryData::new("M", "Y", 2001)).unwrap();
    CatalogFile::new(&path).save(&catalog).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "A, X, 2000\nM, Y, 2001\n");
}

#[test]
fn test_reload_into_same_catalog_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let file = CatalogFile::new(temp.path().join("books.txt"));

    let mut catalog = sample_catalog();
    file.save(&catalog).unwrap();

    let summary = file.load_into(&mut catalog).unwrap();
    assert_eq!(summary, LoadSummary { records: 3, added: 0 });
    assert_eq!(catalog.len(), 3);
}

#[test]
fn test_malformed_line_aborts_without_changes() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("books.txt");
    std::fs::write(&path, "A, X, 2000\nB, Y, not-a-year\nC, Z, 2002\n").unwrap();

    let mut catalog = Catalog::new();
    let err = CatalogFile::new(&path).load_into(&mut catalog).unwrap_err();

    match err {
        StoreError::Malformed { line, reason, .. } => {
            assert_eq!(line, 2);
            assert_eq!(
                reason,
                MalformedRecord::InvalidYear {
                    value: "not-a-year".to_string()
                }
            );
        }
        other => panic!("Expected Malformed error, got {:?}", other),
    }
    assert!(catalog.is_empty());
}

#[test]
fn test_short_line_reports_line_number() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("books.txt");
    std::fs::write(&path, "A, X, 2000\n\nonly a title\n").unwrap();

    let mut catalog = Catalog::new();
    let result = CatalogFile::new(&path).load_into(&mut catalog);

    assert!(matches!(
        result,
        Err(StoreError::Malformed {
            line: 3,
            reason: MalformedRecord::FieldCount { found: 1 },
            ..
        })
    ));
}

#[test]
fn test_separator_in_title_does_not_round_trip() {
    let temp = TempDir::new().unwrap();
    let file = CatalogFile::new(temp.path().join("books.txt"));

    let mut catalog = Catalog::new();
    catalog
        .add_book(EntryData::new("Hello, World", "X", 2000))
        .unwrap();
    file.save(&catalog).unwrap();

    let mut restored = Catalog::new();
    let result = file.load_into(&mut restored);
    assert!(matches!(
        result,
        Err(StoreError::Malformed {
            reason: MalformedRecord::FieldCount { found: 4 },
            ..
        })
    ));
}

#[test]
fn test_unwritable_path_is_io_error() {
    let temp = TempDir::new().unwrap();
    let file = CatalogFile::new(temp.path().join("missing-dir").join("books.txt"));

    let result = file.save(&sample_catalog());
    assert!(matches!(result, Err(StoreError::Io { .. })));
}

#[test]
fn test_demo_sequence() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("books.txt");

    let catalog = demo::run(&path, &demo::default_seed(), None).unwrap();

    // The saved file has all four sample entries
    let saved = std::fs::read_to_string(&path).unwrap();
    assert_eq!(saved.lines().count(), 4);

    // Removed book comes back from the file, and the magazine record
    // is read back as a book, which is a distinct entry
    let first = Entry::book(EntryData::new("Книга: Магия утра", "Хэл Элрод", 2014)).unwrap();
    let magazine_as_book = Entry::book(EntryData::new(
        "Журнал: The Ukrainian Week",
        "Ukraine",
        2019,
    ))
    .unwrap();
    assert!(catalog.contains(&first));
    assert!(catalog.contains(&magazine_as_book));
    assert_eq!(catalog.len(), 5);
}
