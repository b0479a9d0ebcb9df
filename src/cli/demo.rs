//! Fixed demonstration sequence for the catalog.
//!
//! Adds sample entries, lists them, saves them to the catalog file, removes
//! the first book, then reads the file back into the same catalog.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::SeedEntry;
use crate::domain::{Entry, EntryData, EntryKind};
use crate::library::{Catalog, CatalogFile};

/// Built-in sample used when the config file has no seed
pub fn default_seed() -> Vec<SeedEntry> {
    let seed = |kind, title: &str, author: &str, year| SeedEntry {
        kind,
        data: EntryData::new(title, author, year),
    };

    vec![
        seed(EntryKind::Book, "Книга: Магия утра", "Хэл Элрод", 2014),
        seed(EntryKind::Book, "Книга: Эссенциализм", "Грег МакКеон", 2014),
        seed(EntryKind::Book, "Книга: Магическая формула", "Хэл Элрод", 2019),
        seed(EntryKind::Magazine, "Журнал: The Ukrainian Week", "Ukraine", 2019),
    ]
}

/// Print every entry under a heading
pub fn print_catalog(heading: &str, catalog: &Catalog) {
    println!("\n{}", heading);
    for entry in catalog {
        println!("{}", entry);
    }
}

/// Run the demo against `file`, returning the final catalog.
///
/// `author` picks the author listing; defaults to the first seed entry's.
pub fn run(file: &Path, seed: &[SeedEntry], author: Option<&str>) -> Result<Catalog> {
    let mut catalog = Catalog::new();

    for item in seed {
        let added = match item.kind {
            EntryKind::Book => catalog.add_book(item.data.clone()),
            EntryKind::Magazine => catalog.add_magazine(item.data.clone()),
        };
        added.with_context(|| format!("Invalid entry: {:?}", item.data.title))?;
    }

    print_catalog("Entries in the catalog:", &catalog);

    if let Some(author) = author.or_else(|| seed.first().map(|s| s.data.author.as_str())) {
        println!("\nEntries by {}:", author);
        Catalog::print_by_author(author, catalog.author_index());
    }

    let store = CatalogFile::new(file);
    store.save(&catalog)?;

    if let Some(first_book) = seed.iter().find(|s| s.kind == EntryKind::Book) {
        let target = Entry::new(first_book.kind, first_book.data.clone())?;
        if let Some(description) = catalog.remove(&target) {
            println!("\nRemoved: {}", description);
        }
    }

    print_catalog("Catalog after removal:", &catalog);

    println!("\nAdding entries from {}:", store.path().display());
    store.load_into(&mut catalog)?;

    print_catalog("Catalog after loading from file:", &catalog);

    Ok(catalog)
}
