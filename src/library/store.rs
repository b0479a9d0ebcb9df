//! Flat-file persistence for a catalog.
//!
//! One record per line: `<title>, <author>, <year>`. There is no header and
//! no escaping, so a title or author containing `", "` or a newline will not
//! read back as the same entry.
//!
//! Reads are fail-fast: every line is parsed before anything is added, and
//! the first malformed line aborts the load with its line number. The
//! catalog is left unchanged in that case. Only the line terminator is
//! stripped, so leading and trailing spaces in a title survive a round trip.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use super::catalog::Catalog;
use crate::domain::{EntryData, ValidationError};

/// Field separator within a record
pub const FIELD_SEPARATOR: &str = ", ";

/// Why a single record could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRecord {
    #[error("expected 3 fields, found {found}")]
    FieldCount { found: usize },

    #[error("year is not an integer: {value:?}")]
    InvalidYear { value: String },

    #[error("record is not valid UTF-8")]
    InvalidUtf8,

    #[error("{0}")]
    Invalid(#[from] ValidationError),
}

/// Errors that can occur while saving or loading a catalog file
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed record at {}:{line}: {reason}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: MalformedRecord,
    },
}

/// Counts reported by [`CatalogFile::load_into`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadSummary {
    /// Records read from the file
    pub records: usize,

    /// Records that were new to the catalog
    pub added: usize,
}

/// Parse one record line into entry data
pub fn parse_record(line: &str) -> Result<EntryData, MalformedRecord> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    let &[title, author, year] = fields.as_slice() else {
        return Err(MalformedRecord::FieldCount {
            found: fields.len(),
        });
    };

    let year = year
        .trim()
        .parse::<i32>()
        .map_err(|_| MalformedRecord::InvalidYear {
            value: year.to_string(),
        })?;

    let data = EntryData::new(title, author, year);
    data.validate()?;
    Ok(data)
}

/// A catalog file on disk
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    /// Create a handle for the given path (nothing is opened yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the catalog file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Write every entry of `catalog`, replacing any existing content.
    ///
    /// Returns the number of records written.
    pub fn save(&self, catalog: &Catalog) -> Result<usize, StoreError> {
        let file = File::create(&self.path).map_err(|e| self.io_error(e))?;
        let mut writer = BufWriter::new(file);
        let mut written = 0;

        for entry in catalog {
            if [entry.title(), entry.author()]
                .iter()
                .any(|f| f.contains(FIELD_SEPARATOR) || f.contains('\n'))
            {
                warn!("Entry will not read back unchanged: {}", entry);
            }

            writeln!(
                writer,
                "{}{sep}{}{sep}{}",
                entry.title(),
                entry.author(),
                entry.year(),
                sep = FIELD_SEPARATOR
            )
            .map_err(|e| self.io_error(e))?;
            written += 1;
        }

        writer.flush().map_err(|e| self.io_error(e))?;

        info!("Saved {} entries to {}", written, self.path.display());
        Ok(written)
    }

    /// Read all records from the file.
    pub fn read_records(&self) -> Result<Vec<EntryData>, StoreError> {
        Ok(self
            .read_numbered()?
            .into_iter()
            .map(|(_, data)| data)
            .collect())
    }

    fn malformed(&self, line: usize, reason: MalformedRecord) -> StoreError {
        StoreError::Malformed {
            path: self.path.clone(),
            line,
            reason,
        }
    }

    /// Records paired with their 1-based line numbers
    fn read_numbered(&self) -> Result<Vec<(usize, EntryData)>, StoreError> {
        let file = File::open(&self.path).map_err(|e| self.io_error(e))?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (line_num, bytes) in reader.split(b'\n').enumerate() {
            let line_num = line_num + 1;
            let bytes = bytes.map_err(|e| self.io_error(e))?;
            let line = String::from_utf8(bytes)
                .map_err(|_| self.malformed(line_num, MalformedRecord::InvalidUtf8))?;
            let line = line.strip_suffix('\r').unwrap_or(&line);

            if line.trim().is_empty() {
                continue;
            }

            let data = parse_record(line).map_err(|reason| self.malformed(line_num, reason))?;
            records.push((line_num, data));
        }

        Ok(records)
    }

    /// Read the file and add each record to `catalog` as a book.
    pub fn load_into(&self, catalog: &mut Catalog) -> Result<LoadSummary, StoreError> {
        let records = self.read_numbered()?;
        let mut summary = LoadSummary {
            records: records.len(),
            added: 0,
        };

        for (line_num, data) in records {
            let outcome = catalog
                .add_book(data)
                .map_err(|e| self.malformed(line_num, e.into()))?;
            if outcome.is_added() {
                summary.added += 1;
            }
        }

        info!(
            "Loaded {} records from {} ({} new)",
            summary.records,
            self.path.display(),
            summary.added
        );
        Ok(summary)
    }
}
