//! # Record Store
//!
//! A typed, flat, append-friendly store: one file per entity, one
//! record per row, a header row naming the columns.
//!
//! ## File Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products.csv                                                           │
//! │                                                                         │
//! │  id,product_number,barcode,name,category,buy_price,sell_price,...      │
//! │  A1B2C3D4,1,PRD000001,Kopi Hitam,Minuman,5000,8000,...                 │
//! │  E5F6A7B8,2,PRD000002,Es Teh Manis,Minuman,2000,4000,...               │
//! │                                                                         │
//! │  The serde struct IS the schema: field order = column order,           │
//! │  field names = header names. No second schema to drift.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write Discipline
//! ```text
//! append (create)       rewrite_all (update/delete)
//! ──────────────        ───────────────────────────
//! open in append        write temp file in store dir
//! serialize one row     header + every surviving row
//! flush                 flush + fsync
//!                       rename over the live file (atomic)
//! ```
//!
//! A crash mid-append loses at most the row being written; a crash
//! mid-rewrite leaves the previous file intact because the rename is
//! the commit point.
//!
//! The store assumes a single writing process. There is no file
//! locking; two processes appending to the same file will interleave
//! rows and may duplicate sequence numbers.

use std::fs::{self, File, OpenOptions};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};

/// A flat record store for one entity type.
///
/// ## Usage
/// ```rust,ignore
/// let store: RecordStore<Product> = RecordStore::new(path, PRODUCTS_HEADER);
/// store.ensure_initialized()?;
///
/// let products = store.load_all()?;
/// store.append(&product)?;
/// store.rewrite_all(&products)?;
/// ```
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    path: PathBuf,
    header: &'static [&'static str],
    _record: PhantomData<T>,
}

impl<T> RecordStore<T> {
    /// Creates a store handle. No file access happens here.
    pub fn new(path: impl Into<PathBuf>, header: &'static [&'static str]) -> Self {
        RecordStore {
            path: path.into(),
            header,
            _record: PhantomData,
        }
    }

    /// Path of the backing file.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the backing file with its header row if it is missing.
    ///
    /// Parent directories are created as needed. An existing file is
    /// left untouched, whatever its content.
    pub fn ensure_initialized(&self) -> StoreResult<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        debug!(path = %self.path.display(), "Initializing record store");

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(File::create(&self.path)?);
        writer.write_record(self.header)?;
        writer.flush()?;
        Ok(())
    }
}

impl<T: DeserializeOwned> RecordStore<T> {
    /// Loads every record in file order.
    ///
    /// ## Degradation Rules
    /// - Missing file → empty list (the store simply has no data yet)
    /// - Unreadable file or I/O failure mid-read → empty list, with a
    ///   warning (a broken disk must not take the whole app down at
    ///   startup)
    /// - A row that does not match the schema → [`StoreError::Corrupt`],
    ///   loudly, so a damaged file is never half-read and then rewritten
    pub fn load_all(&self) -> StoreResult<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Record store unreadable, loading as empty"
                );
                return Ok(Vec::new());
            }
        };

        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<T>().enumerate() {
            let record = match row {
                Ok(record) => record,
                Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => {
                    warn!(
                        path = %self.path.display(),
                        error = %err,
                        "Record store read failed, loading as empty"
                    );
                    return Ok(Vec::new());
                }
                Err(err) => {
                    // +2: rows are 0-indexed and the header occupies line 1.
                    return Err(StoreError::corrupt(
                        self.path.display().to_string(),
                        format!("row at line {}: {err}", index + 2),
                    ));
                }
            };
            records.push(record);
        }
        Ok(records)
    }
}

impl<T: Serialize> RecordStore<T> {
    /// Appends one record to the end of the file.
    ///
    /// Re-initializes the file first in case it vanished since startup,
    /// so an append never produces a headerless store.
    pub fn append(&self, record: &T) -> StoreResult<()> {
        self.ensure_initialized()?;

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    /// Replaces the whole file with the given records, atomically.
    ///
    /// The new content is written to a temp file in the same directory
    /// (same filesystem, so the rename cannot cross devices), fsynced,
    /// and then renamed over the live file. Readers see either the old
    /// file or the new one, never a partial write.
    pub fn rewrite_all(&self, records: &[T]) -> StoreResult<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut temp = NamedTempFile::new_in(parent)?;
        {
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(temp.as_file_mut());
            writer.write_record(self.header)?;
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|err| err.error)?;

        debug!(
            path = %self.path.display(),
            records = records.len(),
            "Record store rewritten"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    const HEADER: &[&str] = &["id", "name", "price"];

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestRecord {
        id: String,
        name: String,
        price: i64,
    }

    fn record(id: &str, name: &str, price: i64) -> TestRecord {
        TestRecord {
            id: id.to_string(),
            name: name.to_string(),
            price,
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store: RecordStore<TestRecord> =
            RecordStore::new(dir.path().join("missing.csv"), HEADER);
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_ensure_initialized_writes_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("items.csv");
        let store: RecordStore<TestRecord> = RecordStore::new(&path, HEADER);

        store.ensure_initialized().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "id,name,price\n");

        // A second call leaves the file alone.
        store.append(&record("A1", "Kopi", 8000)).unwrap();
        store.ensure_initialized().unwrap();
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_append_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let store: RecordStore<TestRecord> =
            RecordStore::new(dir.path().join("items.csv"), HEADER);

        let first = record("A1", "Kopi", 8000);
        let second = record("B2", "Es Teh, Manis", 4000);
        store.append(&first).unwrap();
        store.append(&second).unwrap();

        // File order is append order; embedded commas survive quoting.
        assert_eq!(store.load_all().unwrap(), vec![first, second]);
    }

    #[test]
    fn test_rewrite_all_replaces_content() {
        let dir = tempdir().unwrap();
        let store: RecordStore<TestRecord> =
            RecordStore::new(dir.path().join("items.csv"), HEADER);

        store.append(&record("A1", "Kopi", 8000)).unwrap();
        store.append(&record("B2", "Teh", 4000)).unwrap();

        let kept = vec![record("B2", "Teh", 5000)];
        store.rewrite_all(&kept).unwrap();

        assert_eq!(store.load_all().unwrap(), kept);
        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("id,name,price\n"));
        assert!(!raw.contains("Kopi"));
    }

    #[test]
    fn test_damaged_row_is_loud() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("items.csv");
        fs::write(&path, "id,name,price\nA1,Kopi,NOT_A_NUMBER\n").unwrap();

        let store: RecordStore<TestRecord> = RecordStore::new(&path, HEADER);
        let err = store.load_all().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_append_recreates_vanished_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("items.csv");
        let store: RecordStore<TestRecord> = RecordStore::new(&path, HEADER);

        store.ensure_initialized().unwrap();
        fs::remove_file(&path).unwrap();

        store.append(&record("A1", "Kopi", 8000)).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("id,name,price\n"));
        assert_eq!(store.load_all().unwrap().len(), 1);
    }
}
