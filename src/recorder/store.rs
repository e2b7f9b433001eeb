use std::{
    collections::HashSet,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::recorder::{self, MatchRow, RowKey};

/// Append-only row storage with an idempotent upsert on
/// `(address, latitude, longitude)`.
pub trait MatchStore {
    /// Adds `row` unless a row with the same key exists. The first recorded
    /// row is kept. Returns whether the row was added.
    fn upsert(&mut self, row: MatchRow) -> bool;

    /// Whether any row was recorded for `address`, compared trimmed.
    fn contains_address(&self, address: &str) -> bool;

    fn rows(&self) -> &[MatchRow];

    fn len(&self) -> usize {
        self.rows().len()
    }

    fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Vec<MatchRow>,
    keys: HashSet<RowKey>,
    addresses: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Default::default()
    }
}

impl MatchStore for MemoryStore {
    fn upsert(&mut self, row: MatchRow) -> bool {
        if !self.keys.insert(row.key()) {
            return false;
        }
        self.addresses.insert(row.address.trim().to_string());
        self.rows.push(row);
        true
    }

    fn contains_address(&self, address: &str) -> bool {
        self.addresses.contains(address.trim())
    }

    fn rows(&self) -> &[MatchRow] {
        &self.rows
    }
}

/// A [`MemoryStore`] mirrored to a CSV file. Changes only reach the disk on
/// [`CsvStore::save`].
#[derive(Debug)]
pub struct CsvStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl CsvStore {
    /// Opens `path`, loading any rows it already holds. A missing file gives an
    /// empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, recorder::Error> {
        let path = path.as_ref().to_path_buf();
        let mut inner = MemoryStore::new();
        match fs::File::open(&path) {
            Ok(file) => {
                let mut reader = csv::Reader::from_reader(file);
                for result in reader.deserialize() {
                    let row: MatchRow = result?;
                    inner.upsert(row);
                }
                debug!("Loaded {} rows from {}", inner.len(), path.display());
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting empty", path.display());
            }
            Err(err) => return Err(err.into()),
        }
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrites the whole file with every stored row. The header is written
    /// even when the store is empty.
    pub fn save(&self) -> Result<(), recorder::Error> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(MatchRow::COLUMNS)?;
        for row in self.inner.rows() {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl MatchStore for CsvStore {
    fn upsert(&mut self, row: MatchRow) -> bool {
        self.inner.upsert(row)
    }

    fn contains_address(&self, address: &str) -> bool {
        self.inner.contains_address(address)
    }

    fn rows(&self) -> &[MatchRow] {
        self.inner.rows()
    }
}
