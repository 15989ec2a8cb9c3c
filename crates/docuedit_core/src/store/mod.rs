//! Persistence boundary for document snapshots.
//!
//! # Responsibility
//! - Define the key-value contract the editor core persists through.
//! - Fix the two document keys and provide the in-memory implementation.
//!
//! # Invariants
//! - `docPages` values are JSON arrays of markup strings in document order.
//! - Implementations are synchronous; the core runs on a single UI thread.
//!
//! # See also
//! - DESIGN.md (store section)

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite;

pub use sqlite::{latest_version, SqliteStore};

/// Store key for the document title (plain string).
pub const TITLE_KEY: &str = "docTitle";

/// Store key for the page list (JSON array of markup strings).
pub const PAGES_KEY: &str = "docPages";

pub type StoreResult<T> = Result<T, StoreError>;

/// Transport error for persistence operations.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Durable key-value store consumed by the editor core.
///
/// The core reads/writes exactly [`TITLE_KEY`] and [`PAGES_KEY`]; hosts
/// may implement this over any synchronous storage they own.
pub trait PersistenceStore {
    /// Reads a key, `None` when absent.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes a key, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// HashMap-backed store for tests and hosts without durable storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a key, for arranging load scenarios.
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl PersistenceStore for MemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryStore, PersistenceStore};

    #[test]
    fn memory_store_roundtrips_and_replaces() {
        let mut store = MemoryStore::new();

        assert_eq!(store.read("missing").unwrap(), None);

        store.write("k", "v1").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v1"));

        store.write("k", "v2").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v2"));
    }
}
