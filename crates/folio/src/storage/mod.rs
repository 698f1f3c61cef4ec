//! Slot storage for folio.
//!
//! This module provides `SQLite`-backed named slots. A slot is a single
//! key-value record holding one serialized snapshot; writing a slot replaces
//! its payload in one statement, so readers never observe a partial write.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// BLAKE3 fingerprint of a slot payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(String);

impl Revision {
    /// Compute the revision of a payload.
    #[must_use]
    pub fn of(payload: &str) -> Self {
        Self(blake3::hash(payload.as_bytes()).to_hex().to_string())
    }

    /// The hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated digest for log lines.
    #[must_use]
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(12)]
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Slot name.
    pub name: String,
    /// Serialized snapshot.
    pub payload: String,
    /// Fingerprint of `payload`.
    pub revision: Revision,
    /// When the slot was last written.
    pub updated_at: DateTime<Utc>,
}

/// A key-value backend holding named slots.
///
/// The content store only needs whole-slot reads and writes, which keeps
/// alternative backends (in-memory maps, browser storage bridges) trivial.
pub trait SlotBackend {
    /// Read a slot, or `None` if it has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read_slot(&self, name: &str) -> Result<Option<Slot>>;

    /// Replace a slot's payload, returning the stored slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn write_slot(&self, name: &str, payload: &str) -> Result<Slot>;

    /// Delete a slot. Returns `true` if it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn delete_slot(&self, name: &str) -> Result<bool>;
}

/// `SQLite` slot storage.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a slot database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening slot database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Slot database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of every stored slot, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn slot_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT name FROM slots ORDER BY name")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(names)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let slot_count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM slots", [], |row| row.get(0))?;

        let last_write: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM slots ORDER BY updated_at DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        let last_write = last_write
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            slot_count,
            last_write,
            db_size_bytes,
        })
    }

    /// Convert a database row to a Slot struct.
    fn row_to_slot(row: &rusqlite::Row) -> rusqlite::Result<Slot> {
        let name: String = row.get(0)?;
        let payload: String = row.get(1)?;
        let revision: String = row.get(2)?;
        let updated_at_str: String = row.get(3)?;

        let updated_at = DateTime::parse_from_rfc3339(&updated_at_str)
            .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

        Ok(Slot {
            name,
            payload,
            revision: Revision(revision),
            updated_at,
        })
    }
}

impl SlotBackend for Storage {
    fn read_slot(&self, name: &str) -> Result<Option<Slot>> {
        let slot = self
            .conn
            .query_row(
                "SELECT name, payload, revision, updated_at FROM slots WHERE name = ?1",
                [name],
                Self::row_to_slot,
            )
            .optional()?;
        debug!(slot = name, present = slot.is_some(), "Read slot");
        Ok(slot)
    }

    fn write_slot(&self, name: &str, payload: &str) -> Result<Slot> {
        let revision = Revision::of(payload);
        let updated_at = Utc::now();

        self.conn.execute(
            r"
            INSERT OR REPLACE INTO slots (name, payload, revision, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
            params![name, payload, revision.as_str(), updated_at.to_rfc3339()],
        )?;

        debug!(
            slot = name,
            revision = revision.short(),
            bytes = payload.len(),
            "Wrote slot"
        );
        Ok(Slot {
            name: name.to_string(),
            payload: payload.to_string(),
            revision,
            updated_at,
        })
    }

    fn delete_slot(&self, name: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM slots WHERE name = ?1", [name])?;
        Ok(affected > 0)
    }
}

/// Statistics about the slot database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of slots written.
    pub slot_count: i64,
    /// Time of the most recent slot write.
    pub last_write: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_storage() -> Storage {
        Storage::open_in_memory().expect("failed to create test storage")
    }

    #[test]
    fn test_open_in_memory() {
        assert!(Storage::open_in_memory().is_ok());
    }

    #[test]
    fn test_read_missing_slot() {
        let storage = create_test_storage();
        assert!(storage.read_slot("portfolioItems").unwrap().is_none());
    }

    #[test]
    fn test_write_and_read_slot() {
        let storage = create_test_storage();
        let written = storage.write_slot("portfolioItems", "[]").unwrap();

        let read = storage.read_slot("portfolioItems").unwrap().unwrap();
        assert_eq!(read.payload, "[]");
        assert_eq!(read.revision, written.revision);
        assert_eq!(read.revision, Revision::of("[]"));
    }

    #[test]
    fn test_write_replaces_payload() {
        let storage = create_test_storage();
        storage.write_slot("s", "[1]").unwrap();
        storage.write_slot("s", "[1,2]").unwrap();

        let read = storage.read_slot("s").unwrap().unwrap();
        assert_eq!(read.payload, "[1,2]");
        assert_eq!(storage.slot_names().unwrap(), vec!["s"]);
    }

    #[test]
    fn test_delete_slot() {
        let storage = create_test_storage();
        storage.write_slot("s", "[]").unwrap();

        assert!(storage.delete_slot("s").unwrap());
        assert!(!storage.delete_slot("s").unwrap());
        assert!(storage.read_slot("s").unwrap().is_none());
    }

    #[test]
    fn test_revision_changes_with_payload() {
        assert_eq!(Revision::of("a"), Revision::of("a"));
        assert_ne!(Revision::of("a"), Revision::of("b"));
        assert_eq!(Revision::of("a").short().len(), 12);
    }

    #[test]
    fn test_stats_empty() {
        let storage = create_test_storage();
        let stats = storage.stats().unwrap();

        assert_eq!(stats.slot_count, 0);
        assert!(stats.last_write.is_none());
        assert_eq!(stats.db_size_bytes, 0);
    }

    #[test]
    fn test_stats_with_data() {
        let storage = create_test_storage();
        storage.write_slot("a", "[]").unwrap();
        storage.write_slot("b", "[]").unwrap();

        let stats = storage.stats().unwrap();
        assert_eq!(stats.slot_count, 2);
        assert!(stats.last_write.is_some());
    }

    #[test]
    fn test_path() {
        let storage = create_test_storage();
        assert_eq!(storage.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_open_file_based_persists() {
        let db_path =
            std::env::temp_dir().join(format!("folio_storage_test_{}.db", std::process::id()));

        {
            let storage = Storage::open(&db_path).unwrap();
            storage.write_slot("serviceCategories", "[]").unwrap();
            assert_eq!(storage.path(), db_path);
        }

        let reopened = Storage::open(&db_path).unwrap();
        let slot = reopened.read_slot("serviceCategories").unwrap();
        assert!(slot.is_some());
        assert!(reopened.stats().unwrap().db_size_bytes > 0);

        drop(reopened);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let root = std::env::temp_dir().join(format!("folio_test_{}", std::process::id()));
        let nested_path = root.join("nested/content.db");
        let _ = std::fs::remove_dir_all(&root);

        let storage = Storage::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(storage);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn test_storage_stats_clone() {
        let stats = StorageStats {
            slot_count: 2,
            last_write: None,
            db_size_bytes: 512,
        };
        assert_eq!(stats.clone(), stats);
    }
}
