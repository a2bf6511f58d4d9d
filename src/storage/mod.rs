//! Storage layer for Cursor's settings database.
//!
//! Cursor keeps its global state in a SQLite file (`state.vscdb`) with a single
//! key-value table:
//!
//! ```sql
//! CREATE TABLE ItemTable (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB);
//! ```
//!
//! This module handles:
//! - **Discovery** ([`locate`]): finding the database file on disk
//! - **Validation** ([`header`]): checking the SQLite file header
//! - **Access** ([`SqliteBackend`]): opening the table as a [`KeyValueStore`]
//!
//! Handles are scoped with [`with_store`], which closes them on every path.

pub mod backend;
pub mod header;
pub mod locate;

pub use backend::{KeyValueStore, OpenMode, StoreBackend};
pub use header::is_valid_store;
pub use locate::{LocateOptions, candidate_paths, home_dir, locate};

use crate::{Error, Result};
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long to wait on a lock held by a running Cursor instance.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Backend that opens Cursor's `ItemTable` through rusqlite.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteBackend;

impl StoreBackend for SqliteBackend {
    fn open(&self, path: &Path, mode: OpenMode) -> Result<Box<dyn KeyValueStore>> {
        Ok(Box::new(SqliteStore::open(path, mode)?))
    }
}

/// An open connection to a `state.vscdb` file.
pub struct SqliteStore {
    path: PathBuf,
    conn: Connection,
}

impl SqliteStore {
    /// Open an existing database. Never creates the file.
    pub fn open(path: &Path, mode: OpenMode) -> Result<Self> {
        let access = match mode {
            OpenMode::ReadOnly => OpenFlags::SQLITE_OPEN_READ_ONLY,
            OpenMode::ReadWrite => OpenFlags::SQLITE_OPEN_READ_WRITE,
        };
        let conn = Connection::open_with_flags(path, access | OpenFlags::SQLITE_OPEN_NO_MUTEX)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        tracing::debug!("Opened {} ({})", path.display(), mode);
        Ok(Self {
            path: path.to_path_buf(),
            conn,
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<Value> = self
            .conn
            .query_row(
                "SELECT value FROM ItemTable WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Text(text)) => Ok(Some(text)),
            Some(Value::Blob(bytes)) => String::from_utf8(bytes).map(Some).map_err(|e| {
                Error::InvalidInput(format!("value stored under {} is not UTF-8: {}", key, e))
            }),
            Some(Value::Integer(i)) => Ok(Some(i.to_string())),
            Some(Value::Real(f)) => Ok(Some(f.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE ItemTable SET value = ?1 WHERE key = ?2",
            params![value, key],
        )?;
        if updated == 0 {
            return Err(Error::KeyNotFound(key.to_string()));
        }
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<()> {
        let SqliteStore { path, conn } = *self;
        conn.close().map_err(|(_, e)| Error::Database(e))?;
        tracing::debug!("Closed {}", path.display());
        Ok(())
    }
}

/// Open a store, run `f` against it, and close it again.
///
/// The handle is closed exactly once whether `f` succeeds or fails. An error
/// from `f` takes precedence over an error from closing.
pub fn with_store<T>(
    backend: &dyn StoreBackend,
    path: &Path,
    mode: OpenMode,
    f: impl FnOnce(&mut dyn KeyValueStore) -> Result<T>,
) -> Result<T> {
    let mut store = backend.open(path, mode)?;
    let result = f(store.as_mut());
    let closed = store.close();

    match (result, closed) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(close_err)) => {
            tracing::warn!("Failed to close {}: {}", path.display(), close_err);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeBackend;
    use tempfile::TempDir;

    const KEY: &str = "some.dotted.key";

    fn create_db(dir: &TempDir, rows: &[(&str, &str)]) -> PathBuf {
        let path = dir.path().join("state.vscdb");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE ItemTable (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB);",
        )
        .unwrap();
        for (key, value) in rows {
            conn.execute(
                "INSERT INTO ItemTable (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .unwrap();
        }
        path
    }

    #[test]
    fn test_sqlite_get_existing_and_missing() {
        let dir = TempDir::new().unwrap();
        let path = create_db(&dir, &[(KEY, r#"{"a":1}"#)]);

        let store = SqliteStore::open(&path, OpenMode::ReadOnly).unwrap();
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(store.get("other").unwrap(), None);
        Box::new(store).close().unwrap();
    }

    #[test]
    fn test_sqlite_get_blob_value() {
        let dir = TempDir::new().unwrap();
        let path = create_db(&dir, &[]);
        let conn = Connection::open(&path).unwrap();
        conn.execute(
            "INSERT INTO ItemTable (key, value) VALUES (?1, ?2)",
            params![KEY, br#"{"b":2}"#.to_vec()],
        )
        .unwrap();
        drop(conn);

        let store = SqliteStore::open(&path, OpenMode::ReadOnly).unwrap();
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some(r#"{"b":2}"#));
    }

    #[test]
    fn test_sqlite_set_updates_existing_row() {
        let dir = TempDir::new().unwrap();
        let path = create_db(&dir, &[(KEY, "old"), ("untouched", "same")]);

        let mut store = SqliteStore::open(&path, OpenMode::ReadWrite).unwrap();
        store.set(KEY, "new").unwrap();
        Box::new(store).close().unwrap();

        let store = SqliteStore::open(&path, OpenMode::ReadOnly).unwrap();
        assert_eq!(store.get(KEY).unwrap().as_deref(), Some("new"));
        assert_eq!(store.get("untouched").unwrap().as_deref(), Some("same"));
    }

    #[test]
    fn test_sqlite_set_never_inserts() {
        let dir = TempDir::new().unwrap();
        let path = create_db(&dir, &[]);

        let mut store = SqliteStore::open(&path, OpenMode::ReadWrite).unwrap();
        let err = store.set(KEY, "value").unwrap_err();
        assert!(matches!(err, Error::KeyNotFound(ref k) if k == KEY));
        assert_eq!(store.get(KEY).unwrap(), None);
    }

    #[test]
    fn test_sqlite_read_only_rejects_writes() {
        let dir = TempDir::new().unwrap();
        let path = create_db(&dir, &[(KEY, "old")]);

        let mut store = SqliteStore::open(&path, OpenMode::ReadOnly).unwrap();
        assert!(matches!(store.set(KEY, "new"), Err(Error::Database(_))));
    }

    #[test]
    fn test_sqlite_open_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.vscdb");

        assert!(SqliteStore::open(&path, OpenMode::ReadWrite).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_with_store_closes_on_success() {
        let backend = FakeBackend::with_row(KEY, "v");
        let value = with_store(&backend, Path::new("db"), OpenMode::ReadOnly, |store| {
            store.get(KEY)
        })
        .unwrap();

        assert_eq!(value.as_deref(), Some("v"));
        assert_eq!(backend.opens(), 1);
        assert_eq!(backend.closes(), 1);
    }

    #[test]
    fn test_with_store_closes_on_failure() {
        let backend = FakeBackend::with_row(KEY, "v");
        backend.state.borrow_mut().fail_get = true;

        let result = with_store(&backend, Path::new("db"), OpenMode::ReadOnly, |store| {
            store.get(KEY)
        });

        assert!(result.is_err());
        assert_eq!(backend.opens(), 1);
        assert_eq!(backend.closes(), 1);
    }
}
