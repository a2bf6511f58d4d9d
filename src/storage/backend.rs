//! Store handle and backend traits.
//!
//! The settings database is only ever touched through these two traits:
//! - [`StoreBackend`] opens a handle for a path in a given [`OpenMode`]
//! - [`KeyValueStore`] is the open handle: `get`, `set`, `close`
//!
//! [`crate::storage::SqliteBackend`] is the real implementation.

use crate::Result;
use std::path::Path;

/// How a store handle is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Reads only; used by `save` and never creates the file.
    ReadOnly,
    /// Reads and updates existing rows; used by `load`.
    ReadWrite,
}

impl OpenMode {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadOnly => "read-only",
            Self::ReadWrite => "read-write",
        }
    }
}

impl std::fmt::Display for OpenMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An open handle to a key-value store.
///
/// Handles are exclusively owned by whoever opened them and must be released
/// with [`KeyValueStore::close`], which consumes the handle.
pub trait KeyValueStore {
    /// Fetch the value stored under `key`, or `None` if there is no such row.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value of an existing row.
    ///
    /// Never inserts: a missing row is reported as [`crate::Error::KeyNotFound`].
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Release the handle.
    fn close(self: Box<Self>) -> Result<()>;
}

/// Opens [`KeyValueStore`] handles.
pub trait StoreBackend {
    /// Open the store at `path`. The file must already exist.
    fn open(&self, path: &Path, mode: OpenMode) -> Result<Box<dyn KeyValueStore>>;
}
