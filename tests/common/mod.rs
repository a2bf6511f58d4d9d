//! Common test utilities for modesync integration tests.
//!
//! Provides `TestEnv`, an isolated fake home directory so tests never touch the
//! real Cursor installation or the user's config.kdl.

#![allow(dead_code)]

use assert_cmd::Command;
use rusqlite::{Connection, params};
use serde_json::Value;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// Key of Cursor's application settings record.
pub const SETTINGS_KEY: &str =
    "src.vs.platform.reactivestorage.browser.reactiveStorageServiceImpl.persistentStorage.applicationUser";

/// Database location under the XDG config layout.
pub const XDG_DB: &str = ".config/Cursor/User/globalStorage/state.vscdb";

/// Database location under the macOS layout (first in probe order).
pub const MACOS_DB: &str = "Library/Application Support/Cursor/User/globalStorage/state.vscdb";

/// A test environment with an isolated home directory.
///
/// The `modesync()` method returns a `Command` with `MODESYNC_HOME` and
/// `MODESYNC_CONFIG` set per-invocation, making tests parallel-safe.
pub struct TestEnv {
    pub home: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the modesync binary inside this environment.
    pub fn modesync(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_modesync"));
        cmd.current_dir(self.home.path());
        cmd.env("MODESYNC_HOME", self.home.path());
        cmd.env("MODESYNC_CONFIG", self.config_path());
        cmd.env_remove("MODESYNC_DB");
        cmd.env_remove("MODESYNC_LOG");
        cmd
    }

    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// Absolute path for a path relative to the fake home.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.home.path().join(relative)
    }

    pub fn config_path(&self) -> PathBuf {
        self.path("modesync-config.kdl")
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_path(), content).expect("Failed to write config file");
    }

    /// Create a Cursor database at `relative` holding `settings` plus an
    /// unrelated row.
    pub fn create_db(&self, relative: &str, settings: &Value) -> PathBuf {
        let path = self.path(relative);
        create_db_at(&path, Some(settings));
        path
    }

    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn read_json(&self, relative: &str) -> Value {
        let content = std::fs::read_to_string(self.path(relative)).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a Cursor-shaped `state.vscdb`; `settings` of `None` leaves the
/// settings row out.
pub fn create_db_at(path: &Path, settings: Option<&Value>) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE ItemTable (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB);",
    )
    .unwrap();
    if let Some(settings) = settings {
        conn.execute(
            "INSERT INTO ItemTable (key, value) VALUES (?1, ?2)",
            params![SETTINGS_KEY, settings.to_string()],
        )
        .unwrap();
    }
    conn.execute(
        "INSERT INTO ItemTable (key, value) VALUES ('workbench.colorTheme', 'Default Dark')",
        [],
    )
    .unwrap();
}

/// Raw text stored under `key`, if any.
pub fn read_row(db: &Path, key: &str) -> Option<String> {
    let conn = Connection::open(db).unwrap();
    conn.query_row(
        "SELECT value FROM ItemTable WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .ok()
}

/// Parsed settings record stored in `db`.
pub fn read_settings(db: &Path) -> Value {
    serde_json::from_str(&read_row(db, SETTINGS_KEY).expect("settings row missing")).unwrap()
}
