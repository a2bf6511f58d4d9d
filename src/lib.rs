//! Modesync - save and load Cursor custom modes.
//!
//! This library provides the core functionality for the `modesync` CLI tool:
//! locating Cursor's `state.vscdb`, reading the `composerState.modes4` array out
//! of the stored settings record, and writing a replacement array back without
//! touching any other setting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod confirm;
pub mod settings;
pub mod storage;

use std::path::PathBuf;


/// Library-level error type for modesync operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("{}", storage::locate::describe_missing(.candidates))]
    StoreNotFound { candidates: Vec<PathBuf> },

    #[error("Database file not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Not a valid SQLite database (bad file header): {}", .0.display())]
    FormatMismatch(PathBuf),

    #[error("Settings key not found in database: {0}")]
    KeyNotFound(String),

    #[error("Failed to read {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {}", .context, .source)]
    Parse {
        context: String,
        source: serde_json::Error,
    },

    #[error("Unexpected JSON shape: {0}")]
    TypeMismatch(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result type alias for modesync operations.
pub type Result<T> = std::result::Result<T, Error>;
