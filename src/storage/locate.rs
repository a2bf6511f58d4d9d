//! Discovery of Cursor's `state.vscdb`.
//!
//! Without an explicit path, the candidates in [`CANDIDATES`] are probed in
//! declaration order and the first existing file wins. The order matters on
//! machines with stale installs from several packaging formats, so it is kept
//! as data rather than as per-OS branching.

use crate::storage::header::is_valid_store;
use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the home directory used for discovery.
pub const HOME_ENV: &str = "MODESYNC_HOME";

/// Operating-system convention a candidate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Linux,
}

/// One well-known location of the database, relative to the home directory.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub platform: Platform,
    /// Short label for diagnostics (e.g. "snap").
    pub layout: &'static str,
    pub segments: &'static [&'static str],
}

impl Candidate {
    /// Resolve this candidate against a home directory.
    pub fn path(&self, home: &Path) -> PathBuf {
        self.segments
            .iter()
            .fold(home.to_path_buf(), |path, segment| path.join(segment))
    }
}

/// Known database locations, in probe order.
pub const CANDIDATES: &[Candidate] = &[
    Candidate {
        platform: Platform::MacOs,
        layout: "application-support",
        segments: &[
            "Library",
            "Application Support",
            "Cursor",
            "User",
            "globalStorage",
            "state.vscdb",
        ],
    },
    Candidate {
        platform: Platform::Windows,
        layout: "appdata-roaming",
        segments: &[
            "AppData",
            "Roaming",
            "Cursor",
            "User",
            "globalStorage",
            "state.vscdb",
        ],
    },
    Candidate {
        platform: Platform::Linux,
        layout: "xdg-config",
        segments: &[".config", "Cursor", "User", "globalStorage", "state.vscdb"],
    },
    Candidate {
        platform: Platform::Linux,
        layout: "dotfile",
        segments: &[".cursor", "User", "globalStorage", "state.vscdb"],
    },
    Candidate {
        platform: Platform::Linux,
        layout: "snap",
        segments: &[
            "snap",
            "cursor",
            "current",
            ".config",
            "Cursor",
            "User",
            "globalStorage",
            "state.vscdb",
        ],
    },
    Candidate {
        platform: Platform::Linux,
        layout: "local-share",
        segments: &[
            ".local",
            "share",
            "Cursor",
            "User",
            "globalStorage",
            "state.vscdb",
        ],
    },
];

/// All candidate paths for `home`, in probe order.
pub fn candidate_paths(home: &Path) -> Vec<PathBuf> {
    CANDIDATES.iter().map(|c| c.path(home)).collect()
}

/// The user's home directory, if one can be determined.
///
/// Priority: `MODESYNC_HOME` env var > platform home directory.
pub fn home_dir() -> Option<PathBuf> {
    if let Ok(home) = std::env::var(HOME_ENV) {
        if !home.is_empty() {
            return Some(PathBuf::from(home));
        }
    }
    dirs::home_dir()
}

/// Find the database file.
///
/// A `custom` path is returned unchanged if it exists and is an error
/// otherwise; the standard candidates are not consulted. Without one, the
/// first existing candidate under `home` is returned.
pub fn locate(custom: Option<&Path>, home: &Path) -> Result<PathBuf> {
    match custom {
        Some(path) => locate_custom(path),
        None => locate_candidates(home),
    }
}

fn locate_custom(path: &Path) -> Result<PathBuf> {
    tracing::debug!("Checking custom path: {}", path.display());
    if path.exists() {
        Ok(path.to_path_buf())
    } else {
        Err(Error::PathNotFound(path.to_path_buf()))
    }
}

fn locate_candidates(home: &Path) -> Result<PathBuf> {
    let mut tried = Vec::with_capacity(CANDIDATES.len());
    for candidate in CANDIDATES {
        let path = candidate.path(home);
        let exists = path.exists();
        tracing::debug!(
            "Checking {:?}/{}: {} ({})",
            candidate.platform,
            candidate.layout,
            path.display(),
            if exists { "found" } else { "missing" }
        );
        if exists {
            return Ok(path);
        }
        tried.push(path);
    }

    Err(Error::StoreNotFound { candidates: tried })
}

/// Message for [`Error::StoreNotFound`].
pub fn describe_missing(candidates: &[PathBuf]) -> String {
    let mut message = String::from("Cursor database not found. Searched:");
    for path in candidates {
        message.push_str("\n  - ");
        message.push_str(&path.display().to_string());
    }
    message.push_str("\nUse --db <path> to point at state.vscdb directly.");
    message
}

/// Where to look for the database.
#[derive(Debug, Clone)]
pub struct LocateOptions {
    /// Explicit database path, bypassing discovery.
    pub db_path: Option<PathBuf>,
    /// Home directory the candidates are rooted at; `None` if unknown.
    pub home: Option<PathBuf>,
}

impl LocateOptions {
    pub fn new(db_path: Option<PathBuf>, home: Option<PathBuf>) -> Self {
        Self { db_path, home }
    }

    /// The home directory, required only for discovery.
    pub fn home(&self) -> Result<&Path> {
        self.home
            .as_deref()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))
    }

    /// Locate the database and check that it is a SQLite file.
    ///
    /// An explicit path never needs the home directory.
    pub fn resolve(&self) -> Result<PathBuf> {
        let path = match self.db_path.as_deref() {
            Some(custom) => locate_custom(custom)?,
            None => locate_candidates(self.home()?)?,
        };
        if !is_valid_store(&path) {
            return Err(Error::FormatMismatch(path));
        }
        tracing::debug!("Using database {}", path.display());
        Ok(path)
    }
}
