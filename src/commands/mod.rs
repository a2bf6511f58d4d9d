//! Command implementations for the modesync CLI.
//!
//! - `save` - Export the stored custom modes to a JSON file
//! - `load` - Replace the stored custom modes from a JSON file
//! - `locate` - Report which database the other commands would use
//!
//! Every command opens the database at most once and closes it before
//! returning, including on errors (see [`crate::storage::with_store`]).

use crate::config::ValueSource;
use crate::confirm::ConfirmationGate;
use crate::settings::{self, ModeSummary, SETTINGS_KEY};
use crate::storage::{LocateOptions, OpenMode, StoreBackend, candidate_paths, with_store};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn json_string<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
}

// === save ===

/// Result of `modesync save`.
#[derive(Debug, Serialize)]
pub struct SaveResult {
    /// Database the modes were read from
    pub path: PathBuf,
    /// File the modes were written to
    pub output: PathBuf,
    pub count: usize,
    pub modes: Vec<ModeSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Output for SaveResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        let mut lines = Vec::new();
        for warning in &self.warnings {
            lines.push(format!("Warning: {}", warning));
        }
        lines.push(format!("Database: {}", self.path.display()));
        lines.push(format!(
            "Saved {} mode{} to {}",
            self.count,
            if self.count == 1 { "" } else { "s" },
            self.output.display()
        ));
        for mode in &self.modes {
            lines.push(format!("  - {} ({})", mode.name, mode.id));
        }
        lines.join("\n")
    }
}

/// Export the stored custom modes to `output`.
///
/// The file is overwritten with a pretty-printed JSON array. A settings record
/// without a modes array exports `[]` and reports a warning.
pub fn save(
    options: &LocateOptions,
    output: &Path,
    backend: &dyn StoreBackend,
) -> Result<SaveResult> {
    let path = options.resolve()?;

    let extraction = with_store(backend, &path, OpenMode::ReadOnly, |store| {
        settings::extract(store, SETTINGS_KEY)
    })?;

    let mut content = serde_json::to_string_pretty(&extraction.records)?;
    content.push('\n');
    fs::write(output, content).map_err(|source| Error::Write {
        path: output.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        "Wrote {} modes to {}",
        extraction.records.len(),
        output.display()
    );

    Ok(SaveResult {
        path,
        output: output.to_path_buf(),
        count: extraction.records.len(),
        modes: extraction.records.iter().map(ModeSummary::from_record).collect(),
        warnings: extraction.diagnostic.into_iter().collect(),
    })
}

// === load ===

/// Whether `load` wrote anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    Imported,
    Cancelled,
}

/// Result of `modesync load`.
#[derive(Debug, Serialize)]
pub struct LoadResult {
    /// Database the modes were (or would have been) written to
    pub path: PathBuf,
    /// File the modes were read from
    pub input: PathBuf,
    pub count: usize,
    pub status: LoadStatus,
}

impl Output for LoadResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        match self.status {
            LoadStatus::Imported => format!(
                "Loaded {} mode{} from {} into {}\nRestart Cursor to pick up the change.",
                self.count,
                if self.count == 1 { "" } else { "s" },
                self.input.display(),
                self.path.display()
            ),
            LoadStatus::Cancelled => "Cancelled; the database was not modified.".to_string(),
        }
    }
}

/// Replace the stored custom modes with the array in `input`.
///
/// The input file is read and validated before the database is looked at.
/// The database is opened for writing only after `gate` confirms.
pub fn load<R: BufRead, W: Write>(
    options: &LocateOptions,
    input: &Path,
    backend: &dyn StoreBackend,
    gate: &mut ConfirmationGate<R, W>,
) -> Result<LoadResult> {
    let records = read_records(input)?;
    let count = records.len();
    let path = options.resolve()?;

    let question = format!(
        "Replace the custom modes in {} with {} mode{} from {}?",
        path.display(),
        count,
        if count == 1 { "" } else { "s" },
        input.display()
    );
    if !gate.ask(&question)?.is_confirmed() {
        tracing::debug!("Load cancelled at confirmation prompt");
        return Ok(LoadResult {
            path,
            input: input.to_path_buf(),
            count,
            status: LoadStatus::Cancelled,
        });
    }

    with_store(backend, &path, OpenMode::ReadWrite, |store| {
        settings::merge(store, SETTINGS_KEY, records)
    })?;

    Ok(LoadResult {
        path,
        input: input.to_path_buf(),
        count,
        status: LoadStatus::Imported,
    })
}

/// Read a JSON file that must hold a top-level array.
fn read_records(input: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(input).map_err(|source| Error::Read {
        path: input.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| Error::Parse {
        context: input.display().to_string(),
        source,
    })?;

    match value {
        Value::Array(records) => Ok(records),
        other => Err(Error::TypeMismatch(format!(
            "{} must contain a JSON array of modes, found {}",
            input.display(),
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// === locate ===

/// One discovery candidate and whether it exists.
#[derive(Debug, Serialize)]
pub struct CandidateStatus {
    pub path: PathBuf,
    pub exists: bool,
}

/// Result of `modesync locate`.
#[derive(Debug, Serialize)]
pub struct LocateResult {
    pub path: PathBuf,
    /// "discovered", or where an explicit path came from ("cli", "env:...", "config")
    pub source: String,
    pub candidates: Vec<CandidateStatus>,
}

impl Output for LocateResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec![format!("{} ({})", self.path.display(), self.source)];
        lines.push("Candidates:".to_string());
        for candidate in &self.candidates {
            let marker = if candidate.path == self.path {
                "*"
            } else if candidate.exists {
                "+"
            } else {
                "-"
            };
            lines.push(format!("  {} {}", marker, candidate.path.display()));
        }
        lines.join("\n")
    }
}

/// Resolve the database exactly as `save` and `load` would, without opening it.
pub fn locate(options: &LocateOptions, source: &ValueSource) -> Result<LocateResult> {
    let path = options.resolve()?;

    let candidates = options
        .home
        .as_deref()
        .map(candidate_paths)
        .unwrap_or_default()
        .into_iter()
        .map(|path| {
            let exists = path.exists();
            CandidateStatus { path, exists }
        })
        .collect();

    let source = if options.db_path.is_some() {
        source.to_string()
    } else {
        "discovered".to_string()
    };

    Ok(LocateResult {
        path,
        source,
        candidates,
    })
}
