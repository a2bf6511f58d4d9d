//! KDL schema for config.kdl.
//!
//! ```kdl
//! // modesync preferences
//! db-path "~/.config/Cursor/User/globalStorage/state.vscdb"
//! output-format "human"  // or "json"
//! assume-yes #false
//! ```

use crate::{Error, Result};
use kdl::KdlDocument;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// One JSON object per command
    Json,
}

impl OutputFormat {
    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "human" => Some(OutputFormat::Human),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Human => "human",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Preferences read from config.kdl. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModesyncConfig {
    /// Database path used instead of discovery
    pub db_path: Option<PathBuf>,

    /// Default output format
    pub output_format: Option<OutputFormat>,

    /// Skip the confirmation prompt on `load`
    pub assume_yes: Option<bool>,
}

impl ModesyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse config from a KDL document.
    ///
    /// Unknown nodes are ignored; a known node with a value of the wrong
    /// type is an error.
    pub fn from_kdl(doc: &KdlDocument) -> Result<Self> {
        let mut config = Self::new();

        if let Some(value) = first_value(doc, "db-path") {
            let path = value
                .as_string()
                .ok_or_else(|| Error::Config("db-path must be a string".to_string()))?;
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(value) = first_value(doc, "output-format") {
            let format = value.as_string().and_then(OutputFormat::parse).ok_or_else(|| {
                Error::Config("output-format must be \"human\" or \"json\"".to_string())
            })?;
            config.output_format = Some(format);
        }

        if let Some(value) = first_value(doc, "assume-yes") {
            let yes = value
                .as_bool()
                .ok_or_else(|| Error::Config("assume-yes must be #true or #false".to_string()))?;
            config.assume_yes = Some(yes);
        }

        Ok(config)
    }

    /// Load config from a file. A missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: KdlDocument = content
            .parse()
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

        tracing::debug!("Loaded config from {}", path.display());
        Self::from_kdl(&doc)
    }
}

fn first_value<'a>(doc: &'a KdlDocument, name: &str) -> Option<&'a kdl::KdlValue> {
    doc.get(name)
        .and_then(|node| node.entries().first())
        .map(|entry| entry.value())
}
