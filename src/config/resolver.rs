//! Precedence resolution for modesync settings.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI flags
//! 2. Environment variables (`MODESYNC_DB`)
//! 3. config.kdl
//! 4. Built-in defaults (database discovery, human output, prompt on load)

use crate::config::{ModesyncConfig, OutputFormat};
use std::path::{Path, PathBuf};

/// Environment variable naming the database path.
pub const DB_PATH_ENV: &str = "MODESYNC_DB";

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from CLI flag
    CliFlag,
    /// Value from environment variable
    EnvVar(String),
    /// Value from config.kdl
    ConfigFile,
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::EnvVar(name) => write!(f, "env:{}", name),
            ValueSource::ConfigFile => write!(f, "config"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// Values passed on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    /// `--json`; only ever forces JSON on
    pub json: bool,
    /// `--yes`; only ever forces the prompt off
    pub assume_yes: bool,
}

/// Fully resolved settings with source tracking.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// `None` means discover the database
    pub db_path: Resolved<Option<PathBuf>>,
    pub output_format: Resolved<OutputFormat>,
    pub assume_yes: Resolved<bool>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            db_path: Resolved::new(None, ValueSource::Default),
            output_format: Resolved::new(OutputFormat::Human, ValueSource::Default),
            assume_yes: Resolved::new(false, ValueSource::Default),
        }
    }
}

impl ResolvedConfig {
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.value.as_deref()
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format.value
    }

    pub fn assume_yes(&self) -> bool {
        self.assume_yes.value
    }
}

/// Resolve settings, reading `MODESYNC_DB` from the process environment.
pub fn resolve_config(
    config: &ModesyncConfig,
    overrides: &ConfigOverrides,
    home: Option<&Path>,
) -> ResolvedConfig {
    let env_db = std::env::var(DB_PATH_ENV).ok().filter(|v| !v.is_empty());
    resolve_config_with_env(config, overrides, env_db, home)
}

/// Resolve settings with an explicit value for `MODESYNC_DB`.
///
/// `home` is used to expand a leading `~` in configured paths; without one
/// such paths are kept as written.
pub fn resolve_config_with_env(
    config: &ModesyncConfig,
    overrides: &ConfigOverrides,
    env_db: Option<String>,
    home: Option<&Path>,
) -> ResolvedConfig {
    let mut result = ResolvedConfig::default();

    if let Some(ref path) = overrides.db_path {
        result.db_path = Resolved::new(Some(expand_home(path, home)), ValueSource::CliFlag);
    } else if let Some(path) = env_db {
        result.db_path = Resolved::new(
            Some(expand_home(Path::new(&path), home)),
            ValueSource::EnvVar(DB_PATH_ENV.to_string()),
        );
    } else if let Some(ref path) = config.db_path {
        result.db_path = Resolved::new(Some(expand_home(path, home)), ValueSource::ConfigFile);
    }

    if overrides.json {
        result.output_format = Resolved::new(OutputFormat::Json, ValueSource::CliFlag);
    } else if let Some(format) = config.output_format {
        result.output_format = Resolved::new(format, ValueSource::ConfigFile);
    }

    if overrides.assume_yes {
        result.assume_yes = Resolved::new(true, ValueSource::CliFlag);
    } else if let Some(yes) = config.assume_yes {
        result.assume_yes = Resolved::new(yes, ValueSource::ConfigFile);
    }

    result
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    match (home, path.strip_prefix("~")) {
        (Some(home), Ok(rest)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
