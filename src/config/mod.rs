//! Configuration for modesync.
//!
//! ## config.kdl - User preferences
//!
//! Located at `MODESYNC_CONFIG` if set, otherwise
//! `<config dir>/modesync/config.kdl` (`~/.config/modesync/config.kdl` on Linux).
//!
//! Contains:
//! - `db-path` - Database path used instead of discovery (`~` is expanded)
//! - `output-format` - "human" or "json"
//! - `assume-yes` - Skip the confirmation prompt on `load`
//!
//! ## Precedence
//!
//! CLI flag > environment variable > config.kdl > defaults.
//! Use the [`resolver`] module for precedence resolution.

pub mod resolver;
pub mod schema;

pub use resolver::{
    ConfigOverrides, DB_PATH_ENV, Resolved, ResolvedConfig, ValueSource, resolve_config,
    resolve_config_with_env,
};
pub use schema::{ModesyncConfig, OutputFormat};

use std::path::PathBuf;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "MODESYNC_CONFIG";

/// Location of config.kdl, if one can be determined.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::config_dir().map(|d| d.join("modesync").join("config.kdl"))
}

/// Load config.kdl from [`config_path`]; empty if there is none.
pub fn load_config() -> crate::Result<ModesyncConfig> {
    match config_path() {
        Some(path) => ModesyncConfig::load(&path),
        None => Ok(ModesyncConfig::new()),
    }
}
