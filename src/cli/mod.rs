//! CLI argument definitions for modesync.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MODESYNC_GIT_COMMIT"),
    " ",
    env!("MODESYNC_BUILD_TIMESTAMP"),
    ")"
);

/// Modesync - save and load Cursor custom modes.
///
/// Run `modesync save modes.json` to back up your modes, and
/// `modesync load modes.json` to restore them (with Cursor closed).
#[derive(Parser, Debug)]
#[command(name = "modesync")]
#[command(author, version, long_version = LONG_VERSION)]
#[command(about = "Save and load Cursor custom modes", long_about = None)]
pub struct Cli {
    /// Path to Cursor's state.vscdb instead of searching the standard locations.
    /// Can also be set via MODESYNC_DB or `db-path` in config.kdl.
    #[arg(short = 'd', long = "db", global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Output results as JSON instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// Log every database candidate checked and each store open/close
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save the custom modes to a JSON file (overwrites the file)
    Save {
        /// Destination JSON file
        file: PathBuf,
    },

    /// Replace the custom modes with the contents of a JSON file
    ///
    /// Close Cursor first: it keeps its own copy of the settings and will
    /// overwrite the change on exit.
    Load {
        /// Source JSON file containing an array of modes
        file: PathBuf,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show which database save/load would use and every location checked
    Locate,
}
