//! Modesync CLI - save and load Cursor custom modes.

use clap::Parser;
use modesync::cli::{Cli, Commands};
use modesync::commands::{self, Output};
use modesync::config::{self, ConfigOverrides, OutputFormat};
use modesync::confirm::ConfirmationGate;
use modesync::storage::{self, LocateOptions, SqliteBackend};
use std::io::IsTerminal;
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter (e.g. `modesync=debug`).
const LOG_ENV: &str = "MODESYNC_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Log to stderr. `MODESYNC_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "modesync=debug" } else { "modesync=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> Result<(), modesync::Error> {
    let home = storage::home_dir();
    let file_config = config::load_config()?;

    let overrides = ConfigOverrides {
        db_path: cli.db_path,
        json: cli.json,
        assume_yes: matches!(cli.command, Commands::Load { yes: true, .. }),
    };
    let resolved = config::resolve_config(&file_config, &overrides, home.as_deref());
    let human = resolved.output_format() == OutputFormat::Human;
    let options = LocateOptions::new(resolved.db_path().map(|p| p.to_path_buf()), home);

    match cli.command {
        Commands::Save { file } => {
            let result = commands::save(&options, &file, &SqliteBackend)?;
            output(&result, human);
        }

        Commands::Load { file, .. } => {
            let mut gate = ConfirmationGate::stdio(resolved.assume_yes());
            let result = commands::load(&options, &file, &SqliteBackend, &mut gate)?;
            output(&result, human);
        }

        Commands::Locate => {
            let result = commands::locate(&options, &resolved.db_path.source)?;
            output(&result, human);
        }
    }

    Ok(())
}

fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
