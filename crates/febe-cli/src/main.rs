//! febe CLI
//!
//! Validates, normalizes, flattens and diffs resource configuration
//! documents against the built-in schemas.

mod cli;
mod commands;
mod error;
mod settings;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::{CliError, Result};
use settings::Settings;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let Some(command) = cli.command else {
        println!("{} Resource configuration validator", "febe".green().bold());
        println!();
        println!("Run {} for available commands.", "febe --help".cyan());
        return Ok(());
    };

    let settings = Settings::load(cli.config.as_deref())?;
    execute_command(command, &settings)
}

/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_tracing(verbose: bool) -> Result<()> {
    let installed = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };
    installed.map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
    if verbose {
        tracing::debug!("Verbose mode enabled");
    }
    Ok(())
}

fn execute_command(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Validate { file, target, json } => {
            commands::run_validate(&file, &target, json, settings)
        }
        Commands::Normalize { file, target } => commands::run_normalize(&file, &target, settings),
        Commands::Flatten { file, target } => commands::run_flatten(&file, &target, settings),
        Commands::Diff {
            old,
            new,
            target,
            json,
        } => commands::run_diff(&old, &new, &target, json, settings),
        Commands::Schema { resource } => commands::run_schema(&resource),
        Commands::List => commands::run_list(),
    }
}
