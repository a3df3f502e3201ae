//! Command implementations for febe

mod diff;
mod list;
mod normalize;
mod schema;
mod validate;

pub use diff::run_diff;
pub use list::run_list;
pub use normalize::{run_flatten, run_normalize};
pub use schema::run_schema;
pub use validate::run_validate;

use std::path::Path;

use colored::Colorize;
use febe_resources::{Registry, ResourceDefinition, provider};
use febe_schema::schema::loader::{load_document, load_schema};
use febe_schema::{Engine, Outcome, Violation};

use crate::cli::SchemaArgs;
use crate::error::{CliError, Result};
use crate::settings::Settings;

/// Look up a built-in resource; `provider` names the provider configuration.
pub(crate) fn definition(resource: &str) -> Result<ResourceDefinition> {
    let registry = Registry::with_builtins();
    if resource == provider::NAME {
        return Ok(registry.provider());
    }
    Ok(registry.get(resource)?.clone())
}

/// Build the engine selected by `target`.
pub(crate) fn engine(target: &SchemaArgs, settings: &Settings) -> Result<Engine> {
    match &target.schema {
        Some(path) => {
            let block = load_schema(path)?;
            Ok(Engine::new(block, settings.engine.clone())?)
        }
        None => Ok(definition(&target.resource)?.engine(settings.engine.clone())?),
    }
}

/// Load a document and run it through the pipeline.
pub(crate) fn process(engine: &Engine, file: &Path, settings: &Settings) -> Result<Outcome> {
    let document = load_document(file)?;
    Ok(engine.process(&document, &settings.resolver()))
}

/// Print violations to stderr and fail when there are any.
pub(crate) fn require_valid(file: &Path, outcome: &Outcome) -> Result<()> {
    if outcome.is_valid() {
        return Ok(());
    }
    print_violations(file, &outcome.violations, true);
    Err(invalid(file, outcome))
}

pub(crate) fn invalid(file: &Path, outcome: &Outcome) -> CliError {
    CliError::Invalid {
        file: file.display().to_string(),
        count: outcome.violations.len(),
    }
}

pub(crate) fn print_violations(file: &Path, violations: &[Violation], to_stderr: bool) {
    let header = format!("{} {}", "INVALID".red().bold(), file.display().to_string().yellow());
    let lines = violations
        .iter()
        .map(|violation| format!("   {} {}", "-".red(), violation));
    if to_stderr {
        eprintln!("{header}");
        lines.for_each(|line| eprintln!("{line}"));
    } else {
        println!("{header}");
        lines.for_each(|line| println!("{line}"));
    }
}
