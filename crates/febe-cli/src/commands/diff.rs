//! Diff command implementation
//!
//! Normalizes two documents against the same schema and shows how the
//! second drifts from the first.

use std::path::Path;

use colored::Colorize;
use febe_schema::{Change, StateDiff};

use super::{engine, process, require_valid};
use crate::cli::SchemaArgs;
use crate::error::Result;
use crate::settings::Settings;

/// Run the diff command
pub fn run_diff(old: &Path, new: &Path, target: &SchemaArgs, json: bool, settings: &Settings) -> Result<()> {
    let engine = engine(target, settings)?;
    let before = process(&engine, old, settings)?;
    require_valid(old, &before)?;
    let after = process(&engine, new, settings)?;
    require_valid(new, &after)?;

    let diff = StateDiff::compute(&before.encoded, &after.encoded);
    tracing::debug!(
        changes = diff.changes.len(),
        similarity = diff.similarity,
        "Computed drift"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
    } else {
        print_diff(old, new, &diff);
    }
    Ok(())
}

fn print_diff(old: &Path, new: &Path, diff: &StateDiff) {
    if diff.is_equivalent {
        println!("{} No drift between documents.", "OK".green().bold());
        return;
    }

    println!(
        "{} {} -> {}",
        "Diff".blue().bold(),
        old.display().to_string().yellow(),
        new.display().to_string().yellow()
    );
    println!();
    for change in &diff.changes {
        let line = change.to_string();
        let line = match change {
            Change::Added { .. } => line.green(),
            Change::Removed { .. } => line.red(),
            Change::Modified { .. } => line.yellow(),
        };
        println!("   {line}");
    }
    println!();
    println!(
        "{} change(s), similarity {:.2}",
        diff.changes.len(),
        diff.similarity
    );
}
