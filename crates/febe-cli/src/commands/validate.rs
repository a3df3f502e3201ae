//! Validate command implementation

use std::path::Path;

use colored::Colorize;
use serde_json::json;

use super::{engine, invalid, print_violations, process};
use crate::cli::SchemaArgs;
use crate::error::Result;
use crate::settings::Settings;

/// Run the validate command
///
/// Reports every violation in one pass. Fails when there is at least one.
pub fn run_validate(file: &Path, target: &SchemaArgs, json: bool, settings: &Settings) -> Result<()> {
    let engine = engine(target, settings)?;
    let outcome = process(&engine, file, settings)?;

    if json {
        let output = json!({
            "file": file.display().to_string(),
            "valid": outcome.is_valid(),
            "violations": outcome.violations,
            "checksum": outcome.checksum(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if outcome.is_valid() {
        println!("{} {} is valid", "OK".green().bold(), file.display());
    } else {
        print_violations(file, &outcome.violations, false);
    }

    if outcome.is_valid() {
        Ok(())
    } else {
        Err(invalid(file, &outcome))
    }
}
