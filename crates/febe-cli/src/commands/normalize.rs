//! Normalize and flatten commands
//!
//! Both refuse documents with violations: the output is the state a host
//! would persist, and invalid documents are never persisted.

use std::path::Path;

use super::{engine, process, require_valid};
use crate::cli::SchemaArgs;
use crate::error::Result;
use crate::settings::Settings;

/// Print the canonical encoding as pretty JSON
pub fn run_normalize(file: &Path, target: &SchemaArgs, settings: &Settings) -> Result<()> {
    let engine = engine(target, settings)?;
    let outcome = process(&engine, file, settings)?;
    require_valid(file, &outcome)?;

    println!("{}", serde_json::to_string_pretty(&outcome.encoded)?);
    Ok(())
}

/// Print the flat encoding, one `key = value` line per entry
pub fn run_flatten(file: &Path, target: &SchemaArgs, settings: &Settings) -> Result<()> {
    let engine = engine(target, settings)?;
    let outcome = process(&engine, file, settings)?;
    require_valid(file, &outcome)?;

    for (key, value) in outcome.flatten() {
        println!("{key} = {value}");
    }
    Ok(())
}
