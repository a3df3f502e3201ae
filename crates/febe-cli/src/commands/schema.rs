//! Schema command implementation

use super::definition;
use crate::error::Result;

/// Print a resource definition (version, timeouts and schema) as JSON
pub fn run_schema(resource: &str) -> Result<()> {
    let definition = definition(resource)?;
    println!("{}", serde_json::to_string_pretty(&definition)?);
    Ok(())
}
