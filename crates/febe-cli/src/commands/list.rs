//! List command implementation

use colored::Colorize;
use febe_resources::Registry;

use crate::error::Result;

/// List built-in resources with their schema versions
pub fn run_list() -> Result<()> {
    let registry = Registry::with_builtins();
    let provider = registry.provider();

    println!("{}", "Resources:".bold());
    for name in registry.names() {
        let definition = registry.get(name)?;
        println!(
            "   {} {}",
            name.cyan(),
            format!("(schema version {})", definition.schema_version).dimmed()
        );
    }
    println!();
    println!("{}", "Provider:".bold());
    println!("   {}", provider.name.cyan());
    Ok(())
}
