//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Resource used when `--resource` is not given
pub const DEFAULT_RESOURCE: &str = "backend_config";

/// febe - Validate and normalize resource configuration documents
#[derive(Parser, Debug)]
#[command(name = "febe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file with engine options and default overrides
    #[arg(short, long, global = true, env = "FEBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Which schema a document is checked against
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct SchemaArgs {
    /// Built-in resource (`backend_config` or `provider`)
    #[arg(short, long, default_value = DEFAULT_RESOURCE)]
    pub resource: String,

    /// Schema file to use instead of a built-in resource
    #[arg(long, conflicts_with = "resource")]
    pub schema: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Check a document and report every violation
    ///
    /// Exits with status 1 when the document has violations.
    Validate {
        /// Document to check (.json, .toml, .yaml)
        file: PathBuf,

        #[command(flatten)]
        target: SchemaArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the canonical encoding of a document
    Normalize {
        /// Document to normalize (.json, .toml, .yaml)
        file: PathBuf,

        #[command(flatten)]
        target: SchemaArgs,
    },

    /// Print the flat `key = value` state of a document
    Flatten {
        /// Document to flatten (.json, .toml, .yaml)
        file: PathBuf,

        #[command(flatten)]
        target: SchemaArgs,
    },

    /// Show drift between two documents
    Diff {
        /// Previous document
        old: PathBuf,

        /// Current document
        new: PathBuf,

        #[command(flatten)]
        target: SchemaArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print a resource definition as JSON
    Schema {
        /// Built-in resource (`backend_config` or `provider`)
        #[arg(short, long, default_value = DEFAULT_RESOURCE)]
        resource: String,
    },

    /// List built-in resources
    List,
}
