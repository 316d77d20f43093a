//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Declarative provider for monitoring checks, hosts, groups and
/// maintenance windows
#[derive(Parser, Debug)]
#[command(name = "monitor-provider")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Manifest file (YAML)
    #[arg(short = 'f', long, global = true)]
    pub manifest: Option<PathBuf>,

    /// State file (JSON)
    #[arg(short, long, global = true, default_value = "monitor.state.json")]
    pub state: PathBuf,

    /// Output format
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Refresh state and show what apply would change
    Plan,

    /// Apply the manifest and persist state
    Apply,

    /// Delete every resource tracked in state
    Destroy,

    /// Adopt an existing remote record into state
    Import {
        /// Resource kind
        kind: String,

        /// Address (resource name) to track it under
        address: String,

        /// Remote identifier
        id: String,
    },

    /// Search existing records
    Lookup {
        /// Resource kind
        kind: String,

        /// Free-text search query
        query: String,

        /// Return every match instead of exactly one
        #[arg(long)]
        many: bool,
    },

    /// Validate the manifest without contacting the API
    Validate,

    /// List supported resource kinds
    Kinds,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one document per line)
    Json,
    /// Human-readable output
    Pretty,
}
