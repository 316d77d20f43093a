//! CLI module
//!
//! Command-line interface for reconciling manifests.
//!
//! # Commands
//!
//! - `plan` - Refresh state and show pending changes
//! - `apply` - Execute the plan and persist state
//! - `destroy` - Delete every tracked resource
//! - `import` - Adopt an existing remote record
//! - `lookup` - Search existing records
//! - `validate` - Check a manifest offline
//! - `kinds` - List supported resource kinds

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
