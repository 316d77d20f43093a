//! Manifest module
//!
//! Parse desired-state manifests from YAML.
//!
//! # Overview
//!
//! The manifest module provides:
//! - `Manifest` - Provider settings, resources and lookups
//! - `ResourceDecl` / `DataDecl` - Single declarations
//! - YAML parsing with validation
//!
//! # Example
//!
//! ```yaml
//! provider:
//!   base_url: https://monitor.example.com/api
//!
//! resources:
//!   - kind: url_check
//!     name: svc-health
//!     attributes:
//!       url: https://svc.example.com/health
//!       frequency: 60
//!
//! data:
//!   - kind: host
//!     name: db
//!     query: db-1
//! ```

mod parser;
mod types;

pub use parser::{load_manifest, load_manifest_from_str, validate_manifest};
pub use types::{DataDecl, Manifest, ResourceDecl};
