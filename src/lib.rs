// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Monitor Provider
//!
//! Declarative management of monitoring-service configuration: URL checks,
//! scripted web-journey checks, hosts, groups and maintenance windows are
//! reconciled against the service's REST API.
//!
//! ## Features
//!
//! - **CRUD lifecycle**: Create, read, update, delete and import with
//!   read-after-write, so local state always reflects the remote record
//! - **Lookups**: Resolve free-text queries to one record or a set of ids
//! - **Plans**: Refresh-then-diff with create, update, replace and delete
//! - **Persistent state**: Atomic JSON state file between runs
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use monitor_provider::engine::Engine;
//! use monitor_provider::manifest::load_manifest;
//! use monitor_provider::state::StateManager;
//!
//! #[tokio::main]
//! async fn main() -> monitor_provider::Result<()> {
//!     let manifest = load_manifest("monitor.yaml")?;
//!     let client = manifest.provider.build_client()?;
//!     let engine = Engine::new(client, StateManager::from_file("monitor.state.json")?);
//!
//!     let plan = engine.plan(&manifest).await?;
//!     println!("{}", plan.summary());
//!     engine.apply(&manifest).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 CLI: plan / apply / destroy / import            │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────────────┴───────────┬──────────────────────┐
//! │ Manifest │            Engine             │        State         │
//! └──────────┴───────────────┬───────────────┴──────────────────────┘
//!                            │
//! ┌──────────────────────────┴──────────────────────────────────────┐
//! │   Reconciler (CRUD)   │   Datasource (search)   │   Mappers      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                 ApiClient (JSON over HTTP, auth)                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication
pub mod auth;

/// API client
pub mod http;

/// Local resource state and wire mapping
pub mod schema;

/// Wire records of the monitoring API
pub mod model;

/// Resource kinds and the CRUD reconciler
pub mod resource;

/// Search and lookup
pub mod datasource;

/// State persistence
pub mod state;

/// Provider configuration
pub mod config;

/// Manifest loading
pub mod manifest;

/// Plan and apply engine
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::ProviderConfig;
pub use engine::Engine;
pub use http::ApiClient;
pub use resource::{reconciler_for, DynResource, Reconciler, ResourceKind};
pub use schema::ResourceData;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
