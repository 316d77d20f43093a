//! Manifest types
//!
//! A manifest declares the desired remote state: provider connection
//! settings, managed resources and read-only lookups.

use crate::config::ProviderConfig;
use crate::types::JsonObject;
use serde::{Deserialize, Serialize};

/// Complete manifest loaded from YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Connection settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Managed resources, applied in declaration order
    #[serde(default)]
    pub resources: Vec<ResourceDecl>,

    /// Read-only lookups
    #[serde(default)]
    pub data: Vec<DataDecl>,
}

impl Manifest {
    /// Declared resource by name
    pub fn resource(&self, name: &str) -> Option<&ResourceDecl> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Declared lookup by name
    pub fn lookup(&self, name: &str) -> Option<&DataDecl> {
        self.data.iter().find(|d| d.name == name)
    }
}

/// One managed resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDecl {
    /// Resource kind (e.g. `url_check`)
    pub kind: String,

    /// Name, unique within the manifest; the address in state
    pub name: String,

    /// Desired attribute values
    #[serde(default)]
    pub attributes: JsonObject,
}

/// One lookup against existing remote records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataDecl {
    /// Resource kind to search
    pub kind: String,

    /// Name, unique among lookups
    pub name: String,

    /// Free-text search query
    pub query: String,

    /// Return every match instead of exactly one
    #[serde(default)]
    pub many: bool,
}
