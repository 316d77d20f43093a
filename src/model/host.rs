//! Host and group records

use super::is_zero;
use serde::{Deserialize, Serialize};

/// Monitored host
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Host {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    pub name: String,
    pub address: String,
    pub description: String,
    /// Host may be used as a proxy for checks
    pub is_proxy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    pub tags: Vec<String>,
}

/// Group of hosts and checks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
}
