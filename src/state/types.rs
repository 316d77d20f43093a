//! State types for tracking managed resources
//!
//! These types are serialized to JSON and persisted between runs.

use crate::schema::ResourceData;
use crate::types::JsonObject;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete state for one manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Tracked resources keyed by address
    #[serde(default)]
    pub resources: BTreeMap<String, StoredResource>,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entry for an address
    pub fn get(&self, address: &str) -> Option<&StoredResource> {
        self.resources.get(address)
    }

    /// Insert or replace the entry for an address
    pub fn put(&mut self, address: &str, resource: StoredResource) {
        self.resources.insert(address.to_string(), resource);
    }

    /// Remove the entry for an address
    pub fn remove(&mut self, address: &str) -> Option<StoredResource> {
        self.resources.remove(address)
    }

    /// Tracked addresses in sorted order
    pub fn addresses(&self) -> Vec<String> {
        self.resources.keys().cloned().collect()
    }
}

/// Last-known state of one remote record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResource {
    /// Kind name
    pub kind: String,

    /// Remote identifier in string form
    pub id: String,

    /// Attributes as of the last successful read
    #[serde(default)]
    pub attributes: JsonObject,
}

impl StoredResource {
    /// Capture a reconciled resource
    pub fn capture(kind: impl Into<String>, data: &ResourceData) -> Self {
        Self {
            kind: kind.into(),
            id: data.id().to_string(),
            attributes: data.attributes().clone(),
        }
    }

    /// Rebuild resource data with the stored attributes as snapshot
    pub fn to_data(&self) -> ResourceData {
        ResourceData::restore(self.id.clone(), self.attributes.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Attributes;
    use serde_json::json;

    fn stored(kind: &str, id: &str) -> StoredResource {
        StoredResource {
            kind: kind.to_string(),
            id: id.to_string(),
            attributes: json!({"name": "web"}).as_object().cloned().unwrap(),
        }
    }

    #[test]
    fn test_state_default() {
        let state = State::new();
        assert!(state.resources.is_empty());
    }

    #[test]
    fn test_put_get_remove() {
        let mut state = State::new();
        assert!(state.get("web").is_none());

        state.put("web", stored("host", "4"));
        assert_eq!(state.get("web").unwrap().id, "4");

        state.put("web", stored("host", "9"));
        assert_eq!(state.get("web").unwrap().id, "9");

        assert!(state.remove("web").is_some());
        assert!(state.remove("web").is_none());
    }

    #[test]
    fn test_addresses_sorted() {
        let mut state = State::new();
        state.put("zeta", stored("group", "1"));
        state.put("alpha", stored("host", "2"));
        assert_eq!(state.addresses(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_capture_and_restore() {
        let mut data = ResourceData::from_attributes(
            json!({"name": "db", "tags": ["a"]}).as_object().cloned().unwrap(),
        );
        data.set_id(12);

        let entry = StoredResource::capture("host", &data);
        assert_eq!(entry.id, "12");

        let restored = entry.to_data();
        assert_eq!(restored.id(), "12");
        assert_eq!(restored.get_str("name"), Some("db"));
        assert!(!restored.has_changes(&["tags"]));
    }

    #[test]
    fn test_state_serialization() {
        let mut state = State::new();
        state.put("web", stored("host", "4"));

        let json = serde_json::to_string(&state).unwrap();
        let restored: State = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }
}
