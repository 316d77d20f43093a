//! Local declared state for one resource instance
//!
//! `ResourceData` is the host-facing side of the mapper: a string
//! identifier plus a JSON attribute map. Integer identifiers live only in
//! wire records; the string form is confined to this type.

use crate::types::{JsonObject, JsonValue, Presence};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Typed read access over an attribute map
///
/// Implemented for the top-level [`ResourceData`] and for nested
/// element objects (journey steps, actions, suppressions). Nulls read
/// as absent.
pub trait Attributes {
    /// Raw value for a key
    fn attr(&self, key: &str) -> Option<&JsonValue>;

    /// Non-null value for a key
    fn get(&self, key: &str) -> Option<&JsonValue> {
        self.attr(key).filter(|v| !v.is_null())
    }

    /// String attribute
    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    /// String attribute, or a default
    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_str(key).unwrap_or(default).to_string()
    }

    /// Integer attribute; numeric strings are accepted
    fn get_i64(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            JsonValue::Number(n) => n.as_i64(),
            JsonValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Boolean attribute
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }

    /// List attribute; empty when absent
    fn get_list(&self, key: &str) -> &[JsonValue] {
        match self.get(key) {
            Some(JsonValue::Array(items)) => items,
            _ => &[],
        }
    }

    /// List of strings in declaration order
    fn get_str_list(&self, key: &str) -> Vec<String> {
        self.get_list(key)
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()
    }

    /// Set of strings, sorted and deduplicated
    fn get_str_set(&self, key: &str) -> Vec<String> {
        self.get_str_list(key)
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Set of integers, sorted and deduplicated
    fn get_i64_set(&self, key: &str) -> Vec<i64> {
        self.get_list(key)
            .iter()
            .filter_map(|v| match v {
                JsonValue::Number(n) => n.as_i64(),
                JsonValue::String(s) => s.trim().parse().ok(),
                _ => None,
            })
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// List of nested objects in declaration order
    fn get_object_list(&self, key: &str) -> Vec<&JsonObject> {
        self.get_list(key)
            .iter()
            .filter_map(JsonValue::as_object)
            .collect()
    }

    /// Nested object
    fn get_object(&self, key: &str) -> Option<&JsonObject> {
        self.get(key)?.as_object()
    }
}

impl Attributes for JsonObject {
    fn attr(&self, key: &str) -> Option<&JsonValue> {
        serde_json::Map::get(self, key)
    }
}

/// Declared or last-known state of one resource instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    /// Remote identifier in string form; empty until created
    #[serde(default)]
    id: String,

    /// Attribute values
    #[serde(default)]
    attributes: JsonObject,

    /// Snapshot taken at the last successful read
    #[serde(skip)]
    prior: Option<JsonObject>,
}

impl Attributes for ResourceData {
    fn attr(&self, key: &str) -> Option<&JsonValue> {
        self.attributes.get(key)
    }
}

impl ResourceData {
    /// Create empty state with no identifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state from declared attributes
    pub fn from_attributes(attributes: JsonObject) -> Self {
        Self {
            id: String::new(),
            attributes,
            prior: None,
        }
    }

    /// Create state carrying only an identifier (import)
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: JsonObject::new(),
            prior: None,
        }
    }

    /// Restore previously persisted state; the attributes become the
    /// last-known snapshot
    pub fn restore(id: impl Into<String>, attributes: JsonObject) -> Self {
        Self {
            id: id.into(),
            prior: Some(attributes.clone()),
            attributes,
        }
    }

    /// Identifier as stored locally
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Identifier as an integer
    ///
    /// Empty, unparseable or non-positive identifiers read as 0, meaning
    /// "not created yet".
    pub fn id_i64(&self) -> i64 {
        self.id
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .unwrap_or(0)
    }

    /// Whether a remote record is believed to exist
    pub fn presence(&self) -> Presence {
        if self.id_i64() == 0 {
            Presence::Absent
        } else {
            Presence::Present
        }
    }

    /// Assign the remote identifier
    pub fn set_id(&mut self, id: i64) {
        self.id = id.to_string();
    }

    /// Detach from the remote record
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    /// All attributes
    pub fn attributes(&self) -> &JsonObject {
        &self.attributes
    }

    /// Consume into the attribute map
    pub fn into_attributes(self) -> JsonObject {
        self.attributes
    }

    /// Set an attribute
    pub fn set(&mut self, key: &str, value: impl Into<JsonValue>) {
        self.attributes.insert(key.to_string(), value.into());
    }

    /// Set an attribute only when a value is present
    ///
    /// Absent optional values never overwrite an existing declaration.
    pub fn set_opt<T: Into<JsonValue>>(&mut self, key: &str, value: Option<T>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    /// Overlay declared attributes on top of the current values
    pub fn overlay(&mut self, declared: &JsonObject) {
        for (key, value) in declared {
            self.attributes.insert(key.clone(), value.clone());
        }
    }

    /// Record the current attributes as the last-known snapshot
    pub fn commit(&mut self) {
        self.prior = Some(self.attributes.clone());
    }

    /// Last-known snapshot, if any
    pub fn prior(&self) -> Option<&JsonObject> {
        self.prior.as_ref()
    }

    /// Attribute keys whose value differs from the last-known snapshot
    ///
    /// Keys listed in `unordered` are compared as sets. Without a snapshot
    /// every attribute counts as changed.
    pub fn changed_attributes(&self, unordered: &[&str]) -> Vec<String> {
        let Some(prior) = &self.prior else {
            return self.attributes.keys().cloned().collect();
        };

        let keys: BTreeSet<&String> = self.attributes.keys().chain(prior.keys()).collect();
        keys.into_iter()
            .filter(|key| {
                let current = self.attributes.get(*key).unwrap_or(&JsonValue::Null);
                let previous = prior.get(*key).unwrap_or(&JsonValue::Null);
                if unordered.contains(&key.as_str()) {
                    match (normalized_set(current), normalized_set(previous)) {
                        (Some(current), Some(previous)) => current != previous,
                        _ => current != previous,
                    }
                } else {
                    current != previous
                }
            })
            .cloned()
            .collect()
    }

    /// Whether any attribute changed since the last snapshot
    pub fn has_changes(&self, unordered: &[&str]) -> bool {
        !self.changed_attributes(unordered).is_empty()
    }
}

/// Order-insensitive form of a list value
fn normalized_set(value: &JsonValue) -> Option<BTreeSet<String>> {
    match value {
        JsonValue::Null => Some(BTreeSet::new()),
        JsonValue::Array(items) => Some(items.iter().map(ToString::to_string).collect()),
        _ => None,
    }
}
