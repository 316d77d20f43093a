//! Mapping between local state and wire records

use super::data::{Attributes, ResourceData};
use crate::types::{JsonObject, JsonValue};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Bidirectional conversion between [`ResourceData`] and a wire record
pub trait ResourceMapper {
    /// Wire representation of one record
    type Record: Serialize + DeserializeOwned + Clone + std::fmt::Debug + Send + Sync;

    /// Build a record from declared state, filling defaults for absent
    /// optional attributes
    fn to_wire(data: &ResourceData) -> Self::Record;

    /// Write every record field back into local state, including the id
    fn from_wire(record: &Self::Record, data: &mut ResourceData);

    /// Remote identifier carried by a record (0 if none)
    fn record_id(record: &Self::Record) -> i64;

    /// Declared attributes in the shape `from_wire` writes them
    ///
    /// Runs the declaration through `to_wire` then `from_wire`, so nested
    /// defaults are filled in and normalized fields are normalized. Only
    /// declared keys are returned; keys the mapper drops keep their
    /// declared value.
    fn canonical(declared: &JsonObject) -> JsonObject {
        let record = Self::to_wire(&ResourceData::from_attributes(declared.clone()));
        let mut canonical = ResourceData::new();
        Self::from_wire(&record, &mut canonical);

        declared
            .iter()
            .map(|(key, value)| {
                let value = canonical.attr(key).unwrap_or(value).clone();
                (key.clone(), value)
            })
            .collect()
    }
}

/// Name of the attribute selecting a variant in local state
pub const VARIANT_TYPE_ATTR: &str = "type";

/// Decode a tagged variant from its local form
///
/// The local form is `{"type": "<tag>", "<tag>": {..payload..}}`. The
/// wire enum is internally tagged by `tag_field`. Returns `None`, with a
/// warning, if the type is unknown or its payload block is missing.
pub fn variant_from_attributes<T: DeserializeOwned>(
    tag_field: &str,
    element: &JsonObject,
) -> Option<T> {
    let Some(tag) = element.get_str(VARIANT_TYPE_ATTR) else {
        warn!("Skipping element without a '{VARIANT_TYPE_ATTR}' attribute");
        return None;
    };

    let Some(payload) = element.get_object(tag) else {
        warn!("Skipping '{tag}' element: no '{tag}' block declared");
        return None;
    };

    let mut wire = payload.clone();
    wire.insert(tag_field.to_string(), JsonValue::String(tag.to_string()));

    match serde_json::from_value(JsonValue::Object(wire)) {
        Ok(variant) => Some(variant),
        Err(e) => {
            warn!("Skipping '{tag}' element: {e}");
            None
        }
    }
}

/// Encode a tagged variant into its local form
pub fn variant_to_attributes<T: Serialize>(tag_field: &str, variant: &T) -> JsonValue {
    let mut payload = match serde_json::to_value(variant) {
        Ok(JsonValue::Object(map)) => map,
        _ => JsonObject::new(),
    };

    let tag = match payload.remove(tag_field) {
        Some(JsonValue::String(tag)) => tag,
        _ => return JsonValue::Null,
    };

    let mut element = JsonObject::new();
    element.insert(VARIANT_TYPE_ATTR.to_string(), JsonValue::String(tag.clone()));
    element.insert(tag, JsonValue::Object(payload));
    JsonValue::Object(element)
}

/// Local form of a sorted integer set
pub fn id_set_value(ids: &[i64]) -> JsonValue {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    JsonValue::from(ids)
}

/// Local form of a sorted string set
pub fn str_set_value(values: &[String]) -> JsonValue {
    let mut values = values.to_vec();
    values.sort();
    values.dedup();
    JsonValue::from(values)
}
