//! Maintenance period kind

use super::{write_record_id, ResourceKind};
use crate::model::{normalize_timestamp, MaintenancePeriod, Suppression, DEFAULT_TIMEZONE};
use crate::schema::{id_set_value, Attributes, ResourceData, ResourceMapper};
use crate::types::{JsonObject, JsonValue};

/// Alert suppression window
#[derive(Debug, Clone, Copy)]
pub struct MaintenanceResource;

fn suppression_from_wire(suppression: &Suppression) -> JsonValue {
    let mut element = JsonObject::new();
    element.insert(
        "alert_type".to_string(),
        JsonValue::from(suppression.alert_type.as_str()),
    );
    if let Some(check_id) = suppression.check_id {
        element.insert("check_id".to_string(), JsonValue::from(check_id));
    }
    JsonValue::Object(element)
}

impl ResourceMapper for MaintenanceResource {
    type Record = MaintenancePeriod;

    fn to_wire(data: &ResourceData) -> MaintenancePeriod {
        MaintenancePeriod {
            id: data.id_i64(),
            name: data.get_string_or("name", ""),
            start: normalize_timestamp(data.get_str("start").unwrap_or("")),
            end: normalize_timestamp(data.get_str("end").unwrap_or("")),
            timezone: data.get_string_or("timezone", DEFAULT_TIMEZONE),
            check_ids: data.get_i64_set("check_ids"),
            host_ids: data.get_i64_set("host_ids"),
            suppressions: data
                .get_object_list("suppressions")
                .into_iter()
                .map(|element| Suppression {
                    alert_type: element.get_string_or("alert_type", ""),
                    check_id: element.get_i64("check_id"),
                })
                .collect(),
        }
    }

    fn from_wire(record: &MaintenancePeriod, data: &mut ResourceData) {
        write_record_id(record.id, data);
        data.set("name", record.name.as_str());
        data.set("start", normalize_timestamp(&record.start));
        data.set("end", normalize_timestamp(&record.end));
        data.set("timezone", record.timezone.as_str());
        data.set("check_ids", id_set_value(&record.check_ids));
        data.set("host_ids", id_set_value(&record.host_ids));
        data.set(
            "suppressions",
            record
                .suppressions
                .iter()
                .map(suppression_from_wire)
                .collect::<JsonValue>(),
        );
    }

    fn record_id(record: &MaintenancePeriod) -> i64 {
        record.id
    }
}

impl ResourceKind for MaintenanceResource {
    const NAME: &'static str = "maintenance";
    const ENDPOINT: &'static str = "maintenance";
    const UNORDERED: &'static [&'static str] = &["check_ids", "host_ids"];
}
