//! URL check and web journey check kinds

use super::{write_record_id, ResourceKind};
use crate::model::{
    CheckCommon, CheckType, JourneyStep, UrlCheck, WebJourneyCheck, ACTION_TAG, DEFAULT_BROWSER,
    DEFAULT_EXPECTED_STATUS, DEFAULT_FREQUENCY_SECS, DEFAULT_RESULT_RETENTION_DAYS,
    DEFAULT_TIMEOUT_SECS, PAGE_CHECK_TAG,
};
use crate::schema::{
    str_set_value, variant_from_attributes, variant_to_attributes, Attributes, ResourceData,
    ResourceMapper,
};
use crate::types::{JsonObject, JsonValue};

const CHECK_ENDPOINT: &str = "checks";
const CHECK_UNORDERED: &[&str] = &["tags"];

/// HTTP(S) availability check
#[derive(Debug, Clone, Copy)]
pub struct UrlCheckResource;

/// Scripted browser journey check
#[derive(Debug, Clone, Copy)]
pub struct WebJourneyResource;

// ============================================================================
// Shared check fields
// ============================================================================

fn common_to_wire(data: &ResourceData) -> CheckCommon {
    CheckCommon {
        name: data.get_string_or("name", ""),
        frequency: data.get_i64("frequency").unwrap_or(DEFAULT_FREQUENCY_SECS),
        enabled: data.get_bool("enabled").unwrap_or(true),
        host_id: data.get_i64("host_id"),
        group_id: data.get_i64("group_id"),
        proxy_host_id: data.get_i64("proxy_host_id"),
        result_retention_days: data
            .get_i64("result_retention_days")
            .unwrap_or(DEFAULT_RESULT_RETENTION_DAYS),
        tags: data.get_str_set("tags"),
    }
}

fn common_from_wire(common: &CheckCommon, data: &mut ResourceData) {
    data.set("name", common.name.as_str());
    data.set("frequency", common.frequency);
    data.set("enabled", common.enabled);
    data.set_opt("host_id", common.host_id);
    data.set_opt("group_id", common.group_id);
    data.set_opt("proxy_host_id", common.proxy_host_id);
    data.set("result_retention_days", common.result_retention_days);
    data.set("tags", str_set_value(&common.tags));
}

// ============================================================================
// URL check
// ============================================================================

impl ResourceMapper for UrlCheckResource {
    type Record = UrlCheck;

    fn to_wire(data: &ResourceData) -> UrlCheck {
        UrlCheck {
            id: data.id_i64(),
            check_type: CheckType::Url,
            common: common_to_wire(data),
            url: data.get_string_or("url", ""),
            timeout: data.get_i64("timeout").unwrap_or(DEFAULT_TIMEOUT_SECS),
            expected_status: data
                .get_i64("expected_status")
                .unwrap_or(DEFAULT_EXPECTED_STATUS),
            contains_text: data.get_str("contains_text").map(String::from),
        }
    }

    fn from_wire(record: &UrlCheck, data: &mut ResourceData) {
        write_record_id(record.id, data);
        common_from_wire(&record.common, data);
        data.set("url", record.url.as_str());
        data.set("timeout", record.timeout);
        data.set("expected_status", record.expected_status);
        data.set_opt("contains_text", record.contains_text.as_deref());
    }

    fn record_id(record: &UrlCheck) -> i64 {
        record.id
    }
}

impl ResourceKind for UrlCheckResource {
    const NAME: &'static str = "url_check";
    const ENDPOINT: &'static str = CHECK_ENDPOINT;
    const SUBTYPE: Option<&'static str> = Some("url");
    const UNORDERED: &'static [&'static str] = CHECK_UNORDERED;

    fn record_subtype(record: &UrlCheck) -> Option<&'static str> {
        Some(record.check_type.as_str())
    }
}

// ============================================================================
// Web journey
// ============================================================================

fn step_to_wire(step: &JsonObject) -> JourneyStep {
    JourneyStep {
        name: step.get_string_or("name", ""),
        actions: step
            .get_object_list("actions")
            .into_iter()
            .filter_map(|action| variant_from_attributes(ACTION_TAG, action))
            .collect(),
        page_checks: step
            .get_object_list("page_checks")
            .into_iter()
            .filter_map(|check| variant_from_attributes(PAGE_CHECK_TAG, check))
            .collect(),
    }
}

fn step_from_wire(step: &JourneyStep) -> JsonValue {
    let mut element = JsonObject::new();
    element.insert("name".to_string(), JsonValue::from(step.name.as_str()));
    element.insert(
        "actions".to_string(),
        step.actions
            .iter()
            .map(|action| variant_to_attributes(ACTION_TAG, action))
            .collect(),
    );
    element.insert(
        "page_checks".to_string(),
        step.page_checks
            .iter()
            .map(|check| variant_to_attributes(PAGE_CHECK_TAG, check))
            .collect(),
    );
    JsonValue::Object(element)
}

impl ResourceMapper for WebJourneyResource {
    type Record = WebJourneyCheck;

    fn to_wire(data: &ResourceData) -> WebJourneyCheck {
        WebJourneyCheck {
            id: data.id_i64(),
            check_type: CheckType::WebJourney,
            common: common_to_wire(data),
            browser: data.get_string_or("browser", DEFAULT_BROWSER),
            steps: data
                .get_object_list("steps")
                .into_iter()
                .map(step_to_wire)
                .collect(),
        }
    }

    fn from_wire(record: &WebJourneyCheck, data: &mut ResourceData) {
        write_record_id(record.id, data);
        common_from_wire(&record.common, data);
        data.set("browser", record.browser.as_str());
        data.set(
            "steps",
            record.steps.iter().map(step_from_wire).collect::<JsonValue>(),
        );
    }

    fn record_id(record: &WebJourneyCheck) -> i64 {
        record.id
    }
}

impl ResourceKind for WebJourneyResource {
    const NAME: &'static str = "web_journey_check";
    const ENDPOINT: &'static str = CHECK_ENDPOINT;
    const SUBTYPE: Option<&'static str> = Some("web_journey");
    const UNORDERED: &'static [&'static str] = CHECK_UNORDERED;

    fn record_subtype(record: &WebJourneyCheck) -> Option<&'static str> {
        Some(record.check_type.as_str())
    }
}
