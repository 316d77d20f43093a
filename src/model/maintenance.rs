//! Maintenance period records

use super::is_zero;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Default timezone for maintenance windows
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Window during which alerts are suppressed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MaintenancePeriod {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    pub name: String,
    /// RFC 3339 start time
    pub start: String,
    /// RFC 3339 end time
    pub end: String,
    pub timezone: String,
    pub check_ids: Vec<i64>,
    pub host_ids: Vec<i64>,
    pub suppressions: Vec<Suppression>,
}

/// Alert type silenced during the window, optionally for one check only
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Suppression {
    pub alert_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_id: Option<i64>,
}

/// Canonical UTC form of an RFC 3339 timestamp
///
/// Unparseable input is returned unchanged; the remote validates it.
pub fn normalize_timestamp(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(ts) => ts
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_timestamp() {
        assert_eq!(
            normalize_timestamp("2026-03-01T02:00:00+02:00"),
            "2026-03-01T00:00:00Z"
        );
        assert_eq!(
            normalize_timestamp("2026-03-01T00:00:00Z"),
            "2026-03-01T00:00:00Z"
        );
        assert_eq!(normalize_timestamp("next tuesday"), "next tuesday");
    }
}
