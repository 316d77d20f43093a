//! Check records (URL and web journey)

use super::journey::JourneyStep;
use super::is_zero;
use serde::{Deserialize, Serialize};

/// Default number of days check results are retained
pub const DEFAULT_RESULT_RETENTION_DAYS: i64 = 366;

/// Default interval between check runs, in seconds
pub const DEFAULT_FREQUENCY_SECS: i64 = 300;

/// Default per-run timeout, in seconds
pub const DEFAULT_TIMEOUT_SECS: i64 = 30;

/// Default HTTP status a URL check expects
pub const DEFAULT_EXPECTED_STATUS: i64 = 200;

/// Default browser for web journeys
pub const DEFAULT_BROWSER: &str = "chrome";

/// Check discriminator, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckType {
    #[default]
    Url,
    WebJourney,
}

impl CheckType {
    /// Wire name of the check type
    pub fn as_str(self) -> &'static str {
        match self {
            CheckType::Url => "url",
            CheckType::WebJourney => "web_journey",
        }
    }
}

/// Fields shared by every check type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckCommon {
    pub name: String,
    /// Seconds between runs
    pub frequency: i64,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_host_id: Option<i64>,
    pub result_retention_days: i64,
    pub tags: Vec<String>,
}

impl Default for CheckCommon {
    fn default() -> Self {
        Self {
            name: String::new(),
            frequency: DEFAULT_FREQUENCY_SECS,
            enabled: true,
            host_id: None,
            group_id: None,
            proxy_host_id: None,
            result_retention_days: DEFAULT_RESULT_RETENTION_DAYS,
            tags: Vec::new(),
        }
    }
}

/// HTTP(S) availability check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlCheck {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    pub check_type: CheckType,
    #[serde(flatten)]
    pub common: CheckCommon,
    pub url: String,
    /// Seconds before a run is failed
    pub timeout: i64,
    pub expected_status: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_text: Option<String>,
}

impl Default for UrlCheck {
    fn default() -> Self {
        Self {
            id: 0,
            check_type: CheckType::Url,
            common: CheckCommon::default(),
            url: String::new(),
            timeout: DEFAULT_TIMEOUT_SECS,
            expected_status: DEFAULT_EXPECTED_STATUS,
            contains_text: None,
        }
    }
}

/// Scripted multi-step browser check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebJourneyCheck {
    #[serde(skip_serializing_if = "is_zero")]
    pub id: i64,
    pub check_type: CheckType,
    #[serde(flatten)]
    pub common: CheckCommon,
    pub browser: String,
    pub steps: Vec<JourneyStep>,
}

impl Default for WebJourneyCheck {
    fn default() -> Self {
        Self {
            id: 0,
            check_type: CheckType::WebJourney,
            common: CheckCommon::default(),
            browser: DEFAULT_BROWSER.to_string(),
            steps: Vec::new(),
        }
    }
}
