//! Web journey steps, actions and page checks
//!
//! Actions and page checks are sum types: each value is exactly one
//! variant, selected by its tag on the wire.

use serde::{Deserialize, Serialize};

/// Wire field naming the action variant
pub const ACTION_TAG: &str = "action_type";

/// Wire field naming the page check variant
pub const PAGE_CHECK_TAG: &str = "page_check_type";

/// One step of a journey, run in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyStep {
    pub name: String,
    #[serde(default)]
    pub actions: Vec<JourneyAction>,
    #[serde(default)]
    pub page_checks: Vec<PageCheck>,
}

/// Browser interaction performed during a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action_type", rename_all = "snake_case")]
pub enum JourneyAction {
    Navigate {
        url: String,
    },
    Click {
        selector: String,
    },
    TypeText {
        selector: String,
        text: String,
    },
    SelectOption {
        selector: String,
        value: String,
    },
    Wait {
        milliseconds: i64,
    },
    ExecuteScript {
        script: String,
    },
    SetCookie {
        name: String,
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        domain: Option<String>,
    },
}

/// Assertion evaluated against the page after a step's actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "page_check_type", rename_all = "snake_case")]
pub enum PageCheck {
    TextPresent { text: String },
    TextAbsent { text: String },
    ElementPresent { selector: String },
    TitleEquals { title: String },
    MaxLoadTime { milliseconds: i64 },
}
