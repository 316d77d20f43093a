//! Wire records exchanged with the monitoring API
//!
//! Every record is keyed by a remote-assigned integer id. References to
//! other records (host, group, proxy host) are plain ids and are not
//! checked locally.

mod check;
mod host;
mod journey;
mod maintenance;

pub use check::{
    CheckCommon, CheckType, UrlCheck, WebJourneyCheck, DEFAULT_BROWSER, DEFAULT_EXPECTED_STATUS,
    DEFAULT_FREQUENCY_SECS, DEFAULT_RESULT_RETENTION_DAYS, DEFAULT_TIMEOUT_SECS,
};
pub use host::{Group, Host};
pub use journey::{JourneyAction, JourneyStep, PageCheck, ACTION_TAG, PAGE_CHECK_TAG};
pub use maintenance::{normalize_timestamp, MaintenancePeriod, Suppression, DEFAULT_TIMEZONE};

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &i64) -> bool {
    *value == 0
}
