//! Provider configuration
//!
//! The `provider:` block of a manifest. Each connection value falls back
//! to an environment variable when not declared, and a value missing from
//! both is an error.

use crate::auth::{AuthConfig, DEFAULT_AUTH_HEADER};
use crate::error::{Error, Result};
use crate::http::{ApiClient, HttpClientConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the API base URL
pub const BASE_URL_ENV: &str = "MONITOR_BASE_URL";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "MONITOR_API_KEY";

/// Overall request timeout when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Provider Config
// ============================================================================

/// Connection settings for the monitoring API
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API base URL
    #[serde(default)]
    pub base_url: Option<String>,

    /// API key sent with every request
    #[serde(default)]
    pub api_key: Option<String>,

    /// Header carrying the API key
    #[serde(default)]
    pub auth_header: Option<String>,

    /// Overall request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("auth_header", &self.auth_header)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ProviderConfig {
    /// Fill unset values from the process environment
    pub fn resolve(self) -> Result<Self> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Fill unset values from `lookup`, then check required ones
    pub fn resolve_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        self.base_url = non_empty(self.base_url).or_else(|| non_empty(lookup(BASE_URL_ENV)));
        self.api_key = non_empty(self.api_key).or_else(|| non_empty(lookup(API_KEY_ENV)));

        if self.base_url.is_none() {
            return Err(Error::missing_field("base_url"));
        }
        if self.api_key.is_none() {
            return Err(Error::missing_field("api_key"));
        }
        if self.timeout_secs == Some(0) {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }

        Ok(self)
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Authentication derived from the API key
    pub fn auth(&self) -> AuthConfig {
        match &self.api_key {
            Some(key) => AuthConfig::ApiKey {
                header_name: Some(
                    self.auth_header
                        .clone()
                        .unwrap_or_else(|| DEFAULT_AUTH_HEADER.to_string()),
                ),
                prefix: None,
                value: key.clone(),
            },
            None => AuthConfig::None,
        }
    }

    /// HTTP client settings
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(self.base_url.clone().unwrap_or_default())
            .timeout(self.timeout());
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        builder.build()
    }

    /// Resolve and build the API client
    pub fn build_client(&self) -> Result<ApiClient> {
        let resolved = self.clone().resolve()?;
        ApiClient::with_auth(resolved.http_config(), resolved.auth())
    }
}
