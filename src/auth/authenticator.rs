//! Authenticator implementation
//!
//! Applies the configured credential to outgoing requests.

use super::types::{AuthConfig, DEFAULT_AUTH_HEADER};
use reqwest::RequestBuilder;

/// Authenticator handles applying authentication to HTTP requests
#[derive(Debug, Clone)]
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.config {
            AuthConfig::None => req,

            AuthConfig::ApiKey {
                header_name,
                prefix,
                value,
            } => {
                let header = header_name.as_deref().unwrap_or(DEFAULT_AUTH_HEADER);
                let val = format!("{}{}", prefix.as_deref().unwrap_or(""), value);
                req.header(header, val)
            }

            AuthConfig::Bearer { token } => req.bearer_auth(token),

            AuthConfig::Basic { username, password } => {
                req.basic_auth(username, Some(password))
            }
        }
    }

    /// Get the auth configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}
