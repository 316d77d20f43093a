//! Auth configuration types
//!
//! The monitoring API authenticates every request with a single static
//! credential; these types describe how that credential is attached.

/// Default header carrying the API credential
pub const DEFAULT_AUTH_HEADER: &str = "Authorization";

/// Authentication configuration
#[derive(Clone, Default)]
pub enum AuthConfig {
    /// No authentication (tests and local mocks)
    #[default]
    None,

    /// API key sent in a header
    ApiKey {
        /// Header name (defaults to `Authorization`)
        header_name: Option<String>,
        /// Prefix to add before the value (e.g., "Token ")
        prefix: Option<String>,
        /// The API key value
        value: String,
    },

    /// Bearer token authentication
    Bearer {
        /// The bearer token
        token: String,
    },

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },
}

impl AuthConfig {
    /// API key in the default header, no prefix
    pub fn api_key(value: impl Into<String>) -> Self {
        Self::ApiKey {
            header_name: None,
            prefix: None,
            value: value.into(),
        }
    }

    /// Short name of the auth scheme, safe to log
    pub fn scheme(&self) -> &'static str {
        match self {
            AuthConfig::None => "none",
            AuthConfig::ApiKey { .. } => "api_key",
            AuthConfig::Bearer { .. } => "bearer",
            AuthConfig::Basic { .. } => "basic",
        }
    }
}

// Credentials never reach logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthConfig::None => f.write_str("None"),
            AuthConfig::ApiKey {
                header_name,
                prefix,
                ..
            } => f
                .debug_struct("ApiKey")
                .field("header_name", header_name)
                .field("prefix", prefix)
                .field("value", &"<redacted>")
                .finish(),
            AuthConfig::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
            AuthConfig::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
        }
    }
}
