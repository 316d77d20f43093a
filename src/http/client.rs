//! API client for the monitoring service
//!
//! A thin transport wrapper that:
//! - Attaches the credential and JSON content headers to every request
//! - Serializes request bodies as JSON
//! - Classifies outcomes into success, not-found and hard errors
//!
//! There is no retry and no caching. A transport failure or a timeout
//! surfaces to the caller as-is.

use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result};
use crate::types::Method;
use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const JSON_CONTENT_TYPE: &str = "application/json";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Overall request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("monitor-provider/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, in order
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<Value>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Classified outcome of a successful exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawResult {
    /// HTTP 200 with the raw payload (possibly empty)
    Body(Bytes),
    /// HTTP 404: the record does not exist
    NotFound,
}

impl RawResult {
    /// Whether the remote reported the record as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, RawResult::NotFound)
    }

    /// Raw payload; empty for not-found
    pub fn bytes(&self) -> &[u8] {
        match self {
            RawResult::Body(body) => body,
            RawResult::NotFound => &[],
        }
    }

    /// Payload as lossy UTF-8 text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.bytes()).into_owned()
    }

    /// Decode the payload as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(self.bytes())?)
    }
}

/// HTTP client for the monitoring API
///
/// Holds only immutable configuration and the shared reqwest handle,
/// so clones can be used concurrently from independent operations.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Authenticator,
}

impl ApiClient {
    /// Create a new client without authentication
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        Self::with_auth(config, AuthConfig::None)
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, auth_config: AuthConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        url::Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            config,
            authenticator: Authenticator::new(auth_config),
        })
    }

    /// Base URL every path is resolved against
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<RawResult> {
        self.execute(Method::GET, path, RequestConfig::default())
            .await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResult> {
        let config = query
            .iter()
            .fold(RequestConfig::new(), |config, (key, value)| {
                config.query(*key, *value)
            });
        self.execute(Method::GET, path, config).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<RawResult> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::PUT, path, RequestConfig::new().json(body))
            .await
    }

    /// Make a POST request with a JSON body
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<RawResult> {
        let body = serde_json::to_value(body)?;
        self.execute(Method::POST, path, RequestConfig::new().json(body))
            .await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<RawResult> {
        self.execute(Method::DELETE, path, RequestConfig::default())
            .await
    }

    /// Execute a request and classify the outcome
    ///
    /// 200 yields the body, 404 yields [`RawResult::NotFound`], any other
    /// status is an [`Error::HttpStatus`] carrying the body verbatim.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<RawResult> {
        let full_url = self.build_url(path);

        let mut req = self
            .client
            .request(method.into(), &full_url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        if let Some(ref body) = config.body {
            req = req.body(serde_json::to_vec(body)?);
        }

        req = self.authenticator.apply(req);

        let response = req.send().await?;
        let status = response.status();

        match status {
            StatusCode::OK => {
                let body = response.bytes().await?;
                debug!("{} {} -> 200 ({} bytes)", method, full_url, body.len());
                Ok(RawResult::Body(body))
            }
            StatusCode::NOT_FOUND => {
                debug!("{} {} -> 404", method, full_url);
                Ok(RawResult::NotFound)
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                debug!("{} {} -> {}", method, full_url, status.as_u16());
                Err(Error::http_status(status.as_u16(), body))
            }
        }
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("auth", &self.authenticator.config().scheme())
            .finish_non_exhaustive()
    }
}
