//! Error types for the monitor provider
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Remote diagnostics are carried verbatim: a rejected request keeps the
//! status code and the raw response body, and nothing here rewords them.

use thiserror::Error;

/// The main error type for the monitor provider
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Remote Rejections
    // ============================================================================
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to delete {kind} {id}: {body}")]
    DeleteRejected { kind: String, id: i64, body: String },

    #[error("Remote did not return an identifier for new {kind}")]
    MissingIdentifier { kind: String },

    // ============================================================================
    // Lifecycle Errors
    // ============================================================================
    #[error("{kind} has not been created yet")]
    NotCreated { kind: String },

    #[error("Unknown resource kind: {kind}")]
    UnknownKind { kind: String },

    #[error("{kind} {id} is a '{found}' record")]
    KindMismatch { kind: String, id: i64, found: String },

    // ============================================================================
    // Lookup Errors
    // ============================================================================
    #[error("Ambiguous {kind} query '{query}': {count} records matched, expected exactly one")]
    AmbiguousSearch {
        kind: String,
        query: String,
        count: usize,
    },

    #[error("No {kind} matched '{query}'")]
    NoMatch { kind: String, query: String },

    // ============================================================================
    // State Errors
    // ============================================================================
    #[error("State error: {message}")]
    State { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Create an unknown kind error
    pub fn unknown_kind(kind: impl Into<String>) -> Self {
        Self::UnknownKind { kind: kind.into() }
    }

    /// Create a not-created error
    pub fn not_created(kind: impl Into<String>) -> Self {
        Self::NotCreated { kind: kind.into() }
    }

    /// Create a no-match error
    pub fn no_match(kind: impl Into<String>, query: impl Into<String>) -> Self {
        Self::NoMatch {
            kind: kind.into(),
            query: query.into(),
        }
    }

    /// Check if this error came from the transport rather than the remote
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_) | Error::InvalidUrl(_))
    }

    /// Status code of a remote rejection, if this is one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for the monitor provider
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
