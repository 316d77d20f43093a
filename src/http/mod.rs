//! HTTP client module
//!
//! Provides the authenticated JSON client used by every reconciler.
//!
//! # Outcome classification
//!
//! - **200**: success, raw payload returned (possibly empty)
//! - **404**: [`RawResult::NotFound`], not an error
//! - **anything else**: [`crate::Error::HttpStatus`] with the body verbatim

mod client;

pub use client::{ApiClient, HttpClientConfig, HttpClientConfigBuilder, RawResult, RequestConfig};

#[cfg(test)]
mod tests;
