//! Authentication module
//!
//! Supports: API Key (header), Bearer, Basic
//!
//! The `Authenticator` attaches the credential to every request the
//! API client sends.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, DEFAULT_AUTH_HEADER};

#[cfg(test)]
mod tests;
