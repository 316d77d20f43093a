//! State management module
//!
//! Tracks which remote record each declared resource is bound to, with
//! the attributes seen at the last successful read. State is persisted
//! between runs so plans can be computed against it.
//!
//! # Overview
//!
//! The state module provides:
//! - `State` - Tracked resources keyed by address
//! - `StoredResource` - Kind, identifier and attributes of one record
//! - `StateManager` - File-based state persistence

mod manager;
mod types;

pub use manager::StateManager;
pub use types::{State, StoredResource};

#[cfg(test)]
mod manager_tests;
