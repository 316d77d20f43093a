//! Resource state and mapping module
//!
//! # Overview
//!
//! The schema module provides:
//! - `ResourceData` - Local declared state (string id + attribute map)
//! - `Attributes` - Typed accessors shared by top-level and nested maps
//! - `ResourceMapper` - Conversion between local state and wire records
//! - Helpers for tagged variants and unordered sets

mod data;
mod mapper;

pub use data::{Attributes, ResourceData};
pub use mapper::{
    id_set_value, str_set_value, variant_from_attributes, variant_to_attributes,
    ResourceMapper, VARIANT_TYPE_ATTR,
};
