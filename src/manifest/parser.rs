//! YAML parser for manifests
//!
//! Parses and validates manifest files.

use super::types::Manifest;
use crate::error::{Error, Result};
use crate::resource::{is_known_kind, KINDS};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9_.-]*$").expect("name pattern compiles"));

/// Load a manifest from a file path
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Manifest> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read manifest '{}': {}",
            path.display(),
            e
        ))
    })?;
    load_manifest_from_str(&content)
}

/// Load a manifest from a YAML string
pub fn load_manifest_from_str(yaml: &str) -> Result<Manifest> {
    let manifest: Manifest = serde_yaml::from_str(yaml)?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

/// Validate a manifest
pub fn validate_manifest(manifest: &Manifest) -> Result<()> {
    let mut names = HashSet::new();
    for resource in &manifest.resources {
        validate_entry("resource", &resource.kind, &resource.name)?;
        if !names.insert(resource.name.as_str()) {
            return Err(Error::config(format!(
                "Duplicate resource name: {}",
                resource.name
            )));
        }
    }

    let mut names = HashSet::new();
    for lookup in &manifest.data {
        validate_entry("data", &lookup.kind, &lookup.name)?;
        if lookup.query.trim().is_empty() {
            return Err(Error::config(format!(
                "Data '{}' query cannot be empty",
                lookup.name
            )));
        }
        if !names.insert(lookup.name.as_str()) {
            return Err(Error::config(format!("Duplicate data name: {}", lookup.name)));
        }
    }

    Ok(())
}

fn validate_entry(section: &str, kind: &str, name: &str) -> Result<()> {
    if !NAME_PATTERN.is_match(name) {
        return Err(Error::config(format!(
            "Invalid {section} name '{name}': use letters, digits, '_', '.' or '-'"
        )));
    }

    if !is_known_kind(kind) {
        return Err(Error::config(format!(
            "{section} '{name}' has unknown kind '{kind}'. Supported kinds: {}",
            KINDS.join(", ")
        )));
    }

    Ok(())
}
