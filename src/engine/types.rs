//! Engine types
//!
//! Planned changes, apply statistics and lookup results.

use crate::datasource::LookupSet;
use crate::schema::ResourceData;
use serde::Serialize;
use std::fmt;

/// What apply will do for one address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create a new remote record
    Create,
    /// Push changed attributes to the existing record
    Update,
    /// Delete the existing record and create one of another kind
    Replace,
    /// Delete a record that is no longer declared
    Delete,
    /// Nothing to do
    NoOp,
}

impl Action {
    /// Short marker for human-readable output
    pub fn symbol(self) -> &'static str {
        match self {
            Action::Create => "+",
            Action::Update => "~",
            Action::Replace => "-/+",
            Action::Delete => "-",
            Action::NoOp => " ",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Replace => "replace",
            Action::Delete => "delete",
            Action::NoOp => "no-op",
        };
        f.write_str(name)
    }
}

/// One planned step
#[derive(Debug, Clone, Serialize)]
pub struct PlannedChange {
    /// Address in state
    pub address: String,

    /// Kind after the change (the tracked kind for deletes)
    pub kind: String,

    /// Step to take
    pub action: Action,

    /// Remote identifier the step acts on, if tracked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Kind being replaced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced_kind: Option<String>,

    /// Attributes that differ from the remote record
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changed: Vec<String>,

    /// Working state for the step
    #[serde(skip)]
    pub(crate) data: ResourceData,
}

/// Outcome of one manifest lookup
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LookupResult {
    /// Single-result lookup; `None` when nothing matched and the kind allows it
    One(Option<ResourceData>),
    /// Many-result lookup
    Many(LookupSet),
}

/// Named lookup result
#[derive(Debug, Clone, Serialize)]
pub struct LookupOutcome {
    /// Data block name
    pub name: String,
    /// Kind searched
    pub kind: String,
    /// Result
    pub result: LookupResult,
}

/// Full plan for a manifest
#[derive(Debug, Clone, Default, Serialize)]
pub struct Plan {
    /// Steps for declared resources in manifest order, then deletes
    pub changes: Vec<PlannedChange>,

    /// Evaluated data blocks
    pub data: Vec<LookupOutcome>,
}

impl Plan {
    /// Number of steps with the given action
    pub fn count(&self, action: Action) -> usize {
        self.changes.iter().filter(|c| c.action == action).count()
    }

    /// Whether applying the plan would change anything
    pub fn has_changes(&self) -> bool {
        self.changes.iter().any(|c| c.action != Action::NoOp)
    }

    /// Step for an address
    pub fn change(&self, address: &str) -> Option<&PlannedChange> {
        self.changes.iter().find(|c| c.address == address)
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} to create, {} to update, {} to replace, {} to delete, {} unchanged",
            self.count(Action::Create),
            self.count(Action::Update),
            self.count(Action::Replace),
            self.count(Action::Delete),
            self.count(Action::NoOp)
        )
    }
}

/// Statistics from an apply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyStats {
    /// Records created
    pub created: usize,
    /// Records updated
    pub updated: usize,
    /// Records replaced
    pub replaced: usize,
    /// Records deleted
    pub deleted: usize,
    /// Records left as they were
    pub unchanged: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ApplyStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a completed step
    pub fn record(&mut self, action: Action) {
        match action {
            Action::Create => self.created += 1,
            Action::Update => self.updated += 1,
            Action::Replace => self.replaced += 1,
            Action::Delete => self.deleted += 1,
            Action::NoOp => self.unchanged += 1,
        }
    }
}
