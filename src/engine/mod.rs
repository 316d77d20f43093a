//! Execution engine module
//!
//! Reconciles a manifest against state and the remote service.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Engine` - Plan, apply, destroy, import and lookup
//! - `Plan` / `PlannedChange` - What apply will do, per address
//! - `ApplyStats` - Counts of completed steps
//!
//! Steps run one at a time. State is saved after every successful step,
//! so a failure leaves state consistent with everything done before it.
//! The first failure aborts the run.

mod types;

pub use types::{Action, ApplyStats, LookupOutcome, LookupResult, Plan, PlannedChange};

use crate::error::{Error, Result};
use crate::http::ApiClient;
use crate::manifest::{DataDecl, Manifest, ResourceDecl};
use crate::resource::{reconciler_for, DynResource};
use crate::schema::ResourceData;
use crate::state::{StateManager, StoredResource};
use crate::types::Presence;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Manifest reconciliation engine
pub struct Engine {
    /// API client shared by every reconciler
    client: ApiClient,
    /// State manager
    state: StateManager,
}

impl Engine {
    /// Create a new engine
    pub fn new(client: ApiClient, state: StateManager) -> Self {
        Self { client, state }
    }

    /// Get the state manager
    pub fn state(&self) -> &StateManager {
        &self.state
    }

    fn reconciler(&self, kind: &str) -> Result<Box<dyn DynResource>> {
        reconciler_for(kind, &self.client)
    }

    // ========================================================================
    // Plan
    // ========================================================================

    /// Refresh tracked resources and compute the steps apply would take
    ///
    /// Nothing remote or local is modified.
    pub async fn plan(&self, manifest: &Manifest) -> Result<Plan> {
        let mut plan = Plan::default();

        for decl in &manifest.data {
            let result = self.lookup(decl).await?;
            plan.data.push(LookupOutcome {
                name: decl.name.clone(),
                kind: decl.kind.clone(),
                result,
            });
        }

        let mut declared = HashSet::new();
        for decl in &manifest.resources {
            declared.insert(decl.name.as_str());
            plan.changes.push(self.plan_resource(decl).await?);
        }

        for address in self.state.addresses().await {
            if declared.contains(address.as_str()) {
                continue;
            }
            if let Some(entry) = self.state.get(&address).await {
                plan.changes.push(self.plan_removal(address, entry).await?);
            }
        }

        debug!("Plan: {}", plan.summary());
        Ok(plan)
    }

    async fn plan_resource(&self, decl: &ResourceDecl) -> Result<PlannedChange> {
        let reconciler = self.reconciler(&decl.kind)?;
        let mut change = PlannedChange {
            address: decl.name.clone(),
            kind: decl.kind.clone(),
            action: Action::Create,
            id: None,
            replaced_kind: None,
            changed: Vec::new(),
            data: ResourceData::from_attributes(decl.attributes.clone()),
        };

        let Some(entry) = self.state.get(&decl.name).await else {
            return Ok(change);
        };

        if entry.kind != decl.kind {
            change.action = Action::Replace;
            change.id = Some(entry.id.clone());
            change.replaced_kind = Some(entry.kind);
            return Ok(change);
        }

        let mut data = entry.to_data();
        if reconciler.read(&mut data).await? == Presence::Absent {
            warn!("{} was deleted outside of this tool, it will be recreated", decl.name);
            return Ok(change);
        }

        data.overlay(&reconciler.canonical(&decl.attributes));
        change.id = Some(data.id().to_string());
        change.changed = data.changed_attributes(reconciler.unordered());
        change.action = if change.changed.is_empty() {
            Action::NoOp
        } else {
            Action::Update
        };
        change.data = data;
        Ok(change)
    }

    /// Plan an entry that is tracked but no longer declared
    ///
    /// An entry whose record is already gone remotely is only dropped from
    /// state.
    async fn plan_removal(&self, address: String, entry: StoredResource) -> Result<PlannedChange> {
        let mut data = entry.to_data();
        let presence = self.reconciler(&entry.kind)?.read(&mut data).await?;

        let action = if presence == Presence::Absent {
            warn!("{address} was deleted outside of this tool, it will be dropped from state");
            Action::NoOp
        } else {
            Action::Delete
        };

        Ok(PlannedChange {
            address,
            kind: entry.kind,
            action,
            id: (presence == Presence::Present).then(|| data.id().to_string()),
            replaced_kind: None,
            changed: Vec::new(),
            data,
        })
    }

    // ========================================================================
    // Apply
    // ========================================================================

    /// Plan, then execute every step in order
    pub async fn apply(&self, manifest: &Manifest) -> Result<ApplyStats> {
        let start = Instant::now();
        let plan = self.plan(manifest).await?;
        let mut stats = ApplyStats::new();

        for change in plan.changes {
            let action = change.action;
            self.apply_change(change).await?;
            stats.record(action);
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            "Apply complete: {} created, {} updated, {} replaced, {} deleted, {} unchanged",
            stats.created, stats.updated, stats.replaced, stats.deleted, stats.unchanged
        );
        Ok(stats)
    }

    async fn apply_change(&self, change: PlannedChange) -> Result<()> {
        let PlannedChange {
            address,
            kind,
            action,
            replaced_kind,
            mut data,
            ..
        } = change;

        match action {
            Action::Create => self.create(&address, &kind, data).await,
            Action::Update => {
                self.reconciler(&kind)?.update(&mut data).await?;
                self.store(&address, &kind, &data).await
            }
            Action::NoOp if data.presence() == Presence::Absent => {
                self.state.remove(&address).await?;
                info!("{address}: dropped {kind}, already deleted remotely");
                Ok(())
            }
            Action::NoOp => self.store(&address, &kind, &data).await,
            Action::Replace => {
                let old_kind = replaced_kind.unwrap_or_else(|| kind.clone());
                self.delete_tracked(&address, &old_kind).await?;
                self.create(&address, &kind, data).await
            }
            Action::Delete => self.delete_tracked(&address, &kind).await,
        }
    }

    async fn create(&self, address: &str, kind: &str, mut data: ResourceData) -> Result<()> {
        let result = self.reconciler(kind)?.create(&mut data).await;

        // An id means the record exists remotely even if the read-back failed.
        if data.presence() == Presence::Present {
            self.store(address, kind, &data).await?;
        }
        result?;

        info!("{address}: created {kind} {}", data.id());
        Ok(())
    }

    async fn delete_tracked(&self, address: &str, kind: &str) -> Result<()> {
        let Some(entry) = self.state.get(address).await else {
            return Ok(());
        };

        let mut data = entry.to_data();
        self.reconciler(kind)?.delete(&mut data).await?;
        self.state.remove(address).await?;
        info!("{address}: deleted {kind} {}", entry.id);
        Ok(())
    }

    async fn store(&self, address: &str, kind: &str, data: &ResourceData) -> Result<()> {
        self.state
            .put(address, StoredResource::capture(kind, data))
            .await
    }

    // ========================================================================
    // Destroy / Import / Lookup
    // ========================================================================

    /// Delete every tracked resource, returning how many were deleted
    pub async fn destroy(&self) -> Result<usize> {
        let mut addresses = self.state.addresses().await;
        addresses.reverse();

        let mut deleted = 0;
        for address in addresses {
            if let Some(entry) = self.state.get(&address).await {
                self.delete_tracked(&address, &entry.kind).await?;
                deleted += 1;
            }
        }

        info!("Destroy complete: {deleted} deleted");
        Ok(deleted)
    }

    /// Adopt an existing remote record into state at `address`
    pub async fn import(&self, kind: &str, address: &str, id: &str) -> Result<ResourceData> {
        if self.state.get(address).await.is_some() {
            return Err(Error::state(format!("{address} is already tracked")));
        }

        let data = self.reconciler(kind)?.import(id).await?;
        self.store(address, kind, &data).await?;
        info!("{address}: imported {kind} {id}");
        Ok(data)
    }

    /// Evaluate one data block
    pub async fn lookup(&self, decl: &DataDecl) -> Result<LookupResult> {
        let reconciler = self.reconciler(&decl.kind)?;
        if decl.many {
            Ok(LookupResult::Many(reconciler.search_many(&decl.query).await?))
        } else {
            Ok(LookupResult::One(reconciler.search_one(&decl.query).await?))
        }
    }
}
