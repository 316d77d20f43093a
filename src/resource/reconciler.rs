//! CRUD lifecycle shared by every resource kind
//!
//! The identifier is the state variable: no id means Absent, an id means
//! Present. Create and update always finish with a read so local state
//! reflects what the remote accepted, including its defaults.

use super::ResourceKind;
use crate::datasource::{self, LookupSet};
use crate::error::{Error, Result};
use crate::http::{ApiClient, RawResult};
use crate::schema::ResourceData;
use crate::types::{JsonObject, Presence, UpdateOutcome};
use async_trait::async_trait;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

/// Body the remote returns for a successful delete
pub const DELETE_ACK: &str = r#"{"success":true}"#;

/// Whether a delete response body is the success acknowledgment
///
/// Only surrounding whitespace is tolerated; anything else, including an
/// empty body, is a failure.
pub fn is_delete_ack(body: &str) -> bool {
    body.trim() == DELETE_ACK
}

/// Drives one resource kind through create/read/update/delete/import
pub struct Reconciler<K: ResourceKind> {
    client: ApiClient,
    kind: PhantomData<fn() -> K>,
}

impl<K: ResourceKind> Reconciler<K> {
    /// Create a reconciler using the given client
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            kind: PhantomData,
        }
    }

    /// Client used for every call
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Create the remote record, assign its id, then read it back
    pub async fn create(&self, data: &mut ResourceData) -> Result<Presence> {
        let record = K::to_wire(data);
        debug!("Creating {} via {}", K::NAME, K::create_path());

        let result = self.client.put_json(&K::create_path(), &record).await?;
        let created: K::Record = expect_body(result)?.json()?;

        let id = K::record_id(&created);
        if id <= 0 {
            return Err(Error::MissingIdentifier {
                kind: K::NAME.to_string(),
            });
        }

        data.set_id(id);
        info!("Created {} {}", K::NAME, id);

        self.read(data).await
    }

    /// Refresh local state from the remote record
    ///
    /// A record missing remotely detaches local state (id cleared) and is
    /// not an error.
    pub async fn read(&self, data: &mut ResourceData) -> Result<Presence> {
        let id = data.id_i64();
        if id == 0 {
            data.clear_id();
            return Ok(Presence::Absent);
        }

        let result = self.client.get(&K::read_path(id)).await?;
        if result.is_not_found() {
            warn!(
                "{} {} no longer exists remotely, removing it from state",
                K::NAME,
                id
            );
            data.clear_id();
            return Ok(Presence::Absent);
        }

        let record: K::Record = result.json()?;
        if !K::owns(&record) {
            return Err(Error::KindMismatch {
                kind: K::NAME.to_string(),
                id,
                found: K::record_subtype(&record).unwrap_or_default().to_string(),
            });
        }
        K::from_wire(&record, data);
        data.commit();
        debug!("Read {} {}", K::NAME, id);

        Ok(Presence::Present)
    }

    /// Push changed attributes to the remote, then read back
    ///
    /// Sends nothing when no attribute differs from the last read.
    pub async fn update(&self, data: &mut ResourceData) -> Result<UpdateOutcome> {
        let id = data.id_i64();
        if id == 0 {
            return Err(Error::not_created(K::NAME));
        }

        let changed = data.changed_attributes(K::UNORDERED);
        if changed.is_empty() {
            debug!("{} {} unchanged, skipping update", K::NAME, id);
            return Ok(UpdateOutcome::Skipped);
        }

        debug!("Updating {} {}: {}", K::NAME, id, changed.join(", "));
        let record = K::to_wire(data);
        let result = self.client.post_json(&K::update_path(), &record).await?;
        expect_body(result)?;
        info!("Updated {} {}", K::NAME, id);

        self.read(data).await?;
        Ok(UpdateOutcome::Applied)
    }

    /// Delete the remote record and clear the local id
    ///
    /// The id stays set unless the remote acknowledges the delete.
    pub async fn delete(&self, data: &mut ResourceData) -> Result<()> {
        let id = data.id_i64();
        if id == 0 {
            data.clear_id();
            return Ok(());
        }

        let result = self.client.delete(&K::delete_path(id)).await?;
        let body = result.text();
        if !is_delete_ack(&body) {
            return Err(Error::DeleteRejected {
                kind: K::NAME.to_string(),
                id,
                body,
            });
        }

        data.clear_id();
        info!("Deleted {} {}", K::NAME, id);
        Ok(())
    }

    /// Populate state for an existing remote record from its id alone
    pub async fn import(&self, id: &str) -> Result<ResourceData> {
        let mut data = ResourceData::with_id(id);
        match self.read(&mut data).await? {
            Presence::Present => Ok(data),
            Presence::Absent => Err(Error::no_match(K::NAME, id)),
        }
    }
}

impl<K: ResourceKind> Clone for Reconciler<K> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone())
    }
}

impl<K: ResourceKind> std::fmt::Debug for Reconciler<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("kind", &K::NAME)
            .field("client", &self.client)
            .finish()
    }
}

/// Body of a response that must exist; 404 on a write is a rejection
fn expect_body(result: RawResult) -> Result<RawResult> {
    if result.is_not_found() {
        return Err(Error::http_status(404, String::new()));
    }
    Ok(result)
}

// ============================================================================
// Kind-erased dispatch
// ============================================================================

/// Object-safe lifecycle and lookup operations for one kind
#[async_trait]
pub trait DynResource: Send + Sync {
    /// Kind name
    fn kind(&self) -> &'static str;

    /// Attributes compared as sets
    fn unordered(&self) -> &'static [&'static str];

    /// See [`crate::schema::ResourceMapper::canonical`]
    fn canonical(&self, declared: &JsonObject) -> JsonObject;

    /// See [`Reconciler::create`]
    async fn create(&self, data: &mut ResourceData) -> Result<Presence>;

    /// See [`Reconciler::read`]
    async fn read(&self, data: &mut ResourceData) -> Result<Presence>;

    /// See [`Reconciler::update`]
    async fn update(&self, data: &mut ResourceData) -> Result<UpdateOutcome>;

    /// See [`Reconciler::delete`]
    async fn delete(&self, data: &mut ResourceData) -> Result<()>;

    /// See [`Reconciler::import`]
    async fn import(&self, id: &str) -> Result<ResourceData>;

    /// See [`datasource::search_one`]
    async fn search_one(&self, query: &str) -> Result<Option<ResourceData>>;

    /// See [`datasource::search_many`]
    async fn search_many(&self, query: &str) -> Result<LookupSet>;
}

#[async_trait]
impl<K: ResourceKind> DynResource for Reconciler<K> {
    fn kind(&self) -> &'static str {
        K::NAME
    }

    fn unordered(&self) -> &'static [&'static str] {
        K::UNORDERED
    }

    fn canonical(&self, declared: &JsonObject) -> JsonObject {
        K::canonical(declared)
    }

    async fn create(&self, data: &mut ResourceData) -> Result<Presence> {
        Reconciler::create(self, data).await
    }

    async fn read(&self, data: &mut ResourceData) -> Result<Presence> {
        Reconciler::read(self, data).await
    }

    async fn update(&self, data: &mut ResourceData) -> Result<UpdateOutcome> {
        Reconciler::update(self, data).await
    }

    async fn delete(&self, data: &mut ResourceData) -> Result<()> {
        Reconciler::delete(self, data).await
    }

    async fn import(&self, id: &str) -> Result<ResourceData> {
        Reconciler::import(self, id).await
    }

    async fn search_one(&self, query: &str) -> Result<Option<ResourceData>> {
        datasource::search_one::<K>(&self.client, query).await
    }

    async fn search_many(&self, query: &str) -> Result<LookupSet> {
        datasource::search_many::<K>(&self.client, query).await
    }
}
