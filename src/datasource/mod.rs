//! Search and lookup module
//!
//! Read-only resolution of a free-text query into remote identifiers,
//! used by data sources and import flows. Nothing here mutates remote or
//! local state.
//!
//! # Overview
//!
//! - `search` - Raw records matching a query (first page)
//! - `search_one` - Exactly one match, or an explicit error
//! - `search_many` - All matches projected into a `LookupSet`

use crate::error::{Error, Result};
use crate::http::ApiClient;
use crate::resource::ResourceKind;
use crate::schema::ResourceData;
use crate::types::ZeroMatchPolicy;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of a many-match lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupSet {
    /// Synthetic identifier for the result set itself
    pub id: String,
    /// Kind that was searched
    pub kind: String,
    /// Query text
    pub query: String,
    /// Matching record identifiers, in server order
    pub ids: Vec<String>,
}

/// Fetch the records of kind `K` matching `query`
///
/// Records of other kinds sharing the endpoint are left out.
pub async fn search<K: ResourceKind>(client: &ApiClient, query: &str) -> Result<Vec<K::Record>> {
    let result = client
        .get_with_query(&K::search_path(), &[("page", "0"), ("search", query)])
        .await?;

    if result.is_not_found() || result.bytes().is_empty() {
        return Ok(Vec::new());
    }

    let mut records: Vec<K::Record> = result.json()?;
    records.retain(K::owns);
    debug!(
        "Search for {} '{}' returned {} record(s)",
        K::NAME,
        query,
        records.len()
    );
    Ok(records)
}

/// Resolve `query` to exactly one record
///
/// More than one match is always an [`Error::AmbiguousSearch`]. Zero
/// matches follow the kind's [`ZeroMatchPolicy`].
pub async fn search_one<K: ResourceKind>(
    client: &ApiClient,
    query: &str,
) -> Result<Option<ResourceData>> {
    let mut records = search::<K>(client, query).await?;

    match records.len() {
        0 => match K::ZERO_MATCH {
            ZeroMatchPolicy::Empty => Ok(None),
            ZeroMatchPolicy::Error => Err(Error::no_match(K::NAME, query)),
        },
        1 => {
            let record = records.remove(0);
            let mut data = ResourceData::new();
            K::from_wire(&record, &mut data);
            data.commit();
            Ok(Some(data))
        }
        count => Err(Error::AmbiguousSearch {
            kind: K::NAME.to_string(),
            query: query.to_string(),
            count,
        }),
    }
}

/// Resolve `query` to every matching identifier
pub async fn search_many<K: ResourceKind>(client: &ApiClient, query: &str) -> Result<LookupSet> {
    let records = search::<K>(client, query).await?;
    let ids = records
        .iter()
        .map(|record| K::record_id(record).to_string())
        .collect();

    Ok(LookupSet {
        id: synthetic_id(),
        kind: K::NAME.to_string(),
        query: query.to_string(),
        ids,
    })
}

/// Timestamp-derived token identifying a result set
fn synthetic_id() -> String {
    Utc::now().timestamp_micros().to_string()
}
