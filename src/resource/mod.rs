//! Resource kinds and the CRUD reconciler
//!
//! # Overview
//!
//! The resource module provides:
//! - `ResourceKind` - Endpoints and policies of one kind, on top of its mapper
//! - `Reconciler` - Create/read/update/delete/import for one kind
//! - `DynResource` - Kind-erased dispatch by name
//! - The concrete kinds: URL checks, web journeys, hosts, groups and
//!   maintenance periods
//!
//! # Endpoints
//!
//! | Operation | Request                                 |
//! |-----------|-----------------------------------------|
//! | search    | `GET {endpoint}/list?page=0&search={q}` |
//! | read      | `GET {endpoint}/{id}`                   |
//! | create    | `PUT {endpoint}/add[/{subtype}]`        |
//! | update    | `POST {endpoint}/update[/{subtype}]`    |
//! | delete    | `DELETE {endpoint}/remove/{id}`         |

mod check;
mod host;
mod maintenance;
mod reconciler;

pub use check::{UrlCheckResource, WebJourneyResource};
pub use host::{GroupResource, HostResource};
pub use maintenance::MaintenanceResource;
pub use reconciler::{is_delete_ack, DynResource, Reconciler, DELETE_ACK};

use crate::error::{Error, Result};
use crate::http::ApiClient;
use crate::schema::{ResourceData, ResourceMapper};
use crate::types::ZeroMatchPolicy;

/// One kind of remote record and how to reach it
pub trait ResourceKind: ResourceMapper + Send + Sync + 'static {
    /// Kind name used in manifests, state and logs
    const NAME: &'static str;

    /// Path prefix of the kind's endpoints
    const ENDPOINT: &'static str;

    /// Subtype segment for create and update, if any
    const SUBTYPE: Option<&'static str> = None;

    /// Attributes compared as sets when detecting changes
    const UNORDERED: &'static [&'static str] = &[];

    /// Single-result lookup behaviour when nothing matches
    const ZERO_MATCH: ZeroMatchPolicy = ZeroMatchPolicy::Empty;

    /// Path for create
    fn create_path() -> String {
        match Self::SUBTYPE {
            Some(subtype) => format!("{}/add/{subtype}", Self::ENDPOINT),
            None => format!("{}/add", Self::ENDPOINT),
        }
    }

    /// Path for update
    fn update_path() -> String {
        match Self::SUBTYPE {
            Some(subtype) => format!("{}/update/{subtype}", Self::ENDPOINT),
            None => format!("{}/update", Self::ENDPOINT),
        }
    }

    /// Path for read
    fn read_path(id: i64) -> String {
        format!("{}/{id}", Self::ENDPOINT)
    }

    /// Path for delete
    fn delete_path(id: i64) -> String {
        format!("{}/remove/{id}", Self::ENDPOINT)
    }

    /// Path for search
    fn search_path() -> String {
        format!("{}/list", Self::ENDPOINT)
    }

    /// Subtype a record declares for itself, for kinds sharing an endpoint
    fn record_subtype(_record: &Self::Record) -> Option<&'static str> {
        None
    }

    /// Whether a record fetched from the endpoint belongs to this kind
    fn owns(record: &Self::Record) -> bool {
        match Self::record_subtype(record) {
            Some(subtype) => Self::SUBTYPE == Some(subtype),
            None => true,
        }
    }
}

/// Copy a record's id into local state; a record without one leaves the
/// local id untouched
fn write_record_id(id: i64, data: &mut ResourceData) {
    if id > 0 {
        data.set_id(id);
    }
}

/// Names of every supported kind
pub const KINDS: &[&str] = &[
    UrlCheckResource::NAME,
    WebJourneyResource::NAME,
    HostResource::NAME,
    GroupResource::NAME,
    MaintenanceResource::NAME,
];

/// Build a kind-erased reconciler for `kind`
pub fn reconciler_for(kind: &str, client: &ApiClient) -> Result<Box<dyn DynResource>> {
    let client = client.clone();
    let reconciler: Box<dyn DynResource> = if kind == UrlCheckResource::NAME {
        Box::new(Reconciler::<UrlCheckResource>::new(client))
    } else if kind == WebJourneyResource::NAME {
        Box::new(Reconciler::<WebJourneyResource>::new(client))
    } else if kind == HostResource::NAME {
        Box::new(Reconciler::<HostResource>::new(client))
    } else if kind == GroupResource::NAME {
        Box::new(Reconciler::<GroupResource>::new(client))
    } else if kind == MaintenanceResource::NAME {
        Box::new(Reconciler::<MaintenanceResource>::new(client))
    } else {
        return Err(Error::unknown_kind(kind));
    };
    Ok(reconciler)
}

/// Whether `kind` names a supported kind
pub fn is_known_kind(kind: &str) -> bool {
    KINDS.contains(&kind)
}
