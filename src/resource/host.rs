//! Host and group kinds

use super::{write_record_id, ResourceKind};
use crate::model::{Group, Host};
use crate::schema::{str_set_value, Attributes, ResourceData, ResourceMapper};
use crate::types::ZeroMatchPolicy;

/// Monitored host
#[derive(Debug, Clone, Copy)]
pub struct HostResource;

/// Group of hosts and checks
#[derive(Debug, Clone, Copy)]
pub struct GroupResource;

impl ResourceMapper for HostResource {
    type Record = Host;

    fn to_wire(data: &ResourceData) -> Host {
        Host {
            id: data.id_i64(),
            name: data.get_string_or("name", ""),
            address: data.get_string_or("address", ""),
            description: data.get_string_or("description", ""),
            is_proxy: data.get_bool("is_proxy").unwrap_or(false),
            group_id: data.get_i64("group_id"),
            tags: data.get_str_set("tags"),
        }
    }

    fn from_wire(record: &Host, data: &mut ResourceData) {
        write_record_id(record.id, data);
        data.set("name", record.name.as_str());
        data.set("address", record.address.as_str());
        data.set("description", record.description.as_str());
        data.set("is_proxy", record.is_proxy);
        data.set_opt("group_id", record.group_id);
        data.set("tags", str_set_value(&record.tags));
    }

    fn record_id(record: &Host) -> i64 {
        record.id
    }
}

// Hosts are referenced by other resources, so a missing host is an error.
impl ResourceKind for HostResource {
    const NAME: &'static str = "host";
    const ENDPOINT: &'static str = "hosts";
    const UNORDERED: &'static [&'static str] = &["tags"];
    const ZERO_MATCH: ZeroMatchPolicy = ZeroMatchPolicy::Error;
}

impl ResourceMapper for GroupResource {
    type Record = Group;

    fn to_wire(data: &ResourceData) -> Group {
        Group {
            id: data.id_i64(),
            name: data.get_string_or("name", ""),
            description: data.get_string_or("description", ""),
            parent_id: data.get_i64("parent_id"),
        }
    }

    fn from_wire(record: &Group, data: &mut ResourceData) {
        write_record_id(record.id, data);
        data.set("name", record.name.as_str());
        data.set("description", record.description.as_str());
        data.set_opt("parent_id", record.parent_id);
    }

    fn record_id(record: &Group) -> i64 {
        record.id
    }
}

impl ResourceKind for GroupResource {
    const NAME: &'static str = "group";
    const ENDPOINT: &'static str = "groups";
    const ZERO_MATCH: ZeroMatchPolicy = ZeroMatchPolicy::Error;
}
