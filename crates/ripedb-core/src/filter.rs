//! Removal of server-managed attributes
//!
//! The database stamps `source`, `created` and `last-modified` on every write
//! and returns them on every read. Keeping them in state would show drift on
//! each plan, so they are stripped before anything reaches the host.

use crate::model::ServerMetadata;
use crate::object::{Attribute, AttributeList};
use chrono::{DateTime, Utc};

/// Attribute names owned by the server
pub const SERVER_MANAGED: [&str; 3] = ["source", "created", "last-modified"];

/// Whether the server owns attributes with this name
pub fn is_server_managed(name: &str) -> bool {
    SERVER_MANAGED.contains(&name)
}

/// Drop element 0 and every server-managed attribute, keeping order
pub fn filter_object(object: &AttributeList) -> Vec<Attribute> {
    object
        .iter()
        .skip(1)
        .filter(|attribute| !is_server_managed(&attribute.name))
        .cloned()
        .collect()
}

/// Collect the server-managed attributes of an object
///
/// The last occurrence wins if the server repeats one. Timestamps that do not
/// parse as RFC 3339 are left out.
pub fn extract_metadata(object: &AttributeList) -> ServerMetadata {
    let mut metadata = ServerMetadata::default();

    for attribute in object.iter().skip(1) {
        match attribute.name.as_str() {
            "source" => metadata.source = Some(attribute.value.clone()),
            "created" => metadata.created = parse_timestamp(&attribute.value),
            "last-modified" => metadata.last_modified = parse_timestamp(&attribute.value),
            _ => {}
        }
    }

    metadata
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(value.trim()) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!("Ignoring unparseable timestamp '{}': {}", value, e);
            None
        }
    }
}
