//! Resource model types held by the host
//!
//! [`ObjectModel`] is the structured shape the host stores in state for a
//! managed object. [`ObjectView`] is the read-only shape returned for data
//! source lookups.

use crate::object::Attribute;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured representation of one managed RPSL object
///
/// `attributes` never contains element 0 (captured by `class`/`value`) nor
/// the attributes the server manages on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectModel {
    /// Composite identifier `<class>:<primary_key>` (computed)
    #[serde(default)]
    pub id: String,

    /// Object class (e.g. `aut-num`)
    pub class: String,

    /// Primary key value; changing it means delete and recreate
    pub value: String,

    /// User-controlled attributes in order
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl ObjectModel {
    /// Create a model from configuration, with no identifier yet
    pub fn new(
        class: impl Into<String>,
        value: impl Into<String>,
        attributes: Vec<Attribute>,
    ) -> Self {
        Self {
            id: String::new(),
            class: class.into(),
            value: value.into(),
            attributes,
        }
    }

    /// Set the identifier
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Bookkeeping attributes the server stamps on every object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMetadata {
    /// Authoritative registry name
    pub source: Option<String>,
    /// Creation timestamp
    pub created: Option<DateTime<Utc>>,
    /// Last modification timestamp
    pub last_modified: Option<DateTime<Utc>>,
}

/// Read-only view of a looked-up object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectView {
    /// Composite identifier `<class>:<primary_key>`
    pub id: String,

    /// Object class
    pub class: String,

    /// Primary key value as stored by the server
    pub value: String,

    /// Filtered attributes, same shape as [`ObjectModel::attributes`]
    pub attributes: Vec<Attribute>,

    /// Every attribute as returned by the server, element 0 included
    pub raw_attributes: Vec<Attribute>,

    /// Filtered attribute values grouped by name
    pub grouped: BTreeMap<String, Vec<String>>,

    /// Server-managed attributes
    pub metadata: ServerMetadata,
}
