//! Conversions between attribute lists and the resource model
//!
//! Everything here is pure: no I/O, no shared state. Injecting the
//! `(class, key)` head and the trailing `source` is left to the reconciler,
//! which knows whether it is assembling a create or an update.

use crate::error::{Error, Result};
use crate::model::ObjectModel;
use crate::object::{Attribute, AttributeList};
use std::fmt;

/// Parsed composite identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId {
    /// Object class
    pub class: String,
    /// Primary key within the class
    pub key: String,
}

impl ObjectId {
    /// Build an identifier, rejecting empty segments
    pub fn new(class: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        let class = class.into();
        let key = key.into();

        if class.is_empty() || key.is_empty() {
            return Err(Error::malformed_identifier(derive_id(&class, &key)));
        }

        Ok(Self { class, key })
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.class, self.key)
    }
}

/// Project the model's attributes into an attribute list, in order
pub fn model_to_object(model: &ObjectModel) -> AttributeList {
    model.attributes.iter().cloned().collect()
}

/// Copy every attribute, element 0 included, for raw views
pub fn object_to_model(object: &AttributeList) -> Vec<Attribute> {
    object.iter().cloned().collect()
}

/// Build the composite identifier `<class>:<key>`
pub fn derive_id(class: &str, key: &str) -> String {
    format!("{class}:{key}")
}

/// Split a composite identifier on its first `:`
///
/// Keys may themselves contain colons (IPv6 prefixes), so only the first one
/// separates class from key. Both segments must be non-empty.
pub fn parse_id(id: &str) -> Result<ObjectId> {
    match id.split_once(':') {
        Some((class, key)) if !class.is_empty() && !key.is_empty() => Ok(ObjectId {
            class: class.to_string(),
            key: key.to_string(),
        }),
        _ => Err(Error::malformed_identifier(id)),
    }
}
