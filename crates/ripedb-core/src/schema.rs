//! Class-specific structural validation
//!
//! A small table of the RIPE Database classes that are routinely managed as
//! code. Validation checks structure only (head attribute, mandatory and
//! single-valued attributes) and derives the canonical primary key; value
//! syntax is left to the server. Classes outside the table get the
//! class-independent checks only.

use crate::error::{Error, Result};
use crate::object::AttributeList;

/// Structural rules for one object class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSchema {
    /// Class name, also the name of the head attribute
    pub class: &'static str,
    /// Attributes whose values, concatenated in order, form the primary key
    pub key: &'static [&'static str],
    /// Attributes that must be present
    pub mandatory: &'static [&'static str],
    /// Attributes that may appear at most once, besides the head
    pub single: &'static [&'static str],
}

/// Attributes every class allows only once
const ALWAYS_SINGLE: &[&str] = &["source", "created", "last-modified"];

const SCHEMAS: &[ClassSchema] = &[
    ClassSchema {
        class: "aut-num",
        key: &["aut-num"],
        mandatory: &["aut-num", "as-name", "admin-c", "tech-c", "mnt-by", "source"],
        single: &["as-name", "org", "status"],
    },
    ClassSchema {
        class: "as-set",
        key: &["as-set"],
        mandatory: &["as-set", "admin-c", "tech-c", "mnt-by", "source"],
        single: &["org"],
    },
    ClassSchema {
        class: "domain",
        key: &["domain"],
        mandatory: &["domain", "admin-c", "tech-c", "zone-c", "nserver", "mnt-by", "source"],
        single: &["org"],
    },
    ClassSchema {
        class: "inetnum",
        key: &["inetnum"],
        mandatory: &[
            "inetnum", "netname", "country", "admin-c", "tech-c", "status", "mnt-by", "source",
        ],
        single: &["netname", "org", "status", "sponsoring-org"],
    },
    ClassSchema {
        class: "inet6num",
        key: &["inet6num"],
        mandatory: &[
            "inet6num", "netname", "country", "admin-c", "tech-c", "status", "mnt-by", "source",
        ],
        single: &["netname", "org", "status", "sponsoring-org"],
    },
    ClassSchema {
        class: "irt",
        key: &["irt"],
        mandatory: &[
            "irt", "address", "e-mail", "abuse-mailbox", "admin-c", "tech-c", "auth", "mnt-by",
            "source",
        ],
        single: &["org", "signature", "encryption"],
    },
    ClassSchema {
        class: "key-cert",
        key: &["key-cert"],
        mandatory: &["key-cert", "certif", "mnt-by", "source"],
        single: &["method", "fingerpr", "org"],
    },
    ClassSchema {
        class: "mntner",
        key: &["mntner"],
        mandatory: &["mntner", "admin-c", "upd-to", "auth", "mnt-by", "source"],
        single: &["org"],
    },
    ClassSchema {
        class: "organisation",
        key: &["organisation"],
        mandatory: &[
            "organisation", "org-name", "org-type", "address", "e-mail", "mnt-ref", "mnt-by",
            "source",
        ],
        single: &["org-name", "org-type", "abuse-c"],
    },
    ClassSchema {
        class: "person",
        key: &["nic-hdl"],
        mandatory: &["person", "address", "phone", "nic-hdl", "mnt-by", "source"],
        single: &["nic-hdl"],
    },
    ClassSchema {
        class: "role",
        key: &["nic-hdl"],
        mandatory: &["role", "address", "e-mail", "nic-hdl", "mnt-by", "source"],
        single: &["nic-hdl"],
    },
    ClassSchema {
        class: "route",
        key: &["route", "origin"],
        mandatory: &["route", "origin", "mnt-by", "source"],
        single: &["origin", "org"],
    },
    ClassSchema {
        class: "route6",
        key: &["route6", "origin"],
        mandatory: &["route6", "origin", "mnt-by", "source"],
        single: &["origin", "org"],
    },
    ClassSchema {
        class: "route-set",
        key: &["route-set"],
        mandatory: &["route-set", "admin-c", "tech-c", "mnt-by", "source"],
        single: &["org"],
    },
];

/// Look up the rules for a class
pub fn lookup(class: &str) -> Option<&'static ClassSchema> {
    SCHEMAS.iter().find(|schema| schema.class == class)
}

/// Names of every class with built-in rules
pub fn known_classes() -> impl Iterator<Item = &'static str> {
    SCHEMAS.iter().map(|schema| schema.class)
}

/// An object that passed validation, with its canonical primary key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedObject {
    class: String,
    key: String,
    attributes: AttributeList,
}

impl ValidatedObject {
    /// Object class
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Canonical primary key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The validated attributes
    pub fn attributes(&self) -> &AttributeList {
        &self.attributes
    }

    /// Consume, returning the attributes
    pub fn into_attributes(self) -> AttributeList {
        self.attributes
    }
}

/// Validate an object against the rules for `class`
///
/// Classes without built-in rules are checked for structure only and keyed by
/// their head value.
///
/// # Errors
///
/// [`Error::SchemaValidation`] if the head attribute does not name the class,
/// an attribute name or the primary key is empty, a mandatory attribute is
/// missing or a single-valued attribute repeats.
pub fn validate(class: &str, object: &AttributeList) -> Result<ValidatedObject> {
    let head = object
        .head()
        .ok_or_else(|| Error::schema(class, "object has no attributes"))?;

    if object.iter().any(|attribute| attribute.name.is_empty()) {
        return Err(Error::schema(class, "attribute names cannot be empty"));
    }

    if head.name != class {
        return Err(Error::schema(
            class,
            format!("first attribute must be '{}', found '{}'", class, head.name),
        ));
    }

    if head.value.trim().is_empty() {
        return Err(Error::schema(class, "primary key is empty"));
    }

    let Some(schema) = lookup(class) else {
        check_single(class, object, &[])?;
        return Ok(ValidatedObject {
            class: class.to_string(),
            key: head.value.trim().to_string(),
            attributes: object.clone(),
        });
    };

    let missing: Vec<&str> = schema
        .mandatory
        .iter()
        .copied()
        .filter(|name| !object.iter().any(|attribute| attribute.name == *name))
        .collect();
    if !missing.is_empty() {
        return Err(Error::schema(
            class,
            format!("missing mandatory attribute(s): {}", missing.join(", ")),
        ));
    }

    check_single(class, object, schema.single)?;

    let key = compose_key(schema, object)
        .ok_or_else(|| Error::schema(class, "primary key is empty"))?;

    Ok(ValidatedObject {
        class: class.to_string(),
        key,
        attributes: object.clone(),
    })
}

/// Reject repeats of the head, the server-managed attributes and `single`
fn check_single(class: &str, object: &AttributeList, single: &[&str]) -> Result<()> {
    for name in std::iter::once(class)
        .chain(ALWAYS_SINGLE.iter().copied())
        .chain(single.iter().copied())
    {
        let count = object.iter().filter(|attribute| attribute.name == name).count();
        if count > 1 {
            return Err(Error::schema(
                class,
                format!("attribute '{}' may appear only once, found {}", name, count),
            ));
        }
    }
    Ok(())
}

/// Derive a primary key without enforcing the class rules
///
/// Used on server responses, which are authoritative. Known classes still get
/// their composite key when the key attributes are present; everything else is
/// keyed by the head value.
pub fn validate_unchecked(class: &str, object: &AttributeList) -> Result<ValidatedObject> {
    let head = object
        .head()
        .ok_or_else(|| Error::schema(class, "object has no attributes"))?;

    let key = lookup(class)
        .and_then(|schema| compose_key(schema, object))
        .unwrap_or_else(|| head.value.trim().to_string());

    if key.is_empty() {
        return Err(Error::schema(class, "primary key is empty"));
    }

    Ok(ValidatedObject {
        class: class.to_string(),
        key,
        attributes: object.clone(),
    })
}

fn compose_key(schema: &ClassSchema, object: &AttributeList) -> Option<String> {
    let mut key = String::new();
    for name in schema.key {
        let attribute = object.iter().find(|attribute| attribute.name == *name)?;
        key.push_str(attribute.value.trim());
    }
    (!key.is_empty()).then_some(key)
}
