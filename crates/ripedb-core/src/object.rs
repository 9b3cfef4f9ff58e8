//! Ordered attribute lists
//!
//! An RPSL object is an ordered list of `name: value` pairs. Names repeat
//! (several `mnt-by` lines are normal) and position carries meaning: element 0
//! is always the class name paired with the primary key. Both properties rule
//! out a map, so objects stay a plain sequence everywhere in this crate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One `name: value` line of an RPSL object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name (e.g. `mnt-by`)
    pub name: String,
    /// Attribute value, verbatim
    pub value: String,
}

impl Attribute {
    /// Create a new attribute
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for Attribute {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}

/// The wire representation of one database object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeList(Vec<Attribute>);

impl AttributeList {
    /// Create an empty attribute list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list has no attributes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Element 0: the `(class, primary key)` pair of an existing object
    pub fn head(&self) -> Option<&Attribute> {
        self.0.first()
    }

    /// Append an attribute at the end
    pub fn push(&mut self, attribute: Attribute) {
        self.0.push(attribute);
    }

    /// Insert an attribute at the front, shifting the rest
    pub fn prepend(&mut self, attribute: Attribute) {
        self.0.insert(0, attribute);
    }

    /// Iterate in list order
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    /// Borrow the attributes as a slice
    pub fn as_slice(&self) -> &[Attribute] {
        &self.0
    }

    /// Consume the list, returning the underlying vector
    pub fn into_vec(self) -> Vec<Attribute> {
        self.0
    }
}

impl From<Vec<Attribute>> for AttributeList {
    fn from(attributes: Vec<Attribute>) -> Self {
        Self(attributes)
    }
}

impl FromIterator<Attribute> for AttributeList {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for AttributeList {
    type Item = Attribute;
    type IntoIter = std::vec::IntoIter<Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Renders the object as RPSL text, one attribute per line
impl fmt::Display for AttributeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attribute in &self.0 {
            writeln!(f, "{attribute}")?;
        }
        Ok(())
    }
}
