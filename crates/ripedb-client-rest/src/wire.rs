//! JSON document format of the RIPE Database REST API
//!
//! Requests and responses share one envelope:
//!
//! ```json
//! {
//!   "objects": { "object": [ {
//!     "type": "aut-num",
//!     "source": { "id": "ripe" },
//!     "attributes": { "attribute": [ { "name": "aut-num", "value": "AS3333" } ] }
//!   } ] },
//!   "errormessages": { "errormessage": [ {
//!     "severity": "Error",
//!     "text": "Unrecognized source: %s",
//!     "args": [ { "value": "INVALID" } ]
//!   } ] }
//! }
//! ```

use ripedb_core::{Attribute, AttributeList};
use serde::{Deserialize, Serialize};

/// Top-level envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoisResources {
    /// Objects carried by a request or returned by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects: Option<WhoisObjects>,

    /// Messages reported by the server, of any severity
    #[serde(rename = "errormessages", default, skip_serializing_if = "Option::is_none")]
    pub error_messages: Option<ErrorMessages>,
}

/// `objects` wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoisObjects {
    #[serde(default)]
    pub object: Vec<WhoisObject>,
}

/// One RPSL object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoisObject {
    /// Object class, set by the server on responses
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Database the object lives in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceRef>,

    /// Attributes in server order, class attribute first
    #[serde(default)]
    pub attributes: WireAttributes,
}

/// Reference to a database source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Source name, e.g. `ripe` or `test`
    pub id: String,
}

/// `attributes` wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireAttributes {
    #[serde(default)]
    pub attribute: Vec<WireAttribute>,
}

/// A single attribute as the server sends it
///
/// Link and `referenced-type` fields are ignored on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireAttribute {
    pub name: String,
    pub value: String,

    /// End-of-line comment, split off the value by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl From<&Attribute> for WireAttribute {
    fn from(attribute: &Attribute) -> Self {
        Self {
            name: attribute.name.clone(),
            value: attribute.value.clone(),
            comment: None,
        }
    }
}

impl From<WireAttribute> for Attribute {
    /// End-of-line comments are folded back into the value so they survive a
    /// read/write round trip.
    fn from(wire: WireAttribute) -> Self {
        match wire.comment {
            Some(comment) if !comment.is_empty() => {
                Attribute::new(wire.name, format!("{} # {}", wire.value, comment))
            }
            _ => Attribute::new(wire.name, wire.value),
        }
    }
}

/// `errormessages` wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessages {
    #[serde(default)]
    pub errormessage: Vec<ErrorMessage>,
}

/// Server message with `%s` placeholders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    /// `Error`, `Warning` or `Info`; missing is treated as an error
    #[serde(default)]
    pub severity: String,

    pub text: String,

    /// Placeholder values, in order
    #[serde(default)]
    pub args: Vec<ErrorArg>,
}

/// Value substituted for one `%s`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorArg {
    pub value: String,
}

impl ErrorMessage {
    /// Substitute each `%s` with the next argument
    pub fn render(&self) -> String {
        let mut args = self.args.iter().map(|arg| arg.value.as_str());
        let mut rendered = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();

        while let Some(pos) = rest.find("%s") {
            rendered.push_str(&rest[..pos]);
            rendered.push_str(args.next().unwrap_or("%s"));
            rest = &rest[pos + 2..];
        }
        rendered.push_str(rest);

        rendered
    }
}

impl WhoisResources {
    /// Wrap one object for a create or update request
    pub fn from_object(source: &str, object: &AttributeList) -> Self {
        Self {
            objects: Some(WhoisObjects {
                object: vec![WhoisObject {
                    kind: None,
                    source: Some(SourceRef {
                        id: source.to_string(),
                    }),
                    attributes: WireAttributes {
                        attribute: object.iter().map(WireAttribute::from).collect(),
                    },
                }],
            }),
            error_messages: None,
        }
    }

    /// Take the first object of a response
    pub fn into_first_object(self) -> Option<AttributeList> {
        let object = self.objects?.object.into_iter().next()?;
        Some(
            object
                .attributes
                .attribute
                .into_iter()
                .map(Attribute::from)
                .collect(),
        )
    }

    /// Rendered error-severity messages, joined
    ///
    /// Warnings and info messages are ignored.
    pub fn render_errors(&self) -> Option<String> {
        let messages: Vec<String> = self
            .error_messages
            .as_ref()?
            .errormessage
            .iter()
            .filter(|message| {
                message.severity.is_empty() || message.severity.eq_ignore_ascii_case("error")
            })
            .map(ErrorMessage::render)
            .collect();

        (!messages.is_empty()).then(|| messages.join("; "))
    }
}
