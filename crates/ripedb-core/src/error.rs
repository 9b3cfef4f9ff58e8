//! Error types for the RIPE Database reconciler
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for reconciler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the RIPE Database reconciler
#[derive(Error, Debug)]
pub enum Error {
    /// Identifier does not split into `<class>:<primary_key>`
    #[error("Malformed identifier '{id}': expected <class>:<primary_key>")]
    MalformedIdentifier {
        /// The identifier as supplied
        id: String,
    },

    /// Assembled object failed class-specific validation
    #[error("Schema validation failed for {class}: {message}")]
    SchemaValidation {
        /// Object class being validated
        class: String,
        /// What was wrong with the object
        message: String,
    },

    /// The client failed while reading an object
    #[error("Failed to read {id}: {source}")]
    RemoteRead {
        /// Composite identifier of the object
        id: String,
        /// Underlying client error
        #[source]
        source: Box<Error>,
    },

    /// The client failed while writing an object
    #[error("Failed to {operation} {id}: {source}")]
    RemoteWrite {
        /// Operation name (create, update, delete)
        operation: &'static str,
        /// Composite identifier of the object
        id: String,
        /// Underlying client error
        #[source]
        source: Box<Error>,
    },

    /// Object does not exist in the remote database
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// The remote database refused a conflicting write
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error reported by the remote database
    #[error("Remote error ({status}): {message}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Rendered server error messages
        message: String,
    },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a malformed identifier error
    pub fn malformed_identifier(id: impl Into<String>) -> Self {
        Self::MalformedIdentifier { id: id.into() }
    }

    /// Create a schema validation error
    pub fn schema(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaValidation {
            class: class.into(),
            message: message.into(),
        }
    }

    /// Wrap a client error raised while reading `id`
    pub fn remote_read(id: impl Into<String>, source: Error) -> Self {
        Self::RemoteRead {
            id: id.into(),
            source: Box::new(source),
        }
    }

    /// Wrap a client error raised while writing `id`
    pub fn remote_write(operation: &'static str, id: impl Into<String>, source: Error) -> Self {
        Self::RemoteWrite {
            operation,
            id: id.into(),
            source: Box::new(source),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create an error carrying a remote status code
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    /// Whether this error means the object is absent remotely
    ///
    /// Looks through read wrappers so hosts can drop the resource from state
    /// instead of reporting a failure.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::RemoteRead { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
