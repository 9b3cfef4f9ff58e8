//! Configuration types for the registry client
//!
//! Configuration is resolved once at startup and handed to the client
//! constructor; nothing here is mutated afterwards.

use serde::{Deserialize, Serialize};

/// Default RIPE Database REST endpoint
pub const DEFAULT_ENDPOINT: &str = "https://rest.db.ripe.net";

/// Default authoritative source
pub const DEFAULT_SOURCE: &str = "RIPE";

/// Default request timeout, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Registry client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the REST API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Source (database) name stamped on written objects
    #[serde(default = "default_source")]
    pub source: String,

    /// Credentials used for writes
    #[serde(default)]
    pub auth: AuthConfig,

    /// Request timeout, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Ask the server to validate writes without committing them
    #[serde(default)]
    pub dry_run: bool,
}

impl ClientConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            endpoint: default_endpoint(),
            source: default_source(),
            auth: AuthConfig::default(),
            timeout_secs: default_timeout_secs(),
            dry_run: false,
        }
    }

    /// Set the endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the credentials
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    /// Enable or disable dry-run writes
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.endpoint.is_empty() {
            return Err(crate::Error::config("Endpoint cannot be empty"));
        }

        if !self.endpoint.starts_with("https://") && !self.endpoint.starts_with("http://") {
            return Err(crate::Error::config(format!(
                "Endpoint must use HTTP or HTTPS scheme. Got: {}",
                self.endpoint
            )));
        }

        if self.source.is_empty() {
            return Err(crate::Error::config("Source cannot be empty"));
        }

        if self.timeout_secs == 0 {
            return Err(crate::Error::config("Timeout must be > 0"));
        }

        self.auth.validate()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Credentials for the registry
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No credentials; reads only
    #[default]
    Anonymous,

    /// Maintainer password
    Password {
        /// Name of the MNTNER object, if basic auth is wanted
        user: Option<String>,
        /// Password of the MNTNER object
        password: String,
    },

    /// X.509 client certificate
    Certificate {
        /// PEM-encoded certificate
        certificate: String,
        /// PEM-encoded private key
        key: String,
    },
}

impl AuthConfig {
    /// Validate the credentials
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            AuthConfig::Anonymous => Ok(()),
            AuthConfig::Password { user, password } => {
                if password.is_empty() {
                    return Err(crate::Error::config("Password cannot be empty"));
                }
                if user.as_deref().is_some_and(str::is_empty) {
                    return Err(crate::Error::config("Maintainer user cannot be empty"));
                }
                Ok(())
            }
            AuthConfig::Certificate { certificate, key } => {
                if certificate.is_empty() || key.is_empty() {
                    return Err(crate::Error::config("Both key and cert must be provided"));
                }
                Ok(())
            }
        }
    }

    /// Get the auth type name
    pub fn type_name(&self) -> &'static str {
        match self {
            AuthConfig::Anonymous => "anonymous",
            AuthConfig::Password { .. } => "password",
            AuthConfig::Certificate { .. } => "certificate",
        }
    }
}

// Custom Debug implementation that hides secrets
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthConfig::Anonymous => f.write_str("Anonymous"),
            AuthConfig::Password { user, .. } => f
                .debug_struct("Password")
                .field("user", user)
                .field("password", &"<REDACTED>")
                .finish(),
            AuthConfig::Certificate { .. } => f
                .debug_struct("Certificate")
                .field("certificate", &"<REDACTED>")
                .field("key", &"<REDACTED>")
                .finish(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
