// # Registry Client Trait
//
// Defines the interface the reconciler consumes to talk to a RIPE-style
// registry database.
//
// ## Implementations
//
// - REST API: `ripedb-client-rest` crate
// - Test doubles: `tests/common` in this crate
//
// ## Usage
//
// ```rust,ignore
// use ripedb_core::RegistryClient;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let client = /* RegistryClient implementation */;
//
//     let object = client.get_object("aut-num", "AS3333").await?;
//     println!("{object}");
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::object::AttributeList;
use crate::schema::{self, ValidatedObject};

/// Trait for registry database clients
///
/// # Thread Safety
///
/// One client handle is shared by every concurrent reconciler operation, so
/// implementations must be `Send + Sync` and keep any connection or
/// credential state internally synchronised.
///
/// # Contract
///
/// - One remote call per method invocation
/// - No retries or backoff; failures are returned as-is
/// - No caching between calls
/// - A missing object is reported as [`crate::Error::NotFound`]
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Fetch an object by class and primary key
    ///
    /// # Returns
    ///
    /// - `Ok(AttributeList)`: The object as stored, including server-managed attributes
    /// - `Err(Error::NotFound)`: No such object
    /// - `Err(Error)`: The request failed
    async fn get_object(&self, class: &str, key: &str) -> Result<AttributeList, crate::Error>;

    /// Create an object
    ///
    /// # Returns
    ///
    /// The object as the server stored it
    async fn create_object(
        &self,
        class: &str,
        object: &AttributeList,
    ) -> Result<AttributeList, crate::Error>;

    /// Replace an existing object
    ///
    /// # Returns
    ///
    /// The object as the server stored it
    async fn update_object(
        &self,
        class: &str,
        key: &str,
        object: &AttributeList,
    ) -> Result<AttributeList, crate::Error>;

    /// Delete an object
    async fn delete_object(&self, class: &str, key: &str) -> Result<(), crate::Error>;

    /// The configured authoritative source name (e.g. `RIPE`)
    fn source(&self) -> &str;

    /// Validate an object against class-specific rules
    ///
    /// Defaults to the built-in [`schema`] table.
    fn object_to_model(
        &self,
        class: &str,
        object: &AttributeList,
    ) -> Result<ValidatedObject, crate::Error> {
        schema::validate(class, object)
    }

    /// Derive the canonical key of an object without enforcing class rules
    fn object_to_model_unchecked(
        &self,
        class: &str,
        object: &AttributeList,
    ) -> Result<ValidatedObject, crate::Error> {
        schema::validate_unchecked(class, object)
    }

    /// Client name (for logging/debugging)
    fn client_name(&self) -> &'static str;
}
