// # ripedb-core
//
// Object mapping and reconciliation engine for RIPE Database objects.
//
// ## Architecture Overview
//
// This library turns declarative object definitions into writes against a
// registry database that stores ordered RPSL attribute lists:
// - **AttributeList**: Ordered `name: value` pairs, the wire form of an object
// - **mapper**: Conversions between attribute lists and the resource model
// - **filter**: Strips the attributes the server manages on its own
// - **schema**: Class-specific structural validation and primary keys
// - **Reconciler**: Create/read/update/delete/import against a `RegistryClient`
// - **functions**: `get_first` / `get_all` lookups for expression evaluators
//
// ## Design Principles
//
// 1. **Order is data**: Attribute lists are never turned into maps
// 2. **Server is authoritative**: Keys and bookkeeping come from responses
// 3. **Stateless**: Every operation works on its own arguments only
// 4. **No hidden retries**: Failures surface once, with context

pub mod config;
pub mod error;
pub mod filter;
pub mod functions;
pub mod mapper;
pub mod model;
pub mod object;
pub mod reconciler;
pub mod schema;
pub mod traits;

// Re-export core types for convenience
pub use config::{AuthConfig, ClientConfig};
pub use error::{Error, Result};
pub use mapper::{ObjectId, derive_id, parse_id};
pub use model::{ObjectModel, ObjectView, ServerMetadata};
pub use object::{Attribute, AttributeList};
pub use reconciler::Reconciler;
pub use schema::ValidatedObject;
pub use traits::RegistryClient;
