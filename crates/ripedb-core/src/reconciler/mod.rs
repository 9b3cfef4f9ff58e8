//! Object reconciler
//!
//! The Reconciler is responsible for:
//! - Assembling full RPSL objects from the resource model on write
//! - Validating assembled objects before anything is sent
//! - Addressing reads, updates and deletes by composite identifier
//! - Filtering server-managed attributes out of every response
//!
//! ## Architecture
//!
//! ```text
//!   host ── ObjectModel ──┐
//!                         ▼
//!                  ┌──────────────┐      ┌────────────────┐
//!                  │  Reconciler  │─────▶│ RegistryClient │──▶ remote database
//!                  └──────────────┘◀─────└────────────────┘
//!                     │        ▲   AttributeList
//!                     ▼        │
//!                  ┌──────┐ ┌────────┐
//!                  │Mapper│ │ Filter │
//!                  └──────┘ └────────┘
//! ```
//!
//! ## Write Flow
//!
//! 1. Map `model.attributes` to an attribute list
//! 2. Prepend `(class, value)` as element 0
//! 3. Append `(source, <client source>)`
//! 4. Validate through the client; nothing is sent on failure
//! 5. Submit, then filter the server's response back into the model
//!
//! Every operation makes at most one remote call and never retries. The
//! reconciler holds no mutable state, so one instance can serve any number of
//! concurrent operations.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::filter::{extract_metadata, filter_object};
use crate::mapper::{self, ObjectId, derive_id, parse_id};
use crate::model::{ObjectModel, ObjectView};
use crate::object::{Attribute, AttributeList};
use crate::schema::ValidatedObject;
use crate::traits::RegistryClient;

/// Create/read/update/delete/import of RPSL objects
///
/// ## Threading
///
/// Cloning is cheap; clones share the client handle.
#[derive(Clone)]
pub struct Reconciler {
    /// Registry client used for every remote call
    client: Arc<dyn RegistryClient>,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("client", &self.client.client_name())
            .field("source", &self.client.source())
            .finish()
    }
}

impl Reconciler {
    /// Create a new reconciler around a client handle
    pub fn new(client: Arc<dyn RegistryClient>) -> Self {
        Self { client }
    }

    /// Assemble the full object that would be written for `model`
    ///
    /// # Errors
    ///
    /// [`Error::MalformedIdentifier`] if the class or primary key is empty.
    pub fn assemble(&self, model: &ObjectModel) -> Result<AttributeList> {
        ObjectId::new(model.class.as_str(), model.value.as_str())?;

        let mut object = mapper::model_to_object(model);
        object.prepend(Attribute::new(model.class.as_str(), model.value.as_str()));
        object.push(Attribute::new("source", self.client.source()));

        Ok(object)
    }

    /// Create the object described by `model`
    ///
    /// # Returns
    ///
    /// The model as stored: `id` derived from the server's primary key and
    /// `attributes` filtered from the server's response.
    pub async fn create(&self, model: ObjectModel) -> Result<ObjectModel> {
        let object = self.assemble(&model)?;
        let validated = self.validate(&model.class, &object)?;
        let pending_id = derive_id(&model.class, validated.key());

        info!("Creating {}", pending_id);

        let response = self
            .client
            .create_object(&model.class, validated.attributes())
            .await
            .map_err(|e| Error::remote_write("create", pending_id.as_str(), e))?;

        // The write is committed from here on; never fail without an id
        let stored = self.stored_object(&pending_id, response, &validated);
        let id = match self.client.object_to_model_unchecked(&model.class, &stored) {
            Ok(canonical) => derive_id(&model.class, canonical.key()),
            Err(e) => {
                warn!("Cannot key the stored {} ({}); keeping the submitted key", pending_id, e);
                pending_id
            }
        };
        info!("Created {}", id);

        Ok(ObjectModel {
            id,
            attributes: filter_object(&stored),
            ..model
        })
    }

    /// Refresh `model` from the remote database
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedIdentifier`]: `model.id` cannot be parsed
    /// - [`Error::NotFound`]: the object is gone; drop it from state
    /// - [`Error::RemoteRead`]: the client failed
    pub async fn read(&self, model: ObjectModel) -> Result<ObjectModel> {
        let id = parse_id(&model.id)?;
        let object = self.fetch(&id).await?;

        let value = object
            .head()
            .map(|head| head.value.clone())
            .ok_or_else(|| Error::not_found(id.to_string()))?;

        // State carries the server's spelling of the key from here on
        let canonical = match self.client.object_to_model_unchecked(&id.class, &object) {
            Ok(canonical) => derive_id(&id.class, canonical.key()),
            Err(_) => model.id,
        };

        debug!("Read {} ({} attributes)", canonical, object.len());

        Ok(ObjectModel {
            id: canonical,
            class: id.class,
            value,
            attributes: filter_object(&object),
        })
    }

    /// Replace the remote object with the one described by `model`
    ///
    /// The primary key cannot change through an update. When `model.id` is
    /// set and names a different class or key than the assembled object, the
    /// update is refused before anything is sent. Keys compare
    /// case-insensitively, as the registry does.
    pub async fn update(&self, model: ObjectModel) -> Result<ObjectModel> {
        let object = self.assemble(&model)?;
        let validated = self.validate(&model.class, &object)?;
        let id = derive_id(&model.class, validated.key());

        if !model.id.is_empty() {
            let prior = parse_id(&model.id)?;
            if prior.class != model.class || !same_key(&prior.key, validated.key()) {
                warn!("Refusing to move {} to {}", model.id, id);
                return Err(Error::invalid_input(format!(
                    "primary key of {} cannot change to {}; the object must be replaced",
                    model.id, id
                )));
            }
        }

        info!("Updating {}", id);

        let response = self
            .client
            .update_object(&model.class, validated.key(), validated.attributes())
            .await
            .map_err(|e| Error::remote_write("update", id.as_str(), e))?;

        let stored = self.stored_object(&id, response, &validated);

        Ok(ObjectModel {
            id,
            attributes: filter_object(&stored),
            ..model
        })
    }

    /// Delete the object identified by `model.id`
    ///
    /// There is no compensation on failure; the host keeps the resource so the
    /// delete can be retried.
    pub async fn delete(&self, model: &ObjectModel) -> Result<()> {
        let id = parse_id(&model.id)?;

        info!("Deleting {}", id);

        self.client
            .delete_object(&id.class, &id.key)
            .await
            .map_err(|e| Error::remote_write("delete", id.to_string(), e))
    }

    /// Turn an import identifier into a model ready for [`Reconciler::read`]
    ///
    /// No remote call is made. `value` is provisional until the read replaces
    /// it with the server's head value.
    pub fn import(&self, raw_id: &str) -> Result<ObjectModel> {
        let id = parse_id(raw_id)?;

        debug!("Importing {}", id);

        Ok(ObjectModel {
            id: raw_id.to_string(),
            class: id.class,
            value: id.key,
            attributes: Vec::new(),
        })
    }

    /// Look up an object by class and key for a read-only view
    pub async fn read_data_source(&self, class: &str, key: &str) -> Result<ObjectView> {
        let id = ObjectId::new(class, key)?;
        let object = self.fetch(&id).await?;

        let value = object
            .head()
            .map(|head| head.value.clone())
            .ok_or_else(|| Error::not_found(id.to_string()))?;

        let attributes = filter_object(&object);

        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for attribute in &attributes {
            grouped
                .entry(attribute.name.clone())
                .or_default()
                .push(attribute.value.clone());
        }

        Ok(ObjectView {
            id: id.to_string(),
            class: id.class,
            value,
            attributes,
            raw_attributes: mapper::object_to_model(&object),
            grouped,
            metadata: extract_metadata(&object),
        })
    }

    /// Fetch an object, keeping absence distinct from failure
    async fn fetch(&self, id: &ObjectId) -> Result<AttributeList> {
        match self.client.get_object(&id.class, &id.key).await {
            Ok(object) if object.is_empty() => Err(Error::not_found(id.to_string())),
            Ok(object) => Ok(object),
            Err(e) if e.is_not_found() => {
                debug!("{} not found", id);
                Err(Error::not_found(id.to_string()))
            }
            Err(e) => Err(Error::remote_read(id.to_string(), e)),
        }
    }

    /// The object a successful write left on the server
    ///
    /// Falls back to the submitted object when the response carries none.
    fn stored_object(
        &self,
        id: &str,
        response: AttributeList,
        submitted: &ValidatedObject,
    ) -> AttributeList {
        if response.is_empty() {
            warn!("Write of {} returned no object; using the submitted attributes", id);
            submitted.attributes().clone()
        } else {
            response
        }
    }

    /// Run the client's class validation, surfacing any failure as a schema error
    fn validate(&self, class: &str, object: &AttributeList) -> Result<ValidatedObject> {
        self.client
            .object_to_model(class, object)
            .map_err(|e| match e {
                Error::SchemaValidation { .. } => e,
                other => Error::schema(class, other.to_string()),
            })
    }
}

/// Primary keys are case-insensitive in the registry
fn same_key(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
