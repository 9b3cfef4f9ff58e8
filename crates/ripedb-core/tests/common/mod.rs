//! Test doubles and common utilities for reconciler contract tests
//!
//! The in-memory registry behaves like the real database where it matters to
//! the reconciler: it stamps `source`, `created` and `last-modified` on every
//! write, matches primary keys case-insensitively and reports absence as
//! `NotFound`.

#![allow(dead_code)]

use ripedb_core::error::{Error, Result};
use ripedb_core::schema::{self, ValidatedObject};
use ripedb_core::{Attribute, AttributeList, RegistryClient};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const CREATED: &str = "2024-01-01T00:00:00Z";
pub const LAST_MODIFIED: &str = "2024-06-01T12:00:00Z";

/// A remote call as seen by the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Get { class: String, key: String },
    Create { class: String, object: AttributeList },
    Update { class: String, key: String, object: AttributeList },
    Delete { class: String, key: String },
}

/// In-memory registry client that records every remote call
pub struct MockRegistryClient {
    source: String,
    /// Enforce the built-in class rules instead of accepting any object
    strict: bool,
    objects: Arc<Mutex<HashMap<(String, String), AttributeList>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    remote_call_count: Arc<AtomicUsize>,
    failure: Arc<Mutex<Option<fn() -> Error>>>,
    /// Commit writes but answer with an empty object
    omit_write_response: Arc<AtomicBool>,
}

impl MockRegistryClient {
    /// Lenient client: validation only derives keys
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            strict: false,
            objects: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            remote_call_count: Arc::new(AtomicUsize::new(0)),
            failure: Arc::new(Mutex::new(None)),
            omit_write_response: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Client using the built-in class rules
    pub fn strict(source: &str) -> Self {
        Self {
            strict: true,
            ..Self::new(source)
        }
    }

    /// Make every following remote call fail with the given error
    pub fn fail_with(&self, failure: fn() -> Error) {
        *self.failure.lock().unwrap() = Some(failure);
    }

    /// Commit following writes but leave the object out of the response
    pub fn omit_write_responses(&self) {
        self.omit_write_response.store(true, Ordering::SeqCst);
    }

    /// Store an object exactly as given, bypassing server stamping
    pub fn seed(&self, class: &str, key: &str, object: AttributeList) {
        self.objects
            .lock()
            .unwrap()
            .insert(storage_key(class, key), object);
    }

    /// The stored object, if any
    pub fn stored(&self, class: &str, key: &str) -> Option<AttributeList> {
        self.objects
            .lock()
            .unwrap()
            .get(&storage_key(class, key))
            .cloned()
    }

    /// Get the number of remote calls made
    pub fn remote_call_count(&self) -> usize {
        self.remote_call_count.load(Ordering::SeqCst)
    }

    /// Get every remote call made, in order
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Create a new client that shares storage and counters with an existing one
    pub fn sharing_state_with(other: &Self) -> Self {
        Self {
            source: other.source.clone(),
            strict: other.strict,
            objects: Arc::clone(&other.objects),
            calls: Arc::clone(&other.calls),
            remote_call_count: Arc::clone(&other.remote_call_count),
            failure: Arc::clone(&other.failure),
            omit_write_response: Arc::clone(&other.omit_write_response),
        }
    }

    fn record(&self, call: RecordedCall) -> Result<()> {
        self.remote_call_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(call);

        match *self.failure.lock().unwrap() {
            Some(failure) => Err(failure()),
            None => Ok(()),
        }
    }

    /// Store an object the way the server would, returning the stored copy
    fn store(&self, class: &str, object: &AttributeList) -> Result<AttributeList> {
        let mut stored: AttributeList = object
            .iter()
            .filter(|a| !matches!(a.name.as_str(), "source" | "created" | "last-modified"))
            .cloned()
            .collect();
        stored.push(Attribute::new("created", CREATED));
        stored.push(Attribute::new("last-modified", LAST_MODIFIED));
        stored.push(Attribute::new("source", self.source.as_str()));

        let key = schema::validate_unchecked(class, &stored)?.key().to_string();
        self.seed(class, &key, stored.clone());

        if self.omit_write_response.load(Ordering::SeqCst) {
            return Ok(AttributeList::new());
        }
        Ok(stored)
    }
}

fn storage_key(class: &str, key: &str) -> (String, String) {
    (class.to_string(), key.to_uppercase())
}

#[async_trait::async_trait]
impl RegistryClient for MockRegistryClient {
    async fn get_object(&self, class: &str, key: &str) -> Result<AttributeList> {
        self.record(RecordedCall::Get {
            class: class.to_string(),
            key: key.to_string(),
        })?;

        self.stored(class, key)
            .ok_or_else(|| Error::not_found(format!("{class} {key}")))
    }

    async fn create_object(&self, class: &str, object: &AttributeList) -> Result<AttributeList> {
        self.record(RecordedCall::Create {
            class: class.to_string(),
            object: object.clone(),
        })?;

        self.store(class, object)
    }

    async fn update_object(
        &self,
        class: &str,
        key: &str,
        object: &AttributeList,
    ) -> Result<AttributeList> {
        self.record(RecordedCall::Update {
            class: class.to_string(),
            key: key.to_string(),
            object: object.clone(),
        })?;

        if self.stored(class, key).is_none() {
            return Err(Error::not_found(format!("{class} {key}")));
        }

        self.store(class, object)
    }

    async fn delete_object(&self, class: &str, key: &str) -> Result<()> {
        self.record(RecordedCall::Delete {
            class: class.to_string(),
            key: key.to_string(),
        })?;

        self.objects
            .lock()
            .unwrap()
            .remove(&storage_key(class, key))
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("{class} {key}")))
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn object_to_model(&self, class: &str, object: &AttributeList) -> Result<ValidatedObject> {
        if self.strict {
            schema::validate(class, object)
        } else {
            schema::validate_unchecked(class, object)
        }
    }

    fn client_name(&self) -> &'static str {
        "mock"
    }
}

/// Build an attribute list from `(name, value)` pairs
pub fn object(pairs: &[(&str, &str)]) -> AttributeList {
    pairs.iter().map(|&(n, v)| Attribute::new(n, v)).collect()
}

/// Build model attributes from `(name, value)` pairs
pub fn attributes(pairs: &[(&str, &str)]) -> Vec<Attribute> {
    object(pairs).into_vec()
}
