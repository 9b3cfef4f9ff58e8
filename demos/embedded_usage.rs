//! Minimal embedding example for ripedb-core
//!
//! Drives the reconciler through a full object lifecycle against an
//! in-memory registry that behaves like the real server: it stamps
//! bookkeeping attributes on write and reports unknown keys as not found.

use ripedb_core::functions::{self, get_all, get_first};
use ripedb_core::{Attribute, AttributeList, Error, ObjectModel, Reconciler, RegistryClient, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

type ObjectTable = HashMap<(String, String), AttributeList>;

/// In-memory registry for embedded usage
struct EmbeddedRegistry {
    source: String,
    objects: Mutex<ObjectTable>,
}

impl EmbeddedRegistry {
    fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            objects: Mutex::new(HashMap::new()),
        }
    }

    fn objects(&self) -> Result<MutexGuard<'_, ObjectTable>> {
        self.objects
            .lock()
            .map_err(|_| Error::Other("registry lock poisoned".to_string()))
    }

    /// Store `object` the way the server would, returning the stored copy
    fn store(&self, class: &str, key: &str, object: &AttributeList) -> Result<AttributeList> {
        let mut stored: AttributeList = object
            .iter()
            .filter(|a| a.name != "source")
            .cloned()
            .collect();
        stored.push(Attribute::new("created", "2024-01-15T10:30:00Z"));
        stored.push(Attribute::new("last-modified", "2024-06-01T08:00:00Z"));
        stored.push(Attribute::new("source", self.source.clone()));

        println!("[Registry] Stored {} {}", class, key);
        self.objects()?
            .insert((class.to_string(), key.to_string()), stored.clone());
        Ok(stored)
    }
}

#[async_trait::async_trait]
impl RegistryClient for EmbeddedRegistry {
    async fn get_object(&self, class: &str, key: &str) -> Result<AttributeList> {
        self.objects()?
            .get(&(class.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| Error::not_found(format!("{} {}", class, key)))
    }

    async fn create_object(&self, class: &str, object: &AttributeList) -> Result<AttributeList> {
        let key = self.object_to_model(class, object)?.key().to_string();
        if self.objects()?.contains_key(&(class.to_string(), key.clone())) {
            return Err(Error::conflict(format!("{} {} already exists", class, key)));
        }
        self.store(class, &key, object)
    }

    async fn update_object(
        &self,
        class: &str,
        key: &str,
        object: &AttributeList,
    ) -> Result<AttributeList> {
        if !self.objects()?.contains_key(&(class.to_string(), key.to_string())) {
            return Err(Error::not_found(format!("{} {}", class, key)));
        }
        self.store(class, key, object)
    }

    async fn delete_object(&self, class: &str, key: &str) -> Result<()> {
        self.objects()?
            .remove(&(class.to_string(), key.to_string()))
            .map(|_| println!("[Registry] Deleted {} {}", class, key))
            .ok_or_else(|| Error::not_found(format!("{} {}", class, key)))
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn client_name(&self) -> &'static str {
        "embedded"
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    println!("=== Embedded ripedb-core Example ===\n");

    let registry = Arc::new(EmbeddedRegistry::new("TEST"));
    let reconciler = Reconciler::new(registry.clone());

    println!("1. Creating as-set...");
    let desired = ObjectModel::new(
        "as-set",
        "AS-EXAMPLE",
        vec![
            Attribute::new("descr", "Example customers"),
            Attribute::new("members", "AS64496"),
            Attribute::new("tech-c", "EX1-TEST"),
            Attribute::new("admin-c", "EX1-TEST"),
            Attribute::new("mnt-by", "EXAMPLE-MNT"),
        ],
    );
    let created = reconciler.create(desired).await?;
    println!("{}\n", serde_json::to_string_pretty(&created)?);

    println!("2. Updating members (full replacement)...");
    let mut changed = created.clone();
    changed.attributes.insert(2, Attribute::new("members", "AS64497"));
    let updated = reconciler.update(changed).await?;
    println!("   {} attributes now managed\n", updated.attributes.len());

    println!("3. Importing and reading back by identifier...");
    let imported = reconciler.import(&created.id)?;
    let read = reconciler.read(imported).await?;
    println!("   members: {:?}", get_all(&read.attributes, "members"));
    println!("   descr:   {:?}", get_first(&read.attributes, "descr"));
    println!("   remarks: {:?}\n", get_first(&read.attributes, "remarks"));

    println!("4. Data source view...");
    let view = reconciler.read_data_source("as-set", "AS-EXAMPLE").await?;
    println!("   grouped: {}", serde_json::to_string(&view.grouped)?);
    println!("   metadata: {:?}\n", view.metadata);

    println!("5. Calling lookup functions through the host binding...");
    let attributes = serde_json::to_value(&view.raw_attributes)?;
    for function in functions::all() {
        let result = function.run(&[attributes.clone(), serde_json::json!("mnt-by")])?;
        println!("   {}(raw, \"mnt-by\") = {}", function.name(), result);
    }
    println!();

    println!("6. Deleting...");
    reconciler.delete(&read).await?;
    match reconciler.read(read).await {
        Err(e) if e.is_not_found() => println!("   gone: {}", e),
        other => println!("   unexpected: {:?}", other),
    }

    println!("\n=== Example complete ===");
    Ok(())
}
