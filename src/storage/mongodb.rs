//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoDataService<T>`, a `DataService<T>` backed by a
//! `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag.
//!
//! # Storage model
//!
//! One collection per record type, named after `T::resource_name()`
//! ("cars", "requests", "rentlist").
//!
//! # Serialization strategy
//!
//! Records are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents. UUIDs, timestamps and `DD-MM-YYYY` dates
//! are therefore stored as strings. The `id` field is mapped to MongoDB's
//! `_id` convention.

use crate::core::{DataService, Entity};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::{Client, Database};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document,
/// renaming `id` → `_id` for MongoDB convention.
fn json_to_document(json: serde_json::Value) -> Result<Document> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value,
/// renaming `_id` → `id` for domain convention.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

/// Convert a UUID to its BSON string representation for queries.
fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

/// Build an equality filter from string criteria.
///
/// Values are matched both as strings and as their native BSON type, so
/// `("rentedOut", "true")` finds documents holding the boolean `true`.
fn criteria_filter(criteria: &[(&str, String)]) -> Document {
    let mut filter = Document::new();

    for (field, value) in criteria {
        let key = if *field == "id" { "_id" } else { *field };

        let mut variants: Vec<Bson> = vec![Bson::String(value.clone())];
        match value.as_str() {
            "true" => variants.push(Bson::Boolean(true)),
            "false" => variants.push(Bson::Boolean(false)),
            _ => {
                if let Ok(f) = value.parse::<f64>() {
                    variants.push(Bson::Double(f));
                }
            }
        }

        if variants.len() == 1 {
            filter.insert(key, variants.remove(0));
        } else {
            filter.insert(key, doc! { "$in": variants });
        }
    }

    filter
}

/// Connect to MongoDB and select a database
pub async fn connect(uri: &str, database: &str) -> Result<Database> {
    let client = Client::with_uri_str(uri)
        .await
        .map_err(|e| anyhow!("Failed to connect to MongoDB: {}", e))?;
    Ok(client.database(database))
}

// ---------------------------------------------------------------------------
// MongoDataService<T>
// ---------------------------------------------------------------------------

/// Generic data storage service backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// let db = car_rental::storage::mongodb::connect("mongodb://localhost:27017", "rental").await?;
/// let cars = MongoDataService::<Car>::new(db);
/// let car = cars.create(car).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoDataService<T> {
    database: Database,
    _marker: std::marker::PhantomData<T>,
}

impl<T> MongoDataService<T> {
    /// Create a new `MongoDataService` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: std::marker::PhantomData,
        }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }
}

impl<T: Entity> MongoDataService<T> {
    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(T::resource_name())
    }

    fn entity_to_document(entity: &T) -> Result<Document> {
        let json = serde_json::to_value(entity)
            .map_err(|e| anyhow!("Failed to serialize {}: {}", T::resource_name_singular(), e))?;
        json_to_document(json)
    }

    fn document_to_entity(doc: Document) -> Result<T> {
        let json = document_to_json(doc);
        serde_json::from_value(json).map_err(|e| {
            anyhow!(
                "Failed to deserialize {} from document: {}",
                T::resource_name_singular(),
                e
            )
        })
    }

    async fn collect(&self, filter: Document) -> Result<Vec<T>> {
        let cursor = self
            .collection()
            .find(filter)
            .await
            .map_err(|e| anyhow!("Failed to query {}: {}", T::resource_name(), e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect {}: {}", T::resource_name(), e))?;

        docs.into_iter().map(Self::document_to_entity).collect()
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for MongoDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let doc = Self::entity_to_document(&entity)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to create {}: {}", T::resource_name_singular(), e))?;

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to get {}: {}", T::resource_name_singular(), e))?;

        doc.map(Self::document_to_entity).transpose()
    }

    async fn list(&self) -> Result<Vec<T>> {
        self.collect(doc! {}).await
    }

    /// Replace an existing document.
    ///
    /// Returns `Err` if no document matched.
    async fn update(&self, id: &Uuid, entity: T) -> Result<T> {
        let doc = Self::entity_to_document(&entity)?;

        let result = self
            .collection()
            .replace_one(doc! { "_id": uuid_bson(id) }, doc)
            .await
            .map_err(|e| anyhow!("Failed to update {}: {}", T::resource_name_singular(), e))?;

        if result.matched_count == 0 {
            return Err(anyhow!("{} not found: {}", T::resource_name_singular(), id));
        }

        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to delete {}: {}", T::resource_name_singular(), e))?;

        Ok(result.deleted_count > 0)
    }

    async fn find_by(&self, criteria: &[(&str, String)]) -> Result<Vec<T>> {
        self.collect(criteria_filter(criteria)).await
    }
}
