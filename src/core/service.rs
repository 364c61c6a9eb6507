//! Storage trait for persisted records

use crate::core::entity::Entity;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for storing one collection of records
///
/// Implementations are plain pass-through to a document store. Every call is
/// a single-document write or a read; nothing here spans several records
/// atomically.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Insert a new record
    async fn create(&self, entity: T) -> Result<T>;

    /// Get a record by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// List all records in insertion order
    async fn list(&self) -> Result<Vec<T>>;

    /// Replace an existing record
    ///
    /// Fails if no record with this ID exists.
    async fn update(&self, id: &Uuid, entity: T) -> Result<T>;

    /// Delete a record, returning whether one was removed
    async fn delete(&self, id: &Uuid) -> Result<bool>;

    /// Find records whose fields equal every `(field, value)` pair
    async fn find_by(&self, criteria: &[(&str, String)]) -> Result<Vec<T>>;
}

