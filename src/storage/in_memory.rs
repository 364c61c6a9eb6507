//! In-memory implementation of DataService for testing and development

use crate::core::{DataService, Entity};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory data service implementation
///
/// Records are kept in insertion order. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryDataService<T> {
    records: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T> InMemoryDataService<T> {
    /// Create a new, empty in-memory data service
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }
}

impl<T> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, entity: T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if records.contains_key(&entity.id()) {
            return Err(anyhow!(
                "{} with id '{}' already exists",
                T::resource_name_singular(),
                entity.id()
            ));
        }

        records.insert(entity.id(), entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records.values().cloned().collect())
    }

    async fn update(&self, id: &Uuid, entity: T) -> Result<T> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let slot = records
            .get_mut(id)
            .ok_or_else(|| anyhow!("{} not found: {}", T::resource_name_singular(), id))?;

        *slot = entity.clone();

        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let mut records = self
            .records
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(records.shift_remove(id).is_some())
    }

    async fn find_by(&self, criteria: &[(&str, String)]) -> Result<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(records
            .values()
            .filter(|record| record.matches(criteria))
            .cloned()
            .collect())
    }
}
