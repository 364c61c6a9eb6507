//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::InMemoryDataService;
#[cfg(feature = "mongodb_backend")]
pub use self::mongodb::MongoDataService;

use crate::config::{StorageBackend, StorageConfig};
use crate::core::DataService;
use crate::entities::{ActiveRental, Car, RentalRequest};
use anyhow::Result;
use std::sync::Arc;

/// The three collections the service works with
#[derive(Clone)]
pub struct Stores {
    pub cars: Arc<dyn DataService<Car>>,
    pub requests: Arc<dyn DataService<RentalRequest>>,
    pub rentals: Arc<dyn DataService<ActiveRental>>,
}

impl Stores {
    /// Fresh, empty in-memory collections
    pub fn in_memory() -> Self {
        Self {
            cars: Arc::new(InMemoryDataService::<Car>::new()),
            requests: Arc::new(InMemoryDataService::<RentalRequest>::new()),
            rentals: Arc::new(InMemoryDataService::<ActiveRental>::new()),
        }
    }

    /// Collections in a MongoDB database
    #[cfg(feature = "mongodb_backend")]
    pub fn mongodb(database: ::mongodb::Database) -> Self {
        Self {
            cars: Arc::new(MongoDataService::<Car>::new(database.clone())),
            requests: Arc::new(MongoDataService::<RentalRequest>::new(database.clone())),
            rentals: Arc::new(MongoDataService::<ActiveRental>::new(database)),
        }
    }

    /// Open the backend selected in configuration
    pub async fn open(config: &StorageConfig) -> Result<Self> {
        match config.backend {
            StorageBackend::InMemory => {
                tracing::info!("Using in-memory storage");
                Ok(Self::in_memory())
            }
            #[cfg(feature = "mongodb_backend")]
            StorageBackend::Mongodb => {
                let uri = config
                    .mongodb_uri
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("storage.mongodb_uri is not set"))?;
                let database = self::mongodb::connect(uri, &config.database).await?;
                tracing::info!(database = %config.database, "Using MongoDB storage");
                Ok(Self::mongodb(database))
            }
            #[cfg(not(feature = "mongodb_backend"))]
            StorageBackend::Mongodb => Err(anyhow::anyhow!(
                "MongoDB storage requested but the `mongodb_backend` feature is not enabled"
            )),
        }
    }
}
