//! Rental server entry point
//!
//! Configuration: `RENTAL_CONFIG` (YAML file), `PORT`, `MONGODB_URI`,
//! `MONGODB_DATABASE`. Log filtering follows `RUST_LOG`.

use anyhow::Result;
use car_rental::config::AppConfig;
use car_rental::server::ServerBuilder;
use car_rental::storage::Stores;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("car_rental=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::load()?;
    let stores = Stores::open(&config.storage).await?;
    let addr = config.server.bind_address();

    tracing::info!(
        backend = ?config.storage.backend,
        return_policy = ?config.booking.return_policy,
        reject_overlaps = config.booking.reject_overlaps,
        "Starting rental server"
    );

    ServerBuilder::new()
        .with_config(config)
        .with_stores(stores)
        .serve(&addr)
        .await
}
