//! # Car Rental
//!
//! REST backend for a small car-rental business: a catalog of cars,
//! customer rental requests and the list of active rentals.
//!
//! ## Features
//!
//! - **Catalog CRUD**: cars with model, specs, daily rate, photo and a `rentedOut` flag
//! - **Date-range rules**: `DD-MM-YYYY` dates, start in the future, at most 14 days
//! - **Booking lifecycle**: submit → accept → return, with reject at any time
//! - **Compensating accept**: a failed step undoes the earlier ones
//! - **Pluggable storage**: in-memory or MongoDB (`mongodb_backend` feature)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use car_rental::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::load()?;
//!     let stores = Stores::open(&config.storage).await?;
//!     let addr = config.server.bind_address();
//!
//!     ServerBuilder::new()
//!         .with_config(config)
//!         .with_stores(stores)
//!         .serve(&addr)
//!         .await
//! }
//! ```
//!
//! The date rules are usable without the server:
//!
//! ```rust
//! use car_rental::core::validation::{DateRangeError, validate_range};
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
//! let range = validate_range("20-10-2026", "03-11-2026", today).unwrap();
//! assert_eq!(range.span_days(), 14);
//!
//! let err = validate_range("20-10-2026", "04-11-2026", today).unwrap_err();
//! assert!(matches!(err, DateRangeError::SpanTooLong { .. }));
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod handlers;
pub mod server;
pub mod services;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Clock, DataService, DateStamp, Entity, FixedClock, RentalError, RentalResult,
        SystemClock,
        error::{
            AcceptStep, BookingError, ConfigError, EntityError, ErrorResponse, StorageError,
            ValidationError,
        },
        validation::{ApiJson, ApiQuery, BookingPolicy, BookingRange, DateRangeError, validate_range},
    };

    // === Entities ===
    pub use crate::entities::{
        ActiveRental, Car, CarPatch, NewCar, NewRental, RentalRequest, RequestKey,
        RequestSubmission,
    };

    // === Services ===
    pub use crate::services::{BookingService, CatalogService, UpdateOutcome};

    // === Storage ===
    pub use crate::storage::{InMemoryDataService, Stores};
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoDataService;

    // === Config ===
    pub use crate::config::{AppConfig, BookingConfig, ReturnPolicy, StorageBackend};

    // === Server ===
    pub use crate::handlers::AppState;
    pub use crate::server::{ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
