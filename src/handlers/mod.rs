//! HTTP handlers
//!
//! Handlers only translate between HTTP and the services; every rule lives
//! in [`crate::services`].

pub mod cars;
pub mod rentals;
pub mod requests;

use crate::services::{BookingService, CatalogService};
use serde::Serialize;
use uuid::Uuid;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub booking: BookingService,
}

/// Body returned after an insert
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

impl InsertResult {
    pub fn new(id: Uuid) -> Self {
        Self {
            acknowledged: true,
            inserted_id: id,
        }
    }
}

/// Body returned after a delete
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted: bool) -> Self {
        Self {
            acknowledged: true,
            deleted_count: u64::from(deleted),
        }
    }
}

/// Plain `{"message": ...}` body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
