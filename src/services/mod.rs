//! Business operations on top of the stores
//!
//! - [`CatalogService`]: CRUD over cars
//! - [`BookingService`]: request → accept → return lifecycle

pub mod booking;
pub mod catalog;
mod saga;

pub use booking::BookingService;
pub use catalog::{CatalogService, UpdateOutcome};

use crate::core::error::{EntityError, RentalResult};
use uuid::Uuid;

/// Parse an identifier received from a client
pub fn parse_id(entity_type: &'static str, raw: &str) -> RentalResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| {
        EntityError::InvalidId {
            entity_type,
            value: raw.to_string(),
        }
        .into()
    })
}

pub(crate) fn not_found(entity_type: &'static str, id: impl ToString) -> EntityError {
    EntityError::NotFound {
        entity_type,
        id: id.to_string(),
    }
}
