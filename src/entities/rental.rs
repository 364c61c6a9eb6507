//! Active rentals (the "rentlist")

use crate::core::date::DateStamp;
use crate::core::validation::BookingRange;
use crate::entities::{Car, RentalRequest};
use crate::impl_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A car currently out with a customer
///
/// Model and photo are a snapshot of the car at acceptance time; later edits
/// to the car do not show up here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveRental {
    pub id: Uuid,
    pub car_id: Uuid,
    pub car_model: String,
    #[serde(rename = "carPhoto")]
    pub car_photo_url: String,
    pub from_date: DateStamp,
    pub to_date: DateStamp,
    pub customer_name: String,
    #[serde(rename = "rentalTime")]
    pub created_at: DateTime<Utc>,
    /// Set when the car came back and the rental is kept as history
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returned_at: Option<DateTime<Utc>>,
}

impl_entity!(ActiveRental, "rentlist", "rental", {
    "carId" => car_id,
    "customerName" => customer_name,
    "fromDate" => from_date,
    "toDate" => to_date,
});

impl ActiveRental {
    /// Rental created by accepting `request` for `car`
    pub fn from_accepted(request: &RentalRequest, car: &Car, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            car_id: car.id,
            car_model: car.model.clone(),
            car_photo_url: car.photo_url.clone(),
            from_date: request.from_date,
            to_date: request.to_date,
            customer_name: request.customer_name.clone(),
            created_at: now,
            returned_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.returned_at.is_none()
    }

    pub fn range(&self) -> BookingRange {
        BookingRange {
            from: self.from_date,
            to: self.to_date,
        }
    }
}

/// Body of `POST /cars/rentlist`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewRental {
    #[serde(default)]
    #[validate(length(min = 1, message = "carId is required"))]
    pub car_id: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "carModel is required"))]
    pub car_model: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "carPhoto is required"))]
    pub car_photo: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "fromDate is required"))]
    pub from_date: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "toDate is required"))]
    pub to_date: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "customerName is required"))]
    pub customer_name: String,
}
