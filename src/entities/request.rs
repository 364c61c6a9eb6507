//! Rental requests awaiting an administrator decision

use crate::core::date::DateStamp;
use crate::core::validation::BookingRange;
use crate::impl_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A customer's booking request
///
/// Requests are removed when accepted or rejected; there is no stored
/// "rejected" state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalRequest {
    pub id: Uuid,
    pub car_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub from_date: DateStamp,
    pub to_date: DateStamp,
    #[serde(rename = "requestTime")]
    pub requested_at: DateTime<Utc>,
}

impl_entity!(RentalRequest, "requests", "request", {
    "carId" => car_id,
    "customerName" => customer_name,
    "customerPhone" => customer_phone,
    "fromDate" => from_date,
    "toDate" => to_date,
});

impl RentalRequest {
    pub fn range(&self) -> BookingRange {
        BookingRange {
            from: self.from_date,
            to: self.to_date,
        }
    }
}

/// Body of `POST /cars/request`
///
/// Dates stay raw strings here; the booking rules decide whether they are
/// missing, malformed or out of range.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RequestSubmission {
    #[serde(default)]
    #[validate(length(min = 1, message = "carId is required"))]
    pub car_id: String,

    #[serde(default)]
    pub customer_name: String,

    #[serde(default)]
    pub customer_phone: String,

    #[serde(default)]
    pub from_date: String,

    #[serde(default)]
    pub to_date: String,
}

/// Body of `DELETE /cars/deleterequest`
///
/// Identifies a request by car and customer instead of by id.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RequestKey {
    #[serde(default)]
    #[validate(length(min = 1, message = "carId is required"))]
    pub car_id: String,

    #[serde(default)]
    pub customer_name: String,

    #[serde(default)]
    pub customer_phone: String,
}
