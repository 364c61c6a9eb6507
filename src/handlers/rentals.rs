//! Rentlist endpoints

use super::{AppState, InsertResult};
use crate::core::RentalError;
use crate::core::validation::{ApiJson, ApiQuery};
use crate::entities::{ActiveRental, NewRental};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct RentlistQuery {
    #[serde(default)]
    pub include_returned: bool,
}

/// POST /cars/rentlist
pub async fn record_rental(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewRental>,
) -> Result<(StatusCode, Json<InsertResult>), RentalError> {
    let rental = state.booking.record_rental(input).await?;
    Ok((StatusCode::CREATED, Json(InsertResult::new(rental.id))))
}

/// GET /cars/rentlist
pub async fn list_rentals(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RentlistQuery>,
) -> Result<Json<Vec<ActiveRental>>, RentalError> {
    Ok(Json(state.booking.list_rentals(query.include_returned).await?))
}
