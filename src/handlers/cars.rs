//! Catalog endpoints and car return

use super::{AppState, DeleteResult, InsertResult, MessageResponse};
use crate::core::RentalError;
use crate::core::validation::ApiJson;
use crate::entities::{Car, CarPatch, NewCar};
use crate::services::{UpdateOutcome, parse_id};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// GET /cars
pub async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<Car>>, RentalError> {
    Ok(Json(state.catalog.list().await?))
}

/// GET /cars/{id}
pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Car>, RentalError> {
    let id = parse_id("car", &id)?;
    Ok(Json(state.catalog.get(&id).await?))
}

/// POST /cars
pub async fn create_car(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewCar>,
) -> Result<(StatusCode, Json<InsertResult>), RentalError> {
    let car = state.catalog.create(input).await?;
    Ok((StatusCode::CREATED, Json(InsertResult::new(car.id))))
}

/// PUT /cars/{id}
pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<CarPatch>,
) -> Result<Json<MessageResponse>, RentalError> {
    let id = parse_id("car", &id)?;

    let message = match state.catalog.update(&id, patch).await? {
        UpdateOutcome::Updated(_) => "Car updated successfully",
        UpdateOutcome::NoChanges(_) => "No changes made",
    };
    Ok(Json(MessageResponse::new(message)))
}

/// DELETE /cars/{id}
pub async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResult>, RentalError> {
    let id = parse_id("car", &id)?;
    let deleted = state.catalog.delete(&id).await?;
    Ok(Json(DeleteResult::new(deleted)))
}

/// POST /cars/{id}/return
pub async fn return_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Car>, RentalError> {
    let id = parse_id("car", &id)?;
    Ok(Json(state.booking.return_car(&id).await?))
}
