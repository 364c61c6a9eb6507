//! Rental request endpoints

use super::{AppState, InsertResult, MessageResponse};
use crate::core::RentalError;
use crate::core::validation::ApiJson;
use crate::entities::{ActiveRental, RentalRequest, RequestKey, RequestSubmission};
use crate::services::parse_id;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// POST /cars/request
pub async fn submit_request(
    State(state): State<AppState>,
    ApiJson(submission): ApiJson<RequestSubmission>,
) -> Result<(StatusCode, Json<InsertResult>), RentalError> {
    let request = state.booking.submit(submission).await?;
    Ok((StatusCode::CREATED, Json(InsertResult::new(request.id))))
}

/// GET /cars/getrequests
pub async fn list_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<RentalRequest>>, RentalError> {
    Ok(Json(state.booking.list_requests().await?))
}

/// DELETE /cars/deleterequest
pub async fn delete_request_by_key(
    State(state): State<AppState>,
    ApiJson(key): ApiJson<RequestKey>,
) -> Result<Json<MessageResponse>, RentalError> {
    state.booking.reject_by_key(key).await?;
    Ok(Json(MessageResponse::new("Request deleted successfully")))
}

/// DELETE /cars/requests/{id}
pub async fn reject_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, RentalError> {
    let id = parse_id("request", &id)?;
    state.booking.reject(&id).await?;
    Ok(Json(MessageResponse::new("Request deleted successfully")))
}

/// POST /cars/requests/{id}/accept
pub async fn accept_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ActiveRental>), RentalError> {
    let id = parse_id("request", &id)?;
    let rental = state.booking.accept(&id).await?;
    Ok((StatusCode::CREATED, Json(rental)))
}
