//! Axum extractors for request bodies and query strings
//!
//! Wrap `axum::Json` and `axum::extract::Query` so malformed input is
//! rejected with the same `{code, message}` envelope as every other error
//! instead of axum's plain-text rejection.

use crate::core::error::{RentalError, ValidationError};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};

/// JSON body extractor with crate-formatted rejections
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_car(
///     State(state): State<AppState>,
///     ApiJson(payload): ApiJson<NewCar>,
/// ) -> Result<impl IntoResponse, RentalError> {
///     // payload is a well-formed NewCar
/// }
/// ```
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(RentalError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor with crate-formatted rejections
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(RentalError))]
pub struct ApiQuery<T>(pub T);

impl From<JsonRejection> for RentalError {
    fn from(rejection: JsonRejection) -> Self {
        RentalError::Validation(ValidationError::InvalidJson {
            message: rejection.body_text(),
        })
    }
}

impl From<QueryRejection> for RentalError {
    fn from(rejection: QueryRejection) -> Self {
        RentalError::Validation(ValidationError::InvalidQuery {
            message: rejection.body_text(),
        })
    }
}
