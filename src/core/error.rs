//! Typed error handling for the rental service
//!
//! Every failure that can reach an HTTP client is a [`RentalError`]. Each
//! category knows its status code and a stable error code, and the whole type
//! renders itself as a JSON response.
//!
//! # Error Categories
//!
//! - [`EntityError`]: unknown or malformed identifiers (404 / 400)
//! - [`ValidationError`]: rejected input, including booking date rules (400)
//! - [`BookingError`]: lifecycle conflicts and failed accept sagas (409 / 500)
//! - [`StorageError`]: persistence failures (500, details only in logs)
//! - [`ConfigError`]: configuration parsing and validation
//!
//! # Example
//!
//! ```rust,ignore
//! match booking.accept(&request_id).await {
//!     Ok(rental) => println!("rented: {}", rental.car_model),
//!     Err(RentalError::Entity(EntityError::NotFound { .. })) => println!("gone"),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use crate::core::validation::DateRangeError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type of the service
#[derive(Debug)]
pub enum RentalError {
    /// Entity lookups
    Entity(EntityError),

    /// Input validation
    Validation(ValidationError),

    /// Booking lifecycle rules
    Booking(BookingError),

    /// Storage backend failures
    Storage(StorageError),

    /// Configuration errors
    Config(ConfigError),

    /// Anything that should not happen in normal operation
    Internal(String),
}

impl fmt::Display for RentalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RentalError::Entity(e) => write!(f, "{}", e),
            RentalError::Validation(e) => write!(f, "{}", e),
            RentalError::Booking(e) => write!(f, "{}", e),
            RentalError::Storage(e) => write!(f, "{}", e),
            RentalError::Config(e) => write!(f, "{}", e),
            RentalError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for RentalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RentalError::Entity(e) => Some(e),
            RentalError::Validation(e) => Some(e),
            RentalError::Booking(e) => Some(e),
            RentalError::Storage(e) => Some(e),
            RentalError::Config(e) => Some(e),
            RentalError::Internal(_) => None,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RentalError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RentalError::Entity(e) => e.status_code(),
            RentalError::Validation(_) => StatusCode::BAD_REQUEST,
            RentalError::Booking(e) => e.status_code(),
            RentalError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RentalError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RentalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RentalError::Entity(e) => e.error_code(),
            RentalError::Validation(e) => e.error_code(),
            RentalError::Booking(e) => e.error_code(),
            RentalError::Storage(_) => "STORAGE_ERROR",
            RentalError::Config(_) => "CONFIG_ERROR",
            RentalError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    ///
    /// Server-side failures get a generic message; their detail is logged
    /// when the response is produced.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            RentalError::Storage(_) | RentalError::Config(_) | RentalError::Internal(_) => {
                "An error occurred while processing the request.".to_string()
            }
            _ => self.to_string(),
        };

        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RentalError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id
                }))
            }
            RentalError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            RentalError::Validation(ValidationError::DateRange(err)) => {
                Some(serde_json::json!({ "reason": err.error_code() }))
            }
            RentalError::Booking(BookingError::AcceptFailed {
                step, rolled_back, ..
            }) => Some(serde_json::json!({
                "step": step.to_string(),
                "rolled_back": rolled_back
            })),
            _ => None,
        }
    }
}

impl IntoResponse for RentalError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::warn!(code = self.error_code(), error = %self, "request rejected");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups
#[derive(Debug)]
pub enum EntityError {
    /// No entity with this identifier
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Identifier is not a valid UUID
    InvalidId {
        entity_type: &'static str,
        value: String,
    },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", entity_type, id)
            }
            EntityError::InvalidId { entity_type, value } => {
                write!(f, "Invalid {} ID: '{}'", entity_type, value)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::InvalidId { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::InvalidId { .. } => "INVALID_ID",
        }
    }
}

impl From<EntityError> for RentalError {
    fn from(err: EntityError) -> Self {
        RentalError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Booking dates rejected
    DateRange(DateRangeError),

    /// One or more required fields missing or malformed
    FieldErrors(Vec<FieldValidationError>),

    /// Request body is not valid JSON for the endpoint
    InvalidJson { message: String },

    /// Query string does not fit the endpoint's parameters
    InvalidQuery { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DateRange(e) => write!(f, "{}", e),
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
            ValidationError::InvalidQuery { message } => {
                write!(f, "Invalid query: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::DateRange(e) => e.error_code(),
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            ValidationError::InvalidQuery { .. } => "INVALID_QUERY",
        }
    }
}

impl From<ValidationError> for RentalError {
    fn from(err: ValidationError) -> Self {
        RentalError::Validation(err)
    }
}

impl From<DateRangeError> for RentalError {
    fn from(err: DateRangeError) -> Self {
        RentalError::Validation(ValidationError::DateRange(err))
    }
}

// =============================================================================
// Booking Errors
// =============================================================================

/// Step of the accept sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptStep {
    DeleteRequest,
    FlagCar,
    RecordRental,
}

impl fmt::Display for AcceptStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AcceptStep::DeleteRequest => "delete request",
            AcceptStep::FlagCar => "flag car as rented out",
            AcceptStep::RecordRental => "record rental",
        };
        f.write_str(name)
    }
}

/// Errors related to the booking lifecycle
#[derive(Debug)]
pub enum BookingError {
    /// Car is already rented out
    AlreadyRentedOut { car_id: String },

    /// Requested period overlaps an existing booking for the same car
    Overlapping { car_id: String },

    /// A step of the accept sequence failed
    ///
    /// `rolled_back` is false when undoing the earlier steps also failed and
    /// the collections may be out of sync.
    AcceptFailed {
        step: AcceptStep,
        message: String,
        rolled_back: bool,
    },
}

impl fmt::Display for BookingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingError::AlreadyRentedOut { car_id } => {
                write!(f, "Car '{}' is already rented out", car_id)
            }
            BookingError::Overlapping { car_id } => {
                write!(f, "Requested dates overlap an existing booking for car '{}'", car_id)
            }
            BookingError::AcceptFailed {
                step,
                message,
                rolled_back,
            } => {
                if *rolled_back {
                    write!(f, "Accept failed at '{}' and was rolled back: {}", step, message)
                } else {
                    write!(
                        f,
                        "Accept failed at '{}' and could not be fully rolled back: {}",
                        step, message
                    )
                }
            }
        }
    }
}

impl std::error::Error for BookingError {}

impl BookingError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BookingError::AlreadyRentedOut { .. } => StatusCode::CONFLICT,
            BookingError::Overlapping { .. } => StatusCode::CONFLICT,
            BookingError::AcceptFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            BookingError::AlreadyRentedOut { .. } => "CAR_ALREADY_RENTED",
            BookingError::Overlapping { .. } => "BOOKING_OVERLAP",
            BookingError::AcceptFailed { .. } => "ACCEPT_FAILED",
        }
    }
}

impl From<BookingError> for RentalError {
    fn from(err: BookingError) -> Self {
        RentalError::Booking(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug)]
pub enum StorageError {
    /// Could not reach the backend
    ConnectionError { backend: String, message: String },

    /// A store operation failed
    OperationFailed { operation: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ConnectionError { backend, message } => {
                write!(f, "Failed to connect to {}: {}", backend, message)
            }
            StorageError::OperationFailed { operation, message } => {
                write!(f, "Storage operation '{}' failed: {}", operation, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for RentalError {
    fn from(err: StorageError) -> Self {
        RentalError::Storage(err)
    }
}

/// Attach an operation name to a storage `anyhow::Result`
pub trait StorageResultExt<T> {
    fn storage(self, operation: &str) -> RentalResult<T>;
}

impl<T> StorageResultExt<T> for anyhow::Result<T> {
    fn storage(self, operation: &str) -> RentalResult<T> {
        self.map_err(|e| {
            RentalError::Storage(StorageError::OperationFailed {
                operation: operation.to_string(),
                message: format!("{:#}", e),
            })
        })
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    FileNotFound { path: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for RentalError {
    fn from(err: ConfigError) -> Self {
        RentalError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for RentalError {
    fn from(err: serde_json::Error) -> Self {
        RentalError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for RentalError {
    fn from(err: serde_yaml::Error) -> Self {
        RentalError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

/// A specialized Result type for rental operations
pub type RentalResult<T> = Result<T, RentalError>;
