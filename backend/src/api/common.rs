//! Response envelope and error-to-HTTP conversion.
//!
//! Provides structured responses and the conversion between service-layer
//! errors and HTTP responses. Includes:
//! - Standard response envelope
//! - `ErrorKind` to HTTP status code mapping
//! - Validation error formatting helpers
//!
//! # Response Format
//! All errors return consistent JSON responses containing:
//! - `message`: Human-readable message
//! - `error.code`: Machine-readable error code
//! - `error.details`: Optional field-specific validation errors
//!
//! # Error Handling Flow
//! 1. Service layer returns a `ServiceError`
//! 2. `service_error_to_http` converts it to a status and envelope
//! 3. Infrastructure failures are logged here and rendered generically

pub use crate::errors::FieldError;

use crate::errors::{ErrorKind, ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,
    /// Response timestamp
    pub timestamp: String,
}

/// Error details for failed requests
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Machine-readable error code
    pub code: String,
    /// Field-specific validation errors when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create an error response
    pub fn error(
        message: impl Into<String>,
        code: impl Into<String>,
        details: Option<Vec<FieldError>>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ErrorDetails {
                code: code.into(),
                details,
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Maps an error kind to its transport status.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorKind::InvalidCredentials | ErrorKind::InvalidToken | ErrorKind::TokenRequired => {
            StatusCode::UNAUTHORIZED
        }
        ErrorKind::UserAlreadyExists => StatusCode::CONFLICT,
        ErrorKind::StoreFailure | ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, ApiResponse<()>) {
    let kind = error.kind();
    let status = status_for(kind);

    match &error {
        ServiceError::Store { source } => {
            tracing::error!("Store error: {:#}", source);
        }
        ServiceError::InternalError { message } => {
            tracing::error!("Internal error: {}", message);
        }
        _ => {}
    }

    let message = error.public_message();
    let details = match error {
        ServiceError::Validation { details, .. } if !details.is_empty() => Some(details),
        _ => None,
    };

    (status, ApiResponse::<()>::error(message, kind.code(), details))
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, body) = service_error_to_http(self);
        (status, Json(body)).into_response()
    }
}

/// Formats validator::ValidationErrors into field-specific error details
pub fn validation_errors_to_field_errors(errors: &validator::ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string()),
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}

/// Builds a `ServiceError::Validation` from validator output
pub fn validation_error(errors: &validator::ValidationErrors) -> ServiceError {
    ServiceError::validation_with_details("Validation failed", validation_errors_to_field_errors(errors))
}
