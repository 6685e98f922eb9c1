//! Global application error types.
//!
//! This module defines the error taxonomy shared by the authentication core.
//! It stays transport-agnostic: the mapping from [`ErrorKind`] to an HTTP
//! status lives at the API boundary in `api::common`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field-specific validation error details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the field with validation error
    pub field: String,
    /// Description of the validation failure
    pub message: String,
}

/// Stable classification of a [`ServiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationFailed,
    InvalidCredentials,
    UserAlreadyExists,
    InvalidToken,
    TokenRequired,
    StoreFailure,
    InternalError,
}

/// Errors surfaced by the authentication service and the authorization gate.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
    },

    /// Unknown email or wrong password. Both causes collapse into this variant.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User already exists: {email}")]
    UserAlreadyExists { email: String },

    /// Malformed, tampered, expired, wrongly-typed or wrongly-signed token.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Authorization token is required")]
    TokenRequired,

    #[error("Store error: {source}")]
    Store {
        #[source]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn validation_with_details(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn user_already_exists(email: impl Into<String>) -> Self {
        Self::UserAlreadyExists {
            email: email.into(),
        }
    }

    pub fn store(source: impl Into<anyhow::Error>) -> Self {
        Self::Store {
            source: source.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation { .. } => ErrorKind::ValidationFailed,
            ServiceError::InvalidCredentials => ErrorKind::InvalidCredentials,
            ServiceError::UserAlreadyExists { .. } => ErrorKind::UserAlreadyExists,
            ServiceError::InvalidToken => ErrorKind::InvalidToken,
            ServiceError::TokenRequired => ErrorKind::TokenRequired,
            ServiceError::Store { .. } => ErrorKind::StoreFailure,
            ServiceError::InternalError { .. } => ErrorKind::InternalError,
        }
    }

    /// Whether the caller may reasonably retry the same request.
    pub fn retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::StoreFailure)
    }

    /// Message safe to hand back to the caller.
    ///
    /// Infrastructure failures never expose their underlying cause.
    pub fn public_message(&self) -> String {
        match self {
            ServiceError::Validation { message, .. } => message.clone(),
            ServiceError::UserAlreadyExists { .. } => {
                "User with this email already exists".to_string()
            }
            ServiceError::Store { .. } | ServiceError::InternalError { .. } => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl ErrorKind {
    /// Machine-readable code rendered in error responses.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::ValidationFailed => "VALIDATION_ERROR",
            ErrorKind::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorKind::UserAlreadyExists => "USER_ALREADY_EXISTS",
            ErrorKind::InvalidToken => "INVALID_TOKEN",
            ErrorKind::TokenRequired => "TOKEN_REQUIRED",
            ErrorKind::StoreFailure | ErrorKind::InternalError => "INTERNAL_SERVER_ERROR",
        }
    }
}
