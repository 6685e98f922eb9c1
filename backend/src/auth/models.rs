//! Data structures for authentication-related entities.
//!
//! This module defines the request and response payloads of the login and
//! registration endpoints and the public view of a user, used for data
//! transfer within the authentication flow.

use crate::database::models::User;
use crate::utils::password::MAX_PASSWORD_BYTES;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Must be a valid email"))]
    pub email: String,

    #[validate(
        length(
            min = 6,
            max = 100,
            message = "Password must be between 6-100 characters"
        ),
        custom(function = "validate_password_bytes")
    )]
    pub password: String,
}

/// Registration request payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(
        min = 2,
        max = 100,
        message = "Name must be between 2-100 characters"
    ))]
    pub name: String,

    #[validate(
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email: String,

    #[validate(
        length(
            min = 6,
            max = 100,
            message = "Password must be between 6-100 characters"
        ),
        custom(function = "validate_password_bytes")
    )]
    pub password: String,
}

/// Multi-byte characters can push a password past what bcrypt hashes in full.
fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        let message = format!("Password must be at most {} bytes", MAX_PASSWORD_BYTES);
        return Err(ValidationError::new("password_too_long").with_message(message.into()));
    }
    Ok(())
}

/// Response of a successful login or registration
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
    pub expires_at: DateTime<Utc>,
}

/// Public user information, never carries the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
