//! Persistence layer.
//!
//! Repositories own every SQL statement; services talk to them through the
//! [`user_repository::CredentialStore`] trait.

pub mod user_repository;

use thiserror::Error;

/// Failures reported by a credential store.
///
/// `NotFound` and `AlreadyExists` are expected outcomes the service maps to
/// domain errors; `Database` is an infrastructure failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("{entity} already exists: {identifier}")]
    AlreadyExists { entity: String, identifier: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn already_exists(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }
}
