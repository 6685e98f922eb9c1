//! Database repository for user credentials.
//!
//! Provides creation and lookup of stored credentials. Email uniqueness is
//! enforced by the `users.email` UNIQUE constraint, so concurrent
//! registrations of the same address are serialized by the database.

use crate::database::models::{CreateUser, User};
use crate::repositories::{StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Persistence operations the authentication service relies on.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Inserts a new credential.
    ///
    /// # Errors
    /// `StoreError::AlreadyExists` when the email is taken.
    async fn create(&self, user: CreateUser) -> StoreResult<User>;

    /// Looks up a credential by its exact email.
    async fn find_by_email(&self, email: &str) -> StoreResult<User>;

    /// Looks up a credential by its identifier.
    async fn find_by_id(&self, id: &str) -> StoreResult<User>;
}

/// Repository for user database operations.
#[derive(Clone)]
pub struct UserRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool (cheaply cloneable handle)
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn create(&self, user: CreateUser) -> StoreResult<User> {
        let now = Utc::now();
        let record = User {
            id: Uuid::now_v7().to_string(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::already_exists("User", record.email.clone())
            }
            other => StoreError::Database(other),
        })?;

        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found("User", email))
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM users WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::not_found("User", id))
    }
}
