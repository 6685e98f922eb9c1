//! Core business logic for the authentication system.

use crate::api::common::validation_error;
use crate::auth::models::*;
use crate::database::models::CreateUser;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::StoreError;
use crate::repositories::user_repository::CredentialStore;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::PasswordHasher;
use std::sync::Arc;
use validator::Validate;

/// Authentication service for handling login, registration and token issuance
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<PasswordHasher>,
    jwt_utils: Arc<JwtUtils>,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
        jwt_utils: Arc<JwtUtils>,
    ) -> Self {
        AuthService {
            store,
            hasher: Arc::new(hasher),
            jwt_utils,
        }
    }

    /// Authenticate a user by email and password and issue an access token.
    ///
    /// An unknown email and a wrong password both yield
    /// `ServiceError::InvalidCredentials`; only the logs tell them apart.
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<AuthResponse> {
        login_request
            .validate()
            .map_err(|errors| validation_error(&errors))?;

        tracing::info!("Attempting user login for email: {}", login_request.email);

        let LoginRequest { email, password } = login_request;

        let user = match self.store.find_by_email(&email).await {
            Ok(user) => user,
            Err(StoreError::NotFound { .. }) => {
                self.with_hasher(move |hasher| hasher.verify_dummy(&password))
                    .await?;
                tracing::warn!("Login attempt with non-existent email: {}", email);
                return Err(ServiceError::InvalidCredentials);
            }
            Err(error) => {
                tracing::error!("Failed to get user during login for {}: {}", email, error);
                return Err(ServiceError::store(error));
            }
        };

        let stored_hash = user.password_hash.clone();
        let matches = self
            .with_hasher(move |hasher| hasher.verify(&password, &stored_hash))
            .await?;
        if !matches {
            tracing::warn!("Login attempt with invalid password for user: {}", user.id);
            return Err(ServiceError::InvalidCredentials);
        }

        let issued = self.jwt_utils.issue(&user.id).map_err(|error| {
            tracing::error!("Failed to generate token for user {}: {}", user.id, error);
            error
        })?;

        tracing::info!("User login successful: {}", user.id);

        Ok(AuthResponse {
            token: issued.token,
            user: UserInfo::from(user),
            expires_at: issued.expires_at,
        })
    }

    /// Create a new credential and issue an access token for it.
    ///
    /// If token issuance fails after the insert, the credential is kept; the
    /// failure is logged and reported as an internal error.
    pub async fn register(&self, register_request: RegisterRequest) -> ServiceResult<AuthResponse> {
        register_request
            .validate()
            .map_err(|errors| validation_error(&errors))?;

        let RegisterRequest {
            name,
            email,
            password,
        } = register_request;

        tracing::info!("Attempting user registration for email: {}", email);

        let password_hash = self
            .with_hasher(move |hasher| hasher.hash(&password))
            .await?
            .map_err(|error| {
                tracing::error!("Failed to hash password during registration: {}", error);
                ServiceError::internal_error("failed to process password")
            })?;

        let user = match self
            .store
            .create(CreateUser {
                name,
                email: email.clone(),
                password_hash,
            })
            .await
        {
            Ok(user) => user,
            Err(StoreError::AlreadyExists { .. }) => {
                tracing::warn!("Registration attempt with existing email: {}", email);
                return Err(ServiceError::user_already_exists(email));
            }
            Err(error) => {
                tracing::error!("Failed to create user {}: {}", email, error);
                return Err(ServiceError::store(error));
            }
        };

        let issued = self.jwt_utils.issue(&user.id).map_err(|error| {
            tracing::error!(
                "User {} was created but token generation failed: {}",
                user.id,
                error
            );
            error
        })?;

        tracing::info!("User registration successful: {}", user.id);

        Ok(AuthResponse {
            token: issued.token,
            user: UserInfo::from(user),
            expires_at: issued.expires_at,
        })
    }

    /// Resolve the public view of an authenticated subject.
    ///
    /// A subject whose record no longer exists is treated as an invalid token.
    pub async fn current_user(&self, subject_id: &str) -> ServiceResult<UserInfo> {
        match self.store.find_by_id(subject_id).await {
            Ok(user) => Ok(UserInfo::from(user)),
            Err(StoreError::NotFound { .. }) => {
                tracing::warn!("Token subject has no stored user: {}", subject_id);
                Err(ServiceError::InvalidToken)
            }
            Err(error) => {
                tracing::error!("Failed to get user {}: {}", subject_id, error);
                Err(ServiceError::store(error))
            }
        }
    }

    pub fn jwt_utils(&self) -> &Arc<JwtUtils> {
        &self.jwt_utils
    }

    /// Runs CPU-bound bcrypt work off the async executor.
    async fn with_hasher<T, F>(&self, work: F) -> ServiceResult<T>
    where
        F: FnOnce(&PasswordHasher) -> T + Send + 'static,
        T: Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || work(&hasher))
            .await
            .map_err(|e| ServiceError::internal_error(format!("Password task failed: {}", e)))
    }
}
