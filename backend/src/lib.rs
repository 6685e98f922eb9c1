//! Credential issuance backend.
//!
//! Authenticates users by email and password, issues HS256-signed bearer
//! tokens, and guards protected routes with a token-validating middleware.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod repositories;
pub mod state;
pub mod utils;

use crate::auth::service::AuthService;
use crate::config::Config;
use crate::database::Database;
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::PasswordHasher;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;

/// Wires the repository, hasher and token utilities into shared state.
pub fn build_state(config: &Config, database: &Database) -> Result<AppState> {
    let store = Arc::new(UserRepository::new(database.pool().clone()));
    let hasher =
        PasswordHasher::new(config.bcrypt_cost).context("failed to initialise password hasher")?;
    let jwt_utils = Arc::new(JwtUtils::new(&config.token_config()));

    Ok(AppState::new(AuthService::new(store, hasher, jwt_utils)))
}

/// Builds the application router with its logging, CORS and panic layers.
pub fn app(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/auth", auth::routes::auth_router(state.clone()))
        .nest("/health", api::health::routes::health_router(state.clone()))
        .fallback(api::not_found)
        .with_state(state);

    api::layers::apply(router, &config.cors_origins)
}
