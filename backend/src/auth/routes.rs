//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user login, registration and the current-user lookup.
//! They are designed to be nested into the main Axum router.

use crate::auth::handlers::*;
use crate::auth::middleware::jwt_auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route(
            "/me",
            get(me).layer(middleware::from_fn_with_state(state, jwt_auth)),
        )
}
