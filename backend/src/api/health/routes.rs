//! Defines the HTTP routes for health checks.

use super::handlers::{health, protected_health};
use crate::auth::middleware::jwt_auth;
use crate::state::AppState;
use axum::{Router, middleware, routing::get};

pub fn health_router(state: AppState) -> Router<AppState> {
    Router::new().route("/", get(health)).route(
        "/protected",
        get(protected_health).layer(middleware::from_fn_with_state(state, jwt_auth)),
    )
}
