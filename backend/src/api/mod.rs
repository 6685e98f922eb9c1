//! Central module for the application's non-auth API endpoints.
//!
//! This module holds the response envelope shared by every route, the
//! router-wide layers and the health endpoints. Authentication routes live in
//! `crate::auth`.

pub mod common;
pub mod health;
pub mod layers;

use crate::api::common::ApiResponse;
use axum::{
    extract::Request,
    http::StatusCode,
    response::{IntoResponse, Json},
};

/// Fallback for unmatched routes.
pub async fn not_found(request: Request) -> impl IntoResponse {
    tracing::warn!(
        "Route not found: {} {}",
        request.method(),
        request.uri().path()
    );
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error(
            "Route not found",
            "ROUTE_NOT_FOUND",
            None,
        )),
    )
}
