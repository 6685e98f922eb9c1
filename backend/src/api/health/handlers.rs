//! Handler functions for the health endpoints.

use crate::api::common::ApiResponse;
use crate::auth::middleware::AuthContext;
use axum::response::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
pub struct ProtectedHealthInfo {
    pub user_id: String,
    pub timestamp: i64,
}

/// Public liveness probe.
pub async fn health() -> Json<ApiResponse<HealthInfo>> {
    Json(ApiResponse::success(
        HealthInfo {
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            timestamp: chrono::Utc::now().timestamp(),
        },
        "Server is healthy",
    ))
}

/// Liveness probe behind the auth gate; echoes the authenticated subject.
pub async fn protected_health(context: AuthContext) -> Json<ApiResponse<ProtectedHealthInfo>> {
    Json(ApiResponse::success(
        ProtectedHealthInfo {
            user_id: context.subject_id,
            timestamp: chrono::Utc::now().timestamp(),
        },
        "Protected endpoint accessible",
    ))
}
