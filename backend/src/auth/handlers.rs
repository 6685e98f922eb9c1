//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse incoming HTTP requests for login, registration and
//! the current-user lookup, and delegate to `auth::service` for the business
//! logic. Errors are rendered through `ServiceError`'s `IntoResponse`.

use crate::api::common::ApiResponse;
use crate::auth::middleware::AuthContext;
use crate::auth::models::*;
use crate::errors::ServiceError;
use crate::state::AppState;
use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
    response::Json as ResponseJson,
};

/// Turns a body that could not be parsed into a validation failure.
fn body_rejection(rejection: JsonRejection) -> ServiceError {
    tracing::warn!("Invalid request body: {}", rejection.body_text());
    ServiceError::validation("Invalid request body")
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ResponseJson<ApiResponse<AuthResponse>>, ServiceError> {
    let Json(payload) = payload.map_err(body_rejection)?;

    let response = state.auth_service().login(payload).await?;
    Ok(ResponseJson(ApiResponse::success(response, "Login successful")))
}

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, ResponseJson<ApiResponse<AuthResponse>>), ServiceError> {
    let Json(payload) = payload.map_err(body_rejection)?;

    let response = state.auth_service().register(payload).await?;
    Ok((
        StatusCode::CREATED,
        ResponseJson(ApiResponse::success(response, "Registration successful")),
    ))
}

/// Get current user information from token
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    context: AuthContext,
) -> Result<ResponseJson<ApiResponse<UserInfo>>, ServiceError> {
    let user = state.auth_service().current_user(&context.subject_id).await?;
    Ok(ResponseJson(ApiResponse::success(
        user,
        "User retrieved successfully",
    )))
}
