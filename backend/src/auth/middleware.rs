//! Middleware for protecting authenticated routes.
//!
//! The gate runs once per request on protected routes:
//! 1. No `Authorization` header, or an empty one -> `TokenRequired`
//! 2. Header not using the `Bearer ` scheme -> `InvalidToken`
//! 3. Signature, algorithm or expiry check fails -> `InvalidToken`
//! 4. Token type other than `"access"` -> `InvalidToken`
//! 5. Otherwise the request is admitted with an [`AuthContext`] attached
//!
//! Rejections short-circuit; the downstream handler never runs.

use crate::errors::{ServiceError, ServiceResult};
use crate::state::AppState;
use crate::utils::jwt::JwtUtils;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated subject bound to a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthContext {
    pub subject_id: String,
    pub token: String,
}

/// Decides whether a request carrying `authorization` may proceed.
///
/// `authorization` is the raw header value, `None` when absent.
pub fn authorize(authorization: Option<&str>, jwt_utils: &JwtUtils) -> ServiceResult<AuthContext> {
    let header = authorization
        .filter(|value| !value.trim().is_empty())
        .ok_or(ServiceError::TokenRequired)?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(ServiceError::InvalidToken)?;

    let claims = jwt_utils.validate_token(token)?;

    if !claims.is_access() {
        tracing::debug!("Rejected token of type {}", claims.token_type);
        return Err(ServiceError::InvalidToken);
    }

    Ok(AuthContext {
        subject_id: claims.sub,
        token: token.to_string(),
    })
}

/// JWT authentication middleware
pub async fn jwt_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let path = request.uri().path().to_string();

    let authorization = match request.headers().get(AUTHORIZATION) {
        None => None,
        // A header that is not visible ASCII cannot carry a bearer token.
        Some(value) => Some(value.to_str().map_err(|_| {
            tracing::warn!("Non-ASCII authorization header on {}", path);
            ServiceError::InvalidToken
        })?),
    };

    let context = authorize(authorization, state.jwt_utils()).map_err(|error| {
        tracing::warn!("Rejected request to {}: {}", path, error);
        error
    })?;

    tracing::debug!("Token validation successful for {} on {}", context.subject_id, path);
    tracing::Span::current().record("user_id", context.subject_id.as_str());

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthContext>().cloned().ok_or_else(|| {
            tracing::warn!("AuthContext missing from request extensions");
            ServiceError::TokenRequired
        })
    }
}
