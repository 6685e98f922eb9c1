//! HTTP layers wrapped around the whole router.
//!
//! Outermost first:
//! - request logging (`TraceLayer`): one event per response with method,
//!   path, status, duration and, on protected routes, the authenticated user
//! - CORS
//! - panic recovery: a panicking handler becomes a generic 500 response

use crate::errors::ServiceError;
use axum::{
    Router,
    http::{HeaderValue, Method, Request, Response, StatusCode, header},
    response::IntoResponse,
};
use std::any::Any;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, AllowOrigin, CorsLayer};
use tower_http::trace::{MakeSpan, OnResponse, TraceLayer};
use tracing::{Level, Span};

/// Wraps `router` with logging, CORS and panic recovery.
pub fn apply(router: Router, cors_origins: &[HeaderValue]) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(cors_origins))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(RequestSpan)
                .on_response(LogResponse)
                .on_failure(()),
        )
}

/// Any origin without credentials when `origins` is empty, otherwise exactly
/// the listed origins with credentials allowed.
pub fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ]);

    if origins.is_empty() {
        layer.allow_origin(cors::Any)
    } else {
        layer
            .allow_origin(AllowOrigin::list(origins.iter().cloned()))
            .allow_credentials(true)
    }
}

/// Log level for a completed request.
pub fn level_for(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

/// Span opened per request; `user_id` is filled in by the auth middleware.
#[derive(Debug, Clone, Copy)]
struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            path = %request.uri().path(),
            user_id = tracing::field::Empty,
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct LogResponse;

impl<B> OnResponse<B> for LogResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let status = response.status().as_u16();
        let duration_ms = latency.as_millis() as u64;

        match level_for(response.status()) {
            Level::ERROR => tracing::error!(status, duration_ms, "HTTP request"),
            Level::WARN => tracing::warn!(status, duration_ms, "HTTP request"),
            _ => tracing::info!(status, duration_ms, "HTTP request"),
        }
    }
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> axum::response::Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ServiceError::internal_error(format!("Handler panicked: {}", detail)).into_response()
}
