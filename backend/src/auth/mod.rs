//! Authentication module for user credentials, token issuance and access control.
//!
//! This module provides the public interface for login, registration, and the
//! bearer-token middleware that guards protected routes.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
