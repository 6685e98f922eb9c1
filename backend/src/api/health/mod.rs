//! Module for service health endpoints.
//!
//! Exposes a public liveness probe and an authenticated variant that exercises
//! the bearer-token gate end to end.

pub mod handlers;
pub mod routes;
