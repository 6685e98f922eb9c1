//! Collection of general utility modules.
//!
//! Token signing and password hashing helpers that the authentication service
//! and the authorization gate build on.

pub mod jwt;
pub mod password;
