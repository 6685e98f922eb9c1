//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the database URL, pool sizing, server port, and the token signing material.
//! Values are read once at startup and handed to the components that need them.

use anyhow::{Context, Result, bail};
use axum::http::HeaderValue;
use chrono::Duration;
use std::env;
use std::fmt;

/// Default access-token lifetime in hours.
pub const DEFAULT_ACCESS_EXP_HOURS: i64 = 6;

/// Upper bound on the access-token lifetime (one year).
pub const MAX_ACCESS_EXP_HOURS: i64 = 24 * 365;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_access_exp_hours: i64,
    pub bcrypt_cost: u32,
    pub server_port: u16,
    /// Allowed CORS origins; empty means any origin, without credentials.
    pub cors_origins: Vec<HeaderValue>,
}

/// Immutable signing configuration handed to the token issuer.
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub access_token_lifetime: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL not set")?;

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONNECTIONS must be a valid number")?;

        let acquire_timeout_seconds = lookup("DB_ACQUIRE_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "3".to_string())
            .parse::<u64>()
            .context("DB_ACQUIRE_TIMEOUT_SECONDS must be a valid number")?;

        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET not set")?;
        if jwt_secret.trim().is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let jwt_access_exp_hours = lookup("JWT_ACCESS_EXP_HOURS")
            .unwrap_or_else(|| DEFAULT_ACCESS_EXP_HOURS.to_string())
            .parse::<i64>()
            .context("JWT_ACCESS_EXP_HOURS must be a valid number")?;
        if !(1..=MAX_ACCESS_EXP_HOURS).contains(&jwt_access_exp_hours) {
            bail!("JWT_ACCESS_EXP_HOURS must be between 1 and {}", MAX_ACCESS_EXP_HOURS);
        }

        let bcrypt_cost = lookup("BCRYPT_COST")
            .unwrap_or_else(|| bcrypt::DEFAULT_COST.to_string())
            .parse::<u32>()
            .context("BCRYPT_COST must be a valid number")?;
        if !(4..=31).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31");
        }

        let server_port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVER_PORT must be a valid number")?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty() && *origin != "*")
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("CORS_ORIGINS contains an invalid origin: {}", origin))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_seconds,
            jwt_secret,
            jwt_access_exp_hours,
            bcrypt_cost,
            server_port,
            cors_origins,
        })
    }

    /// Extracts the signing configuration for the token issuer.
    pub fn token_config(&self) -> TokenConfig {
        TokenConfig {
            secret: self.jwt_secret.clone(),
            access_token_lifetime: Duration::hours(self.jwt_access_exp_hours),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_seconds", &self.acquire_timeout_seconds)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_access_exp_hours", &self.jwt_access_exp_hours)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("server_port", &self.server_port)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("access_token_lifetime", &self.access_token_lifetime)
            .finish()
    }
}
