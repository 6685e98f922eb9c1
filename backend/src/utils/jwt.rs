//! JWT token utilities for authentication and authorization.
//!
//! Provides token creation, validation, and claims management for bearer
//! authentication. Tokens are HS256-signed and self-contained; nothing about
//! an issued token is kept server-side.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::TokenConfig;
use crate::errors::{ServiceError, ServiceResult};

/// Token type claim carried by access tokens.
pub const ACCESS_TOKEN_TYPE: &str = "access";

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
    /// Token type, `"access"` for every token issued here
    #[serde(rename = "type")]
    pub token_type: String,
}

/// A freshly signed token together with its expiry instant.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_lifetime: chrono::Duration,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from the signing configuration
    pub fn new(config: &TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Pinned to HS256: a token whose header names any other algorithm is rejected.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            access_token_lifetime: config.access_token_lifetime,
        }
    }

    /// Issue an access token for `subject_id`, valid from now.
    pub fn issue(&self, subject_id: &str) -> ServiceResult<IssuedToken> {
        self.issue_at(subject_id, Utc::now())
    }

    /// Issue an access token as if the current time were `now`.
    pub fn issue_at(&self, subject_id: &str, now: DateTime<Utc>) -> ServiceResult<IssuedToken> {
        let expires_at = now + self.access_token_lifetime;

        let claims = Claims {
            sub: subject_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate and decode a JWT token.
    ///
    /// Every failure collapses into [`ServiceError::InvalidToken`]; the cause
    /// is only visible in debug logs.
    pub fn validate_token(&self, token: &str) -> ServiceResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e.kind());
                ServiceError::InvalidToken
            })
    }
}

impl Claims {
    pub fn is_access(&self) -> bool {
        self.token_type == ACCESS_TOKEN_TYPE
    }
}
