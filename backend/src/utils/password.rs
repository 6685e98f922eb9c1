//! Password hashing and verification.
//!
//! Wraps bcrypt: the salt and cost are embedded in the produced hash string, so
//! verification needs nothing besides the stored hash.
//!
//! bcrypt only reads the first 72 bytes of its input, NUL terminator included.
//! Longer passwords are refused rather than silently truncated.

use bcrypt::{BcryptError, non_truncating_hash, non_truncating_verify};
use thiserror::Error;

/// Longest password, in bytes, that bcrypt hashes without truncation.
pub const MAX_PASSWORD_BYTES: usize = 71;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(#[from] bcrypt::BcryptError),
}

/// Salted adaptive password hasher.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: String,
}

impl PasswordHasher {
    /// Creates a hasher with the given bcrypt work factor.
    ///
    /// # Errors
    /// Returns `PasswordError` if the cost is outside bcrypt's accepted range.
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        let dummy_hash = non_truncating_hash("credgate-dummy-password", cost)?;
        Ok(Self { cost, dummy_hash })
    }

    /// Function to hash a password before storing in database
    ///
    /// # Arguments
    /// * `password` - Plain text password to hash
    ///
    /// # Returns
    /// Hashed password string, or an error for passwords longer than
    /// [`MAX_PASSWORD_BYTES`]
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        Ok(non_truncating_hash(password, self.cost)?)
    }

    /// Function to verify a password against the stored hash
    ///
    /// # Arguments
    /// * `password` - Plain text password to verify
    /// * `hash` - Stored password hash
    ///
    /// # Returns
    /// `true` if password matches hash, `false` otherwise, including when the
    /// stored hash cannot be parsed or the password is too long to compare
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match non_truncating_verify(password, hash) {
            Ok(matches) => matches,
            Err(BcryptError::Truncation(len)) => {
                tracing::debug!("Password of {} bytes exceeds bcrypt input limit", len);
                false
            }
            Err(e) => {
                tracing::warn!("Password verification failed on stored hash: {}", e);
                false
            }
        }
    }

    /// Runs a verification against a throwaway hash and always returns `false`.
    ///
    /// Used when there is no stored hash to compare against, so that path costs
    /// the same as a real mismatch.
    pub fn verify_dummy(&self, password: &str) -> bool {
        let _ = non_truncating_verify(password, &self.dummy_hash);
        false
    }
}
