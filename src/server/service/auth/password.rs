//! Password hashing and reset tokens.
//!
//! bcrypt runs on the blocking thread pool so hashing never stalls the async workers.

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::server::error::{internal::InternalError, AppError};

/// Hashes a password with bcrypt.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(InternalError::from)?
        .map_err(InternalError::from)?;

    Ok(hash)
}

/// Checks a password against a stored bcrypt hash.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(InternalError::from)?
        .map_err(InternalError::from)?;

    Ok(matches)
}

/// Generates a password reset token.
///
/// # Returns
/// `(token, token_hash)`: the hex token to email and the SHA-256 hex digest to store.
pub fn generate_reset_token() -> (String, String) {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);

    let token = hex::encode(bytes);
    let hash = hash_reset_token(&token);

    (token, hash)
}

/// SHA-256 hex digest of a reset token as stored in the database.
pub fn hash_reset_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
