//! JSON web tokens identifying a logged-in user.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::server::error::{auth::AuthError, internal::InternalError, AppError};

/// Token payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: i32,
    /// Issued at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

/// Signs and verifies HS256 tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: Duration,
}

impl TokenService {
    pub fn new(secret: &str, expires_in: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
        }
    }

    /// Signs a token for `user_id` issued now.
    pub fn sign(&self, user_id: i32) -> Result<String, AppError> {
        self.sign_at(user_id, Utc::now())
    }

    /// Signs a token for `user_id` issued at the given time.
    pub fn sign_at(&self, user_id: i32, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        let claims = Claims {
            id: user_id,
            iat: issued_at.timestamp(),
            exp: (issued_at + self.expires_in).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(InternalError::TokenSigning)?;

        Ok(token)
    }

    /// Verifies signature and expiry.
    ///
    /// # Returns
    /// - `Ok(Claims)` - Valid token
    /// - `Err(AuthError::TokenExpired)` - Token is past its expiry
    /// - `Err(AuthError::InvalidToken)` - Bad signature or malformed token
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }
}
