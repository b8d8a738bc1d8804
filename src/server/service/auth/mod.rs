//! Password authentication: signup, login and password management.
//!
//! Each flow lives in its own file as an `impl AuthService` block. Token signing and
//! password hashing helpers are in [`token`] and [`password`].

use sea_orm::DatabaseConnection;

use crate::server::{error::AppError, model::user::User, service::auth::token::TokenService};

pub mod login;
pub mod password;
pub mod password_reset;
pub mod signup;
pub mod token;
pub mod update_password;

#[cfg(test)]
mod test;

/// A user together with a freshly signed access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

pub struct AuthService<'a> {
    pub db: &'a DatabaseConnection,
    pub tokens: &'a TokenService,
    /// bcrypt cost used for new password hashes.
    pub password_cost: u32,
}

impl<'a> AuthService<'a> {
    /// Creates a new AuthService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `tokens` - Token signer and verifier
    /// - `password_cost` - bcrypt cost factor for new hashes
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService, password_cost: u32) -> Self {
        Self {
            db,
            tokens,
            password_cost,
        }
    }

    fn authenticated(&self, user: User) -> Result<AuthenticatedUser, AppError> {
        let token = self.tokens.sign(user.id)?;

        Ok(AuthenticatedUser { user, token })
    }
}
