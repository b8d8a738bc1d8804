use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::{Role, User},
    service::auth::token::TokenService,
};

/// Resolves the bearer token of a request to a logged-in user.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    tokens: &'a TokenService,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, tokens: &'a TokenService, headers: &'a HeaderMap) -> Self {
        Self {
            db,
            tokens,
            headers,
        }
    }

    /// Requires a valid token and, when `roles` is not empty, one of the given roles.
    ///
    /// # Returns
    /// - `Ok(User)` - The logged-in user
    /// - `Err(AuthError::NotLoggedIn)` - No bearer token
    /// - `Err(AuthError::InvalidToken | TokenExpired)` - Token rejected
    /// - `Err(AuthError::UserNoLongerExists)` - User deleted or deactivated
    /// - `Err(AuthError::PasswordChanged)` - Password changed after the token was issued
    /// - `Err(AuthError::AccessDenied)` - Role not allowed
    pub async fn require(&self, roles: &[Role]) -> Result<User, AppError> {
        let Some(token) = bearer_token(self.headers) else {
            return Err(AuthError::NotLoggedIn.into());
        };

        let claims = self.tokens.verify(token)?;

        let Some(user) = UserRepository::new(self.db).find_by_id(claims.id).await? else {
            return Err(AuthError::UserNoLongerExists(claims.id).into());
        };

        if user.changed_password_after(claims.iat) {
            return Err(AuthError::PasswordChanged(user.id).into());
        }

        if !roles.is_empty() && !roles.contains(&user.role) {
            return Err(AuthError::AccessDenied {
                user_id: user.id,
                role: user.role,
            }
            .into());
        }

        Ok(user)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
