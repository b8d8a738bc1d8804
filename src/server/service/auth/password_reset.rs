use chrono::{Duration, Utc};

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::normalize_email,
    service::{
        auth::{
            password::{generate_reset_token, hash_password, hash_reset_token},
            AuthService, AuthenticatedUser,
        },
        email::{Email, Mailer},
    },
};

/// How long an emailed reset link stays valid.
pub const RESET_TOKEN_TTL_MINUTES: i64 = 10;

impl<'a> AuthService<'a> {
    /// Issues a password reset token and emails the reset link.
    ///
    /// Only the SHA-256 digest of the token is stored. If the email cannot be sent the
    /// token is cleared again before the error is returned.
    ///
    /// # Arguments
    /// - `email` - Address of the account to reset
    /// - `mailer` - Outgoing mail transport
    /// - `app_url` - Public base URL used to build the reset link
    ///
    /// # Returns
    /// - `Ok(())` - Token stored and email sent
    /// - `Err(AppError::NotFound)` - No active account with that email
    /// - `Err(AppError::InternalErr)` - Email delivery failed
    pub async fn forgot_password(
        &self,
        email: &str,
        mailer: &dyn Mailer,
        app_url: &str,
    ) -> Result<(), AppError> {
        let repo = UserRepository::new(self.db);

        let user = repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| AppError::NotFound("There is no user with that email address.".to_string()))?;

        let (token, token_hash) = generate_reset_token();
        let expires_at = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);
        repo.set_reset_token(user.id, Some((token_hash, expires_at)))
            .await?;

        let reset_url = format!(
            "{}/api/v1/users/resetPassword/{}",
            app_url.trim_end_matches('/'),
            token
        );

        if let Err(err) = mailer.send(Email::password_reset(&user, &reset_url)).await {
            repo.set_reset_token(user.id, None).await?;
            return Err(err);
        }

        tracing::debug!("Password reset token sent to user {}", user.id);

        Ok(())
    }

    /// Sets a new password using an emailed reset token.
    ///
    /// # Arguments
    /// - `token` - The plain token from the reset link
    /// - `password` - New, already validated password
    ///
    /// # Returns
    /// - `Ok(AuthenticatedUser)` - The user and a fresh token
    /// - `Err(AuthError::ResetTokenInvalid)` - Unknown or expired token
    pub async fn reset_password(
        &self,
        token: &str,
        password: String,
    ) -> Result<AuthenticatedUser, AppError> {
        let repo = UserRepository::new(self.db);

        let user = repo
            .find_by_reset_token(&hash_reset_token(token), Utc::now())
            .await?
            .ok_or(AuthError::ResetTokenInvalid)?;

        let password_hash = hash_password(password, self.password_cost).await?;
        // Backdated so tokens signed right after this call stay valid.
        repo.update_password(user.id, password_hash, Utc::now() - Duration::seconds(1))
            .await?;

        let user = repo
            .find_by_id(user.id)
            .await?
            .ok_or(AuthError::UserNoLongerExists(user.id))?;

        self.authenticated(user)
    }
}
