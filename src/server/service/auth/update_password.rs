use chrono::{Duration, Utc};

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    service::auth::{
        password::{hash_password, verify_password},
        AuthService, AuthenticatedUser,
    },
};

impl<'a> AuthService<'a> {
    /// Changes the password of a logged-in user after checking the current one.
    ///
    /// # Returns
    /// - `Ok(AuthenticatedUser)` - The user and a fresh token
    /// - `Err(AuthError::IncorrectCurrentPassword)` - `current_password` does not match
    /// - `Err(AuthError::UserNoLongerExists)` - Account deleted or deactivated meanwhile
    pub async fn update_password(
        &self,
        user_id: i32,
        current_password: String,
        new_password: String,
    ) -> Result<AuthenticatedUser, AppError> {
        let repo = UserRepository::new(self.db);

        let credentials = repo
            .find_credentials_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNoLongerExists(user_id))?;

        if !verify_password(current_password, credentials.password_hash).await? {
            return Err(AuthError::IncorrectCurrentPassword(user_id).into());
        }

        let password_hash = hash_password(new_password, self.password_cost).await?;
        repo.update_password(user_id, password_hash, Utc::now() - Duration::seconds(1))
            .await?;

        let user = repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNoLongerExists(user_id))?;

        self.authenticated(user)
    }
}
