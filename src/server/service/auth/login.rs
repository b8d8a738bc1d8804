use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::user::normalize_email,
    service::auth::{password::verify_password, AuthService},
};

impl<'a> AuthService<'a> {
    /// Checks email and password and signs a token.
    ///
    /// Unknown emails and wrong passwords produce the same error so the response does
    /// not reveal which accounts exist.
    ///
    /// # Returns
    /// - `Ok(String)` - Signed token
    /// - `Err(AuthError::MissingCredentials)` - Email or password missing or empty
    /// - `Err(AuthError::IncorrectCredentials)` - No active account matches
    pub async fn login(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<String, AppError> {
        let (Some(email), Some(password)) = (
            email.filter(|email| !email.trim().is_empty()),
            password.filter(|password| !password.is_empty()),
        ) else {
            return Err(AuthError::MissingCredentials.into());
        };

        let credentials = UserRepository::new(self.db)
            .find_credentials_by_email(&normalize_email(&email))
            .await?
            .ok_or(AuthError::IncorrectCredentials)?;

        if !verify_password(password, credentials.password_hash).await? {
            return Err(AuthError::IncorrectCredentials.into());
        }

        self.tokens.sign(credentials.user.id)
    }
}
