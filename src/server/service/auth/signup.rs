use crate::server::{
    data::user::UserRepository,
    error::AppError,
    model::user::{CreateUserParams, SignupParams},
    service::auth::{password::hash_password, AuthService, AuthenticatedUser},
};

impl<'a> AuthService<'a> {
    /// Creates an account with the `user` role and signs a token for it.
    ///
    /// # Arguments
    /// - `params` - Validated signup fields with a normalised email
    ///
    /// # Returns
    /// - `Ok(AuthenticatedUser)` - The new user and their token
    /// - `Err(AppError::DuplicateValue)` - Email already taken
    /// - `Err(AppError::DbErr)` - Database failure
    pub async fn signup(&self, params: SignupParams) -> Result<AuthenticatedUser, AppError> {
        let password_hash = hash_password(params.password, self.password_cost).await?;

        let email = params.email.clone();
        let user = UserRepository::new(self.db)
            .create(CreateUserParams {
                name: params.name,
                email: params.email,
                password_hash,
            })
            .await
            .map_err(|err| AppError::from_unique(err, Some(&email)))?;

        tracing::info!("New account {} created", user.id);

        self.authenticated(user)
    }
}
