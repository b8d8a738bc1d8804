//! User account management for the logged-in user and for admins.

use std::collections::BTreeSet;

use sea_orm::{DatabaseConnection, EntityTrait};

use crate::server::{
    data::{review::ReviewRepository, user::UserRepository},
    error::AppError,
    model::user::{UpdateUserParams, User},
    service::review::ReviewService,
    util::api_features::ApiFeatures,
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists active users with filtering, sorting and pagination applied.
    pub async fn get_all(&self, features: &ApiFeatures) -> Result<Vec<User>, AppError> {
        let select = features.apply(entity::prelude::User::find())?;
        let users = UserRepository::new(self.db).find_many(select).await?;

        Ok(users)
    }

    /// Gets an active user by ID.
    ///
    /// # Returns
    /// - `Ok(User)` - The user
    /// - `Err(AppError::NotFound)` - No active user with that ID
    pub async fn get_by_id(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(AppError::document_not_found)
    }

    /// Applies a profile update. Never touches the password.
    ///
    /// # Returns
    /// - `Ok(User)` - The updated user
    /// - `Err(AppError::NotFound)` - No active user with that ID
    /// - `Err(AppError::DuplicateValue)` - Email taken by another account
    pub async fn update(&self, id: i32, params: UpdateUserParams) -> Result<User, AppError> {
        let email = params.email.clone();
        UserRepository::new(self.db)
            .update(id, params)
            .await
            .map_err(|err| AppError::from_unique(err, email.as_deref()))?
            .ok_or_else(AppError::document_not_found)
    }

    /// Marks the account inactive. It disappears from every query and can no longer log in.
    pub async fn deactivate(&self, id: i32) -> Result<(), AppError> {
        UserRepository::new(self.db).deactivate(id).await?;

        tracing::info!("User {} deactivated their account", id);

        Ok(())
    }

    /// Permanently deletes a user, their reviews and their guide assignments.
    ///
    /// Rating aggregates of every tour the user had reviewed are recomputed.
    ///
    /// # Returns
    /// - `Ok(())` - User deleted
    /// - `Err(AppError::NotFound)` - No active user with that ID
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let reviewed_tours: BTreeSet<i32> = ReviewRepository::new(self.db)
            .tour_ids_for_user(id)
            .await?
            .into_iter()
            .collect();

        if !UserRepository::new(self.db).delete(id).await? {
            return Err(AppError::document_not_found());
        }

        let reviews = ReviewService::new(self.db);
        for tour_id in reviewed_tours {
            reviews.calc_average_ratings(tour_id).await?;
        }

        tracing::info!("Deleted user {}", id);

        Ok(())
    }
}
