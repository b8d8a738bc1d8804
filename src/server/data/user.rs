//! User data repository for database operations.
//!
//! Deactivated accounts (`active = false`) are invisible to every lookup in this
//! repository; they cannot be listed, fetched or authenticated.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QuerySelect, Select,
};

use crate::server::{
    model::user::{CreateUserParams, Role, UpdateUserParams, User, UserCredentials, DEFAULT_PHOTO},
    util::api_features::{FieldKind, Queryable},
};

impl Queryable for entity::user::Entity {
    fn query_field(name: &str) -> Option<(Self::Column, FieldKind)> {
        use entity::user::Column;

        let field = match name {
            "id" => (Column::Id, FieldKind::Integer),
            "name" => (Column::Name, FieldKind::Text),
            "email" => (Column::Email, FieldKind::Text),
            "role" => (Column::Role, FieldKind::Enum(Role::VALUES)),
            "createdAt" => (Column::CreatedAt, FieldKind::Timestamp),
            _ => return None,
        };

        Some(field)
    }

    fn id_column() -> Self::Column {
        entity::user::Column::Id
    }
}

/// Repository providing database operations for user accounts.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new account with the `user` role and default photo.
    ///
    /// # Arguments
    /// - `params` - Name, normalised email and bcrypt password hash
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including a unique violation on `email`
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let entity = entity::user::ActiveModel {
            name: ActiveValue::Set(params.name),
            email: ActiveValue::Set(params.email),
            photo: ActiveValue::Set(DEFAULT_PHOTO.to_string()),
            role: ActiveValue::Set(Role::User.as_str().to_string()),
            password: ActiveValue::Set(params.password_hash),
            password_changed_at: ActiveValue::Set(None),
            password_reset_token: ActiveValue::Set(None),
            password_reset_expires: ActiveValue::Set(None),
            active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds an active user by ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Active user found
    /// - `Ok(None)` - No user with that ID, or the account is deactivated
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        self.find_entity_by_id(id)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Finds an active user by ID together with the password hash.
    pub async fn find_credentials_by_id(&self, id: i32) -> Result<Option<UserCredentials>, DbErr> {
        self.find_entity_by_id(id)
            .await?
            .map(UserCredentials::from_entity)
            .transpose()
    }

    /// Finds an active user by normalised email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        self.find_credentials_by_email(email)
            .await
            .map(|credentials| credentials.map(|c| c.user))
    }

    /// Finds an active user by normalised email together with the password hash.
    ///
    /// # Returns
    /// - `Ok(Some(UserCredentials))` - Active user found
    /// - `Ok(None)` - Unknown email or deactivated account
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .filter(entity::user::Column::Active.eq(true))
            .one(self.db)
            .await?
            .map(UserCredentials::from_entity)
            .transpose()
    }

    /// Finds the active user holding an unexpired password reset token.
    ///
    /// # Arguments
    /// - `token_hash` - SHA-256 hex digest of the emailed token
    /// - `now` - Reference time; tokens expiring at or before it are ignored
    pub async fn find_by_reset_token(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::PasswordResetToken.eq(token_hash))
            .filter(entity::user::Column::PasswordResetExpires.gt(now))
            .filter(entity::user::Column::Active.eq(true))
            .one(self.db)
            .await?
            .map(User::from_entity)
            .transpose()
    }

    /// Stores or clears a password reset token.
    ///
    /// # Arguments
    /// - `id` - User ID
    /// - `reset` - `Some((token_hash, expires_at))` to store, `None` to clear
    pub async fn set_reset_token(
        &self,
        id: i32,
        reset: Option<(String, DateTime<Utc>)>,
    ) -> Result<(), DbErr> {
        let (token, expires) = match reset {
            Some((token, expires)) => (Some(token), Some(expires)),
            None => (None, None),
        };

        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::PasswordResetToken,
                Expr::value(token),
            )
            .col_expr(
                entity::user::Column::PasswordResetExpires,
                Expr::value(expires),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Replaces the password hash, records the change time and clears any reset token.
    pub async fn update_password(
        &self,
        id: i32,
        password_hash: String,
        changed_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::Password, Expr::value(password_hash))
            .col_expr(
                entity::user::Column::PasswordChangedAt,
                Expr::value(Some(changed_at)),
            )
            .col_expr(
                entity::user::Column::PasswordResetToken,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                entity::user::Column::PasswordResetExpires,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Applies a partial profile update to an active user.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - The updated user
    /// - `Ok(None)` - No active user with that ID
    /// - `Err(DbErr)` - Database error, including a unique violation on `email`
    pub async fn update(&self, id: i32, params: UpdateUserParams) -> Result<Option<User>, DbErr> {
        let Some(entity) = self.find_entity_by_id(id).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = entity.clone().into();

        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(email) = params.email {
            active.email = ActiveValue::Set(email);
        }
        if let Some(photo) = params.photo {
            active.photo = ActiveValue::Set(photo);
        }
        if let Some(role) = params.role {
            active.role = ActiveValue::Set(role.as_str().to_string());
        }

        let entity = if active.is_changed() {
            active.update(self.db).await?
        } else {
            entity
        };

        User::from_entity(entity).map(Some)
    }

    /// Marks an account inactive. The row and its reviews are kept.
    pub async fn deactivate(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(entity::user::Column::Active, Expr::value(false))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Permanently deletes an active account with its reviews and guide links.
    ///
    /// # Returns
    /// - `Ok(true)` - User deleted
    /// - `Ok(false)` - No active user with that ID
    /// - `Err(DbErr)` - Database error during deletion
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        if self.find_entity_by_id(id).await?.is_none() {
            return Ok(false);
        }

        entity::prelude::Review::delete_many()
            .filter(entity::review::Column::UserId.eq(id))
            .exec(self.db)
            .await?;
        entity::prelude::TourGuide::delete_many()
            .filter(entity::tour_guide::Column::UserId.eq(id))
            .exec(self.db)
            .await?;

        let result = entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Runs a prepared select, restricted to active users.
    pub async fn find_many(&self, select: Select<entity::user::Entity>) -> Result<Vec<User>, DbErr> {
        select
            .filter(entity::user::Column::Active.eq(true))
            .all(self.db)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect()
    }

    /// Returns which of the given IDs belong to active users.
    pub async fn find_active_ids(&self, ids: &[i32]) -> Result<Vec<i32>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::User::find()
            .select_only()
            .column(entity::user::Column::Id)
            .filter(entity::user::Column::Id.is_in(ids.to_vec()))
            .filter(entity::user::Column::Active.eq(true))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    async fn find_entity_by_id(&self, id: i32) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(id)
            .filter(entity::user::Column::Active.eq(true))
            .one(self.db)
            .await
    }
}
