//! User domain models and parameters.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::model::{
    review::ReviewAuthorDto,
    user::{SignupDto, UpdateMeDto, UpdateUserDto, UserDto},
};

/// Photo assigned to new accounts.
pub const DEFAULT_PHOTO: &str = "default.jpg";

/// Account role used for route restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Guide,
    LeadGuide,
    Admin,
}

impl Role {
    pub const VALUES: &'static [&'static str] = &["user", "guide", "lead-guide", "admin"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Guide => "guide",
            Self::LeadGuide => "lead-guide",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "guide" => Ok(Self::Guide),
            "lead-guide" => Ok(Self::LeadGuide),
            "admin" => Ok(Self::Admin),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An account without its credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub photo: String,
    pub role: Role,
    pub password_changed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Stored role is not a known role
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, DbErr> {
        let role = entity
            .role
            .parse::<Role>()
            .map_err(|value| DbErr::Custom(format!("Failed to parse role: {}", value)))?;

        Ok(Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            photo: entity.photo,
            role,
            password_changed_at: entity.password_changed_at,
            created_at: entity.created_at,
        })
    }

    /// Whether the password was changed after a token issued at `issued_at`
    /// (seconds since the epoch).
    pub fn changed_password_after(&self, issued_at: i64) -> bool {
        self.password_changed_at
            .is_some_and(|changed_at| changed_at.timestamp() > issued_at)
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            name: self.name,
            email: self.email,
            photo: self.photo,
            role: self.role.as_str().to_string(),
        }
    }
}

/// A user together with the stored password hash, used for credential checks.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

impl UserCredentials {
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, DbErr> {
        let password_hash = entity.password.clone();

        Ok(Self {
            user: User::from_entity(entity)?,
            password_hash,
        })
    }
}

/// Review author projection of a user.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewAuthor {
    pub id: i32,
    pub name: String,
    pub photo: String,
}

impl ReviewAuthor {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            photo: entity.photo,
        }
    }

    pub fn into_dto(self) -> ReviewAuthorDto {
        ReviewAuthorDto {
            id: self.id,
            name: self.name,
            photo: self.photo,
        }
    }
}

/// Parameters for creating an account. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Signup fields once validated, before hashing.
#[derive(Debug, Clone)]
pub struct SignupParams {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupParams {
    /// Converts the signup DTO, dropping the confirmation and normalising the email.
    pub fn from_dto(dto: SignupDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            email: normalize_email(&dto.email),
            password: dto.password,
        }
    }
}

/// Partial profile update. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserParams {
    pub name: Option<String>,
    pub email: Option<String>,
    pub photo: Option<String>,
    pub role: Option<Role>,
}

impl UpdateUserParams {
    /// Self-service update: role can never be changed this way.
    pub fn from_update_me_dto(dto: UpdateMeDto) -> Self {
        Self {
            name: dto.name.map(|name| name.trim().to_string()),
            email: dto.email.as_deref().map(normalize_email),
            photo: dto.photo,
            role: None,
        }
    }

    /// Admin update.
    ///
    /// # Returns
    /// - `Ok(UpdateUserParams)` - Converted parameters
    /// - `Err(String)` - The provided role is not a known role
    pub fn from_update_user_dto(dto: UpdateUserDto) -> Result<Self, String> {
        let role = dto.role.as_deref().map(str::parse::<Role>).transpose()?;

        Ok(Self {
            name: dto.name.map(|name| name.trim().to_string()),
            email: dto.email.as_deref().map(normalize_email),
            photo: dto.photo,
            role,
        })
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
