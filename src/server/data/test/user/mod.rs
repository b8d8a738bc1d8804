use chrono::{Duration, Utc};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{self, user::UserFactory},
};

use crate::server::{
    data::user::UserRepository,
    model::user::{CreateUserParams, Role, UpdateUserParams},
    util::api_features::ApiFeatures,
};

mod create;
mod delete;
mod find_by_id;
mod find_many;
mod reset_token;
mod update;
mod update_password;

fn create_params(email: &str) -> CreateUserParams {
    CreateUserParams {
        name: "Jonas Schmedtmann".to_string(),
        email: email.to_string(),
        password_hash: "$2b$04$hash".to_string(),
    }
}
