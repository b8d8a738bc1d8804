use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter};
use test_utils::{
    builder::TestBuilder,
    factory::{self, review::ReviewFactory},
};

use crate::server::{
    data::review::ReviewRepository,
    model::review::{CreateReviewParams, UpdateReviewParams},
    util::api_features::ApiFeatures,
};

mod create;
mod delete;
mod find_many;
mod ratings_for_tour;
mod update;
