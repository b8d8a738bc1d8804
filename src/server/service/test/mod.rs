use chrono::{TimeZone, Utc};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{self, review::ReviewFactory, tour::TourFactory, user::UserFactory},
};

use crate::server::{
    error::AppError,
    model::{
        review::{CreateReviewParams, UpdateReviewParams},
        tour::{CreateTourParams, Difficulty, UpdateTourParams},
    },
    service::{review::ReviewService, tour::TourService, user::UserService},
    util::{
        api_features::ApiFeatures,
        geo::{DistanceUnit, LatLng},
    },
};

mod review;

/// Reads a tour's stored rating aggregate.
async fn stored_ratings(
    db: &sea_orm::DatabaseConnection,
    tour_id: i32,
) -> Result<(i32, f64), DbErr> {
    let tour = entity::prelude::Tour::find_by_id(tour_id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("tour {}", tour_id)))?;

    Ok((tour.ratings_quantity, tour.ratings_average))
}
