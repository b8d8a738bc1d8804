use chrono::{TimeZone, Utc};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{
        self,
        tour::TourFactory,
        user::{create_user_with_role, UserFactory},
    },
};

use crate::server::{
    data::tour::TourRepository,
    model::{
        review::RatingSummary,
        tour::{CreateTourParams, Difficulty, GeoPoint, Location, UpdateTourParams},
    },
    util::api_features::ApiFeatures,
};

mod create;
mod delete;
mod find_by_id;
mod find_many;
mod find_starts_between;
mod update;
mod update_ratings;

fn create_params(name: &str) -> CreateTourParams {
    CreateTourParams {
        name: name.to_string(),
        duration: 7,
        max_group_size: 15,
        difficulty: Difficulty::Medium,
        ratings_average: 4.5,
        price: 497.0,
        price_discount: None,
        summary: "Exploring the jaw-dropping US east coast by foot and by boat".to_string(),
        description: None,
        image_cover: "tour-2-cover.jpg".to_string(),
        images: vec!["tour-2-1.jpg".to_string(), "tour-2-2.jpg".to_string()],
        start_dates: Vec::new(),
        start_location: None,
        locations: Vec::new(),
        guides: Vec::new(),
    }
}

fn query(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
