use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::model::{review::ReviewDto, user::UserDto};

const DIFFICULTIES: [&str; 3] = ["easy", "medium", "difficult"];

/// GeoJSON point. `coordinates` is `[longitude, latitude]`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct GeoPointDto {
    #[serde(rename = "type", default = "point_type")]
    pub kind: String,
    #[validate(custom(function = "validate_coordinates"))]
    pub coordinates: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A stop on the tour itinerary.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct LocationDto {
    #[serde(rename = "type", default = "point_type")]
    pub kind: String,
    #[validate(custom(function = "validate_coordinates"))]
    pub coordinates: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub day: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TourDto {
    pub id: i32,
    pub name: String,
    pub duration: i32,
    pub duration_weeks: f64,
    pub max_group_size: i32,
    pub difficulty: String,
    pub ratings_average: f64,
    pub ratings_quantity: i32,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_discount: Option<f64>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image_cover: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub start_dates: Vec<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_location: Option<GeoPointDto>,
    pub locations: Vec<LocationDto>,
    pub guides: Vec<UserDto>,
    /// Only present when a single tour is requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<ReviewDto>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_discount", skip_on_field_errors = false))]
pub struct CreateTourDto {
    #[validate(length(
        min = 10,
        max = 40,
        message = "A tour name must have between 10 and 40 characters"
    ))]
    pub name: String,
    #[validate(range(min = 1, message = "A tour must have a positive duration"))]
    pub duration: i32,
    #[validate(range(min = 1, message = "A tour must have a positive group size"))]
    pub max_group_size: i32,
    #[validate(custom(function = "validate_difficulty"))]
    pub difficulty: String,
    #[validate(range(min = 1.0, max = 5.0, message = "Rating must be between 1.0 and 5.0"))]
    pub ratings_average: Option<f64>,
    #[validate(range(exclusive_min = 0.0, message = "A tour must have a positive price"))]
    pub price: f64,
    pub price_discount: Option<f64>,
    #[validate(length(min = 1, message = "A tour must have a summary"))]
    pub summary: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "A tour must have a cover image"))]
    pub image_cover: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub start_dates: Vec<DateTime<Utc>>,
    #[validate(nested)]
    pub start_location: Option<GeoPointDto>,
    #[serde(default)]
    #[validate(nested)]
    pub locations: Vec<LocationDto>,
    /// User ids of the guides leading this tour.
    #[serde(default)]
    pub guides: Vec<i32>,
}

impl CreateTourDto {
    /// Trims the free-text fields so length rules apply to the stored value.
    pub fn trimmed(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.summary = self.summary.trim().to_string();
        self.description = self.description.map(|d| d.trim().to_string());
        self
    }
}

/// Partial update. Only the fields present in the body are validated and written.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTourDto {
    #[validate(length(
        min = 10,
        max = 40,
        message = "A tour name must have between 10 and 40 characters"
    ))]
    pub name: Option<String>,
    #[validate(range(min = 1, message = "A tour must have a positive duration"))]
    pub duration: Option<i32>,
    #[validate(range(min = 1, message = "A tour must have a positive group size"))]
    pub max_group_size: Option<i32>,
    #[validate(custom(function = "validate_difficulty"))]
    pub difficulty: Option<String>,
    #[validate(range(min = 1.0, max = 5.0, message = "Rating must be between 1.0 and 5.0"))]
    pub ratings_average: Option<f64>,
    #[validate(range(exclusive_min = 0.0, message = "A tour must have a positive price"))]
    pub price: Option<f64>,
    pub price_discount: Option<f64>,
    #[validate(length(min = 1, message = "A tour must have a summary"))]
    pub summary: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "A tour must have a cover image"))]
    pub image_cover: Option<String>,
    pub images: Option<Vec<String>>,
    pub start_dates: Option<Vec<DateTime<Utc>>>,
    #[validate(nested)]
    pub start_location: Option<GeoPointDto>,
    #[validate(nested)]
    pub locations: Option<Vec<LocationDto>>,
    pub guides: Option<Vec<i32>>,
}

impl UpdateTourDto {
    pub fn trimmed(mut self) -> Self {
        self.name = self.name.map(|n| n.trim().to_string());
        self.summary = self.summary.map(|s| s.trim().to_string());
        self.description = self.description.map(|d| d.trim().to_string());
        self
    }
}

/// Per-difficulty aggregate over highly rated tours.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TourStatsDto {
    pub difficulty: String,
    pub num_tours: usize,
    pub num_ratings: i64,
    pub avg_rating: f64,
    pub avg_price: f64,
    pub min_price: f64,
    pub max_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPlanDto {
    pub month: u32,
    pub num_tour_starts: usize,
    pub tours: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TourDistanceDto {
    pub id: i32,
    pub name: String,
    pub distance: f64,
}

/// `{"stats": [...]}` wrapper of the statistics endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TourStatsDataDto {
    pub stats: Vec<TourStatsDto>,
}

/// `{"plan": [...]}` wrapper of the monthly plan endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthlyPlanDataDto {
    pub plan: Vec<MonthlyPlanDto>,
}

fn point_type() -> String {
    "Point".to_string()
}

fn validate_difficulty(difficulty: &str) -> Result<(), ValidationError> {
    if DIFFICULTIES.contains(&difficulty) {
        return Ok(());
    }

    Err(ValidationError::new("difficulty")
        .with_message("Difficulty is either: easy, medium, difficult".into()))
}

fn validate_coordinates(coordinates: &[f64; 2]) -> Result<(), ValidationError> {
    let [lng, lat] = *coordinates;
    if (-180.0..=180.0).contains(&lng) && (-90.0..=90.0).contains(&lat) {
        return Ok(());
    }

    Err(ValidationError::new("coordinates")
        .with_message("Coordinates must be [longitude, latitude]".into()))
}

fn validate_discount(tour: &CreateTourDto) -> Result<(), ValidationError> {
    match tour.price_discount {
        Some(discount) if discount >= tour.price => Err(ValidationError::new("priceDiscount")
            .with_message(
                format!("Discount price ({discount}) should be below regular price").into(),
            )),
        _ => Ok(()),
    }
}
