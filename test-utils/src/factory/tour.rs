//! Tour factory for creating test tour entities and their child rows.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test tours with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::tour::TourFactory;
///
/// let tour = TourFactory::new(&db)
///     .name("The Forest Hiker")
///     .difficulty("easy")
///     .price(397.0)
///     .build()
///     .await?;
/// ```
pub struct TourFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    duration: i32,
    max_group_size: i32,
    difficulty: String,
    ratings_average: f64,
    ratings_quantity: i32,
    price: f64,
    price_discount: Option<f64>,
    summary: String,
    created_at: DateTime<Utc>,
    start_location: Option<(f64, f64)>,
}

impl<'a> TourFactory<'a> {
    /// Creates a new TourFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Test Tour Number {id}"`
    /// - duration: `5`, max_group_size: `10`
    /// - difficulty: `"easy"`
    /// - ratings_average: `4.5`, ratings_quantity: `0`
    /// - price: `500.0`, no discount
    /// - no start location
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Test Tour Number {}", id),
            duration: 5,
            max_group_size: 10,
            difficulty: "easy".to_string(),
            ratings_average: 4.5,
            ratings_quantity: 0,
            price: 500.0,
            price_discount: None,
            summary: "A tour created for testing".to_string(),
            created_at: Utc::now(),
            start_location: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn duration(mut self, duration: i32) -> Self {
        self.duration = duration;
        self
    }

    pub fn max_group_size(mut self, max_group_size: i32) -> Self {
        self.max_group_size = max_group_size;
        self
    }

    /// Sets the difficulty, one of `easy`, `medium` or `difficult`.
    pub fn difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    pub fn ratings_average(mut self, ratings_average: f64) -> Self {
        self.ratings_average = ratings_average;
        self
    }

    pub fn ratings_quantity(mut self, ratings_quantity: i32) -> Self {
        self.ratings_quantity = ratings_quantity;
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn price_discount(mut self, price_discount: f64) -> Self {
        self.price_discount = Some(price_discount);
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Sets the start location as latitude and longitude.
    pub fn start_location(mut self, lat: f64, lng: f64) -> Self {
        self.start_location = Some((lat, lng));
        self
    }

    /// Builds and inserts the tour entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::tour::Model)` - Created tour entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::tour::Model, DbErr> {
        entity::tour::ActiveModel {
            name: ActiveValue::Set(self.name),
            duration: ActiveValue::Set(self.duration),
            max_group_size: ActiveValue::Set(self.max_group_size),
            difficulty: ActiveValue::Set(self.difficulty),
            ratings_average: ActiveValue::Set(self.ratings_average),
            ratings_quantity: ActiveValue::Set(self.ratings_quantity),
            price: ActiveValue::Set(self.price),
            price_discount: ActiveValue::Set(self.price_discount),
            summary: ActiveValue::Set(self.summary),
            description: ActiveValue::Set(None),
            image_cover: ActiveValue::Set("tour-cover.jpg".to_string()),
            images: ActiveValue::Set(serde_json::json!([])),
            created_at: ActiveValue::Set(self.created_at),
            start_lat: ActiveValue::Set(self.start_location.map(|(lat, _)| lat)),
            start_lng: ActiveValue::Set(self.start_location.map(|(_, lng)| lng)),
            start_address: ActiveValue::Set(None),
            start_description: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a tour with default values.
///
/// Shorthand for `TourFactory::new(db).build().await`.
pub async fn create_tour(db: &DatabaseConnection) -> Result<entity::tour::Model, DbErr> {
    TourFactory::new(db).build().await
}

/// Adds a start date to an existing tour.
pub async fn add_start_date(
    db: &DatabaseConnection,
    tour_id: i32,
    start_date: DateTime<Utc>,
) -> Result<entity::tour_start_date::Model, DbErr> {
    entity::tour_start_date::ActiveModel {
        tour_id: ActiveValue::Set(tour_id),
        start_date: ActiveValue::Set(start_date),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Links a user to a tour as one of its guides.
pub async fn add_guide(
    db: &DatabaseConnection,
    tour_id: i32,
    user_id: i32,
) -> Result<entity::tour_guide::Model, DbErr> {
    entity::tour_guide::ActiveModel {
        tour_id: ActiveValue::Set(tour_id),
        user_id: ActiveValue::Set(user_id),
    }
    .insert(db)
    .await
}
