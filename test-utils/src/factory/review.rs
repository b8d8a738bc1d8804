//! Review factory for creating test review entities.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test reviews with customizable fields.
///
/// The tour and author must already exist.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::review::ReviewFactory;
///
/// let review = ReviewFactory::new(&db, tour.id, user.id)
///     .rating(3.0)
///     .build()
///     .await?;
/// ```
pub struct ReviewFactory<'a> {
    db: &'a DatabaseConnection,
    tour_id: i32,
    user_id: i32,
    review: String,
    rating: f64,
}

impl<'a> ReviewFactory<'a> {
    /// Creates a new ReviewFactory with a rating of `4.0` and placeholder text.
    pub fn new(db: &'a DatabaseConnection, tour_id: i32, user_id: i32) -> Self {
        Self {
            db,
            tour_id,
            user_id,
            review: "A lovely tour".to_string(),
            rating: 4.0,
        }
    }

    pub fn review(mut self, review: impl Into<String>) -> Self {
        self.review = review.into();
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Builds and inserts the review entity into the database.
    ///
    /// Does not recompute the tour's rating aggregate.
    pub async fn build(self) -> Result<entity::review::Model, DbErr> {
        entity::review::ActiveModel {
            review: ActiveValue::Set(self.review),
            rating: ActiveValue::Set(self.rating),
            created_at: ActiveValue::Set(Utc::now()),
            tour_id: ActiveValue::Set(self.tour_id),
            user_id: ActiveValue::Set(self.user_id),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a review with default values.
pub async fn create_review(
    db: &DatabaseConnection,
    tour_id: i32,
    user_id: i32,
) -> Result<entity::review::Model, DbErr> {
    ReviewFactory::new(db, tour_id, user_id).build().await
}
