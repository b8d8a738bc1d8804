//! Review business logic.
//!
//! Every write recomputes the owning tour's `ratingsQuantity` and `ratingsAverage`
//! once the review row itself has been written.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::server::{
    data::{review::ReviewRepository, tour::TourRepository},
    error::AppError,
    model::review::{CreateReviewParams, RatingSummary, Review, UpdateReviewParams},
    util::api_features::ApiFeatures,
};

pub struct ReviewService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReviewService<'a> {
    /// Creates a new ReviewService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists reviews, optionally restricted to one tour.
    ///
    /// # Arguments
    /// - `features` - Filter, sort and pagination options
    /// - `tour_id` - Only return reviews of this tour when set
    pub async fn get_all(
        &self,
        features: &ApiFeatures,
        tour_id: Option<i32>,
    ) -> Result<Vec<Review>, AppError> {
        let mut select = entity::prelude::Review::find();
        if let Some(tour_id) = tour_id {
            select = select.filter(entity::review::Column::TourId.eq(tour_id));
        }

        let select = features.apply(select)?;
        let reviews = ReviewRepository::new(self.db).find_many(select).await?;

        Ok(reviews)
    }

    /// Gets a review by ID.
    ///
    /// # Returns
    /// - `Ok(Review)` - Review with its author
    /// - `Err(AppError::NotFound)` - No review with that ID
    pub async fn get_by_id(&self, id: i32) -> Result<Review, AppError> {
        ReviewRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(AppError::document_not_found)
    }

    /// Creates a review and refreshes the tour's rating aggregate.
    ///
    /// # Returns
    /// - `Ok(Review)` - The created review
    /// - `Err(AppError::NotFound)` - The tour does not exist
    /// - `Err(AppError::BadRequest)` - The user has already reviewed this tour
    pub async fn create(&self, params: CreateReviewParams) -> Result<Review, AppError> {
        if !TourRepository::new(self.db).exists(params.tour_id).await? {
            return Err(AppError::NotFound("No tour found with that ID".to_string()));
        }

        let repo = ReviewRepository::new(self.db);

        if repo.exists_for(params.tour_id, params.user_id).await? {
            return Err(AppError::BadRequest(
                "You have already reviewed this tour.".to_string(),
            ));
        }

        let review = repo.create(params).await?;
        self.calc_average_ratings(review.tour_id).await?;

        Ok(review)
    }

    /// Updates a review and refreshes the tour's rating aggregate.
    ///
    /// # Returns
    /// - `Ok(Review)` - The updated review
    /// - `Err(AppError::NotFound)` - No review with that ID
    pub async fn update(&self, id: i32, params: UpdateReviewParams) -> Result<Review, AppError> {
        let review = ReviewRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(AppError::document_not_found)?;

        self.calc_average_ratings(review.tour_id).await?;

        Ok(review)
    }

    /// Deletes a review and refreshes the tour's rating aggregate.
    ///
    /// # Returns
    /// - `Ok(())` - Review deleted
    /// - `Err(AppError::NotFound)` - No review with that ID
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let tour_id = ReviewRepository::new(self.db)
            .delete(id)
            .await?
            .ok_or_else(AppError::document_not_found)?;

        self.calc_average_ratings(tour_id).await?;

        Ok(())
    }

    /// Recomputes and stores a tour's review count and average rating.
    ///
    /// A tour without reviews gets zero for both.
    pub async fn calc_average_ratings(&self, tour_id: i32) -> Result<RatingSummary, AppError> {
        let ratings = ReviewRepository::new(self.db)
            .ratings_for_tour(tour_id)
            .await?;
        let summary = RatingSummary::from_ratings(&ratings);

        TourRepository::new(self.db)
            .update_ratings(tour_id, summary)
            .await?;

        tracing::debug!(
            "Tour {} ratings now {} over {} reviews",
            tour_id,
            summary.average,
            summary.quantity
        );

        Ok(summary)
    }
}
