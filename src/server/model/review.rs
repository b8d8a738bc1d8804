//! Review domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::review::{ReviewDto, UpdateReviewDto},
    server::model::{tour::round_rating, user::ReviewAuthor},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: i32,
    pub review: String,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub tour_id: i32,
    pub author: ReviewAuthor,
}

impl Review {
    /// Converts a review row and its author to a domain model.
    pub fn from_entity(entity: entity::review::Model, author: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            review: entity.review,
            rating: entity.rating,
            created_at: entity.created_at,
            tour_id: entity.tour_id,
            author: ReviewAuthor::from_entity(author),
        }
    }

    pub fn into_dto(self) -> ReviewDto {
        ReviewDto {
            id: self.id,
            review: self.review,
            rating: self.rating,
            created_at: self.created_at,
            tour: self.tour_id,
            user: self.author.into_dto(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateReviewParams {
    pub tour_id: i32,
    pub user_id: i32,
    pub review: String,
    pub rating: f64,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateReviewParams {
    pub review: Option<String>,
    pub rating: Option<f64>,
}

impl UpdateReviewParams {
    pub fn from_dto(dto: UpdateReviewDto) -> Self {
        Self {
            review: dto.review,
            rating: dto.rating,
        }
    }
}

/// Review count and average rating of one tour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub quantity: i32,
    pub average: f64,
}

impl RatingSummary {
    /// Summarises ratings, averaging to one decimal. No ratings yield zero for both.
    pub fn from_ratings(ratings: &[f64]) -> Self {
        if ratings.is_empty() {
            return Self {
                quantity: 0,
                average: 0.0,
            };
        }

        let average = ratings.iter().sum::<f64>() / ratings.len() as f64;
        Self {
            quantity: ratings.len() as i32,
            average: round_rating(average),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_without_reviews_is_zero() {
        assert_eq!(
            RatingSummary::from_ratings(&[]),
            RatingSummary {
                quantity: 0,
                average: 0.0
            }
        );
    }

    #[test]
    fn summary_rounds_average() {
        let summary = RatingSummary::from_ratings(&[5.0, 4.0, 4.0]);

        assert_eq!(summary.quantity, 3);
        assert_eq!(summary.average, 4.3);
    }
}
