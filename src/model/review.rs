use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Review author as populated on a review.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewAuthorDto {
    pub id: i32,
    pub name: String,
    pub photo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: i32,
    pub review: String,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    /// Id of the reviewed tour.
    pub tour: i32,
    pub user: ReviewAuthorDto,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct CreateReviewDto {
    #[validate(length(min = 1, message = "Review can not be empty!"))]
    pub review: String,
    #[validate(range(min = 1.0, max = 5.0, message = "Rating must be between 1 and 5"))]
    pub rating: f64,
    /// Tour id; ignored on the nested `/tours/{id}/reviews` route.
    pub tour: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateReviewDto {
    #[validate(length(min = 1, message = "Review can not be empty!"))]
    pub review: Option<String>,
    #[validate(range(min = 1.0, max = 5.0, message = "Rating must be between 1 and 5"))]
    pub rating: Option<f64>,
}
