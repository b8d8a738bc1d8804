use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        api::{DocumentDto, ErrorDto, SuccessDto},
        review::{CreateReviewDto, ReviewDto, UpdateReviewDto},
    },
    server::{
        controller::project_all,
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            review::{CreateReviewParams, Review, UpdateReviewParams},
            user::Role,
        },
        service::review::ReviewService,
        state::AppState,
        util::{api_features::ApiFeatures, json::AppJson, parse::parse_id},
    },
};

/// Tag for grouping review endpoints in OpenAPI documentation
pub static REVIEW_TAG: &str = "review";

const REVIEW_EDITORS: &[Role] = &[Role::User, Role::Admin];

/// List all reviews.
///
/// # Access Control
/// - Any logged-in user
#[utoipa::path(
    get,
    path = "/api/v1/reviews",
    tag = REVIEW_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Successfully retrieved reviews", body = Vec<ReviewDto>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_reviews(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    list_reviews(&state, &headers, query, None).await
}

/// List the reviews of one tour.
///
/// # Access Control
/// - Any logged-in user
#[utoipa::path(
    get,
    path = "/api/v1/tours/{id}/reviews",
    tag = REVIEW_TAG,
    params(
        ("id" = i32, Path, description = "Tour ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Successfully retrieved reviews", body = Vec<ReviewDto>),
        (status = 400, description = "Invalid ID or query", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_tour_reviews(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(tour_id): Path<String>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let tour_id = parse_id(&tour_id)?;

    list_reviews(&state, &headers, query, Some(tour_id)).await
}

async fn list_reviews(
    state: &AppState,
    headers: &HeaderMap,
    query: Vec<(String, String)>,
    tour_id: Option<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, headers)
        .require(&[])
        .await?;

    let features = ApiFeatures::from_query(query)?;

    let reviews = ReviewService::new(&state.db)
        .get_all(&features, tour_id)
        .await?;
    let reviews = project_all(
        &features,
        reviews.into_iter().map(Review::into_dto).collect(),
    )?;

    Ok((
        StatusCode::OK,
        Json(SuccessDto::new(DocumentDto { data: reviews }).with_results_len()),
    ))
}

/// Review a tour named in the body.
///
/// # Access Control
/// - `user`
///
/// # Returns
/// - `201 Created` - The review
/// - `400 Bad Request` - Validation failed, no tour given or tour already reviewed
/// - `404 Not Found` - The tour does not exist
#[utoipa::path(
    post,
    path = "/api/v1/reviews",
    tag = REVIEW_TAG,
    request_body = CreateReviewDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Successfully created review", body = ReviewDto),
        (status = 400, description = "Invalid review data or duplicate review", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Role not allowed", body = ErrorDto),
        (status = 404, description = "Tour not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<CreateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    write_review(&state, &headers, None, payload).await
}

/// Review the tour in the path.
///
/// # Access Control
/// - `user`
#[utoipa::path(
    post,
    path = "/api/v1/tours/{id}/reviews",
    tag = REVIEW_TAG,
    params(
        ("id" = i32, Path, description = "Tour ID")
    ),
    request_body = CreateReviewDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Successfully created review", body = ReviewDto),
        (status = 400, description = "Invalid review data or duplicate review", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Role not allowed", body = ErrorDto),
        (status = 404, description = "Tour not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_tour_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(tour_id): Path<String>,
    AppJson(payload): AppJson<CreateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let tour_id = parse_id(&tour_id)?;

    write_review(&state, &headers, Some(tour_id), payload).await
}

async fn write_review(
    state: &AppState,
    headers: &HeaderMap,
    path_tour_id: Option<i32>,
    payload: CreateReviewDto,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, headers)
        .require(&[Role::User])
        .await?;

    payload.validate()?;

    let tour_id = path_tour_id
        .or(payload.tour)
        .ok_or_else(|| AppError::BadRequest("Review must belong to a tour.".to_string()))?;

    let review = ReviewService::new(&state.db)
        .create(CreateReviewParams {
            tour_id,
            user_id: user.id,
            review: payload.review.trim().to_string(),
            rating: payload.rating,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SuccessDto::new(DocumentDto {
            data: review.into_dto(),
        })),
    ))
}

/// Get a review by ID.
///
/// # Access Control
/// - Any logged-in user
#[utoipa::path(
    get,
    path = "/api/v1/reviews/{id}",
    tag = REVIEW_TAG,
    params(
        ("id" = i32, Path, description = "Review ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Successfully retrieved review", body = ReviewDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let id = parse_id(&id)?;

    let review = ReviewService::new(&state.db).get_by_id(id).await?;

    Ok((
        StatusCode::OK,
        Json(SuccessDto::new(DocumentDto {
            data: review.into_dto(),
        })),
    ))
}

/// Update a review's text or rating.
///
/// # Access Control
/// - `user`, `admin`
#[utoipa::path(
    patch,
    path = "/api/v1/reviews/{id}",
    tag = REVIEW_TAG,
    params(
        ("id" = i32, Path, description = "Review ID")
    ),
    request_body = UpdateReviewDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Successfully updated review", body = ReviewDto),
        (status = 400, description = "Invalid review data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Role not allowed", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateReviewDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(REVIEW_EDITORS)
        .await?;

    let id = parse_id(&id)?;
    payload.validate()?;

    let review = ReviewService::new(&state.db)
        .update(id, UpdateReviewParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(SuccessDto::new(DocumentDto {
            data: review.into_dto(),
        })),
    ))
}

/// Delete a review.
///
/// # Access Control
/// - `user`, `admin`
#[utoipa::path(
    delete,
    path = "/api/v1/reviews/{id}",
    tag = REVIEW_TAG,
    params(
        ("id" = i32, Path, description = "Review ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Successfully deleted review"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Role not allowed", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(REVIEW_EDITORS)
        .await?;

    let id = parse_id(&id)?;

    ReviewService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
