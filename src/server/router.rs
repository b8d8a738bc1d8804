use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        review::{CreateReviewDto, ReviewAuthorDto, ReviewDto, UpdateReviewDto},
        tour::{
            CreateTourDto, GeoPointDto, LocationDto, MonthlyPlanDataDto, MonthlyPlanDto,
            TourDistanceDto, TourDto, TourStatsDataDto, TourStatsDto, UpdateTourDto,
        },
        user::{
            ForgotPasswordDto, LoginDto, ResetPasswordDto, SignupDto, UpdateMeDto,
            UpdatePasswordDto, UpdateUserDto, UserDataDto, UserDto,
        },
    },
    server::{
        config::Environment,
        controller::{
            auth::{self, AUTH_TAG},
            review::{self, REVIEW_TAG},
            tour::{self, TOUR_TAG},
            user::{self, USER_TAG},
        },
        error::AppError,
        middleware::error_detail::expose_error_detail,
        state::AppState,
    },
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&BearerAuth),
    info(title = "Tourboard API", description = "Tours, users and reviews."),
    tags(
        (name = TOUR_TAG, description = "Tours and tour analytics"),
        (name = AUTH_TAG, description = "Signup, login and password management"),
        (name = USER_TAG, description = "User accounts"),
        (name = REVIEW_TAG, description = "Tour reviews")
    ),
    paths(
        tour::get_all_tours,
        tour::get_top_tours,
        tour::get_tour,
        tour::create_tour,
        tour::update_tour,
        tour::delete_tour,
        tour::get_tour_stats,
        tour::get_monthly_plan,
        tour::get_tours_within,
        tour::get_distances,
        auth::signup,
        auth::login,
        auth::forgot_password,
        auth::reset_password,
        auth::update_my_password,
        user::get_me,
        user::update_me,
        user::delete_me,
        user::get_all_users,
        user::get_user,
        user::update_user,
        user::delete_user,
        review::get_all_reviews,
        review::get_tour_reviews,
        review::create_review,
        review::create_tour_review,
        review::get_review,
        review::update_review,
        review::delete_review,
    ),
    components(schemas(
        ErrorDto,
        MessageDto,
        TourDto,
        GeoPointDto,
        LocationDto,
        CreateTourDto,
        UpdateTourDto,
        TourStatsDto,
        TourStatsDataDto,
        MonthlyPlanDto,
        MonthlyPlanDataDto,
        TourDistanceDto,
        UserDto,
        UserDataDto,
        SignupDto,
        LoginDto,
        ForgotPasswordDto,
        ResetPasswordDto,
        UpdatePasswordDto,
        UpdateMeDto,
        UpdateUserDto,
        ReviewDto,
        ReviewAuthorDto,
        CreateReviewDto,
        UpdateReviewDto,
    ))
)]
pub struct ApiDoc;

/// Every `/api/v1` route.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/tours",
            get(tour::get_all_tours).post(tour::create_tour),
        )
        .route("/api/v1/tours/top-5-cheap", get(tour::get_top_tours))
        .route("/api/v1/tours/tour-stats", get(tour::get_tour_stats))
        .route(
            "/api/v1/tours/monthly-plan/{year}",
            get(tour::get_monthly_plan),
        )
        .route(
            "/api/v1/tours/tour-within/{distance}/center/{latlng}/unit/{unit}",
            get(tour::get_tours_within),
        )
        .route(
            "/api/v1/tours/distances/{latlng}/unit/{unit}",
            get(tour::get_distances),
        )
        .route(
            "/api/v1/tours/{id}",
            get(tour::get_tour)
                .patch(tour::update_tour)
                .delete(tour::delete_tour),
        )
        .route(
            "/api/v1/tours/{id}/reviews",
            get(review::get_tour_reviews).post(review::create_tour_review),
        )
        .route("/api/v1/users/signup", post(auth::signup))
        .route("/api/v1/users/login", post(auth::login))
        .route("/api/v1/users/forgotPassword", post(auth::forgot_password))
        .route(
            "/api/v1/users/resetPassword/{token}",
            patch(auth::reset_password),
        )
        .route(
            "/api/v1/users/updateMyPassword",
            patch(auth::update_my_password),
        )
        .route("/api/v1/users/me", get(user::get_me))
        .route("/api/v1/users/updateMe", patch(user::update_me))
        .route("/api/v1/users/deleteMe", delete(user::delete_me))
        .route("/api/v1/users", get(user::get_all_users))
        .route(
            "/api/v1/users/{id}",
            get(user::get_user)
                .patch(user::update_user)
                .delete(user::delete_user),
        )
        .route(
            "/api/v1/reviews",
            get(review::get_all_reviews).post(review::create_review),
        )
        .route(
            "/api/v1/reviews/{id}",
            get(review::get_review)
                .patch(review::update_review)
                .delete(review::delete_review),
        )
}

/// Assembles the application around the given API routes.
///
/// Adds the API documentation, the not-found fallback (also used for unsupported methods on
/// known paths), the request body limit and the development error details. Connection-level layers (rate limiting, CORS, tracing)
/// are added by the caller.
pub fn app(
    api: Router<AppState>,
    state: AppState,
    environment: Environment,
    body_limit: usize,
) -> Router {
    api.merge(SwaggerUi::new("/api/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn_with_state(
            environment,
            expose_error_detail,
        ))
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    let path = uri
        .path_and_query()
        .map(|path| path.as_str())
        .unwrap_or_else(|| uri.path());

    AppError::NotFound(format!("Can't find {} on this server!", path))
}
