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
        tour::{
            CreateTourDto, MonthlyPlanDataDto, MonthlyPlanDto, TourDistanceDto, TourDto,
            TourStatsDataDto, TourStatsDto, UpdateTourDto,
        },
    },
    server::{
        controller::project_all,
        error::AppError,
        middleware::auth::AuthGuard,
        model::{
            tour::{CreateTourParams, MonthlyPlan, Tour, TourDistance, TourStats, UpdateTourParams},
            user::Role,
        },
        service::tour::TourService,
        state::AppState,
        util::{
            api_features::ApiFeatures,
            geo::{DistanceUnit, LatLng},
            json::AppJson,
            parse::{parse_id, parse_value},
        },
    },
};

/// Tag for grouping tour endpoints in OpenAPI documentation
pub static TOUR_TAG: &str = "tour";

const TOUR_EDITORS: &[Role] = &[Role::Admin, Role::LeadGuide];

/// Query overrides of the top-5-cheap alias.
const TOP_TOURS_QUERY: &[(&str, &str)] = &[
    ("limit", "5"),
    ("sort", "-ratingsAverage,price"),
    ("fields", "name,price,ratingsAverage,summary,difficulty"),
];

/// List tours.
///
/// Supports filtering (`price[lt]=1000`, `difficulty=easy`), sorting (`sort=-price`),
/// field selection (`fields=name,price`) and pagination (`page=2&limit=10`).
///
/// # Returns
/// - `200 OK` - Tours matching the query
/// - `400 Bad Request` - Unknown filter or sort field, or an unparsable value
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/v1/tours",
    tag = TOUR_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 100)"),
        ("sort" = Option<String>, Query, description = "Comma-separated fields, `-` for descending"),
        ("fields" = Option<String>, Query, description = "Comma-separated fields to include or `-field` to exclude")
    ),
    responses(
        (status = 200, description = "Successfully retrieved tours", body = Vec<TourDto>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_tours(
    State(state): State<AppState>,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    list_tours(&state, query).await
}

/// List the five best rated, cheapest tours.
///
/// Same as the tour list with `limit`, `sort` and `fields` preset. Other query
/// parameters still filter the result.
#[utoipa::path(
    get,
    path = "/api/v1/tours/top-5-cheap",
    tag = TOUR_TAG,
    responses(
        (status = 200, description = "Successfully retrieved tours", body = Vec<TourDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_top_tours(
    State(state): State<AppState>,
    Query(mut query): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    query.retain(|(key, _)| !TOP_TOURS_QUERY.iter().any(|(alias, _)| alias == key));
    query.extend(
        TOP_TOURS_QUERY
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string())),
    );

    list_tours(&state, query).await
}

async fn list_tours(
    state: &AppState,
    query: Vec<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let features = ApiFeatures::from_query(query)?;

    let tours = TourService::new(&state.db).get_all(&features).await?;
    let tours = project_all(&features, tours.into_iter().map(Tour::into_dto).collect())?;

    Ok((
        StatusCode::OK,
        Json(SuccessDto::new(DocumentDto { data: tours }).with_results_len()),
    ))
}

/// Get a tour with its guides and reviews.
///
/// # Returns
/// - `200 OK` - The tour
/// - `400 Bad Request` - ID is not a number
/// - `404 Not Found` - No tour with that ID
#[utoipa::path(
    get,
    path = "/api/v1/tours/{id}",
    tag = TOUR_TAG,
    params(
        ("id" = i32, Path, description = "Tour ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved tour", body = TourDto),
        (status = 400, description = "Invalid ID", body = ErrorDto),
        (status = 404, description = "Tour not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_tour(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;

    let tour = TourService::new(&state.db).get_by_id(id).await?;

    Ok((
        StatusCode::OK,
        Json(SuccessDto::new(DocumentDto {
            data: tour.into_dto(),
        })),
    ))
}

/// Create a tour.
///
/// # Access Control
/// - `admin`, `lead-guide`
///
/// # Returns
/// - `201 Created` - The created tour
/// - `400 Bad Request` - Validation failed, duplicate name or unknown guide
/// - `401 Unauthorized` - Not logged in
/// - `403 Forbidden` - Role not allowed
#[utoipa::path(
    post,
    path = "/api/v1/tours",
    tag = TOUR_TAG,
    request_body = CreateTourDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Successfully created tour", body = TourDto),
        (status = 400, description = "Invalid tour data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Role not allowed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_tour(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<CreateTourDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(TOUR_EDITORS)
        .await?;

    let payload = payload.trimmed();
    payload.validate()?;

    let params = CreateTourParams::from_dto(payload)
        .map_err(|value| AppError::invalid_value("difficulty", value))?;

    let tour = TourService::new(&state.db).create(params).await?;

    Ok((
        StatusCode::CREATED,
        Json(SuccessDto::new(DocumentDto {
            data: tour.into_dto(),
        })),
    ))
}

/// Update a tour.
///
/// Only the fields present in the body are validated and written. List fields
/// (images, start dates, locations, guides) replace the stored list.
///
/// # Access Control
/// - `admin`, `lead-guide`
///
/// # Returns
/// - `200 OK` - The updated tour
/// - `400 Bad Request` - Validation failed
/// - `404 Not Found` - No tour with that ID
#[utoipa::path(
    patch,
    path = "/api/v1/tours/{id}",
    tag = TOUR_TAG,
    params(
        ("id" = i32, Path, description = "Tour ID")
    ),
    request_body = UpdateTourDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Successfully updated tour", body = TourDto),
        (status = 400, description = "Invalid tour data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Role not allowed", body = ErrorDto),
        (status = 404, description = "Tour not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_tour(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateTourDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(TOUR_EDITORS)
        .await?;

    let id = parse_id(&id)?;

    let payload = payload.trimmed();
    payload.validate()?;

    let params = UpdateTourParams::from_dto(payload)
        .map_err(|value| AppError::invalid_value("difficulty", value))?;

    let tour = TourService::new(&state.db).update(id, params).await?;

    Ok((
        StatusCode::OK,
        Json(SuccessDto::new(DocumentDto {
            data: tour.into_dto(),
        })),
    ))
}

/// Delete a tour together with its reviews.
///
/// # Access Control
/// - `admin`, `lead-guide`
///
/// # Returns
/// - `204 No Content` - Tour deleted
/// - `404 Not Found` - No tour with that ID
#[utoipa::path(
    delete,
    path = "/api/v1/tours/{id}",
    tag = TOUR_TAG,
    params(
        ("id" = i32, Path, description = "Tour ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Successfully deleted tour"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Role not allowed", body = ErrorDto),
        (status = 404, description = "Tour not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_tour(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(TOUR_EDITORS)
        .await?;

    let id = parse_id(&id)?;

    TourService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Statistics per difficulty over tours rated 4.5 or higher.
#[utoipa::path(
    get,
    path = "/api/v1/tours/tour-stats",
    tag = TOUR_TAG,
    responses(
        (status = 200, description = "Statistics, cheapest difficulty first", body = TourStatsDataDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_tour_stats(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let stats = TourService::new(&state.db).stats().await?;

    Ok((
        StatusCode::OK,
        Json(SuccessDto::new(TourStatsDataDto {
            stats: stats
                .into_iter()
                .map(TourStats::into_dto)
                .collect::<Vec<TourStatsDto>>(),
        })),
    ))
}

/// Number of tour starts per month of a year.
///
/// # Access Control
/// - `admin`, `lead-guide`, `guide`
///
/// # Returns
/// - `200 OK` - Busiest months first, at most 12
/// - `400 Bad Request` - Year is not a number
#[utoipa::path(
    get,
    path = "/api/v1/tours/monthly-plan/{year}",
    tag = TOUR_TAG,
    params(
        ("year" = i32, Path, description = "Calendar year")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Monthly plan", body = MonthlyPlanDataDto),
        (status = 400, description = "Invalid year", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Role not allowed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_monthly_plan(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(year): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Role::Admin, Role::LeadGuide, Role::Guide])
        .await?;

    let year: i32 = parse_value("year", &year)?;

    let plan = TourService::new(&state.db).monthly_plan(year).await?;

    Ok((
        StatusCode::OK,
        Json(SuccessDto::new(MonthlyPlanDataDto {
            plan: plan
                .into_iter()
                .map(MonthlyPlan::into_dto)
                .collect::<Vec<MonthlyPlanDto>>(),
        })),
    ))
}

/// Tours starting within a radius of a point.
///
/// # Returns
/// - `200 OK` - Tours whose start location lies inside the radius
/// - `400 Bad Request` - Malformed distance, `lat,lng` or unit
#[utoipa::path(
    get,
    path = "/api/v1/tours/tour-within/{distance}/center/{latlng}/unit/{unit}",
    tag = TOUR_TAG,
    params(
        ("distance" = f64, Path, description = "Search radius"),
        ("latlng" = String, Path, description = "Centre as `lat,lng`"),
        ("unit" = String, Path, description = "`mi` or `km`")
    ),
    responses(
        (status = 200, description = "Tours within the radius", body = Vec<TourDto>),
        (status = 400, description = "Invalid distance, centre or unit", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_tours_within(
    State(state): State<AppState>,
    Path((distance, latlng, unit)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let center: LatLng = latlng.parse()?;
    let unit: DistanceUnit = unit.parse()?;
    let distance: f64 = parse_value("distance", &distance)?;

    let tours = TourService::new(&state.db)
        .within(distance, center, unit)
        .await?;
    let tours: Vec<TourDto> = tours.into_iter().map(Tour::into_dto).collect();

    Ok((
        StatusCode::OK,
        Json(SuccessDto::new(DocumentDto { data: tours }).with_results_len()),
    ))
}

/// Distance from a point to every tour's start location.
///
/// # Returns
/// - `200 OK` - `{id, name, distance}` entries, nearest first
/// - `400 Bad Request` - Malformed `lat,lng` or unit
#[utoipa::path(
    get,
    path = "/api/v1/tours/distances/{latlng}/unit/{unit}",
    tag = TOUR_TAG,
    params(
        ("latlng" = String, Path, description = "Reference point as `lat,lng`"),
        ("unit" = String, Path, description = "`mi` or `km`")
    ),
    responses(
        (status = 200, description = "Distances, nearest first", body = Vec<TourDistanceDto>),
        (status = 400, description = "Invalid point or unit", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_distances(
    State(state): State<AppState>,
    Path((latlng, unit)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let point: LatLng = latlng.parse()?;
    let unit: DistanceUnit = unit.parse()?;

    let distances = TourService::new(&state.db).distances(point, unit).await?;
    let distances: Vec<TourDistanceDto> =
        distances.into_iter().map(TourDistance::into_dto).collect();

    Ok((
        StatusCode::OK,
        Json(SuccessDto::new(DocumentDto { data: distances })),
    ))
}
