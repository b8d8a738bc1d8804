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
        user::{UpdateMeDto, UpdateUserDto, UserDataDto, UserDto},
    },
    server::{
        controller::project_all,
        error::{auth::AuthError, AppError},
        middleware::auth::AuthGuard,
        model::user::{Role, UpdateUserParams, User},
        service::user::UserService,
        state::AppState,
        util::{api_features::ApiFeatures, json::AppJson, parse::parse_id},
    },
};

/// Tag for grouping user endpoints in OpenAPI documentation
pub static USER_TAG: &str = "user";

/// Get the logged-in user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The logged-in user", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    let user = UserService::new(&state.db).get_by_id(user.id).await?;

    Ok((
        StatusCode::OK,
        Json(SuccessDto::new(DocumentDto {
            data: user.into_dto(),
        })),
    ))
}

/// Update name, email or photo of the logged-in user.
///
/// # Returns
/// - `200 OK` - The updated user
/// - `400 Bad Request` - Password fields sent, validation failed or email taken
/// - `401 Unauthorized` - Not logged in
#[utoipa::path(
    patch,
    path = "/api/v1/users/updateMe",
    tag = USER_TAG,
    request_body = UpdateMeDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile updated", body = UserDataDto),
        (status = 400, description = "Invalid profile data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_me(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<UpdateMeDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    if payload.has_password_fields() {
        return Err(AuthError::PasswordUpdateNotAllowed.into());
    }
    let payload = payload.trimmed();
    payload.validate()?;

    let user = UserService::new(&state.db)
        .update(user.id, UpdateUserParams::from_update_me_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(SuccessDto::new(UserDataDto {
            user: user.into_dto(),
        })),
    ))
}

/// Deactivate the logged-in user's account.
#[utoipa::path(
    delete,
    path = "/api/v1/users/deleteMe",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Account deactivated"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    UserService::new(&state.db).deactivate(user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List active users.
///
/// # Access Control
/// - `admin`
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = USER_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 1)"),
        ("limit" = Option<u64>, Query, description = "Items per page (default: 100)"),
        ("sort" = Option<String>, Query, description = "Comma-separated fields, `-` for descending"),
        ("fields" = Option<String>, Query, description = "Comma-separated fields to include or `-field` to exclude")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Successfully retrieved users", body = Vec<UserDto>),
        (status = 400, description = "Invalid query", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_users(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Role::Admin])
        .await?;

    let features = ApiFeatures::from_query(query)?;

    let users = UserService::new(&state.db).get_all(&features).await?;
    let users = project_all(&features, users.into_iter().map(User::into_dto).collect())?;

    Ok((
        StatusCode::OK,
        Json(SuccessDto::new(DocumentDto { data: users }).with_results_len()),
    ))
}

/// Get a user by ID.
///
/// # Access Control
/// - `admin`
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Successfully retrieved user", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Role::Admin])
        .await?;

    let id = parse_id(&id)?;

    let user = UserService::new(&state.db).get_by_id(id).await?;

    Ok((
        StatusCode::OK,
        Json(SuccessDto::new(DocumentDto {
            data: user.into_dto(),
        })),
    ))
}

/// Update another user's profile or role. Passwords cannot be changed here.
///
/// # Access Control
/// - `admin`
#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Successfully updated user", body = UserDto),
        (status = 400, description = "Invalid user data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Role::Admin])
        .await?;

    let id = parse_id(&id)?;
    let payload = payload.trimmed();
    payload.validate()?;

    let params = UpdateUserParams::from_update_user_dto(payload)
        .map_err(|value| AppError::invalid_value("role", value))?;

    let user = UserService::new(&state.db).update(id, params).await?;

    Ok((
        StatusCode::OK,
        Json(SuccessDto::new(DocumentDto {
            data: user.into_dto(),
        })),
    ))
}

/// Permanently delete a user with their reviews.
///
/// # Access Control
/// - `admin`
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = USER_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Successfully deleted user"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[Role::Admin])
        .await?;

    let id = parse_id(&id)?;

    UserService::new(&state.db).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
