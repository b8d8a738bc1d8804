use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    model::{
        api::{ErrorDto, MessageDto, SuccessDto},
        user::{
            ForgotPasswordDto, LoginDto, ResetPasswordDto, SignupDto, UpdatePasswordDto,
            UserDataDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::user::SignupParams,
        service::{
            auth::{AuthService, AuthenticatedUser},
            email::Email,
        },
        state::AppState,
        util::json::AppJson,
    },
};

/// Tag for grouping authentication endpoints in OpenAPI documentation
pub static AUTH_TAG: &str = "auth";

/// Create an account.
///
/// The account always gets the `user` role. A welcome email is sent; failing to send
/// it does not fail the signup.
///
/// # Returns
/// - `201 Created` - Token and the new user
/// - `400 Bad Request` - Validation failed or email already registered
#[utoipa::path(
    post,
    path = "/api/v1/users/signup",
    tag = AUTH_TAG,
    request_body = SignupDto,
    responses(
        (status = 201, description = "Account created", body = UserDataDto),
        (status = 400, description = "Invalid signup data or duplicate email", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignupDto>,
) -> Result<impl IntoResponse, AppError> {
    let payload = payload.trimmed();
    payload.validate()?;

    let authenticated = auth_service(&state)
        .signup(SignupParams::from_dto(payload))
        .await?;

    let profile_url = format!("{}/me", state.app_url.trim_end_matches('/'));
    if let Err(err) = state
        .mailer
        .send(Email::welcome(&authenticated.user, &profile_url))
        .await
    {
        tracing::warn!(
            "Failed to send welcome email to user {}: {}",
            authenticated.user.id,
            err
        );
    }

    Ok((StatusCode::CREATED, Json(token_and_user(authenticated))))
}

/// Log in with email and password.
///
/// # Returns
/// - `200 OK` - `{status, token}`
/// - `400 Bad Request` - Email or password missing
/// - `401 Unauthorized` - Incorrect email or password
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in"),
        (status = 400, description = "Email or password missing", body = ErrorDto),
        (status = 401, description = "Incorrect email or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let token = auth_service(&state)
        .login(payload.email, payload.password)
        .await?;

    Ok((StatusCode::OK, Json(SuccessDto::token(token))))
}

/// Email a password reset link.
///
/// The link carries a token valid for 10 minutes.
///
/// # Returns
/// - `200 OK` - Email sent
/// - `400 Bad Request` - Email is malformed
/// - `404 Not Found` - No account with that email
/// - `500 Internal Server Error` - Email could not be sent
#[utoipa::path(
    post,
    path = "/api/v1/users/forgotPassword",
    tag = AUTH_TAG,
    request_body = ForgotPasswordDto,
    responses(
        (status = 200, description = "Reset email sent", body = MessageDto),
        (status = 400, description = "Invalid email", body = ErrorDto),
        (status = 404, description = "No user with that email", body = ErrorDto),
        (status = 500, description = "Email could not be sent", body = ErrorDto)
    ),
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ForgotPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    auth_service(&state)
        .forgot_password(&payload.email, state.mailer.as_ref(), &state.app_url)
        .await?;

    Ok((StatusCode::OK, Json(MessageDto::success("Token sent to email!"))))
}

/// Set a new password with an emailed reset token.
///
/// # Returns
/// - `200 OK` - Token and user
/// - `400 Bad Request` - Token invalid or expired, or password validation failed
#[utoipa::path(
    patch,
    path = "/api/v1/users/resetPassword/{token}",
    tag = AUTH_TAG,
    params(
        ("token" = String, Path, description = "Reset token from the email")
    ),
    request_body = ResetPasswordDto,
    responses(
        (status = 200, description = "Password reset", body = UserDataDto),
        (status = 400, description = "Invalid token or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    AppJson(payload): AppJson<ResetPasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let authenticated = auth_service(&state)
        .reset_password(&token, payload.password)
        .await?;

    Ok((StatusCode::OK, Json(token_and_user(authenticated))))
}

/// Change the password of the logged-in user.
///
/// # Access Control
/// - Any logged-in user
///
/// # Returns
/// - `200 OK` - Fresh token and user
/// - `400 Bad Request` - New password validation failed
/// - `401 Unauthorized` - Not logged in or current password wrong
#[utoipa::path(
    patch,
    path = "/api/v1/users/updateMyPassword",
    tag = AUTH_TAG,
    request_body = UpdatePasswordDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Password changed", body = UserDataDto),
        (status = 400, description = "Invalid password", body = ErrorDto),
        (status = 401, description = "Not logged in or current password wrong", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_my_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<UpdatePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &state.tokens, &headers)
        .require(&[])
        .await?;

    payload.validate()?;

    let authenticated = auth_service(&state)
        .update_password(user.id, payload.password_current, payload.password)
        .await?;

    Ok((StatusCode::OK, Json(token_and_user(authenticated))))
}

fn auth_service(state: &AppState) -> AuthService<'_> {
    AuthService::new(&state.db, &state.tokens, state.password_cost)
}

fn token_and_user(authenticated: AuthenticatedUser) -> SuccessDto<UserDataDto> {
    SuccessDto::new(UserDataDto {
        user: authenticated.user.into_dto(),
    })
    .with_token(authenticated.token)
}
