use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::ErrorDto, server::model::user::Role};

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request carries no bearer token.
    #[error("You are not logged in! Please log in to get access.")]
    NotLoggedIn,

    /// Token signature or structure is invalid.
    #[error("Invalid token. Please log in again!")]
    InvalidToken,

    /// Token is past its `exp` claim.
    #[error("Your token has expired! Please log in again.")]
    TokenExpired,

    /// Token refers to a user that was deleted or deactivated.
    #[error("The user belonging to this token no longer exists.")]
    UserNoLongerExists(i32),

    /// User changed their password after the token was issued.
    #[error("User recently changed password! Please log in again.")]
    PasswordChanged(i32),

    /// Authenticated user's role is not in the route's allowed list.
    #[error("You do not have permission to perform this action")]
    AccessDenied {
        /// ID of the rejected user
        user_id: i32,
        /// Role the user holds
        role: Role,
    },

    /// Login attempted without email or password.
    #[error("Please provide email and password!")]
    MissingCredentials,

    /// Email unknown or password wrong.
    #[error("Incorrect email or password")]
    IncorrectCredentials,

    /// `passwordCurrent` did not match on password change.
    #[error("Your current password is wrong.")]
    IncorrectCurrentPassword(i32),

    /// No user holds the hashed reset token or it has expired.
    #[error("Token is invalid or has expired")]
    ResetTokenInvalid,

    /// Password fields were sent to the profile update route.
    #[error("This route is not for password updates. Please use /updateMyPassword.")]
    PasswordUpdateNotAllowed,
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::AccessDenied { .. } => StatusCode::FORBIDDEN,
            Self::MissingCredentials | Self::ResetTokenInvalid | Self::PasswordUpdateNotAllowed => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Converts authentication errors into HTTP responses.
///
/// Every variant is operational: the client receives the variant's message with
/// status `fail`. Rejections are logged at debug level with the offending user
/// where one is known.
///
/// # Returns
/// - 400 Bad Request - Missing login fields, invalid reset token, password on profile update
/// - 401 Unauthorized - Missing, invalid or stale credentials
/// - 403 Forbidden - Role not allowed on the route
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            Self::AccessDenied { user_id, role } => {
                tracing::debug!("Denied user {} with role {}", user_id, role.as_str())
            }
            Self::UserNoLongerExists(user_id)
            | Self::PasswordChanged(user_id)
            | Self::IncorrectCurrentPassword(user_id) => {
                tracing::debug!("Rejected user {}: {}", user_id, self)
            }
            _ => tracing::debug!("Authentication failed: {}", self),
        }

        (self.status(), Json(ErrorDto::new("fail", self.to_string()))).into_response()
    }
}
