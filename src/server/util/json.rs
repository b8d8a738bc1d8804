use axum::{extract::FromRequest, http::StatusCode};

use crate::server::error::AppError;

/// `Json` extractor whose rejections are reported through [`AppError`].
///
/// Malformed or mistyped bodies produce a 400 with status `fail` instead of axum's
/// plain-text rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge;
        }

        AppError::BadRequest(rejection.body_text())
    }
}
