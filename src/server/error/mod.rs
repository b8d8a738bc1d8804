//! Error types and HTTP response handling.
//!
//! `AppError` is the top-level error returned by every controller. Operational
//! errors (bad input, missing documents, authentication failures) carry their own
//! status and a message safe to show the client. Everything else is logged and
//! collapsed into a generic 500.
//!
//! Each error response also carries an [`ErrorReport`] extension with the full error
//! rendering. The development error middleware uses it to expose details to the client.

pub mod auth;
pub mod config;
pub mod internal;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use validator::ValidationErrors;

use crate::{
    model::api::ErrorDto,
    server::error::{auth::AuthError, config::ConfigError, internal::InternalError},
};

/// Generic client message for unexpected errors.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went very wrong!";

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// Delegates to `AuthError::into_response()` for 400/401/403 mapping.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Database operation error from SeaORM.
    ///
    /// Unique constraint violations become 400 Bad Request, anything else 500.
    #[error(transparent)]
    DbErr(#[from] DbErr),

    /// Unexpected failure inside the server (hashing, mail, token signing, ...).
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Socket binding or serving failed.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Request body failed field validation.
    ///
    /// Results in 400 Bad Request listing every failed rule.
    #[error("Invalid input data. {}", validation_messages(.0))]
    Validation(#[from] ValidationErrors),

    /// A path or query value could not be interpreted for its field.
    ///
    /// Results in 400 Bad Request.
    #[error("Invalid {field}: {value}.")]
    InvalidValue {
        /// Field or parameter name
        field: String,
        /// The rejected raw value
        value: String,
    },

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// A unique field already holds the submitted value.
    ///
    /// Results in 400 Bad Request naming the value.
    #[error("Duplicate field value: {0}. Please use another value.")]
    DuplicateValue(String),

    /// Client exceeded the request quota.
    ///
    /// Results in 429 Too Many Requests with a `Retry-After` header.
    #[error("Too many requests from this IP, please try again in an hour!")]
    TooManyRequests {
        /// Seconds until the next request is accepted
        retry_after: u64,
    },

    /// Request body exceeded the configured limit.
    ///
    /// Results in 413 Payload Too Large.
    #[error("Request body is too large.")]
    PayloadTooLarge,

    /// Internal server error with custom message.
    ///
    /// Results in 500 Internal Server Error. The message is logged but a generic
    /// message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Converts a write error, naming `value` when it broke a unique index.
    ///
    /// Without a value the column-based duplicate message is used.
    pub fn from_unique(err: DbErr, value: Option<&str>) -> Self {
        match (err.sql_err(), value) {
            (Some(SqlErr::UniqueConstraintViolation(_)), Some(value)) => {
                Self::DuplicateValue(value.to_string())
            }
            _ => Self::DbErr(err),
        }
    }

    /// The 404 returned by every resource lookup by ID.
    pub fn document_not_found() -> Self {
        Self::NotFound("No document found with that ID".to_string())
    }
}

/// Full error rendering attached to error responses as an extension.
#[derive(Clone, Debug)]
pub struct ErrorReport {
    /// Display rendering of the error
    pub message: String,
    /// Debug rendering of the error
    pub detail: String,
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - `BadRequest`, `Validation`, `InvalidValue` and duplicate-key database errors
/// - 400 Bad Request - `DuplicateValue`
/// - 404 Not Found - For `NotFound` variant
/// - 429 Too Many Requests - For `TooManyRequests`, with `Retry-After`
/// - 413 Payload Too Large - For `PayloadTooLarge` variant
/// - 500 Internal Server Error - For all other error types
/// - Variable - For `AuthErr`, delegated to `AuthError::into_response()`
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let report = ErrorReport {
            message: self.to_string(),
            detail: format!("{:?}", self),
        };

        let mut response = match self {
            Self::AuthErr(err) => err.into_response(),
            Self::NotFound(msg) => fail(StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => fail(StatusCode::BAD_REQUEST, msg),
            Self::DuplicateValue(_) => fail(StatusCode::BAD_REQUEST, report.message.clone()),
            Self::TooManyRequests { retry_after } => {
                let mut response = fail(StatusCode::TOO_MANY_REQUESTS, report.message.clone());
                response
                    .headers_mut()
                    .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
                response
            }
            Self::PayloadTooLarge => fail(StatusCode::PAYLOAD_TOO_LARGE, report.message.clone()),
            Self::Validation(_) | Self::InvalidValue { .. } => {
                fail(StatusCode::BAD_REQUEST, report.message.clone())
            }
            Self::DbErr(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => fail(
                    StatusCode::BAD_REQUEST,
                    format!(
                        "Duplicate field value: {}. Please use another value.",
                        duplicate_field(&detail)
                    ),
                ),
                _ => InternalServerError(err).into_response(),
            },
            err => InternalServerError(err).into_response(),
        };

        response.extensions_mut().insert(report);
        response
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the full error and returns the generic message to the client.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto::new("error", GENERIC_ERROR_MESSAGE)),
        )
            .into_response()
    }
}

fn fail(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorDto::new("fail", message))).into_response()
}

/// Joins every field validation message, sorted by field for stable output.
fn validation_messages(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let mut messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("Invalid {}", field),
            })
        })
        .collect();

    // Struct-level rules are reported under `__all__`.
    if messages.is_empty() {
        messages.push(errors.to_string());
    }

    messages.join(". ")
}

/// Extracts the column name from a driver unique-violation message.
///
/// SQLite reports `UNIQUE constraint failed: user.email`; anything unrecognised is
/// returned as-is.
fn duplicate_field(detail: &str) -> String {
    let columns = detail
        .rsplit_once("failed:")
        .map(|(_, columns)| columns)
        .unwrap_or(detail);

    columns
        .split(',')
        .map(|column| {
            let column = column.trim();
            column
                .rsplit_once('.')
                .map(|(_, name)| name)
                .unwrap_or(column)
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(", ")
}
