use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    model::api::ErrorDto,
    server::{config::Environment, error::ErrorReport},
};

/// Rewrites error bodies in development to carry the real message and a debug rendering.
///
/// Production responses pass through untouched, so unexpected errors keep the generic
/// message.
pub async fn expose_error_detail(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if environment != Environment::Development {
        return response;
    }

    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    let status = response.status();
    let body = ErrorDto {
        status: if status.is_server_error() { "error" } else { "fail" }.to_string(),
        message: report.message,
        error: Some(report.detail),
    };

    let mut headers = response.headers().clone();
    headers.remove(header::CONTENT_LENGTH);
    headers.remove(header::CONTENT_TYPE);

    let mut rebuilt = (status, Json(body)).into_response();
    rebuilt.headers_mut().extend(headers);
    rebuilt
}
