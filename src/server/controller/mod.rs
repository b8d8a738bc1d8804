//! HTTP request handlers.
//!
//! Controllers check access with [`AuthGuard`](crate::server::middleware::auth::AuthGuard),
//! validate request DTOs, convert them to service parameters and wrap the results in
//! the JSON success envelope.

use serde::Serialize;
use serde_json::Value;

use crate::server::{error::AppError, util::api_features::ApiFeatures};

pub mod auth;
pub mod review;
pub mod tour;
pub mod user;

#[cfg(test)]
mod test;

/// Serializes list items and applies the requested field selection to each.
fn project_all<T: Serialize>(features: &ApiFeatures, items: Vec<T>) -> Result<Vec<Value>, AppError> {
    items
        .into_iter()
        .map(|item| {
            serde_json::to_value(item)
                .map(|value| features.project(value))
                .map_err(|e| AppError::InternalError(e.to_string()))
        })
        .collect()
}
