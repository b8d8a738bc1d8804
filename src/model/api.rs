use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned for every failed request.
///
/// `status` is `fail` for client errors and `error` for server errors. `error` carries
/// the full error rendering and is only present in development.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub status: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorDto {
    pub fn new(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
            error: None,
        }
    }
}

/// Success envelope: `{"status": "success", "results"?, "token"?, "data"}`.
#[derive(Debug, Serialize)]
pub struct SuccessDto<T> {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> SuccessDto<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: "success",
            results: None,
            token: None,
            data: Some(data),
        }
    }

    pub fn with_results(mut self, results: usize) -> Self {
        self.results = Some(results);
        self
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }
}

impl SuccessDto<()> {
    /// Envelope carrying only a token, as returned by login.
    pub fn token(token: String) -> Self {
        Self {
            status: "success",
            results: None,
            token: Some(token),
            data: None,
        }
    }
}

/// Generic `data` wrapper used by the resource CRUD endpoints: `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct DocumentDto<T> {
    pub data: T,
}

impl<T> SuccessDto<DocumentDto<Vec<T>>> {
    /// Sets `results` to the number of documents in `data`.
    pub fn with_results_len(self) -> Self {
        let len = self.data.as_ref().map_or(0, |document| document.data.len());
        self.with_results(len)
    }
}

/// Plain message response, e.g. after requesting a password reset.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub status: String,
    pub message: String,
}

impl MessageDto {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }
}
