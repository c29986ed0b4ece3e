use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Serialize;
use thiserror::Error;

/// Failure of one outbound request to the countries provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("{0}")]
    Transport(String),
    #[error("Request failed with status code {0}")]
    Status(u16),
    #[error("{0}")]
    Decode(String),
}

impl FetchError {
    /// Message shown to the user in place of content.
    pub fn user_message(&self, fallback: &str) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            fallback.to_string()
        } else {
            msg
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return FetchError::Status(status.as_u16());
        }
        if e.is_decode() {
            return FetchError::Decode(e.to_string());
        }
        FetchError::Transport(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("validation: {0}")]
    Validation(String),
    #[error("not_found: {0}")]
    NotFound(String),
    #[error("external_unavailable: {0}")]
    External(String),
}

#[derive(Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")] pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody { error: "Validation failed", details: Some(msg) }),
            ).into_response(),
            ApiError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody { error: "Country not found", details: None }),
            ).into_response(),
            ApiError::External(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorBody { error: "External data source unavailable", details: Some(msg) }),
            ).into_response(),
        }
    }
}
