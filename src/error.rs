use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::storage::StoreError;

/// Request-level errors, each mapping to one HTTP status code.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database not connected")]
    StoreUnavailable,

    #[error("{0}")]
    Validation(String),

    #[error("Invalid todo id: {0}")]
    InvalidId(String),

    #[error("Todo not found")]
    NotFound,

    #[error("Todo updated but could not be fetched")]
    MissingAfterUpdate,

    #[error("{0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable | ApiError::MissingAfterUpdate | ApiError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable => ApiError::StoreUnavailable,
            other => ApiError::Store(other.to_string()),
        }
    }
}

// Not-found reports under a `message` key, everything else under `error`.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::NotFound => json!({ "message": self.to_string() }),
            _ => json!({ "error": self.to_string() }),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
