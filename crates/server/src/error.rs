use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures of a single recommendation request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    #[error("Movie not found: {0}")]
    MovieNotFound(String),

    #[error("k must be at most {max}, got {k}")]
    InvalidLimit { k: usize, max: usize },
}

/// HTTP-facing errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<RecommendError> for ServerError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::MovieNotFound(_) => ServerError::NotFound(err.to_string()),
            RecommendError::InvalidLimit { .. } => ServerError::InvalidInput(err.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
