use crate::core::TrackerError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method not allowed";

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("stored progress is corrupt: {0}")]
    Corrupt(String),
    #[error("invalid progress payload: {0}")]
    InvalidPayload(String),
    #[error("{}", METHOD_NOT_ALLOWED_MESSAGE)]
    MethodNotAllowed,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        match err {
            TrackerError::Serialization(message) => Self::Corrupt(message),
            other => Self::Storage(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidPayload(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Storage(_) | Self::Corrupt(_) => {
                error!(error = %self, "sync API error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        };

        let message = match self {
            Self::Storage(message) | Self::Corrupt(message) => message,
            Self::InvalidPayload(message) => format!("invalid progress payload: {message}"),
            Self::MethodNotAllowed => METHOD_NOT_ALLOWED_MESSAGE.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
