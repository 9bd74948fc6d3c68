use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Empty catalog: {0}")]
    EmptyCatalog(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidProfile(msg) | AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::EmptyCatalog(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Duplicate(msg) => (StatusCode::CONFLICT, msg),
            AppError::CollaboratorUnavailable(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Storage(_) | AppError::Serialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
