use crate::domain::errors::{DispatchError, DomainError};
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Validation {
        message: String,
        details: Vec<String>,
    },
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Validation { message, .. } => write!(f, "Validation failed: {}", message),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": message, "details": details }),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("Request failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}

// Malformed or mistyped request bodies
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let detail = rejection.body_text();
        ApiError::Validation {
            message: "Invalid request body".to_string(),
            details: vec![detail],
        }
    }
}

// Query strings that do not deserialize, e.g. `?page=abc`
impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation {
            message: "Invalid query parameters".to_string(),
            details: vec![rejection.body_text()],
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(msg) => ApiError::NotFound(msg),
            DomainError::ValidationError { message, details } => {
                ApiError::Validation { message, details }
            }
            DomainError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::MissingFields(ref fields) => ApiError::Validation {
                message: err.to_string(),
                details: fields.iter().map(|f| format!("{} is required", f)).collect(),
            },
            DispatchError::InvalidScheduleDate(_)
            | DispatchError::EmptyList(_)
            | DispatchError::UnknownTemplate(_) => {
                let message = err.to_string();
                ApiError::Validation {
                    details: vec![message.clone()],
                    message,
                }
            }
            DispatchError::Configuration(_) | DispatchError::TransportUnavailable(_) => {
                ApiError::Internal(err.to_string())
            }
            DispatchError::Repository(inner) => inner.into(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
