//! Custom error types for the bloglist service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the bloglist service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or missing request fields, including uniqueness violations
    #[error("{0}")]
    Validation(String),

    /// Wrong username or password on login
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Missing, malformed, or badly signed session token
    #[error("token missing or invalid")]
    Unauthorized,

    /// Acting user is not the creator of the targeted resource
    #[error("only the creator may delete a blog")]
    Forbidden,

    /// Unknown resource id
    #[error("{0} not found")]
    NotFound(&'static str),

    /// No route matches the request
    #[error("unknown endpoint")]
    UnknownEndpoint,

    /// Internal server error
    #[error("internal server error")]
    InternalServerError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) | ApiError::UnknownEndpoint => StatusCode::NOT_FOUND,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Type alias for handler results
pub type ApiResult<T> = Result<T, ApiError>;
