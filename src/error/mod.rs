//! Unified error handling for Souk Core

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// No session credential was presented
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// A credential was presented but failed signature or expiry checks
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// Authenticated caller is not the owner named in the request
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Malformed document identifier, rejected before reaching the store
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Store error: {0}")]
    Store(#[from] mongodb::error::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Wire messages mirror the browser-facing contract: a missing
            // credential reads "unauthorized", a bad one reads "forbidden".
            AppError::Unauthenticated(_) => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            AppError::InvalidCredential(_) => (StatusCode::UNAUTHORIZED, "forbidden".to_string()),
            AppError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden".to_string()),
            AppError::InvalidId(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Store(e) => {
                tracing::error!("Store error: {:?}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "store unavailable".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { message });

        (status, body).into_response()
    }
}
