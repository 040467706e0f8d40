//! # API Error Types
//!
//! Maps resolution failures to HTTP responses. The JSON error body is the
//! service's documented wire contract: `{"detail": "<message>"}` with the
//! status carrying the error class. Internal details never reach the
//! client — the 500 path logs the cause and returns a generic detail.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::resolver::ResolveError;

/// JSON error response body: `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable error detail.
    pub detail: String,
}

/// Application-level error type that implements [`IntoResponse`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Registration failed length validation (400).
    #[error("Invalid registration format")]
    InvalidFormat,

    /// The orchestration-level timeout elapsed before the upstream
    /// attempt resolved (504). Deliberately not recovered via the
    /// heuristic — see the resolver.
    #[error("Request timeout - please try again")]
    Timeout,

    /// Any other failure during resolution (500). The message is logged
    /// but not returned to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidFormat => StatusCode::BAD_REQUEST,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing detail string. Internal errors collapse to a
    /// generic message.
    pub fn detail(&self) -> String {
        match self {
            Self::Internal(_) => "Error checking compliance".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::Timeout => tracing::error!("timeout while checking compliance"),
            Self::InvalidFormat => {}
        }

        let body = ErrorBody {
            detail: self.detail(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::InvalidFormat => Self::InvalidFormat,
            ResolveError::Timeout => Self::Timeout,
        }
    }
}
