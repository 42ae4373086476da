use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::response::Envelope;

/// Request-scoped error taxonomy. Every handler is a local boundary: each
/// variant maps to one status code and one client-visible message, and the
/// underlying cause of an internal failure is logged but never exposed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("{0}")]
    NotFound(&'static str),

    /// One message for unknown-email and wrong-password alike, so accounts
    /// cannot be enumerated through the login form.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Conflict(&'static str),

    #[error("Server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref cause) = self {
            error!("internal error: {cause:#}");
        }

        let status = match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(Envelope::<()>::failure(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_error_hides_its_cause() {
        let err = ApiError::from(anyhow::anyhow!("connection reset by peer"));
        assert_eq!(err.to_string(), "Server error");
    }

    #[test]
    fn credential_errors_share_one_message() {
        assert_eq!(ApiError::InvalidCredentials.to_string(), "Invalid credentials");
    }
}
