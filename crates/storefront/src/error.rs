//! Unified error handling for route handlers.
//!
//! Handlers degrade known failures (store errors, not-found, bad
//! input) to a notice plus redirect themselves; `AppError` is the
//! residue that cannot be turned into a page, chiefly a session layer
//! that fails to read or write. It logs server-side and answers with
//! a generic 500, never raw error text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session read or write failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Database operation failed outside a handler's degrade path.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request error");

        // Don't expose internal error details to clients
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_error_hides_details() {
        let err = AppError::Database(RepositoryError::DataCorruption(
            "invalid email in database".to_string(),
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_repository_error_converts() {
        let err: AppError = RepositoryError::Conflict("username or email already exists".to_owned()).into();
        assert!(matches!(err, AppError::Database(_)));
    }
}
