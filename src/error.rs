//! Error types for the key-value store
//!
//! Provides unified error handling using thiserror. Cache-layer failures have
//! their own type in [`crate::cache::CacheError`] and never surface here.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::kv::Key;
use crate::models::ErrorResponse;

// == Store Error Enum ==
/// Unified error type for store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Empty or malformed key/value, detected before any I/O
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No committed record exists for the key
    #[error("Key not found: {0}")]
    NotFound(Key),

    /// Durable I/O failed
    #[error("I/O error during {op} on {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Wraps an I/O error with the operation and path it came from.
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            StoreError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            StoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_status_codes() {
        let test_cases = vec![
            (
                StoreError::InvalidRequest("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (StoreError::NotFound(Key::from("key")), StatusCode::NOT_FOUND),
            (
                StoreError::io("read", "/tmp/x", io::Error::other("disk")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                StoreError::Internal("error".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_io_error_message_names_operation_and_path() {
        let err = StoreError::io(
            "rename",
            "/data/abc",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("rename"));
        assert!(msg.contains("/data/abc"));
        assert!(msg.contains("denied"));
    }
}
