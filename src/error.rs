//! Error types for the key-value server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == KV Error Enum ==
/// Unified error type for the key-value server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KvError {
    /// Empty key, malformed path or unusable form data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Key is not present in the storage
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Server or scheduler was configured with unusable values
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Storage state can no longer be trusted
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for KvError {
    fn into_response(self) -> Response {
        let status = match &self {
            KvError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            KvError::NotFound(_) => StatusCode::NOT_FOUND,
            KvError::Configuration(_) | KvError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the key-value server.
pub type Result<T> = std::result::Result<T, KvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (KvError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (KvError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                KvError::Configuration("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (KvError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_display_includes_detail() {
        let err = KvError::NotFound("alpha".to_string());
        assert_eq!(err.to_string(), "Key not found: alpha");
    }
}
