//! Type Conversions for ApiError
//!
//! This module contains From trait implementations for converting
//! common error types into ApiError.

use super::types::ApiError;

/// Errors carrying a status map to `TransportError`; anything else means no
/// response was received.
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::TransportError {
                status: status.as_u16(),
                body: err.to_string(),
            };
        }
        Self::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}
