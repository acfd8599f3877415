//! Uniform conversion from raw JSON responses into typed results.

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Construct a typed result from a raw API response.
///
/// Conversion is all-or-nothing: a response missing a required field yields
/// `ApiError::MalformedResponse` and no partial value.
pub trait FromJson: Sized {
    fn from_json(raw: Value) -> Result<Self, ApiError>;
}

impl<T: DeserializeOwned> FromJson for T {
    fn from_json(raw: Value) -> Result<Self, ApiError> {
        serde_json::from_value(raw).map_err(|e| ApiError::malformed::<T>(e.to_string()))
    }
}
