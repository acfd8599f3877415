//! HTTP Headers Utility
//!
//! Header building for the reqwest transport and interview-id propagation for
//! session-bound calls.

use crate::error::ApiError;
use crate::types::Headers;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// HTTP header builder for API requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    /// Create a new header builder
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// Add a custom header
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, ApiError> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            ApiError::ConfigurationError(format!("Invalid header name '{name}': {e}"))
        })?;
        self.headers.insert(
            header_name,
            HeaderValue::from_str(value).map_err(|e| {
                ApiError::ConfigurationError(format!("Invalid header value for '{name}': {e}"))
            })?,
        );
        Ok(self)
    }

    /// Add multiple custom headers; later entries replace earlier ones.
    pub fn with_custom_headers(mut self, custom_headers: &Headers) -> Result<Self, ApiError> {
        for (key, value) in custom_headers {
            self = self.with_header(key, value)?;
        }
        Ok(self)
    }

    /// Build the final HeaderMap
    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Merge extra headers into base headers.
///
/// Extra headers override base headers with the same (case-insensitive) name.
/// Entries that are not valid HTTP headers are rejected.
pub fn merge_headers(base: HeaderMap, extra: &Headers) -> Result<HeaderMap, ApiError> {
    let mut builder = HttpHeaderBuilder { headers: base };
    builder = builder.with_custom_headers(extra)?;
    Ok(builder.build())
}

/// Headers carrying the interview id of a diagnostic session.
///
/// Empty when no id is supplied, otherwise exactly one entry.
pub fn headers_for_interview(header_name: &str, interview_id: Option<&str>) -> Headers {
    let mut headers = Headers::new();
    if let Some(id) = interview_id.filter(|id| !id.is_empty()) {
        headers.insert(header_name.to_string(), id.to_string());
    }
    headers
}

/// Merge the interview header into caller-supplied headers.
///
/// Unrelated caller headers are kept. A caller header with the same name
/// (compared case-insensitively) is replaced by the session value.
pub fn with_interview_header(
    mut headers: Headers,
    header_name: &str,
    interview_id: Option<&str>,
) -> Headers {
    for (name, value) in headers_for_interview(header_name, interview_id) {
        headers.retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        headers.insert(name, value);
    }
    headers
}
