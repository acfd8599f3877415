//! Per-call request options and their merge precedence.
//!
//! Precedence, per field:
//! - `headers`: caller headers are kept; the session interview header
//!   replaces a caller header of the same name.
//! - `params` and `data`: values built by the connector go in first, caller
//!   entries win on key collision.

use crate::execution::http::headers::with_interview_header;
use crate::types::{Headers, QueryParams};
use serde_json::{Map, Value};

/// Extra headers, query params and body fields for a single call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub headers: Headers,
    pub params: QueryParams,
    pub data: Map<String, Value>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Caller headers plus the interview header for `interview_id`.
    pub fn resolve_headers(&self, header_name: &str, interview_id: Option<&str>) -> Headers {
        with_interview_header(self.headers.clone(), header_name, interview_id)
    }

    /// Connector-built params overlaid with caller params.
    pub fn resolve_params(&self, built: QueryParams) -> QueryParams {
        overlay(built, &self.params)
    }

    /// Connector-built body overlaid with caller data.
    pub fn resolve_body(&self, built: Map<String, Value>) -> Value {
        Value::Object(overlay(built, &self.data))
    }
}

fn overlay(mut base: Map<String, Value>, caller: &Map<String, Value>) -> Map<String, Value> {
    for (key, value) in caller {
        base.insert(key.clone(), value.clone());
    }
    base
}
