//! HTTP transport abstraction.
//!
//! Connectors never talk to `reqwest` directly. They hand a method path,
//! body, query params and headers to an `HttpTransport` and receive decoded
//! JSON back. `ReqwestTransport` is the default implementation; tests and
//! embedders can inject their own.

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::execution::http::client::build_http_client_from_config;
use crate::execution::http::headers::{HttpHeaderBuilder, merge_headers};
use crate::types::{Headers, QueryParams};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::Value;

/// Transport collaborator used by the connectors.
///
/// Implementations fail with `ApiError::TransportError` on non-2xx responses
/// and `ApiError::NetworkError` when no response was received.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn call_get(
        &self,
        path: &str,
        params: &QueryParams,
        headers: &Headers,
    ) -> Result<Value, ApiError>;

    async fn call_post(
        &self,
        path: &str,
        body: &Value,
        params: &QueryParams,
        headers: &Headers,
    ) -> Result<Value, ApiError>;
}

/// Default transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: reqwest::Client,
    endpoint_url: String,
    default_headers: HeaderMap,
}

impl ReqwestTransport {
    /// Creates a transport using an existing HTTP client.
    pub fn new(config: &ApiConfig, http_client: reqwest::Client) -> Result<Self, ApiError> {
        config.validate()?;
        let default_headers = HttpHeaderBuilder::new()
            .with_custom_headers(&config.default_headers())?
            .build();
        Ok(Self {
            http_client,
            endpoint_url: config.endpoint_url(),
            default_headers,
        })
    }

    /// Creates a transport with a client built from `config.http_config`.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let http_client = build_http_client_from_config(&config.http_config)?;
        Self::new(config, http_client)
    }

    /// Full URL prefix requests are sent to.
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint_url, path)
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        url: &str,
        headers: &Headers,
    ) -> Result<Value, ApiError> {
        let effective_headers = merge_headers(self.default_headers.clone(), headers)?;
        let resp = builder.headers(effective_headers).send().await?;

        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!(url = %url, status = status.as_u16(), "diagnosis API response");

        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "diagnosis API request failed");
            return Err(ApiError::transport(status.as_u16(), text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn call_get(
        &self,
        path: &str,
        params: &QueryParams,
        headers: &Headers,
    ) -> Result<Value, ApiError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");
        let builder = self.http_client.get(&url).query(&query_pairs(params));
        self.send(builder, &url, headers).await
    }

    async fn call_post(
        &self,
        path: &str,
        body: &Value,
        params: &QueryParams,
        headers: &Headers,
    ) -> Result<Value, ApiError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "POST");
        let builder = self
            .http_client
            .post(&url)
            .query(&query_pairs(params))
            .body(serde_json::to_vec(body)?);
        self.send(builder, &url, headers).await
    }
}

/// Flatten query params into key/value pairs.
///
/// Arrays become repeated keys, `null` entries are dropped.
pub fn query_pairs(params: &QueryParams) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        match value {
            Value::Array(items) => {
                pairs.extend(items.iter().filter_map(|item| {
                    scalar_to_string(item).map(|v| (key.clone(), v))
                }));
            }
            other => {
                if let Some(v) = scalar_to_string(other) {
                    pairs.push((key.clone(), v));
                }
            }
        }
    }
    pairs
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
