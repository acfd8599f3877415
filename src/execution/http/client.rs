//! reqwest client construction from `HttpConfig`.

use crate::config::HttpConfig;
use crate::error::ApiError;

/// Build a `reqwest::Client` honoring timeouts and proxy settings.
///
/// Headers and the user agent are applied per request by the transport, so
/// they are not baked into the client.
pub fn build_http_client_from_config(cfg: &HttpConfig) -> Result<reqwest::Client, ApiError> {
    let mut builder = reqwest::Client::builder();

    if let Some(timeout) = cfg.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(connect_timeout) = cfg.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }
    if let Some(proxy_url) = &cfg.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| ApiError::ConfigurationError(format!("Invalid proxy URL: {e}")))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|e| ApiError::ConfigurationError(format!("Failed to build HTTP client: {e}")))
}
