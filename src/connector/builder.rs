//! Connector Builder
//!
//! Builder for `ApiConnector` and `ModelConnector`.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{ApiConfig, ApiVersion};
use crate::error::ApiError;
use crate::execution::http::client::build_http_client_from_config;
use crate::execution::http::transport::{HttpTransport, ReqwestTransport};

use super::basic::ApiConnector;
use super::model::ModelConnector;

/// Connector builder
///
/// Credentials not set explicitly are read from `INFERMEDICA_APP_ID` and
/// `INFERMEDICA_APP_KEY` at build time.
#[derive(Clone)]
pub struct ConnectorBuilder {
    config: ApiConfig,
    http_client: Option<reqwest::Client>,
    http_transport: Option<Arc<dyn HttpTransport>>,
}

impl ConnectorBuilder {
    pub fn new() -> Self {
        Self::from_config(ApiConfig::new("", ""))
    }

    /// Start from an existing configuration.
    pub fn from_config(config: ApiConfig) -> Self {
        Self {
            config,
            http_client: None,
            http_transport: None,
        }
    }

    /// Set the application id
    pub fn app_id<S: Into<String>>(mut self, app_id: S) -> Self {
        self.config.app_id = app_id.into();
        self
    }

    /// Set the application key
    pub fn app_key<S: Into<String>>(mut self, app_key: S) -> Self {
        self.config.app_key = secrecy::SecretString::from(app_key.into());
        self
    }

    /// Set the base URL
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn api_version(mut self, api_version: ApiVersion) -> Self {
        self.config.api_version = api_version;
        self
    }

    /// Set the knowledge model
    pub fn model<S: Into<String>>(mut self, model: S) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn dev_mode(mut self, dev_mode: bool) -> Self {
        self.config.dev_mode = dev_mode;
        self
    }

    /// Header name used to send the interview id
    pub fn interview_id_header<S: Into<String>>(mut self, name: S) -> Self {
        self.config.interview_id_header = name.into();
        self
    }

    /// Set request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.http_config.timeout = Some(timeout);
        self
    }

    /// Set connection timeout
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.config.http_config.connect_timeout = Some(connect_timeout);
        self
    }

    /// Add a header sent with every request
    pub fn header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.config = self.config.with_default_header(name, value);
        self
    }

    /// Use a preconfigured `reqwest` client instead of building one.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Replace the HTTP transport entirely.
    pub fn with_http_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.http_transport = Some(transport);
        self
    }

    fn resolve_config(&self) -> Result<ApiConfig, ApiError> {
        use secrecy::ExposeSecret;

        let mut config = self.config.clone();
        if config.app_id.is_empty() {
            config.app_id = env_credential("INFERMEDICA_APP_ID", "app id")?;
        }
        if config.app_key.expose_secret().is_empty() {
            config.app_key = env_credential("INFERMEDICA_APP_KEY", "app key")?.into();
        }
        config.validate()?;
        Ok(config)
    }

    /// Build the raw connector
    pub fn build(self) -> Result<ApiConnector, ApiError> {
        let config = self.resolve_config()?;
        let transport: Arc<dyn HttpTransport> = match self.http_transport {
            Some(transport) => transport,
            None => {
                let http_client = match self.http_client {
                    Some(client) => client,
                    None => build_http_client_from_config(&config.http_config)?,
                };
                Arc::new(ReqwestTransport::new(&config, http_client)?)
            }
        };
        Ok(ApiConnector::new(
            transport,
            config.api_version,
            config.interview_id_header,
        ))
    }

    /// Build the typed connector
    pub fn build_model(self) -> Result<ModelConnector, ApiError> {
        self.build().map(ModelConnector::new)
    }
}

impl Default for ConnectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn env_credential(var: &str, what: &str) -> Result<String, ApiError> {
    std::env::var(var).map_err(|_| {
        ApiError::ConfigurationError(format!(
            "Diagnosis API {what} not provided. Set {var} environment variable or use the builder"
        ))
    })
}
