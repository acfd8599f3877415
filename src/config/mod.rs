//! Client Configuration
//!
//! Credentials, endpoint, API version and HTTP settings for the diagnosis API.

mod http;

pub use http::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, HttpConfig, HttpConfigBuilder};

use crate::error::ApiError;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.infermedica.com/";

/// Header carrying the interview (session) id.
pub const DEFAULT_INTERVIEW_ID_HEADER: &str = "Interview-Id";

/// Every endpoint the client knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    Info,
    Search,
    Lookup,
    Suggest,
    Parse,
    Diagnosis,
    Explain,
    Triage,
    Rationale,
    RedFlags,
    Conditions,
    ConditionDetails,
    Symptoms,
    SymptomDetails,
    RiskFactors,
    RiskFactorDetails,
    LabTests,
    LabTestDetails,
    Concepts,
    ConceptDetails,
}

impl ApiMethod {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Search => "search",
            Self::Lookup => "lookup",
            Self::Suggest => "suggest",
            Self::Parse => "parse",
            Self::Diagnosis => "diagnosis",
            Self::Explain => "explain",
            Self::Triage => "triage",
            Self::Rationale => "rationale",
            Self::RedFlags => "red_flags",
            Self::Conditions => "conditions",
            Self::ConditionDetails => "condition_details",
            Self::Symptoms => "symptoms",
            Self::SymptomDetails => "symptom_details",
            Self::RiskFactors => "risk_factors",
            Self::RiskFactorDetails => "risk_factor_details",
            Self::LabTests => "lab_tests",
            Self::LabTestDetails => "lab_test_details",
            Self::Concepts => "concepts",
            Self::ConceptDetails => "concept_details",
        }
    }

    /// Endpoint path shared by every API version.
    const fn common_path(self) -> Option<&'static str> {
        let path = match self {
            Self::Info => "/info",
            Self::Search => "/search",
            Self::Suggest => "/suggest",
            Self::Parse => "/parse",
            Self::Diagnosis => "/diagnosis",
            Self::Explain => "/explain",
            Self::Triage => "/triage",
            Self::Rationale => "/rationale",
            Self::RedFlags => "/red_flags",
            Self::Conditions => "/conditions",
            Self::ConditionDetails => "/conditions/{id}",
            Self::Symptoms => "/symptoms",
            Self::SymptomDetails => "/symptoms/{id}",
            Self::RiskFactors => "/risk_factors",
            Self::RiskFactorDetails => "/risk_factors/{id}",
            Self::LabTests => "/lab_tests",
            Self::LabTestDetails => "/lab_tests/{id}",
            Self::Lookup | Self::Concepts | Self::ConceptDetails => return None,
        };
        Some(path)
    }
}

/// Supported API versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApiVersion {
    #[default]
    V2,
    V3,
}

impl ApiVersion {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V2 => "v2",
            Self::V3 => "v3",
        }
    }

    /// Path template for `method`, or `None` when this version lacks it.
    pub const fn path(self, method: ApiMethod) -> Option<&'static str> {
        match (self, method) {
            (Self::V2, ApiMethod::Lookup) => Some("/lookup"),
            (Self::V3, ApiMethod::Concepts) => Some("/concepts"),
            (Self::V3, ApiMethod::ConceptDetails) => Some("/concepts/{id}"),
            // v3 serves red flags from `/suggest` with `suggest_method`
            (Self::V3, ApiMethod::RedFlags) => None,
            _ => method.common_path(),
        }
    }

    /// Whether search, parse and knowledge-base lookups need a patient age.
    pub const fn requires_age(self) -> bool {
        matches!(self, Self::V3)
    }

    /// Resolve a method path, substituting `{id}` with the URL-encoded id.
    pub fn resolve(self, method: ApiMethod, id: Option<&str>) -> Result<String, ApiError> {
        let template = self.path(method).ok_or_else(|| ApiError::MethodNotAvailable {
            version: self.as_str().to_string(),
            method: method.name().to_string(),
        })?;
        Ok(match id {
            Some(id) => template.replace("{id}", &urlencoding::encode(id)),
            None => template.to_string(),
        })
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v2" => Ok(Self::V2),
            "v3" => Ok(Self::V3),
            other => Err(ApiError::ConfigurationError(format!(
                "Unsupported API version: {other}"
            ))),
        }
    }
}

/// Diagnosis API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Application id sent as `App-Id`
    pub app_id: String,
    /// Application key sent as `App-Key`
    pub app_key: SecretString,
    /// Base URL; the API version is appended to it
    pub base_url: String,
    /// API version selecting the method table
    pub api_version: ApiVersion,
    /// Optional knowledge model sent as `Model`
    pub model: Option<String>,
    /// Sends `Dev-Mode: true` when enabled
    pub dev_mode: bool,
    /// Header name used to propagate the interview id
    pub interview_id_header: String,
    /// HTTP transport settings
    pub http_config: HttpConfig,
}

impl ApiConfig {
    /// Create a configuration with the given credentials and default settings.
    pub fn new(app_id: impl Into<String>, app_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: SecretString::from(app_key.into()),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: ApiVersion::default(),
            model: None,
            dev_mode: false,
            interview_id_header: DEFAULT_INTERVIEW_ID_HEADER.to_string(),
            http_config: HttpConfig::default(),
        }
    }

    /// Build a configuration from `INFERMEDICA_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        let app_id = required_env("INFERMEDICA_APP_ID")?;
        let app_key = required_env("INFERMEDICA_APP_KEY")?;
        let mut config = Self::new(app_id, app_key);

        if let Some(url) = optional_env("INFERMEDICA_API_URL") {
            config.base_url = url;
        }
        if let Some(version) = optional_env("INFERMEDICA_API_VERSION") {
            config.api_version = version.parse()?;
        }
        config.model = optional_env("INFERMEDICA_MODEL");

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = api_version;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    pub fn with_interview_id_header(mut self, name: impl Into<String>) -> Self {
        self.interview_id_header = name.into();
        self
    }

    pub fn with_http_config(mut self, http_config: HttpConfig) -> Self {
        self.http_config = http_config;
        self
    }

    /// Add a header sent with every request.
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.http_config.headers.insert(name.into(), value.into());
        self
    }

    /// URL prefix every method path is appended to, e.g. `https://api.infermedica.com/v2`.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version.as_str()
        )
    }

    /// Headers attached to every request, before per-call headers are applied.
    ///
    /// User-supplied default headers override the computed ones.
    pub fn default_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers.insert(
            "User-Agent".to_string(),
            self.http_config
                .user_agent
                .clone()
                .unwrap_or_else(default_user_agent),
        );
        headers.insert("App-Id".to_string(), self.app_id.clone());
        headers.insert(
            "App-Key".to_string(),
            self.app_key.expose_secret().to_string(),
        );
        if let Some(model) = &self.model {
            headers.insert("Model".to_string(), model.clone());
        }
        if self.dev_mode {
            headers.insert("Dev-Mode".to_string(), "true".to_string());
        }
        headers.extend(self.http_config.headers.clone());
        headers
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.app_id.trim().is_empty() {
            return Err(ApiError::ConfigurationError(
                "App id cannot be empty".to_string(),
            ));
        }
        if self.app_key.expose_secret().trim().is_empty() {
            return Err(ApiError::ConfigurationError(
                "App key cannot be empty".to_string(),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(ApiError::ConfigurationError(
                "Base URL cannot be empty".to_string(),
            ));
        }
        if self.interview_id_header.trim().is_empty() {
            return Err(ApiError::ConfigurationError(
                "Interview id header name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_user_agent() -> String {
    format!("infermedica-api-rust/{}", env!("CARGO_PKG_VERSION"))
}

fn required_env(key: &str) -> Result<String, ApiError> {
    optional_env(key)
        .ok_or_else(|| ApiError::ConfigurationError(format!("Missing environment variable {key}")))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
