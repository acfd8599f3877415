//! Low-level connector
//!
//! Takes primitive arguments, sends one request per call and returns the
//! decoded JSON unchanged.

use crate::config::{ApiConfig, ApiMethod, ApiVersion, DEFAULT_INTERVIEW_ID_HEADER};
use crate::error::ApiError;
use crate::execution::http::transport::{HttpTransport, ReqwestTransport};
use crate::request::{
    ConceptQuery, RED_FLAGS_SUGGEST_METHOD, RequestOptions, SearchQuery, diagnosis_payload,
    explain_payload, max_results_params, parse_payload, rationale_payload, red_flags_payload,
    red_flags_raw_payload, suggest_payload, triage_payload, with_age_params, with_suggest_method,
};
use crate::types::{Age, DiagnosticData, QueryParams, Sex};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Connector returning raw JSON results.
///
/// On v3, search, parse and the knowledge-base lookups need the patient's
/// age; calls without one fail with `MissingAge` before anything is sent.
#[derive(Clone)]
pub struct ApiConnector {
    transport: Arc<dyn HttpTransport>,
    api_version: ApiVersion,
    interview_id_header: String,
}

impl std::fmt::Debug for ApiConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConnector")
            .field("api_version", &self.api_version)
            .field("interview_id_header", &self.interview_id_header)
            .finish()
    }
}

impl ApiConnector {
    /// Create a connector over an arbitrary transport.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        api_version: ApiVersion,
        interview_id_header: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            api_version,
            interview_id_header: interview_id_header.into(),
        }
    }

    /// Create a connector with the default `reqwest` transport.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::from_config(config)?;
        Ok(Self::new(
            Arc::new(transport),
            config.api_version,
            config.interview_id_header.clone(),
        ))
    }

    /// Create a v2 connector with the default interview header.
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(transport, ApiVersion::default(), DEFAULT_INTERVIEW_ID_HEADER)
    }

    pub fn api_version(&self) -> ApiVersion {
        self.api_version
    }

    pub fn interview_id_header(&self) -> &str {
        &self.interview_id_header
    }

    fn ensure_age(&self, method: ApiMethod, age: Option<&Age>) -> Result<(), ApiError> {
        if age.is_none() && self.api_version.requires_age() {
            return Err(ApiError::MissingAge(method.name().to_string()));
        }
        Ok(())
    }

    fn age_params(&self, method: ApiMethod, age: Option<&Age>) -> Result<QueryParams, ApiError> {
        self.ensure_age(method, age)?;
        Ok(match age {
            Some(age) => with_age_params(QueryParams::new(), age),
            None => QueryParams::new(),
        })
    }

    /// Endpoint and body of a red-flags call. v3 has no `/red_flags` and
    /// selects them on `/suggest` through `suggest_method`.
    fn red_flags_route(&self, body: Map<String, Value>) -> (ApiMethod, Map<String, Value>) {
        match self.api_version {
            ApiVersion::V2 => (ApiMethod::RedFlags, body),
            ApiVersion::V3 => (
                ApiMethod::Suggest,
                with_suggest_method(body, RED_FLAGS_SUGGEST_METHOD),
            ),
        }
    }

    async fn get(
        &self,
        method: ApiMethod,
        id: Option<&str>,
        params: QueryParams,
        interview_id: Option<&str>,
        opts: &RequestOptions,
    ) -> Result<Value, ApiError> {
        let path = self.api_version.resolve(method, id)?;
        let params = opts.resolve_params(params);
        let headers = opts.resolve_headers(&self.interview_id_header, interview_id);
        tracing::debug!(
            method = method.name(),
            path = %path,
            interview = interview_id.is_some(),
            "GET diagnosis API"
        );
        self.transport.call_get(&path, &params, &headers).await
    }

    async fn post(
        &self,
        method: ApiMethod,
        body: Map<String, Value>,
        params: QueryParams,
        interview_id: Option<&str>,
        opts: &RequestOptions,
    ) -> Result<Value, ApiError> {
        let path = self.api_version.resolve(method, None)?;
        let body = opts.resolve_body(body);
        let params = opts.resolve_params(params);
        let headers = opts.resolve_headers(&self.interview_id_header, interview_id);
        tracing::debug!(
            method = method.name(),
            path = %path,
            interview = interview_id.is_some(),
            "POST diagnosis API"
        );
        self.transport
            .call_post(&path, &body, &params, &headers)
            .await
    }

    /// API and model metadata.
    pub async fn info(&self, opts: RequestOptions) -> Result<Value, ApiError> {
        self.get(ApiMethod::Info, None, QueryParams::new(), None, &opts)
            .await
    }

    /// Search concepts by phrase. Filters are validated before any request.
    pub async fn search(
        &self,
        query: &SearchQuery,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.ensure_age(ApiMethod::Search, query.age.as_ref())?;
        let params = query.to_params()?;
        self.get(ApiMethod::Search, None, params, None, &opts).await
    }

    /// Find a single concept by exact phrase (v2 only).
    pub async fn lookup(
        &self,
        phrase: &str,
        sex: Option<Sex>,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        let mut params = QueryParams::new();
        params.insert("phrase".into(), phrase.into());
        if let Some(sex) = sex {
            params.insert("sex".into(), sex.as_str().into());
        }
        self.get(ApiMethod::Lookup, None, params, None, &opts).await
    }

    /// Recognize concepts in free text.
    pub async fn parse(
        &self,
        text: &str,
        include_tokens: bool,
        age: Option<&Age>,
        interview_id: Option<&str>,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.ensure_age(ApiMethod::Parse, age)?;
        let body = parse_payload(text, include_tokens, age);
        self.post(ApiMethod::Parse, body, QueryParams::new(), interview_id, &opts)
            .await
    }

    pub async fn suggest(
        &self,
        data: &DiagnosticData,
        max_results: u32,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.post(
            ApiMethod::Suggest,
            suggest_payload(data),
            max_results_params(max_results),
            data.interview_id.as_deref(),
            &opts,
        )
        .await
    }

    pub async fn red_flags(
        &self,
        data: &DiagnosticData,
        max_results: u32,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        let (method, body) = self.red_flags_route(red_flags_payload(data));
        self.post(
            method,
            body,
            max_results_params(max_results),
            data.interview_id.as_deref(),
            &opts,
        )
        .await
    }

    /// Red flags for an already assembled request body.
    pub async fn red_flags_raw(
        &self,
        body: Map<String, Value>,
        max_results: u32,
        interview_id: Option<&str>,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        let (method, body) = self.red_flags_route(red_flags_raw_payload(body));
        self.post(
            method,
            body,
            max_results_params(max_results),
            interview_id,
            &opts,
        )
        .await
    }

    pub async fn diagnosis(
        &self,
        data: &DiagnosticData,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.post(
            ApiMethod::Diagnosis,
            diagnosis_payload(data),
            QueryParams::new(),
            data.interview_id.as_deref(),
            &opts,
        )
        .await
    }

    pub async fn rationale(
        &self,
        data: &DiagnosticData,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.post(
            ApiMethod::Rationale,
            rationale_payload(data),
            QueryParams::new(),
            data.interview_id.as_deref(),
            &opts,
        )
        .await
    }

    pub async fn explain(
        &self,
        data: &DiagnosticData,
        target_id: &str,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.post(
            ApiMethod::Explain,
            explain_payload(data, target_id),
            QueryParams::new(),
            data.interview_id.as_deref(),
            &opts,
        )
        .await
    }

    pub async fn triage(
        &self,
        data: &DiagnosticData,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.post(
            ApiMethod::Triage,
            triage_payload(data),
            QueryParams::new(),
            data.interview_id.as_deref(),
            &opts,
        )
        .await
    }

    async fn details(
        &self,
        method: ApiMethod,
        id: &str,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        let params = self.age_params(method, age)?;
        self.get(method, Some(id), params, None, &opts).await
    }

    async fn list(
        &self,
        method: ApiMethod,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        let params = self.age_params(method, age)?;
        self.get(method, None, params, None, &opts).await
    }

    pub async fn condition_details(
        &self,
        id: &str,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.details(ApiMethod::ConditionDetails, id, age, opts)
            .await
    }

    pub async fn conditions_list(
        &self,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.list(ApiMethod::Conditions, age, opts).await
    }

    pub async fn symptom_details(
        &self,
        id: &str,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.details(ApiMethod::SymptomDetails, id, age, opts).await
    }

    pub async fn symptoms_list(
        &self,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.list(ApiMethod::Symptoms, age, opts).await
    }

    pub async fn risk_factor_details(
        &self,
        id: &str,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.details(ApiMethod::RiskFactorDetails, id, age, opts)
            .await
    }

    pub async fn risk_factors_list(
        &self,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.list(ApiMethod::RiskFactors, age, opts).await
    }

    pub async fn lab_test_details(
        &self,
        id: &str,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.details(ApiMethod::LabTestDetails, id, age, opts).await
    }

    pub async fn lab_tests_list(
        &self,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.list(ApiMethod::LabTests, age, opts).await
    }

    /// Browse concepts, optionally narrowed by id and type (v3 only).
    pub async fn concepts(
        &self,
        query: &ConceptQuery,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        let params = query.to_params()?;
        self.get(ApiMethod::Concepts, None, params, None, &opts)
            .await
    }

    pub async fn concept_details(
        &self,
        id: &str,
        age: &Age,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        self.details(ApiMethod::ConceptDetails, id, Some(age), opts)
            .await
    }
}
