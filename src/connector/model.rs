//! Typed connector
//!
//! Wraps `ApiConnector`: reads the session, delegates the raw call and
//! converts the JSON result with `FromJson`. Errors from validation, the
//! transport or the conversion are returned unchanged.

use super::basic::ApiConnector;
use crate::config::{ApiConfig, ApiVersion};
use crate::error::ApiError;
use crate::request::{ConceptQuery, DEFAULT_MAX_RESULTS, RequestOptions, SearchQuery};
use crate::types::{
    Age, ConceptInfo, ConceptInfoList, Condition, ConditionList, Diagnosis, ExplainResults,
    FromJson, LabTest, LabTestList, ParseResults, RationaleResult, RedFlagList, RiskFactor,
    RiskFactorList, SearchResult, SuggestItem, Symptom, SymptomList,
};
use serde_json::Value;

/// Connector returning typed domain results.
#[derive(Debug, Clone)]
pub struct ModelConnector {
    api: ApiConnector,
}

impl ModelConnector {
    pub fn new(api: ApiConnector) -> Self {
        Self { api }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        ApiConnector::from_config(config).map(Self::new)
    }

    /// The wrapped raw connector.
    pub fn api(&self) -> &ApiConnector {
        &self.api
    }

    pub fn api_version(&self) -> ApiVersion {
        self.api.api_version()
    }

    pub async fn info(&self, opts: RequestOptions) -> Result<Value, ApiError> {
        self.api.info(opts).await
    }

    pub async fn search(
        &self,
        query: &SearchQuery,
        opts: RequestOptions,
    ) -> Result<Vec<SearchResult>, ApiError> {
        Vec::from_json(self.api.search(query, opts).await?)
    }

    pub async fn parse(
        &self,
        text: &str,
        include_tokens: bool,
        age: Option<&Age>,
        interview_id: Option<&str>,
        opts: RequestOptions,
    ) -> Result<ParseResults, ApiError> {
        let raw = self
            .api
            .parse(text, include_tokens, age, interview_id, opts)
            .await?;
        ParseResults::from_json(raw)
    }

    /// Concepts related to the session evidence, best matches first.
    pub async fn suggest(
        &self,
        diagnosis: &Diagnosis,
        opts: RequestOptions,
    ) -> Result<Vec<SuggestItem>, ApiError> {
        self.suggest_with_limit(diagnosis, DEFAULT_MAX_RESULTS, opts)
            .await
    }

    pub async fn suggest_with_limit(
        &self,
        diagnosis: &Diagnosis,
        max_results: u32,
        opts: RequestOptions,
    ) -> Result<Vec<SuggestItem>, ApiError> {
        let data = diagnosis.diagnostic_data();
        Vec::from_json(self.api.suggest(&data, max_results, opts).await?)
    }

    pub async fn red_flags(
        &self,
        diagnosis: &Diagnosis,
        opts: RequestOptions,
    ) -> Result<RedFlagList, ApiError> {
        self.red_flags_with_limit(diagnosis, DEFAULT_MAX_RESULTS, opts)
            .await
    }

    pub async fn red_flags_with_limit(
        &self,
        diagnosis: &Diagnosis,
        max_results: u32,
        opts: RequestOptions,
    ) -> Result<RedFlagList, ApiError> {
        let data = diagnosis.diagnostic_data();
        RedFlagList::from_json(self.api.red_flags(&data, max_results, opts).await?)
    }

    /// Run one diagnosis turn.
    ///
    /// The response is written into `diagnosis` and the same reference is
    /// handed back, so callers keep one session value for the whole
    /// interview. On error the session is left unchanged.
    pub async fn diagnosis<'a>(
        &self,
        diagnosis: &'a mut Diagnosis,
        opts: RequestOptions,
    ) -> Result<&'a mut Diagnosis, ApiError> {
        let data = diagnosis.diagnostic_data();
        let raw = self.api.diagnosis(&data, opts).await?;
        diagnosis.update_from_api(raw)?;
        Ok(diagnosis)
    }

    pub async fn rationale(
        &self,
        diagnosis: &Diagnosis,
        opts: RequestOptions,
    ) -> Result<RationaleResult, ApiError> {
        let data = diagnosis.diagnostic_data();
        RationaleResult::from_json(self.api.rationale(&data, opts).await?)
    }

    pub async fn explain(
        &self,
        diagnosis: &Diagnosis,
        target_id: &str,
        opts: RequestOptions,
    ) -> Result<ExplainResults, ApiError> {
        let data = diagnosis.diagnostic_data();
        ExplainResults::from_json(self.api.explain(&data, target_id, opts).await?)
    }

    /// Triage level and recommendation, as returned by the server.
    pub async fn triage(
        &self,
        diagnosis: &Diagnosis,
        opts: RequestOptions,
    ) -> Result<Value, ApiError> {
        let data = diagnosis.diagnostic_data();
        self.api.triage(&data, opts).await
    }

    pub async fn condition_details(
        &self,
        id: &str,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<Condition, ApiError> {
        Condition::from_json(self.api.condition_details(id, age, opts).await?)
    }

    pub async fn conditions_list(
        &self,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<ConditionList, ApiError> {
        ConditionList::from_json(self.api.conditions_list(age, opts).await?)
    }

    pub async fn symptom_details(
        &self,
        id: &str,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<Symptom, ApiError> {
        Symptom::from_json(self.api.symptom_details(id, age, opts).await?)
    }

    pub async fn symptoms_list(
        &self,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<SymptomList, ApiError> {
        SymptomList::from_json(self.api.symptoms_list(age, opts).await?)
    }

    pub async fn risk_factor_details(
        &self,
        id: &str,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<RiskFactor, ApiError> {
        RiskFactor::from_json(self.api.risk_factor_details(id, age, opts).await?)
    }

    pub async fn risk_factors_list(
        &self,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<RiskFactorList, ApiError> {
        RiskFactorList::from_json(self.api.risk_factors_list(age, opts).await?)
    }

    pub async fn lab_test_details(
        &self,
        id: &str,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<LabTest, ApiError> {
        LabTest::from_json(self.api.lab_test_details(id, age, opts).await?)
    }

    pub async fn lab_tests_list(
        &self,
        age: Option<&Age>,
        opts: RequestOptions,
    ) -> Result<LabTestList, ApiError> {
        LabTestList::from_json(self.api.lab_tests_list(age, opts).await?)
    }

    pub async fn concepts(
        &self,
        query: &ConceptQuery,
        opts: RequestOptions,
    ) -> Result<ConceptInfoList, ApiError> {
        ConceptInfoList::from_json(self.api.concepts(query, opts).await?)
    }

    pub async fn concept_details(
        &self,
        id: &str,
        age: &Age,
        opts: RequestOptions,
    ) -> Result<ConceptInfo, ApiError> {
        ConceptInfo::from_json(self.api.concept_details(id, age, opts).await?)
    }
}

impl From<ApiConnector> for ModelConnector {
    fn from(api: ApiConnector) -> Self {
        Self::new(api)
    }
}
