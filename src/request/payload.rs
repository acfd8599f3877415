//! Raw request builders.
//!
//! Each builder turns primitive inputs into the JSON body or query params of
//! one endpoint. They do no I/O; connectors send what these return.

use super::search::{
    ClosedEnum, ConceptFilter, SearchFilter, validate_concept_types, validate_search_types,
};
use crate::error::ApiError;
use crate::types::{Age, DiagnosticData, Evidence, Extras, QueryParams, Sex};
use serde_json::{Map, Value, json};

/// Default result limit for `search`, `suggest` and `red_flags`.
pub const DEFAULT_MAX_RESULTS: u32 = 8;

/// Body shared by every diagnostic endpoint.
///
/// `extras` is included only when present and non-empty.
pub fn diagnostic_payload(
    sex: Sex,
    age: &Age,
    evidence: &[Evidence],
    extras: Option<&Extras>,
) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("sex".into(), json!(sex));
    body.insert("age".into(), json!(age));
    body.insert("evidence".into(), json!(evidence));
    if let Some(extras) = extras.filter(|extras| !extras.is_empty()) {
        body.insert("extras".into(), Value::Object(extras.clone()));
    }
    body
}

fn payload_from(data: &DiagnosticData) -> Map<String, Value> {
    diagnostic_payload(data.sex, &data.age, &data.evidence, data.extras.as_ref())
}

pub fn diagnosis_payload(data: &DiagnosticData) -> Map<String, Value> {
    payload_from(data)
}

pub fn suggest_payload(data: &DiagnosticData) -> Map<String, Value> {
    payload_from(data)
}

pub fn red_flags_payload(data: &DiagnosticData) -> Map<String, Value> {
    payload_from(data)
}

pub fn rationale_payload(data: &DiagnosticData) -> Map<String, Value> {
    payload_from(data)
}

pub fn triage_payload(data: &DiagnosticData) -> Map<String, Value> {
    payload_from(data)
}

/// Diagnostic body plus the condition to explain.
pub fn explain_payload(data: &DiagnosticData, target_id: &str) -> Map<String, Value> {
    let mut body = payload_from(data);
    body.insert("target".into(), Value::String(target_id.to_string()));
    body
}

/// Pre-built red-flags body, passed through unchanged.
pub fn red_flags_raw_payload(data: Map<String, Value>) -> Map<String, Value> {
    data
}

/// `suggest_method` value that makes `/suggest` return red flags.
pub const RED_FLAGS_SUGGEST_METHOD: &str = "red_flags";

/// Select a `/suggest` variant by setting `suggest_method` in the body.
pub fn with_suggest_method(mut body: Map<String, Value>, method: &str) -> Map<String, Value> {
    body.insert("suggest_method".into(), Value::String(method.to_string()));
    body
}

/// Body for the `parse` endpoint.
///
/// The age is sent as an object, `{"value": 30}` or with a `unit`.
pub fn parse_payload(text: &str, include_tokens: bool, age: Option<&Age>) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("text".into(), Value::String(text.to_string()));
    body.insert("include_tokens".into(), Value::Bool(include_tokens));
    if let Some(age) = age {
        body.insert("age".into(), age_object(age));
    }
    body
}

fn age_object(age: &Age) -> Value {
    match age {
        Age::Years(value) => json!({ "value": value }),
        other => json!(other),
    }
}

/// Result limit param for `suggest` and `red_flags`.
pub fn max_results_params(max_results: u32) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert("max_results".into(), max_results.into());
    params
}

/// Query params for `search`.
///
/// Every type filter is validated first; the first invalid one fails the
/// whole call with `InvalidSearchConceptType`. Valid filters are sent as a
/// repeated `type` key.
pub fn search_params(
    phrase: &str,
    sex: Option<Sex>,
    max_results: u32,
    types: Option<&[SearchFilter]>,
) -> Result<QueryParams, ApiError> {
    let mut params = QueryParams::new();
    params.insert("phrase".into(), Value::String(phrase.to_string()));
    params.insert("max_results".into(), max_results.into());
    if let Some(sex) = sex {
        params.insert("sex".into(), Value::String(sex.as_str().to_string()));
    }
    if let Some(types) = types.filter(|types| !types.is_empty()) {
        let types = validate_search_types(types)?;
        let values = types.iter().map(|t| json!(t)).collect();
        params.insert("type".into(), Value::Array(values));
    }
    Ok(params)
}

/// Adds `age.value`/`age.unit` query params.
pub fn with_age_params(mut params: QueryParams, age: &Age) -> QueryParams {
    for (key, value) in age.query_params() {
        params.insert(key.to_string(), value);
    }
    params
}

/// Query params for the v3 concept browser.
///
/// `ids` and the type filters are each sent comma-joined. Filters are
/// validated against `ConceptType` first.
pub fn concepts_params(
    ids: &[String],
    types: Option<&[ConceptFilter]>,
) -> Result<QueryParams, ApiError> {
    let mut params = QueryParams::new();
    if !ids.is_empty() {
        params.insert("ids".into(), Value::String(ids.join(",")));
    }
    if let Some(types) = types.filter(|types| !types.is_empty()) {
        let joined = validate_concept_types(types)?
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(",");
        params.insert("types".into(), Value::String(joined));
    }
    Ok(params)
}
