//! Closed concept-type enumerations used as request filters.
//!
//! Filters accept either an enum member or its raw string value. Raw strings
//! are validated against the enumeration before they reach a request.

use super::payload::{DEFAULT_MAX_RESULTS, concepts_params, search_params, with_age_params};
use crate::error::ApiError;
use crate::types::{Age, QueryParams, Sex};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An enumeration with a fixed set of wire values.
pub trait ClosedEnum: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn from_value(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.as_str() == value)
    }
}

/// Concept categories accepted by `search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchConceptType {
    Symptom,
    RiskFactor,
    LabTest,
}

impl ClosedEnum for SearchConceptType {
    const ALL: &'static [Self] = &[Self::Symptom, Self::RiskFactor, Self::LabTest];

    fn as_str(self) -> &'static str {
        match self {
            Self::Symptom => "symptom",
            Self::RiskFactor => "risk_factor",
            Self::LabTest => "lab_test",
        }
    }
}

/// Concept categories accepted by the v3 concept browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConceptType {
    Condition,
    Symptom,
    RiskFactor,
    LabTest,
}

impl ClosedEnum for ConceptType {
    const ALL: &'static [Self] = &[
        Self::Condition,
        Self::Symptom,
        Self::RiskFactor,
        Self::LabTest,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Condition => "condition",
            Self::Symptom => "symptom",
            Self::RiskFactor => "risk_factor",
            Self::LabTest => "lab_test",
        }
    }
}

/// Filter value given either as an enum member or as a raw string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue<T> {
    Member(T),
    Raw(String),
}

impl<T: ClosedEnum> FilterValue<T> {
    /// Canonical string form used for validation and on the wire.
    pub fn normalized(&self) -> &str {
        match self {
            Self::Member(member) => member.as_str(),
            Self::Raw(raw) => raw,
        }
    }

    /// Resolve to an enum member, if the value is one.
    pub fn resolve(&self) -> Option<T> {
        match self {
            Self::Member(member) => Some(*member),
            Self::Raw(raw) => T::from_value(raw),
        }
    }
}

impl<T> From<&str> for FilterValue<T> {
    fn from(raw: &str) -> Self {
        Self::Raw(raw.to_string())
    }
}

impl<T> From<String> for FilterValue<T> {
    fn from(raw: String) -> Self {
        Self::Raw(raw)
    }
}

impl From<SearchConceptType> for FilterValue<SearchConceptType> {
    fn from(member: SearchConceptType) -> Self {
        Self::Member(member)
    }
}

impl From<ConceptType> for FilterValue<ConceptType> {
    fn from(member: ConceptType) -> Self {
        Self::Member(member)
    }
}

impl<T: ClosedEnum> fmt::Display for FilterValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.normalized())
    }
}

pub type SearchFilter = FilterValue<SearchConceptType>;
pub type ConceptFilter = FilterValue<ConceptType>;

/// Resolve every filter, failing on the first value outside the enumeration.
fn resolve_all<T: ClosedEnum>(
    values: &[FilterValue<T>],
    invalid: fn(String) -> ApiError,
) -> Result<Vec<T>, ApiError> {
    values
        .iter()
        .map(|value| {
            value
                .resolve()
                .ok_or_else(|| invalid(value.normalized().to_string()))
        })
        .collect()
}

/// Validate search filters against `SearchConceptType`.
pub fn validate_search_types(
    values: &[SearchFilter],
) -> Result<Vec<SearchConceptType>, ApiError> {
    resolve_all(values, ApiError::InvalidSearchConceptType)
}

/// Validate concept-list filters against `ConceptType`.
pub fn validate_concept_types(values: &[ConceptFilter]) -> Result<Vec<ConceptType>, ApiError> {
    resolve_all(values, ApiError::InvalidConceptType)
}

/// Inputs of a `search` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub phrase: String,
    pub sex: Option<Sex>,
    pub age: Option<Age>,
    pub max_results: u32,
    pub types: Vec<SearchFilter>,
}

impl SearchQuery {
    pub fn new(phrase: impl Into<String>) -> Self {
        Self {
            phrase: phrase.into(),
            sex: None,
            age: None,
            max_results: DEFAULT_MAX_RESULTS,
            types: Vec::new(),
        }
    }

    pub fn with_sex(mut self, sex: Sex) -> Self {
        self.sex = Some(sex);
        self
    }

    pub fn with_age(mut self, age: impl Into<Age>) -> Self {
        self.age = Some(age.into());
        self
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_type(mut self, filter: impl Into<SearchFilter>) -> Self {
        self.types.push(filter.into());
        self
    }

    /// Validated query params for this search.
    pub fn to_params(&self) -> Result<QueryParams, ApiError> {
        let params = search_params(
            &self.phrase,
            self.sex,
            self.max_results,
            Some(self.types.as_slice()),
        )?;
        Ok(match &self.age {
            Some(age) => with_age_params(params, age),
            None => params,
        })
    }
}

/// Inputs of a v3 concept-list call.
#[derive(Debug, Clone, PartialEq)]
pub struct ConceptQuery {
    pub age: Age,
    pub ids: Vec<String>,
    pub types: Vec<ConceptFilter>,
}

impl ConceptQuery {
    pub fn new(age: impl Into<Age>) -> Self {
        Self {
            age: age.into(),
            ids: Vec::new(),
            types: Vec::new(),
        }
    }

    /// Restrict the listing to the given concept ids.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.ids.push(id.into());
        self
    }

    pub fn with_type(mut self, filter: impl Into<ConceptFilter>) -> Self {
        self.types.push(filter.into());
        self
    }

    /// Validated query params, including the age.
    pub fn to_params(&self) -> Result<QueryParams, ApiError> {
        let params = concepts_params(&self.ids, Some(self.types.as_slice()))?;
        Ok(with_age_params(params, &self.age))
    }
}
