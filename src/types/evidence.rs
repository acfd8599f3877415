//! Patient demographics and evidence.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biological sex of the patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" => Ok(Self::Female),
            "male" => Ok(Self::Male),
            _ => Err(ApiError::InvalidSex(s.to_string())),
        }
    }
}

/// Unit of a detailed age value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    Year,
    Month,
}

impl AgeUnit {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
        }
    }
}

impl FromStr for AgeUnit {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(Self::Year),
            "month" => Ok(Self::Month),
            _ => Err(ApiError::InvalidAgeUnit(s.to_string())),
        }
    }
}

/// Patient age as accepted by the API.
///
/// A plain number serializes as `42`; the detailed form serializes as
/// `{"value": 6, "unit": "month"}`; a label is passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Age {
    Years(u32),
    Detailed {
        value: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<AgeUnit>,
    },
    Label(String),
}

impl Age {
    /// Detailed age from a raw unit string, validating the unit.
    pub fn with_unit(value: u32, unit: Option<&str>) -> Result<Self, ApiError> {
        let unit = unit.map(str::parse::<AgeUnit>).transpose()?;
        Ok(Self::Detailed { value, unit })
    }

    /// Age encoded as URL query params (`age.value`, `age.unit`).
    pub fn query_params(&self) -> Vec<(&'static str, serde_json::Value)> {
        match self {
            Self::Years(value) => vec![("age.value", (*value).into())],
            Self::Detailed { value, unit } => {
                let mut params = vec![("age.value", (*value).into())];
                if let Some(unit) = unit {
                    params.push(("age.unit", unit.as_str().into()));
                }
                params
            }
            Self::Label(label) => vec![("age", label.clone().into())],
        }
    }
}

impl From<u32> for Age {
    fn from(value: u32) -> Self {
        Self::Years(value)
    }
}

/// Observed state of an evidence item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceId {
    Present,
    Absent,
    Unknown,
}

/// Where a piece of evidence came from during the interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSource {
    Initial,
    Suggest,
    Predefined,
    RedFlags,
}

/// A single observed medical fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub id: String,
    pub choice_id: ChoiceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<EvidenceSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<bool>,
    /// How strongly the observation holds, when the caller grades it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<f64>,
}

impl Evidence {
    pub fn new(id: impl Into<String>, choice_id: ChoiceId) -> Self {
        Self {
            id: id.into(),
            choice_id,
            source: None,
            initial: None,
            strength: None,
        }
    }

    pub fn with_source(mut self, source: EvidenceSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_initial(mut self, initial: bool) -> Self {
        self.initial = Some(initial);
        self
    }

    pub fn with_strength(mut self, strength: f64) -> Self {
        self.strength = Some(strength);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sex_parses_raw_strings() {
        assert_eq!("Female".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!(" male ".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!(
            "other".parse::<Sex>().unwrap_err(),
            ApiError::InvalidSex("other".into())
        );
    }

    #[test]
    fn age_serializes_per_variant() {
        assert_eq!(serde_json::to_value(Age::from(42)).unwrap(), json!(42));
        assert_eq!(
            serde_json::to_value(Age::with_unit(6, Some("month")).unwrap()).unwrap(),
            json!({"value": 6, "unit": "month"})
        );
        assert_eq!(
            serde_json::to_value(Age::Label("adult".into())).unwrap(),
            json!("adult")
        );
    }

    #[test]
    fn age_rejects_unknown_unit() {
        assert_eq!(
            Age::with_unit(3, Some("week")).unwrap_err(),
            ApiError::InvalidAgeUnit("week".into())
        );
    }

    #[test]
    fn evidence_omits_unset_metadata() {
        let ev = Evidence::new("s_1", ChoiceId::Present);
        assert_eq!(
            serde_json::to_value(&ev).unwrap(),
            json!({"id": "s_1", "choice_id": "present"})
        );

        let ev = ev.with_source(EvidenceSource::RedFlags).with_initial(true);
        assert_eq!(
            serde_json::to_value(&ev).unwrap(),
            json!({"id": "s_1", "choice_id": "present", "source": "red_flags", "initial": true})
        );
    }

    #[test]
    fn evidence_strength_is_optional() {
        let ev = Evidence::new("s_98", ChoiceId::Present).with_strength(0.5);
        assert_eq!(
            serde_json::to_value(&ev).unwrap(),
            json!({"id": "s_98", "choice_id": "present", "strength": 0.5})
        );

        let back: Evidence =
            serde_json::from_value(json!({"id": "s_98", "choice_id": "absent"})).unwrap();
        assert_eq!(back.strength, None);
    }
}
