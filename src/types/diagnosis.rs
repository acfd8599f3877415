//! Diagnostic session state.
//!
//! A `Diagnosis` is created once per interview by the caller and threaded
//! through every call of the dialogue. The `diagnosis` operation writes the
//! server's answer back into the same value.

use super::evidence::{Age, ChoiceId, Evidence, EvidenceSource, Sex};
use super::Extras;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Primitive fields of a diagnostic request, detached from session state.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticData {
    pub sex: Sex,
    pub age: Age,
    pub evidence: Vec<Evidence>,
    pub extras: Option<Extras>,
    pub interview_id: Option<String>,
}

impl DiagnosticData {
    pub fn new(sex: Sex, age: impl Into<Age>) -> Self {
        Self {
            sex,
            age: age.into(),
            evidence: Vec::new(),
            extras: None,
            interview_id: None,
        }
    }

    pub fn with_evidence(mut self, evidence: Vec<Evidence>) -> Self {
        self.evidence = evidence;
        self
    }

    pub fn with_extras(mut self, extras: Extras) -> Self {
        self.extras = Some(extras);
        self
    }

    pub fn with_interview_id(mut self, interview_id: impl Into<String>) -> Self {
        self.interview_id = Some(interview_id.into());
        self
    }
}

/// Kind of question asked by the reasoning engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Single,
    GroupSingle,
    GroupMultiple,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionChoice {
    pub id: ChoiceId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub choices: Vec<QuestionChoice>,
}

/// Next question proposed by the `diagnosis` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisQuestion {
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub text: String,
    #[serde(default)]
    pub items: Vec<QuestionItem>,
    #[serde(default)]
    pub extras: Extras,
}

/// A ranked condition with its probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionResult {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    pub probability: f64,
}

#[derive(Debug, Deserialize)]
struct DiagnosisResponse {
    #[serde(default)]
    question: Option<DiagnosisQuestion>,
    conditions: Vec<ConditionResult>,
    #[serde(default)]
    should_stop: Option<bool>,
    #[serde(default)]
    has_emergency_evidence: Option<bool>,
}

/// Stateful diagnostic session.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    pub sex: Sex,
    pub age: Age,
    pub evidence: Vec<Evidence>,
    pub extras: Extras,
    pub interview_id: Option<String>,
    pub question: Option<DiagnosisQuestion>,
    pub conditions: Vec<ConditionResult>,
    pub should_stop: Option<bool>,
    pub has_emergency_evidence: Option<bool>,
}

impl Diagnosis {
    pub fn new(sex: Sex, age: impl Into<Age>) -> Self {
        Self {
            sex,
            age: age.into(),
            evidence: Vec::new(),
            extras: Extras::new(),
            interview_id: None,
            question: None,
            conditions: Vec::new(),
            should_stop: None,
            has_emergency_evidence: None,
        }
    }

    pub fn with_interview_id(mut self, interview_id: impl Into<String>) -> Self {
        self.interview_id = Some(interview_id.into());
        self
    }

    /// Attach a fresh random interview id.
    pub fn with_generated_interview_id(self) -> Self {
        self.with_interview_id(uuid::Uuid::new_v4().to_string())
    }

    pub fn add_evidence(&mut self, evidence: Evidence) -> &mut Self {
        self.evidence.push(evidence);
        self
    }

    pub fn add_symptom(
        &mut self,
        id: impl Into<String>,
        choice_id: ChoiceId,
        source: Option<EvidenceSource>,
    ) -> &mut Self {
        let mut evidence = Evidence::new(id, choice_id);
        evidence.source = source;
        self.add_evidence(evidence)
    }

    pub fn add_risk_factor(&mut self, id: impl Into<String>, choice_id: ChoiceId) -> &mut Self {
        self.add_evidence(Evidence::new(id, choice_id))
    }

    pub fn add_lab_test(&mut self, id: impl Into<String>, choice_id: ChoiceId) -> &mut Self {
        self.add_evidence(Evidence::new(id, choice_id))
    }

    /// Set one request extra, e.g. `disable_groups`.
    pub fn set_extra(&mut self, key: impl Into<String>, value: serde_json::Value) -> &mut Self {
        self.extras.insert(key.into(), value);
        self
    }

    pub fn set_extras(&mut self, extras: Extras) -> &mut Self {
        self.extras = extras;
        self
    }

    /// Primitive request fields; empty extras are dropped.
    pub fn diagnostic_data(&self) -> DiagnosticData {
        DiagnosticData {
            sex: self.sex,
            age: self.age.clone(),
            evidence: self.evidence.clone(),
            extras: (!self.extras.is_empty()).then(|| self.extras.clone()),
            interview_id: self.interview_id.clone(),
        }
    }

    /// Apply a `diagnosis` response to this session.
    ///
    /// The response is parsed in full before any field changes, so a
    /// malformed response leaves the session as it was.
    pub fn update_from_api(&mut self, raw: serde_json::Value) -> Result<(), ApiError> {
        let response: DiagnosisResponse = serde_json::from_value(raw)
            .map_err(|e| ApiError::malformed::<Diagnosis>(e.to_string()))?;

        self.question = response.question;
        self.conditions = response.conditions;
        self.should_stop = response.should_stop;
        self.has_emergency_evidence = response.has_emergency_evidence;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_response() -> serde_json::Value {
        json!({
            "question": {
                "type": "single",
                "text": "Do you have a fever?",
                "items": [{
                    "id": "s_98",
                    "name": "Fever",
                    "choices": [
                        {"id": "present", "label": "Yes"},
                        {"id": "absent", "label": "No"},
                        {"id": "unknown", "label": "Don't know"}
                    ]
                }],
                "extras": {}
            },
            "conditions": [
                {"id": "c_49", "name": "Migraine", "common_name": "Migraine", "probability": 0.42},
                {"id": "c_151", "name": "Tension-type headache", "probability": 0.18}
            ],
            "should_stop": false,
            "has_emergency_evidence": false
        })
    }

    #[test]
    fn update_from_api_replaces_question_and_conditions() {
        let mut diagnosis = Diagnosis::new(Sex::Female, 35);
        diagnosis.update_from_api(sample_response()).unwrap();

        let question = diagnosis.question.as_ref().unwrap();
        assert_eq!(question.kind, QuestionType::Single);
        assert_eq!(question.items[0].choices.len(), 3);
        assert_eq!(diagnosis.conditions.len(), 2);
        assert_eq!(diagnosis.conditions[0].id, "c_49");
        assert_eq!(diagnosis.should_stop, Some(false));

        diagnosis
            .update_from_api(json!({"question": null, "conditions": [], "should_stop": true}))
            .unwrap();
        assert!(diagnosis.question.is_none());
        assert!(diagnosis.conditions.is_empty());
        assert_eq!(diagnosis.should_stop, Some(true));
    }

    #[test]
    fn malformed_response_leaves_session_untouched() {
        let mut diagnosis = Diagnosis::new(Sex::Male, 40);
        diagnosis.update_from_api(sample_response()).unwrap();
        let before = diagnosis.clone();

        let err = diagnosis
            .update_from_api(json!({"question": null}))
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { .. }));
        assert_eq!(diagnosis, before);
    }

    #[test]
    fn diagnostic_data_drops_empty_extras() {
        let mut diagnosis = Diagnosis::new(Sex::Female, 30).with_interview_id("abc");
        diagnosis.add_symptom("s_1", ChoiceId::Present, Some(EvidenceSource::Initial));
        diagnosis.add_risk_factor("p_7", ChoiceId::Absent);

        let data = diagnosis.diagnostic_data();
        assert_eq!(data.extras, None);
        assert_eq!(data.evidence.len(), 2);
        assert_eq!(data.evidence[1].id, "p_7");
        assert_eq!(data.interview_id.as_deref(), Some("abc"));

        diagnosis.set_extra("disable_groups", json!(true));
        assert!(diagnosis.diagnostic_data().extras.is_some());
    }

    #[test]
    fn generated_interview_ids_are_unique() {
        let a = Diagnosis::new(Sex::Female, 30).with_generated_interview_id();
        let b = Diagnosis::new(Sex::Female, 30).with_generated_interview_id();
        assert!(a.interview_id.is_some());
        assert_ne!(a.interview_id, b.interview_id);
    }
}
