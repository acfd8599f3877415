//! Result models for search, suggest, red flags, parse, rationale and explain.

use super::concepts::{Concept, ConceptList};
use super::evidence::ChoiceId;
use serde::{Deserialize, Serialize};

/// A concept matched by `search` or `lookup`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub label: String,
}

/// A related concept suggested by the `suggest` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub common_name: Option<String>,
}

/// Evidence that may indicate a life-threatening condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedFlag {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub common_name: Option<String>,
}

impl Concept for RedFlag {
    fn id(&self) -> &str {
        &self.id
    }
}

pub type RedFlagList = ConceptList<RedFlag>;

/// A concept recognized in free text by the `parse` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    pub orth: String,
    pub choice_id: ChoiceId,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Output of the `parse` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResults {
    pub mentions: Vec<Mention>,
    #[serde(default)]
    pub obvious: bool,
    #[serde(default)]
    pub tokens: Option<Vec<String>>,
}

/// A concept referenced by a rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RationaleParam {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub common_name: Option<String>,
}

/// Why the reasoning engine selected the current question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RationaleResult {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub observation_params: Vec<RationaleParam>,
    #[serde(default)]
    pub condition_params: Vec<RationaleParam>,
}

/// Evidence item in an explain breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainEvidence {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub common_name: Option<String>,
}

/// Evidence supporting or conflicting with a target condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainResults {
    pub supporting_evidence: Vec<ExplainEvidence>,
    pub conflicting_evidence: Vec<ExplainEvidence>,
    #[serde(default)]
    pub unconfirmed_evidence: Vec<ExplainEvidence>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::types::FromJson;
    use serde_json::json;

    #[test]
    fn red_flag_list_supports_lookup() {
        let list = RedFlagList::from_json(json!([
            {"id": "s_1", "name": "Chest pain", "common_name": "Chest pain"},
            {"id": "s_2", "name": "Dyspnea"},
        ]))
        .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get("s_2").map(|r| r.name.as_str()), Some("Dyspnea"));
    }

    #[test]
    fn explain_requires_both_breakdowns() {
        let err = ExplainResults::from_json(json!({"supporting_evidence": []})).unwrap_err();
        match err {
            ApiError::MalformedResponse { target, message } => {
                assert_eq!(target, "ExplainResults");
                assert!(message.contains("conflicting_evidence"));
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn parse_results_default_optional_fields() {
        let parsed = ParseResults::from_json(json!({
            "mentions": [{
                "id": "s_21", "name": "Headache", "orth": "headache",
                "choice_id": "present", "type": "symptom"
            }]
        }))
        .unwrap();
        assert!(!parsed.obvious);
        assert!(parsed.tokens.is_none());
        assert_eq!(parsed.mentions[0].choice_id, ChoiceId::Present);
    }

    #[test]
    fn rationale_keeps_params() {
        let result = RationaleResult::from_json(json!({
            "type": "r1",
            "observation_params": [{"id": "s_1", "name": "Fever"}],
            "condition_params": []
        }))
        .unwrap();
        assert_eq!(result.kind, "r1");
        assert_eq!(result.observation_params[0].id, "s_1");
    }
}
