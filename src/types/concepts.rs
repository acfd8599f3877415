//! Medical concept models: conditions, symptoms, risk factors and lab tests.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A model addressable by its API id.
pub trait Concept {
    fn id(&self) -> &str;
}

/// Ordered list of concepts with an id index.
///
/// Order is the order of the JSON array it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<T>", into = "Vec<T>")]
#[serde(bound(serialize = "T: Serialize + Clone", deserialize = "T: Deserialize<'de> + Concept"))]
pub struct ConceptList<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Concept> ConceptList<T> {
    /// Look up an item by id.
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&i| &self.items[i])
    }
}

impl<T> ConceptList<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Concept> From<Vec<T>> for ConceptList<T> {
    fn from(items: Vec<T>) -> Self {
        let index = items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.id().to_string(), i))
            .collect();
        Self { items, index }
    }
}

impl<T> From<ConceptList<T>> for Vec<T> {
    fn from(list: ConceptList<T>) -> Self {
        list.items
    }
}

impl<'a, T> IntoIterator for &'a ConceptList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

macro_rules! impl_concept {
    ($($ty:ty),* $(,)?) => {
        $(impl Concept for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

/// Condition details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub sex_filter: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub prevalence: Option<String>,
    #[serde(default)]
    pub acuteness: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub triage_level: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub extras: Map<String, Value>,
}

/// Symptom details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub sex_filter: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub seriousness: Option<String>,
    #[serde(default)]
    pub children: Option<Vec<Value>>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_source: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub parent_relation: Option<String>,
    #[serde(default)]
    pub extras: Map<String, Value>,
}

/// Risk factor details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub sex_filter: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub seriousness: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_source: Option<String>,
    #[serde(default)]
    pub extras: Map<String, Value>,
}

/// One possible result of a lab test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabTestResult {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Lab test details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabTest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub results: Vec<LabTestResult>,
    #[serde(default)]
    pub extras: Map<String, Value>,
}

/// Generic concept returned by the v3 concept browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

impl_concept!(Condition, Symptom, RiskFactor, LabTest, ConceptInfo);

pub type ConditionList = ConceptList<Condition>;
pub type SymptomList = ConceptList<Symptom>;
pub type RiskFactorList = ConceptList<RiskFactor>;
pub type LabTestList = ConceptList<LabTest>;
pub type ConceptInfoList = ConceptList<ConceptInfo>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FromJson;
    use serde_json::json;

    #[test]
    fn condition_list_preserves_order_and_indexes_ids() {
        let raw = json!([
            {"id": "c_3", "name": "Flu"},
            {"id": "c_1", "name": "Cold", "common_name": "Common cold"},
            {"id": "c_2", "name": "Migraine"},
        ]);
        let list = ConditionList::from_json(raw).unwrap();

        let ids: Vec<&str> = list.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["c_3", "c_1", "c_2"]);
        assert_eq!(
            list.get("c_1").and_then(|c| c.common_name.as_deref()),
            Some("Common cold")
        );
        assert!(list.get("c_9").is_none());
    }

    #[test]
    fn missing_required_field_is_malformed() {
        let raw = json!([{"id": "s_1"}]);
        let err = SymptomList::from_json(raw).unwrap_err();
        assert!(matches!(
            err,
            crate::error::ApiError::MalformedResponse { target, .. }
                if target == "ConceptList<Symptom>"
        ));
    }

    #[test]
    fn lab_test_results_keep_type() {
        let raw = json!({
            "id": "lt_1",
            "name": "Hemoglobin",
            "results": [{"id": "lt_1_low", "type": "low"}]
        });
        let test = LabTest::from_json(raw).unwrap();
        assert_eq!(test.results[0].kind, "low");
    }

    #[test]
    fn concept_list_serializes_as_array() {
        let list = RiskFactorList::from(vec![RiskFactor {
            id: "p_1".into(),
            name: "Smoking".into(),
            common_name: None,
            question: None,
            sex_filter: None,
            category: None,
            seriousness: None,
            image_url: None,
            image_source: None,
            extras: Map::new(),
        }]);
        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(value[0]["id"], "p_1");
    }
}
