#![allow(dead_code)]

use async_trait::async_trait;
use infermedica_api::ApiError;
use infermedica_api::execution::http::transport::HttpTransport;
use infermedica_api::types::{Headers, QueryParams};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One request seen by `RecordingTransport`.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
    pub params: QueryParams,
    pub headers: Headers,
}

/// Transport that records every call and replays queued responses.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responses: Arc<Mutex<VecDeque<Result<Value, ApiError>>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(self, response: Value) -> Self {
        self.responses.lock().expect("lock").push_back(Ok(response));
        self
    }

    pub fn fail_with(self, error: ApiError) -> Self {
        self.responses.lock().expect("lock").push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls().pop().expect("at least one call")
    }

    fn next(&self, call: RecordedCall) -> Result<Value, ApiError> {
        self.calls.lock().expect("lock").push(call);
        self.responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Ok(Value::Object(Default::default())))
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn call_get(
        &self,
        path: &str,
        params: &QueryParams,
        headers: &Headers,
    ) -> Result<Value, ApiError> {
        self.next(RecordedCall {
            method: "GET",
            path: path.to_string(),
            body: None,
            params: params.clone(),
            headers: headers.clone(),
        })
    }

    async fn call_post(
        &self,
        path: &str,
        body: &Value,
        params: &QueryParams,
        headers: &Headers,
    ) -> Result<Value, ApiError> {
        self.next(RecordedCall {
            method: "POST",
            path: path.to_string(),
            body: Some(body.clone()),
            params: params.clone(),
            headers: headers.clone(),
        })
    }
}

pub fn sample_diagnosis_response() -> Value {
    serde_json::json!({
        "question": {
            "type": "single",
            "text": "Does the pain get worse when you move?",
            "items": [{
                "id": "s_1193",
                "name": "Pain worse on movement",
                "choices": [
                    {"id": "present", "label": "Yes"},
                    {"id": "absent", "label": "No"},
                    {"id": "unknown", "label": "Don't know"}
                ]
            }],
            "extras": {}
        },
        "conditions": [
            {"id": "c_49", "name": "Migraine", "common_name": "Migraine", "probability": 0.5},
            {"id": "c_151", "name": "Tension-type headache", "probability": 0.2}
        ],
        "should_stop": false,
        "has_emergency_evidence": false
    })
}
