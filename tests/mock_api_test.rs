//! Mock API tests
//!
//! These tests run the real reqwest transport against a wiremock server and
//! check the wire format: URL prefix, default headers, interview header,
//! query encoding and error classification.

mod support;

use infermedica_api::prelude::*;
use serde_json::json;
use support::sample_diagnosis_response;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> ApiConfig {
    ApiConfig::new("test-app-id", "test-app-key")
        .with_base_url(server.uri())
        .with_model("infermedica-en")
        .with_dev_mode(true)
}

#[tokio::test]
async fn diagnosis_round_trip_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/diagnosis"))
        .and(header("App-Id", "test-app-id"))
        .and(header("App-Key", "test-app-key"))
        .and(header("Model", "infermedica-en"))
        .and(header("Dev-Mode", "true"))
        .and(header("Content-Type", "application/json"))
        .and(header("Interview-Id", "interview-42"))
        .and(body_json(json!({
            "sex": "female",
            "age": 35,
            "evidence": [{"id": "s_21", "choice_id": "present", "source": "initial"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_diagnosis_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = ModelConnector::from_config(&config(&mock_server)).unwrap();
    let mut session = Diagnosis::new(Sex::Female, 35).with_interview_id("interview-42");
    session.add_symptom("s_21", ChoiceId::Present, Some(EvidenceSource::Initial));

    let session = api
        .diagnosis(&mut session, RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(session.conditions.len(), 2);
    assert_eq!(session.should_stop, Some(false));
}

#[tokio::test]
async fn search_sends_repeated_type_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/search"))
        .and(query_param("phrase", "head"))
        .and(query_param("max_results", "8"))
        .and(query_param("type", "symptom"))
        .and(query_param("type", "risk_factor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "s_21", "label": "Headache"},
            {"id": "p_9", "label": "Head injury"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = ModelConnector::from_config(&config(&mock_server)).unwrap();
    let query = SearchQuery::new("head")
        .with_type(SearchConceptType::Symptom)
        .with_type("risk_factor");
    let results = api
        .search(&query, RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].label, "Headache");
}

fn v3_connector(server: &MockServer) -> ModelConnector {
    ConnectorBuilder::new()
        .app_id("test-app-id")
        .app_key("test-app-key")
        .base_url(server.uri())
        .api_version(ApiVersion::V3)
        .build_model()
        .unwrap()
}

#[tokio::test]
async fn v3_concepts_use_v3_prefix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/concepts"))
        .and(query_param("types", "condition"))
        .and(query_param("ids", "c_1,c_2"))
        .and(query_param("age.value", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "c_1", "name": "Common cold", "common_name": "Cold", "type": "condition"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = v3_connector(&mock_server);
    let query = ConceptQuery::new(40)
        .with_id("c_1")
        .with_id("c_2")
        .with_type(ConceptType::Condition);
    let concepts = api
        .concepts(&query, RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(concepts.get("c_1").unwrap().kind, "condition");
}

#[tokio::test]
async fn v3_red_flags_post_to_suggest() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/suggest"))
        .and(query_param("max_results", "8"))
        .and(body_json(json!({
            "sex": "female",
            "age": 64,
            "evidence": [{"id": "s_1193", "choice_id": "present"}],
            "suggest_method": "red_flags"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "s_1194", "name": "Shortness of breath, severe"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = v3_connector(&mock_server);
    let mut session = Diagnosis::new(Sex::Female, 64);
    session.add_symptom("s_1193", ChoiceId::Present, None);

    let flags = api
        .red_flags(&session, RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(flags.len(), 1);
}

#[tokio::test]
async fn v3_symptom_details_send_age_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/symptoms/s_21"))
        .and(query_param("age.value", "9"))
        .and(query_param("age.unit", "month"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "s_21", "name": "Headache"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = v3_connector(&mock_server);
    let age = Age::with_unit(9, Some("month")).unwrap();
    let symptom = api
        .symptom_details("s_21", Some(&age), RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(symptom.name, "Headache");
}

#[tokio::test]
async fn custom_interview_header_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/triage"))
        .and(header("X-Interview", "abc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"triage_level": "self_care"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = ModelConnector::from_config(
        &config(&mock_server).with_interview_id_header("X-Interview"),
    )
    .unwrap();
    let session = Diagnosis::new(Sex::Male, 20).with_interview_id("abc");

    let triage = api
        .triage(&session, RequestOptions::default())
        .await
        .unwrap();
    assert_eq!(triage["triage_level"], "self_care");
}

#[tokio::test]
async fn http_errors_keep_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/conditions/c_404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"message\":\"not found\"}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = ModelConnector::from_config(&config(&mock_server)).unwrap();
    let err = api
        .condition_details("c_404", None, RequestOptions::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.kind(), Some(HttpErrorKind::NotFound));
    match err {
        ApiError::TransportError { body, .. } => assert!(body.contains("not found")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_success_body_decodes_as_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/info"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = ApiConnector::from_config(&config(&mock_server)).unwrap();
    let info = api.info(RequestOptions::default()).await.unwrap();
    assert_eq!(info, json!({}));
}

#[tokio::test]
async fn per_call_headers_override_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/parse"))
        .and(header("Model", "infermedica-pl"))
        .and(body_json(json!({"text": "boli mnie głowa", "include_tokens": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mentions": [],
            "obvious": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let api = ModelConnector::from_config(&config(&mock_server)).unwrap();
    let parsed = api
        .parse(
            "boli mnie głowa",
            false,
            None,
            None,
            RequestOptions::new().with_header("Model", "infermedica-pl"),
        )
        .await
        .unwrap();
    assert!(parsed.mentions.is_empty());
}
