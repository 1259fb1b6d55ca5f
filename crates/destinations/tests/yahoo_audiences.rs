//! Yahoo Audiences `create_audience` tests against a mocked taxonomy API.

mod common;

use actions_common::config::HttpSettings;
use actions_destinations::{
    AudienceDestination, AudienceSettings, CreateAudienceInput, DestinationSettings,
    YahooAudiences,
};
use actions_error::{ErrorCode, ErrorKind, RetryableErrorExt};
use common::EnvGuard;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const AUDIENCE_ID: &str = "aud_123456789012345678901234567";
const AUDIENCE_KEY: &str = "sneakers_buyers";
const ENGAGE_SPACE_ID: &str = "acme_corp_engage_space";
const MDM_ID: &str = "mdm 123";
const CUST_DESC: &str = "ACME Corp";

const CLIENT_ID_VAR: &str = "ACTIONS_YAHOO_AUDIENCES_TAXONOMY_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "ACTIONS_YAHOO_AUDIENCES_TAXONOMY_CLIENT_SECRET";

fn create_audience_input() -> CreateAudienceInput {
    CreateAudienceInput {
        settings: DestinationSettings {
            engage_space_id: ENGAGE_SPACE_ID.to_string(),
            mdm_id: MDM_ID.to_string(),
            customer_desc: CUST_DESC.to_string(),
        },
        audience_name: String::new(),
        audience_settings: AudienceSettings {
            audience_key: AUDIENCE_KEY.to_string(),
            audience_id: AUDIENCE_ID.to_string(),
            identifier: "anything".to_string(),
        },
    }
}

fn test_destination(base_url: &str) -> YahooAudiences {
    let _env = EnvGuard::new(vec![(CLIENT_ID_VAR, "luke"), (CLIENT_SECRET_VAR, "yoda")]);
    YahooAudiences::from_env(&HttpSettings::default())
        .expect("credentials present")
        .with_base_url(base_url)
        .expect("valid base url")
}

async fn mock_append(mock_server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("PUT"))
        .and(path(format!("/v1/taxonomy/append/{}", ENGAGE_SPACE_ID)))
        .respond_with(template)
        .mount(mock_server)
        .await;
}

// ============================================================================
// Success cases
// ============================================================================

#[tokio::test]
async fn test_create_audience_success() {
    let mock_server = MockServer::start().await;

    // base64("luke:yoda")
    Mock::given(method("PUT"))
        .and(path(format!("/v1/taxonomy/append/{}", ENGAGE_SPACE_ID)))
        .and(header("authorization", "Basic bHVrZTp5b2Rh"))
        .and(body_partial_json(serde_json::json!({
            "id": ENGAGE_SPACE_ID,
            "description": CUST_DESC,
            "users": { "include": [MDM_ID] },
            "subTaxonomy": [{ "id": AUDIENCE_ID, "name": AUDIENCE_KEY }]
        })))
        .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
            "anything": "123"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let destination = test_destination(&mock_server.uri());
    let result = destination
        .create_audience(&create_audience_input())
        .await
        .expect("audience created");

    assert_eq!(result.external_id, AUDIENCE_ID);
    assert_eq!(destination.name(), "yahoo_audiences");
}

// ============================================================================
// Failure cases: missing settings
// ============================================================================

async fn assert_rejected_without_call(input: CreateAudienceInput, field: &str) {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&mock_server)
        .await;

    let err = test_destination(&mock_server.uri())
        .create_audience(&input)
        .await
        .expect_err("blank setting must be rejected");

    assert_eq!(err.kind(), ErrorKind::PayloadValidation);
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.code(), Some(ErrorCode::PayloadValidationFailed));
    assert!(err.message().contains(field), "message: {}", err.message());
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_missing_audience_id() {
    let mut input = create_audience_input();
    input.audience_settings.audience_id = String::new();
    assert_rejected_without_call(input, "audience_id").await;
}

#[tokio::test]
async fn test_missing_audience_key() {
    let mut input = create_audience_input();
    input.audience_settings.audience_key = String::new();
    input.audience_settings.audience_id = "aud_12345".to_string();
    assert_rejected_without_call(input, "audience_key").await;
}

#[tokio::test]
async fn test_missing_engage_space_id() {
    let mut input = create_audience_input();
    input.settings.engage_space_id = String::new();
    assert_rejected_without_call(input, "engage_space_id").await;
}

// ============================================================================
// Failure cases: partner API responses
// ============================================================================

#[tokio::test]
async fn test_unauthorized_is_invalid_authentication() {
    let mock_server = MockServer::start().await;
    mock_append(&mock_server, ResponseTemplate::new(401)).await;

    let err = test_destination(&mock_server.uri())
        .create_audience(&create_audience_input())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidAuthentication);
    assert_eq!(err.code(), Some(ErrorCode::InvalidAuthentication));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_service_unavailable_is_retryable() {
    let mock_server = MockServer::start().await;
    mock_append(&mock_server, ResponseTemplate::new(503)).await;

    let err = test_destination(&mock_server.uri())
        .create_audience(&create_audience_input())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Retryable);
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.code(), Some(ErrorCode::RetryableError));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_bad_request_carries_body() {
    let mock_server = MockServer::start().await;
    mock_append(
        &mock_server,
        ResponseTemplate::new(400).set_body_string("Node id already exists"),
    )
    .await;

    let err = test_destination(&mock_server.uri())
        .create_audience(&create_audience_input())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ApiCall);
    assert_eq!(err.code(), Some(ErrorCode::ApiCallFailed));
    assert!(err.message().contains("Node id already exists"));
}

#[tokio::test]
async fn test_unreachable_api_is_retryable() {
    // Nothing listens on port 1
    let err = test_destination("http://127.0.0.1:1")
        .create_audience(&create_audience_input())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Retryable);
    assert!(err.is_retryable());
}

// ============================================================================
// Credentials
// ============================================================================

#[test]
fn test_missing_credentials_is_invalid_authentication() {
    let _env = EnvGuard::unset(vec![CLIENT_ID_VAR, CLIENT_SECRET_VAR]);

    let err = YahooAudiences::from_env(&HttpSettings::default())
        .err()
        .expect("credentials missing");

    assert_eq!(err.kind(), ErrorKind::InvalidAuthentication);
    assert_eq!(err.status(), Some(401));
    assert!(err.message().contains("credentials"));
}
