//! Tests for the HTTP client module

use super::*;
use crate::auth::Credentials;
use crate::error::Error;
use crate::types::{JsonObject, Method};
use serde_json::json;
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn object(value: serde_json::Value) -> JsonObject {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

fn test_client(base_url: &str) -> HighLevelClient {
    let config = HttpClientConfig::builder()
        .base_url(base_url)
        .backoff(Duration::from_millis(10), Duration::from_millis(50))
        .build();
    HighLevelClient::with_config(config).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.base_url, "https://services.leadconnectorhq.com");
    assert_eq!(config.api_version, "2021-07-28");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_attempts, 3);
    assert_eq!(config.initial_backoff, Duration::from_secs(3));
    assert_eq!(config.max_backoff, Duration::from_secs(60));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .api_version("2023-01-01")
        .timeout(Duration::from_secs(60))
        .max_attempts(5)
        .backoff(Duration::from_millis(200), Duration::from_secs(30))
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, "https://api.example.com");
    assert_eq!(config.api_version, "2023-01-01");
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.max_attempts, 5);
    assert_eq!(config.initial_backoff, Duration::from_millis(200));
    assert_eq!(config.max_backoff, Duration::from_secs(30));
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_build_url() {
    let client = test_client("https://api.example.com/");
    assert_eq!(client.build_url("/users/"), "https://api.example.com/users/");
    assert_eq!(client.build_url("users/"), "https://api.example.com/users/");
    assert_eq!(
        client.build_url("https://other.example.com/x"),
        "https://other.example.com/x"
    );
}

#[test]
fn test_backoff_calculation() {
    let config = HttpClientConfig::builder()
        .backoff(Duration::from_millis(100), Duration::from_secs(1))
        .build();
    let client = HighLevelClient::with_config(config).unwrap();

    assert_eq!(client.calculate_backoff(0), Duration::from_millis(100));
    assert_eq!(client.calculate_backoff(1), Duration::from_millis(200));
    assert_eq!(client.calculate_backoff(2), Duration::from_millis(400));
    // Capped at max
    assert_eq!(client.calculate_backoff(10), Duration::from_secs(1));
}

#[test]
fn test_empty_token_rejected() {
    let client = test_client("https://api.example.com");
    let err = client.build_headers("").unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));
}

#[test_case(json!({"a": "x"}), vec![("a", "x")] ; "string value")]
#[test_case(json!({"limit": 100, "flag": true}), vec![("limit", "100"), ("flag", "true")] ; "scalars")]
#[test_case(json!({"a": null, "b": "y"}), vec![("b", "y")] ; "nulls skipped")]
#[test_case(json!({"ids": ["1", "2"]}), vec![("ids", "1"), ("ids", "2")] ; "arrays repeat key")]
#[test_case(json!({"f": {"k": 1}}), vec![("f", "{\"k\":1}")] ; "objects as json")]
fn test_query_pairs(params: serde_json::Value, expected: Vec<(&str, &str)>) {
    let pairs = query_pairs(&object(params));
    let expected: Vec<(String, String)> = expected
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(pairs, expected);
}

#[tokio::test]
async fn test_get_sends_query_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/"))
        .and(query_param("locationId", "loc_1"))
        .and(header("Authorization", "Bearer token-1"))
        .and(header("Version", "2021-07-28"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": "u1", "name": "Alice"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let creds = Credentials::new("token-1");
    let response = client
        .call(
            Method::GET,
            "/users/",
            &creds,
            &object(json!({"locationId": "loc_1"})),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert!(!response.is_error());
    let body = response.json().unwrap();
    assert_eq!(body["users"][0]["name"], "Alice");
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/locationToken"))
        .and(body_json(json!({"companyId": "c1", "locationId": "l1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "loc-token"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let creds = Credentials::new("agency-token");
    let response = client
        .call(
            Method::POST,
            "/oauth/locationToken",
            &creds,
            &object(json!({"companyId": "c1", "locationId": "l1"})),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 201);
    assert_eq!(response.json().unwrap()["access_token"], "loc-token");
}

#[tokio::test]
async fn test_error_status_becomes_request_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contacts/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"message\":\"Not found\"}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let creds = Credentials::new("secret-token");
    let err = client
        .call(Method::GET, "/contacts/missing", &creds, &JsonObject::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    match err {
        Error::Request(request) => {
            assert_eq!(request.method, "GET");
            assert!(request.url.ends_with("/contacts/missing"));
            assert!(request.body.contains("Not found"));
            assert!(request
                .request_headers
                .iter()
                .all(|(_, value)| !value.contains("secret-token")));
        }
        other => panic!("expected request error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_failure_is_retried() {
    let mock_server = MockServer::start().await;

    // First two attempts outlive the client timeout
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": false}))
                .set_delay(Duration::from_secs(2)),
        )
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(200))
        .backoff(Duration::from_millis(10), Duration::from_millis(50))
        .build();
    let client = HighLevelClient::with_config(config).unwrap();

    let response = client
        .call(Method::GET, "/slow", &Credentials::new("t"), &JsonObject::new())
        .await
        .unwrap();
    assert_eq!(response.json().unwrap()["ok"], true);
}

#[tokio::test]
async fn test_transport_failure_exhausts_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .timeout(Duration::from_millis(200))
        .backoff(Duration::from_millis(10), Duration::from_millis(50))
        .build();
    let client = HighLevelClient::with_config(config).unwrap();

    let err = client
        .call(Method::GET, "/slow", &Credentials::new("t"), &JsonObject::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_error_status_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/boom"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let err = client
        .call(Method::GET, "/boom", &Credentials::new("t"), &JsonObject::new())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_unbuildable_request_not_retried() {
    let config = HttpClientConfig::builder()
        .base_url("not a url")
        .backoff(Duration::from_secs(10), Duration::from_secs(10))
        .build();
    let client = HighLevelClient::with_config(config).unwrap();

    // A retry would sleep for the 10s backoff first
    let result = tokio::time::timeout(
        Duration::from_secs(2),
        client.call(Method::GET, "/users/", &Credentials::new("t"), &JsonObject::new()),
    )
    .await
    .expect("call should fail without backing off");

    let err = result.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert!(!err.is_retryable());
}
