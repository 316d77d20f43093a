//! Tests for the HTTP client module

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use crate::types::Method;
use std::time::Duration;
use test_case::test_case;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    ApiClient::with_auth(config, AuthConfig::api_key("secret-key")).unwrap()
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_empty());
    assert!(config.user_agent.starts_with("monitor-provider/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .timeout(Duration::from_secs(60))
        .header("X-Custom", "value")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, "https://api.example.com");
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("page", "0")
        .query("search", "prod")
        .header("X-Request-Id", "abc123")
        .json(serde_json::json!({"key": "value"}));

    assert_eq!(
        config.query,
        vec![
            ("page".to_string(), "0".to_string()),
            ("search".to_string(), "prod".to_string())
        ]
    );
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert!(config.body.is_some());
}

#[test]
fn test_client_requires_base_url() {
    let err = ApiClient::new(HttpClientConfig::default()).unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { .. }));
}

#[test]
fn test_client_rejects_invalid_base_url() {
    let config = HttpClientConfig::builder().base_url("not a url").build();
    let err = ApiClient::new(config).unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
}

#[test]
fn test_debug_hides_credential() {
    let config = HttpClientConfig::builder()
        .base_url("https://api.example.com")
        .build();
    let client = ApiClient::with_auth(config, AuthConfig::api_key("hunter2")).unwrap();
    let printed = format!("{client:?}");
    assert!(!printed.contains("hunter2"));
    assert!(printed.contains("api_key"));
}

#[test]
fn test_raw_result_not_found_is_empty() {
    let result = RawResult::NotFound;
    assert!(result.is_not_found());
    assert!(result.bytes().is_empty());
    assert_eq!(result.text(), "");
}

#[tokio::test]
async fn test_every_request_carries_auth_and_json_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hosts/5"))
        .and(header("Authorization", "secret-key"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 5})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.get("/hosts/5").await.unwrap();

    let value: serde_json::Value = result.json().unwrap();
    assert_eq!(value["id"], 5);
}

#[tokio::test]
async fn test_success_with_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/groups/update"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .post_json("groups/update", &serde_json::json!({"id": 1}))
        .await
        .unwrap();

    assert_eq!(result, RawResult::Body(bytes::Bytes::new()));
}

#[tokio::test]
async fn test_not_found_is_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/checks/42"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such check"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.get("checks/42").await.unwrap();

    assert!(result.is_not_found());
    assert!(result.bytes().is_empty());
}

#[test_case(400, "bad frequency" ; "bad request")]
#[test_case(401, "invalid api key" ; "unauthorized")]
#[test_case(409, "{\"error\":\"duplicate name\"}" ; "conflict")]
#[test_case(500, "internal failure" ; "server error")]
#[test_case(201, "{\"id\":1}" ; "created is not success")]
#[tokio::test]
async fn test_non_200_is_error_with_verbatim_body(status: u16, body: &str) {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/checks/add/url"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .put_json("checks/add/url", &serde_json::json!({"name": "x"}))
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus {
            status: got,
            body: got_body,
        } => {
            assert_eq!(got, status);
            assert_eq!(got_body, body);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_query_and_body_are_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hosts/list"))
        .and(query_param("page", "0"))
        .and(query_param("search", "prod db"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/hosts/add"))
        .and(body_json(serde_json::json!({"name": "db-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 9})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client
        .get_with_query("hosts/list", &[("page", "0"), ("search", "prod db")])
        .await
        .unwrap();
    client
        .put_json("hosts/add", &serde_json::json!({"name": "db-1"}))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_execute_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/hosts/remove/3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success":true}"#))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client
        .execute(Method::DELETE, "hosts/remove/3", RequestConfig::new())
        .await
        .unwrap();
    assert_eq!(result.text(), r#"{"success":true}"#);
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // Nothing listens on this port once the server is dropped.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let config = HttpClientConfig::builder()
        .base_url(uri)
        .timeout(Duration::from_secs(2))
        .build();
    let client = ApiClient::new(config).unwrap();

    let err = client.get("checks/1").await.unwrap_err();
    assert!(err.is_transport());
}
