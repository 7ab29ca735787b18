//! Tests for the HTTP transport module

use super::*;
use crate::auth::BearerToken;
use crate::error::Error;
use crate::resource::ResourcePath;
use crate::types::StringMap;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_with_token(token: &str) -> HttpClient {
    HttpClient::with_token(
        HttpClientConfig::default(),
        BearerToken::new(token).unwrap(),
    )
    .unwrap()
}

fn query_bag(pairs: &[(&str, &str)]) -> RequestConfig {
    let bag: StringMap = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    RequestConfig::with_params(&bag)
}

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.user_agent.starts_with("search-client/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .timeout(Duration::from_secs(60))
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_with_params() {
    let mut params = StringMap::new();
    params.insert("ids".to_string(), "1,2".to_string());
    let config = RequestConfig::with_params(&params);
    assert_eq!(config.query, params);
}

#[tokio::test]
async fn test_get_sends_bearer_token_and_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2/tweets/search/recent"))
        .and(header("Authorization", "Bearer test-token"))
        .and(query_param("query", "from:TwitterDev"))
        .and(query_param("max_results", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "meta": {"result_count": 0}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_token("test-token");
    let url = format!("{}/2/tweets/search/recent", mock_server.uri());
    let response = client
        .get(
            &url,
            query_bag(&[("query", "from:TwitterDev"), ("max_results", "10")]),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_non_success_status_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/flaky"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_token("t");
    let err = client
        .get(&format!("{}/api/flaky", mock_server.uri()), RequestConfig::default())
        .await
        .unwrap_err();

    match err {
        Error::HttpStatus { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "Service Unavailable");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limited_status_propagates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/limited"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too Many Requests"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_with_token("t");
    let result = client
        .get(&format!("{}/api/limited", mock_server.uri()), RequestConfig::default())
        .await;

    assert!(matches!(result, Err(Error::HttpStatus { status: 429, .. })));
}

#[tokio::test]
async fn test_timeout_is_classified() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .timeout(Duration::from_millis(50))
        .build();
    let client = HttpClient::with_token(config, BearerToken::new("t").unwrap()).unwrap();
    let result = client
        .get(
            &format!("{}/api/slow", mock_server.uri()),
            RequestConfig::default(),
        )
        .await;

    assert!(matches!(result, Err(Error::Timeout { timeout_ms: 50 })));
}

#[tokio::test]
async fn test_get_json_rejects_non_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;

    let client = client_with_token("t");
    let result: crate::Result<serde_json::Value> = client
        .get_json(&format!("{}/api/html", mock_server.uri()), RequestConfig::default())
        .await;

    assert!(matches!(result, Err(Error::JsonParse(_))));
}

#[tokio::test]
async fn test_page_source_returns_body_verbatim() {
    let mock_server = MockServer::start().await;
    let body = serde_json::json!({
        "data": [{"id": "1", "text": "hello"}],
        "meta": {"result_count": 1, "next_token": "abc"},
        "includes": {"users": [{"id": "9"}]}
    });

    Mock::given(method("GET"))
        .and(path("/2/tweets"))
        .and(query_param("ids", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&mock_server)
        .await;

    let client = client_with_token("t");
    let mut params = StringMap::new();
    params.insert("ids".to_string(), "1".to_string());
    let locator = ResourcePath::new(format!("{}/2", mock_server.uri())).tweets();

    let fetched = client.fetch(&locator, &params).await.unwrap();
    assert_eq!(fetched, body);
}

#[test]
fn test_http_client_debug_hides_token() {
    let client = client_with_token("super-secret");
    let debug_str = format!("{client:?}");
    assert!(debug_str.contains("HttpClient"));
    assert!(debug_str.contains("BearerToken(***)"));
    assert!(!debug_str.contains("super-secret"));
}
