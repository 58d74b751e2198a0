//! Client behaviour against a mock Figma API

use std::sync::Arc;

use figma_api::{AuthManager, Error, FigmaClient, Method, find_route};
use figma_config::CredentialStore;
use serde_json::{Map, Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "figd_test_token_0123456789";

fn configured_client(temp: &TempDir, server: &MockServer) -> FigmaClient {
    let auth = Arc::new(AuthManager::new(CredentialStore::with_config_dir(
        temp.path(),
    )));
    auth.set_token(TOKEN).unwrap();
    FigmaClient::with_base_url(auth, server.uri()).unwrap()
}

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn test_request_sends_token_header() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/files/abc"))
        .and(header("X-Figma-Token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Design"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = configured_client(&temp, &server);
    let result = client.request("/files/abc", Method::Get, None).await.unwrap();

    assert_eq!(result, json!({"name": "Design"}));
}

#[tokio::test]
async fn test_unconfigured_client_makes_no_request() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let auth = Arc::new(AuthManager::new(CredentialStore::with_config_dir(
        temp.path(),
    )));
    let client = FigmaClient::with_base_url(auth, server.uri()).unwrap();

    let err = client.request("/files/abc", Method::Get, None).await.unwrap_err();
    assert!(matches!(err, Error::NotConfigured));
}

#[tokio::test]
async fn test_error_body_err_field_is_reported() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/files/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"status": 404, "err": "Not found"})),
        )
        .mount(&server)
        .await;

    let client = configured_client(&temp, &server);
    let err = client
        .request("/files/missing", Method::Get, None)
        .await
        .unwrap_err();

    assert!(matches!(&err, Error::Upstream { message } if message == "Not found"));
    assert_eq!(err.to_string(), "Figma API error: Not found");
}

#[tokio::test]
async fn test_error_without_body_uses_status() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = configured_client(&temp, &server);
    let err = client.request("/files/x", Method::Get, None).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "Figma API error: Request failed with status code 500"
    );
}

#[tokio::test]
async fn test_transport_failure_is_upstream_error() {
    let temp = TempDir::new().unwrap();
    let auth = Arc::new(AuthManager::new(CredentialStore::with_config_dir(
        temp.path(),
    )));
    auth.set_token(TOKEN).unwrap();
    // Port 9 on localhost is not expected to accept connections.
    let client = FigmaClient::with_base_url(auth, "http://127.0.0.1:9").unwrap();

    let err = client.request("/files/x", Method::Get, None).await.unwrap_err();
    assert!(matches!(err, Error::Upstream { .. }));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    Mock::given(method("POST"))
        .and(path("/files/abc/comments"))
        .and(body_json(json!({"message": "Looks good"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "42"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = configured_client(&temp, &server);
    let request = find_route("post_comment")
        .unwrap()
        .build(&object(json!({"fileKey": "abc", "message": "Looks good"})))
        .unwrap();

    let result = client.execute(&request).await.unwrap();
    assert_eq!(result, json!({"id": "42"}));
}

#[tokio::test]
async fn test_delete_with_empty_body_returns_null() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    Mock::given(method("DELETE"))
        .and(path("/files/abc/comments/7"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = configured_client(&temp, &server);
    let request = find_route("delete_comment")
        .unwrap()
        .build(&object(json!({"fileKey": "abc", "comment_id": "7"})))
        .unwrap();

    assert_eq!(client.execute(&request).await.unwrap(), Value::Null);
}

#[tokio::test]
async fn test_image_query_parameters_reach_server() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/images/abc"))
        .and(query_param("ids", "1:2,3:4"))
        .and(query_param("format", "svg"))
        .and(query_param("scale", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"images": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = configured_client(&temp, &server);
    let request = find_route("get_image")
        .unwrap()
        .build(&object(json!({
            "fileKey": "abc",
            "ids": ["1:2", "3:4"],
            "format": "svg",
            "scale": 2
        })))
        .unwrap();

    client.execute(&request).await.unwrap();
}

#[tokio::test]
async fn test_repeated_reads_hit_upstream_each_time() {
    let server = MockServer::start().await;
    let temp = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .and(path("/files/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "1"})))
        .expect(2)
        .mount(&server)
        .await;

    let client = configured_client(&temp, &server);
    let first = client.request("/files/abc", Method::Get, None).await.unwrap();
    let second = client.request("/files/abc", Method::Get, None).await.unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_trailing_slash_in_base_url_is_trimmed() {
    let temp = TempDir::new().unwrap();
    let auth = Arc::new(AuthManager::new(CredentialStore::with_config_dir(
        temp.path(),
    )));
    let client = FigmaClient::with_base_url(auth, "http://localhost:1234/v1/").unwrap();
    assert_eq!(client.base_url(), "http://localhost:1234/v1");
}
