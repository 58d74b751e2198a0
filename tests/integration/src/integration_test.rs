//! End-to-end integration test for the library stack
//!
//! Exercises the flow below the MCP layer: credential store -> auth manager
//! -> route table -> HTTP client, against a mock Figma API.

use std::sync::Arc;

use figma_api::{AuthManager, FigmaClient, find_route};
use figma_test_utils::{MockFigma, TEST_TOKEN, TestConfigDir};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

#[tokio::test]
async fn test_saved_token_drives_a_request() {
    let config = TestConfigDir::new();
    config
        .store()
        .save(&SecretString::from(TEST_TOKEN.to_string()))
        .unwrap();

    let upstream = MockFigma::start().await;
    upstream
        .mount_get("/files/abc/comments", json!({"comments": []}))
        .await;

    let auth = Arc::new(AuthManager::new(config.store()));
    assert_eq!(auth.token().unwrap().expose_secret(), TEST_TOKEN);

    let client = FigmaClient::with_base_url(auth, upstream.uri()).unwrap();
    let args = json!({"fileKey": "abc"});
    let request = find_route("get_comments")
        .unwrap()
        .build(args.as_object().unwrap())
        .unwrap();

    let body = client.execute(&request).await.unwrap();
    assert_eq!(body, json!({"comments": []}));
}

#[tokio::test]
async fn test_token_written_by_another_process_is_found_on_demand() {
    let config = TestConfigDir::new();
    let auth = AuthManager::new(config.store());
    assert!(!auth.is_configured());

    // Simulates a second server instance saving the key after this one started.
    config.write_config(&json!({"apiKey": TEST_TOKEN}));

    assert!(auth.is_configured());
    assert_eq!(auth.token().unwrap().expose_secret(), TEST_TOKEN);
}

#[test]
fn test_set_token_round_trips_through_disk() {
    let config = TestConfigDir::new();
    AuthManager::new(config.store())
        .set_token("  figd_padded  ")
        .unwrap();

    config.assert_api_key("figd_padded");
    let reloaded = config.store().load().unwrap();
    assert_eq!(reloaded.expose_secret(), "figd_padded");
}
