//! Mission-based Integration Tests
//!
//! Scenarios an MCP client actually goes through, driven through the
//! server's message handler with a mock Figma API behind it.

use figma_mcp::{FigmaContext, FigmaMcpServer};
use figma_test_utils::{MockFigma, TEST_TOKEN, TestConfigDir, rpc};
use serde_json::{Value, json};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// One client connection: a server that has completed the handshake.
struct Session {
    server: FigmaMcpServer,
    next_id: u64,
}

impl Session {
    async fn start(config: &TestConfigDir, upstream: &MockFigma) -> Self {
        let ctx = FigmaContext::with_base_url(config.store(), upstream.uri()).unwrap();
        let mut server = FigmaMcpServer::new(ctx);
        server.initialize().await.unwrap();

        let mut session = Self { server, next_id: 1 };
        let init = session.send(rpc::initialize(0)).await;
        assert!(init.get("result").is_some());
        session
    }

    async fn send(&mut self, message: String) -> Value {
        let response = self.server.handle_message(&message).await.unwrap();
        serde_json::from_str(&response).unwrap()
    }

    async fn call(&mut self, tool: &str, arguments: Value) -> Value {
        let id = self.next_id;
        self.next_id += 1;
        let response = self.send(rpc::tool_call(id, tool, arguments)).await;
        assert_eq!(response["id"], id);
        response
    }
}

// =============================================================================
// Mission 1: First-time setup
// =============================================================================

#[tokio::test]
async fn mission_first_time_setup_then_browse_team() {
    let config = TestConfigDir::new();
    let upstream = MockFigma::start().await;
    upstream
        .mount_get(
            "/teams/T1/projects",
            json!({"name": "Team", "projects": [{"id": "P1", "name": "App"}]}),
        )
        .await;
    upstream
        .mount_get(
            "/projects/P1/files",
            json!({"files": [{"key": "F1", "name": "Screens"}]}),
        )
        .await;
    upstream
        .mount_get("/files/F1", json!({"name": "Screens", "document": {}}))
        .await;

    let mut session = Session::start(&config, &upstream).await;

    let check = session.call("check_api_key", json!({})).await;
    assert!(rpc::tool_text(&check).starts_with("No API key is configured"));

    let denied = session.call("get_team_projects", json!({"team_id": "T1"})).await;
    assert_eq!(rpc::error_kind(&denied), "NotConfigured");

    session
        .call("set_api_key", json!({"api_key": TEST_TOKEN}))
        .await;
    config.assert_api_key(TEST_TOKEN);

    let projects = session.call("get_team_projects", json!({"team_id": "T1"})).await;
    let projects: Value = serde_json::from_str(rpc::tool_text(&projects)).unwrap();
    let project_id = projects["projects"][0]["id"].as_str().unwrap().to_string();

    let files = session
        .call("get_project_files", json!({"project_id": project_id}))
        .await;
    let files: Value = serde_json::from_str(rpc::tool_text(&files)).unwrap();
    let file_key = files["files"][0]["key"].as_str().unwrap().to_string();

    let file = session.call("get_file", json!({"fileKey": file_key})).await;
    let file: Value = serde_json::from_str(rpc::tool_text(&file)).unwrap();
    assert_eq!(file["name"], "Screens");

    assert_eq!(
        upstream.received().await,
        vec!["/teams/T1/projects", "/projects/P1/files", "/files/F1"]
    );
}

// =============================================================================
// Mission 2: Returning user
// =============================================================================

#[tokio::test]
async fn mission_returning_user_needs_no_setup() {
    let config = TestConfigDir::new();
    let upstream = MockFigma::start().await;
    upstream
        .mount_get("/files/F1/styles", json!({"meta": {"styles": []}}))
        .await;

    {
        let mut first = Session::start(&config, &upstream).await;
        first
            .call("set_api_key", json!({"api_key": TEST_TOKEN}))
            .await;
    }

    let mut second = Session::start(&config, &upstream).await;
    let styles = second.call("get_file_styles", json!({"fileKey": "F1"})).await;

    assert!(styles.get("error").is_none(), "unexpected error: {styles}");
    assert!(rpc::tool_text(&second.call("check_api_key", json!({})).await).contains("figd_"));
}

// =============================================================================
// Mission 3: Token rotation
// =============================================================================

#[tokio::test]
async fn mission_rotated_token_replaces_old_one() {
    let config = TestConfigDir::new();
    config.write_config(&json!({"apiKey": "figd_revoked_token"}));
    let upstream = MockFigma::start().await;
    upstream
        .mount_get("/components/C1", json!({"meta": {"key": "C1"}}))
        .await;

    let mut session = Session::start(&config, &upstream).await;

    // Mocks only match the good token; anything else gets wiremock's 404.
    let rejected = session.call("get_component", json!({"key": "C1"})).await;
    assert_eq!(rpc::error_kind(&rejected), "UpstreamError");

    session
        .call("set_api_key", json!({"api_key": TEST_TOKEN}))
        .await;
    let accepted = session.call("get_component", json!({"key": "C1"})).await;
    assert!(accepted.get("result").is_some(), "unexpected error: {accepted}");
    config.assert_api_key(TEST_TOKEN);
}

// =============================================================================
// Mission 4: Broken config file
// =============================================================================

#[tokio::test]
async fn mission_corrupt_config_is_treated_as_missing() {
    let config = TestConfigDir::new();
    config.write_raw("{ not json");
    let upstream = MockFigma::start().await;

    let mut session = Session::start(&config, &upstream).await;

    let check = session.call("check_api_key", json!({})).await;
    assert!(rpc::tool_text(&check).starts_with("No API key is configured"));

    session
        .call("set_api_key", json!({"api_key": TEST_TOKEN}))
        .await;
    config.assert_api_key(TEST_TOKEN);
}

// =============================================================================
// Mission 5: Review comments
// =============================================================================

#[tokio::test]
async fn mission_comment_thread() {
    let config = TestConfigDir::new();
    config.write_config(&json!({"apiKey": TEST_TOKEN}));
    let upstream = MockFigma::start().await;
    upstream
        .mount_json("POST", "/files/F1/comments", 200, json!({"id": "100", "message": "Typo here"}))
        .await;
    upstream
        .mount_get("/files/F1/comments", json!({"comments": [{"id": "100"}]}))
        .await;
    upstream
        .mount_json("DELETE", "/files/F1/comments/100", 200, json!({"status": 200, "error": false}))
        .await;

    let mut session = Session::start(&config, &upstream).await;

    let posted = session
        .call(
            "post_comment",
            json!({"fileKey": "F1", "message": "Typo here", "client_meta": {"x": 1, "y": 2}}),
        )
        .await;
    let posted: Value = serde_json::from_str(rpc::tool_text(&posted)).unwrap();
    let comment_id = posted["id"].as_str().unwrap().to_string();

    let listed = session.call("get_comments", json!({"fileKey": "F1"})).await;
    assert!(rpc::tool_text(&listed).contains(&comment_id));

    let missing = session.call("delete_comment", json!({"fileKey": "F1"})).await;
    assert_eq!(
        missing["error"]["message"],
        "Missing required field: comment_id"
    );

    let deleted = session
        .call("delete_comment", json!({"fileKey": "F1", "comment_id": comment_id}))
        .await;
    assert!(deleted.get("result").is_some());
}
