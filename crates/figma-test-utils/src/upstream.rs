//! [`MockFigma`], a wiremock server playing the Figma REST API.

use serde_json::Value;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::TEST_TOKEN;

/// Mock upstream. Pass [`uri`](Self::uri) as the client base URL.
pub struct MockFigma {
    server: MockServer,
}

impl MockFigma {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// Answer `verb path` with `status` and a JSON body, only when the
    /// request carries [`TEST_TOKEN`].
    pub async fn mount_json(&self, verb: &str, route: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(route))
            .and(header("X-Figma-Token", TEST_TOKEN))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Shorthand for a 200 GET.
    pub async fn mount_get(&self, route: &str, body: Value) {
        self.mount_json("GET", route, 200, body).await;
    }

    /// Path and query of every request received so far, in order.
    pub async fn received(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|request| match request.url.query() {
                Some(query) => format!("{}?{}", request.url.path(), query),
                None => request.url.path().to_string(),
            })
            .collect()
    }
}
