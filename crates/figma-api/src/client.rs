//! HTTP access to the Figma REST API

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde_json::Value;

use crate::{AuthManager, Error, Result};

/// Base URL of the Figma REST API.
pub const BASE_URL: &str = "https://api.figma.com/v1";

/// Header carrying the personal access token.
const TOKEN_HEADER: &str = "X-Figma-Token";

/// HTTP verbs the server issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }

    /// Whether a JSON body accompanies this verb.
    pub fn carries_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// One outbound request: path (with query string), verb and optional body.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }
}

/// Client for the Figma REST API.
///
/// Each call performs exactly one request: no retries, no response caching.
#[derive(Debug, Clone)]
pub struct FigmaClient {
    http: reqwest::Client,
    base_url: String,
    auth: Arc<AuthManager>,
}

impl FigmaClient {
    /// Client against the public Figma API.
    pub fn new(auth: Arc<AuthManager>) -> Result<Self> {
        Self::with_base_url(auth, BASE_URL)
    }

    /// Client against a custom base URL (a mock server in tests).
    pub fn with_base_url(auth: Arc<AuthManager>, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("figma-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> &Arc<AuthManager> {
        &self.auth
    }

    /// Execute a request descriptor.
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<Value> {
        self.request(&request.path, request.method, request.body.as_ref())
            .await
    }

    /// Issue `method` against `<base_url><path>` and return the JSON body.
    ///
    /// Fails with [`Error::NotConfigured`] before any network traffic when
    /// no token is available.
    pub async fn request(&self, path: &str, method: Method, body: Option<&Value>) -> Result<Value> {
        let token = self.auth.token()?;
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(%method, path, "Figma request");

        let mut builder = self
            .http
            .request(method.as_reqwest(), &url)
            .header(TOKEN_HEADER, token.expose_secret());
        if let Some(body) = body.filter(|_| method.carries_body()) {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| Error::Upstream {
            message: e.to_string(),
        })?;
        let status = response.status();
        let text = response.text().await.map_err(|e| Error::Upstream {
            message: e.to_string(),
        })?;

        tracing::debug!(%method, path, status = status.as_u16(), "Figma response");

        if !status.is_success() {
            let message = upstream_message(status.as_u16(), &text);
            tracing::warn!(%method, path, status = status.as_u16(), %message, "Figma request failed");
            return Err(Error::Upstream { message });
        }

        Ok(parse_body(&text))
    }
}

/// Pick the most specific message from an error body.
fn upstream_message(status: u16, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(name))
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    field("err")
        .or_else(|| field("message"))
        .unwrap_or_else(|| format!("Request failed with status code {status}"))
}

fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}
