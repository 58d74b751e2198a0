//! MCP Server implementation
//!
//! Reads JSON-RPC messages from stdin one line at a time, dispatches them,
//! and writes each response as a single line on stdout.

use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::context::FigmaContext;
use crate::error::codes;
use crate::handlers::handle_tool_call;
use crate::protocol::{
    InitializeParams, InitializeResult, JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolsCapability,
};
use crate::tools::{ToolDefinition, catalog};
use crate::{Error, Result};

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "figma-mcp";

/// MCP Server for the Figma REST API
///
/// # Example
///
/// ```ignore
/// use figma_config::CredentialStore;
/// use figma_mcp::{FigmaContext, FigmaMcpServer};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let ctx = FigmaContext::new(CredentialStore::new()?)?;
///     let mut server = FigmaMcpServer::new(ctx);
///     server.run().await?;
///     Ok(())
/// }
/// ```
pub struct FigmaMcpServer {
    ctx: FigmaContext,

    /// Whether the server has been initialized
    initialized: bool,

    /// Available MCP tools
    tools: &'static [ToolDefinition],
}

impl FigmaMcpServer {
    pub fn new(ctx: FigmaContext) -> Self {
        Self {
            ctx,
            initialized: false,
            tools: &[],
        }
    }

    /// Load the tool catalog. Called by [`run`](Self::run).
    pub async fn initialize(&mut self) -> Result<()> {
        tracing::info!(
            config = ?self.ctx.auth().store().path(),
            base_url = self.ctx.client().base_url(),
            "Initializing MCP server"
        );

        self.tools = catalog();
        if self.ctx.auth().is_configured() {
            tracing::info!("Using API key from config file");
        }

        self.initialized = true;
        Ok(())
    }

    /// Serve stdin/stdout until stdin closes or Ctrl-C arrives.
    pub async fn run(&mut self) -> Result<()> {
        self.initialize().await?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        tracing::info!("MCP server ready, listening on stdio");

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        tracing::info!("stdin closed, shutting down");
                        break;
                    };
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    tracing::debug!(request = %line, "Received message");

                    let response = self.handle_message(line).await?;
                    if !response.is_empty() {
                        stdout.write_all(response.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;
                    }
                }
                _ = &mut shutdown => {
                    tracing::info!("Interrupted, shutting down");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Handle a single MCP message
    ///
    /// Returns the JSON-RPC response as a string, or an empty string for
    /// notifications (requests without an `id`). Malformed input produces
    /// an error response rather than an `Err`.
    pub async fn handle_message(&self, message: &str) -> Result<String> {
        let response = match self.dispatch(message).await {
            Some(response) => response,
            None => return Ok(String::new()),
        };
        serde_json::to_string(&response).map_err(Error::from)
    }

    async fn dispatch(&self, message: &str) -> Option<JsonRpcResponse> {
        let raw: Value = match serde_json::from_str(message) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Unparsable message");
                return Some(JsonRpcResponse::error(
                    None,
                    codes::PARSE_ERROR,
                    format!("Parse error: {e}"),
                ));
            }
        };

        let id = raw.get("id").cloned();
        let request: JsonRpcRequest = match serde_json::from_value(raw) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    id,
                    codes::INVALID_REQUEST,
                    format!("Invalid Request: {e}"),
                ));
            }
        };

        if request.id.is_none() {
            tracing::debug!(method = %request.method, "Notification received");
            if request.method == "tools/call" {
                // Runs for its side effects; notifications never get a reply.
                self.handle_tools_call(None, request.params).await;
            }
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id, request.params),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>, params: Value) -> JsonRpcResponse {
        match serde_json::from_value::<InitializeParams>(params) {
            Ok(params) => tracing::info!(
                client = %params.client_info.name,
                client_version = %params.client_info.version,
                protocol_version = %params.protocol_version,
                "Client connected"
            ),
            Err(e) => tracing::debug!(error = %e, "Initialize without usable client info"),
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => error_response(id, &Error::from(e)),
        }
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::success(id, json!({ "tools": self.tools }))
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Value) -> JsonRpcResponse {
        let params: ToolCallParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    codes::INVALID_PARAMS,
                    format!("Invalid params: {e}"),
                );
            }
        };

        let outcome = match handle_tool_call(&self.ctx, &params.name, params.arguments).await {
            Ok(result) => serde_json::to_value(result).map_err(Error::from),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => {
                tracing::warn!(tool = %params.name, kind = e.kind(), error = %e, "Tool call failed");
                error_response(id, &e)
            }
        }
    }

    pub fn context(&self) -> &FigmaContext {
        &self.ctx
    }

    /// Check if the server is initialized
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Get available tools
    pub fn tools(&self) -> &[ToolDefinition] {
        self.tools
    }
}

fn error_response(id: Option<Value>, error: &Error) -> JsonRpcResponse {
    JsonRpcResponse::error_with_data(
        id,
        error.code(),
        error.client_message(),
        Some(json!({ "kind": error.kind() })),
    )
}
