//! JSON-RPC message builders and response accessors.

use serde_json::{Value, json};

/// A request line with the given id, method and params.
pub fn request(id: u64, method: &str, params: Value) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": method,
        "params": params
    })
    .to_string()
}

pub fn initialize(id: u64) -> String {
    request(
        id,
        "initialize",
        json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "test", "version": "1.0"}
        }),
    )
}

pub fn tool_call(id: u64, name: &str, arguments: Value) -> String {
    request(
        id,
        "tools/call",
        json!({"name": name, "arguments": arguments}),
    )
}

/// The text of the first content item of a successful tool call.
///
/// # Panics
/// Panics if the response is an error or has no text content.
pub fn tool_text(response: &Value) -> &str {
    response["result"]["content"][0]["text"]
        .as_str()
        .unwrap_or_else(|| panic!("Expected text content in {response}"))
}

/// The `data.kind` of an error response.
///
/// # Panics
/// Panics if the response is not an error.
pub fn error_kind(response: &Value) -> &str {
    response["error"]["data"]["kind"]
        .as_str()
        .unwrap_or_else(|| panic!("Expected error response, got {response}"))
}
