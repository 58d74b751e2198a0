//! MCP Tool Handlers
//!
//! Dispatches tool calls. The two credential tools are handled here; every
//! other tool is a row in the `figma_api` route table and goes straight to
//! the client.

use figma_api::{find_route, mask_token};
use secrecy::ExposeSecret;
use serde_json::{Map, Value};

use crate::context::FigmaContext;
use crate::tools::{ToolResult, find_tool};
use crate::{Error, Result};

const API_KEY_SAVED: &str = "API key set successfully and saved to config file";
const NO_API_KEY: &str = "No API key is configured. Please use set_api_key to configure one.";

/// Handle a tool call by dispatching to the appropriate handler
pub async fn handle_tool_call(
    ctx: &FigmaContext,
    tool_name: &str,
    arguments: Value,
) -> Result<ToolResult> {
    let definition =
        find_tool(tool_name).ok_or_else(|| Error::UnknownTool(tool_name.to_string()))?;

    let args = into_object(arguments)?;
    for field in definition.required_fields() {
        if args.get(field).is_none_or(Value::is_null) {
            return Err(Error::invalid_arguments(format!(
                "Missing required field: {field}"
            )));
        }
    }

    tracing::debug!(tool = tool_name, "Dispatching tool call");

    match tool_name {
        "set_api_key" => handle_set_api_key(ctx, &args),
        "check_api_key" => handle_check_api_key(ctx),
        _ => handle_figma_tool(ctx, tool_name, &args).await,
    }
}

/// Missing arguments count as an empty object.
fn into_object(arguments: Value) -> Result<Map<String, Value>> {
    match arguments {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        _ => Err(Error::invalid_arguments("Arguments must be a JSON object")),
    }
}

fn handle_set_api_key(ctx: &FigmaContext, args: &Map<String, Value>) -> Result<ToolResult> {
    let api_key = args
        .get("api_key")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::invalid_arguments("api_key must be a string"))?;

    ctx.auth().set_token(api_key)?;
    Ok(ToolResult::text(API_KEY_SAVED))
}

fn handle_check_api_key(ctx: &FigmaContext) -> Result<ToolResult> {
    match ctx.auth().token() {
        Ok(token) => Ok(ToolResult::text(format!(
            "API key is configured ({})",
            mask_token(token.expose_secret())
        ))),
        Err(figma_api::Error::NotConfigured) => Ok(ToolResult::text(NO_API_KEY)),
        Err(e) => Err(e.into()),
    }
}

async fn handle_figma_tool(
    ctx: &FigmaContext,
    tool_name: &str,
    args: &Map<String, Value>,
) -> Result<ToolResult> {
    let route = find_route(tool_name).ok_or_else(|| Error::UnknownTool(tool_name.to_string()))?;
    let request = route.build(args)?;
    let response = ctx.client().execute(&request).await?;
    Ok(ToolResult::text(serde_json::to_string_pretty(&response)?))
}
