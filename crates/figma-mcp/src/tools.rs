//! MCP tool catalog
//!
//! Static definitions of every tool the server offers. The `required`
//! list in each input schema is also what the dispatcher validates
//! against, so a schema change here changes validation too.
//!
//! # Tool Categories
//!
//! ## Credentials
//! - `set_api_key` - Store a personal access token
//! - `check_api_key` - Report whether a token is configured
//!
//! ## Files
//! - `get_file`, `get_file_nodes`, `get_image`, `get_image_fills`
//!
//! ## Comments
//! - `get_comments`, `post_comment`, `delete_comment`
//!
//! ## Projects
//! - `get_team_projects`, `get_project_files`
//!
//! ## Components and Styles
//! - `get_team_components`, `get_file_components`, `get_component`,
//!   `get_team_component_sets`, `get_team_styles`, `get_file_styles`,
//!   `get_style`

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Tool definition for MCP protocol
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Argument names listed under `required` in the input schema.
    pub fn required_fields(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|fields| fields.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Result from a tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ToolContent>,
}

/// Content types for tool results
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolResult {
    /// Create a text result
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: content.into(),
            }],
        }
    }
}

fn tool(name: &str, description: &str, input_schema: Value) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

fn file_key(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

/// Schema for the team-scoped listing tools, which all page the same way.
fn team_listing_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "team_id": {
                "type": "string",
                "description": "The team ID"
            },
            "page_size": {
                "type": "number",
                "description": "Optional. Number of items per page"
            },
            "cursor": {
                "type": "string",
                "description": "Optional. Cursor for pagination"
            }
        },
        "required": ["team_id"]
    })
}

static CATALOG: LazyLock<Vec<ToolDefinition>> = LazyLock::new(get_tool_definitions);

/// The tool catalog, built once per process.
pub fn catalog() -> &'static [ToolDefinition] {
    &CATALOG
}

/// Look up a tool by name in [`catalog`].
pub fn find_tool(name: &str) -> Option<&'static ToolDefinition> {
    catalog().iter().find(|t| t.name == name)
}

/// Get all available tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        // Credentials
        tool(
            "set_api_key",
            "Set your Figma API personal access token (will be saved to ~/.mcp-figma/config.json)",
            json!({
                "type": "object",
                "properties": {
                    "api_key": {
                        "type": "string",
                        "description": "Your Figma API personal access token"
                    }
                },
                "required": ["api_key"]
            }),
        ),
        tool(
            "check_api_key",
            "Check if a Figma API key is already configured",
            json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        ),
        // Files
        tool(
            "get_file",
            "Get a Figma file by key",
            json!({
                "type": "object",
                "properties": {
                    "fileKey": file_key("The key of the file to get"),
                    "version": {
                        "type": "string",
                        "description": "Optional. A specific version ID to get"
                    },
                    "depth": {
                        "type": "number",
                        "description": "Optional. Depth of nodes to return (1-4)"
                    },
                    "branch_data": {
                        "type": "boolean",
                        "description": "Optional. Include branch data if true"
                    }
                },
                "required": ["fileKey"]
            }),
        ),
        tool(
            "get_file_nodes",
            "Get specific nodes from a Figma file",
            json!({
                "type": "object",
                "properties": {
                    "fileKey": file_key("The key of the file to get nodes from"),
                    "node_ids": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Array of node IDs to get"
                    },
                    "depth": {
                        "type": "number",
                        "description": "Optional. Depth of nodes to return (1-4)"
                    },
                    "version": {
                        "type": "string",
                        "description": "Optional. A specific version ID to get"
                    }
                },
                "required": ["fileKey", "node_ids"]
            }),
        ),
        tool(
            "get_image",
            "Get images for nodes in a Figma file",
            json!({
                "type": "object",
                "properties": {
                    "fileKey": file_key("The key of the file to get images from"),
                    "ids": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Array of node IDs to render"
                    },
                    "scale": {
                        "type": "number",
                        "description": "Optional. Scale factor to render at (0.01-4)"
                    },
                    "format": {
                        "type": "string",
                        "enum": ["jpg", "png", "svg", "pdf"],
                        "description": "Optional. Image format"
                    },
                    "svg_include_id": {
                        "type": "boolean",
                        "description": "Optional. Include IDs in SVG output"
                    },
                    "svg_simplify_stroke": {
                        "type": "boolean",
                        "description": "Optional. Simplify strokes in SVG output"
                    },
                    "use_absolute_bounds": {
                        "type": "boolean",
                        "description": "Optional. Use absolute bounds"
                    }
                },
                "required": ["fileKey", "ids"]
            }),
        ),
        tool(
            "get_image_fills",
            "Get URLs for images used in a Figma file",
            json!({
                "type": "object",
                "properties": {
                    "fileKey": file_key("The key of the file to get image fills from")
                },
                "required": ["fileKey"]
            }),
        ),
        // Comments
        tool(
            "get_comments",
            "Get comments on a Figma file",
            json!({
                "type": "object",
                "properties": {
                    "fileKey": file_key("The key of the file to get comments from")
                },
                "required": ["fileKey"]
            }),
        ),
        tool(
            "post_comment",
            "Post a comment on a Figma file",
            json!({
                "type": "object",
                "properties": {
                    "fileKey": file_key("The key of the file to comment on"),
                    "message": {
                        "type": "string",
                        "description": "Comment message text"
                    },
                    "client_meta": {
                        "type": "object",
                        "properties": {
                            "x": { "type": "number" },
                            "y": { "type": "number" },
                            "node_id": { "type": "string" },
                            "node_offset": {
                                "type": "object",
                                "properties": {
                                    "x": { "type": "number" },
                                    "y": { "type": "number" }
                                }
                            }
                        },
                        "description": "Optional. Position of the comment"
                    },
                    "comment_id": {
                        "type": "string",
                        "description": "Optional. ID of comment to reply to"
                    }
                },
                "required": ["fileKey", "message"]
            }),
        ),
        tool(
            "delete_comment",
            "Delete a comment from a Figma file",
            json!({
                "type": "object",
                "properties": {
                    "fileKey": file_key("The key of the file to delete a comment from"),
                    "comment_id": {
                        "type": "string",
                        "description": "ID of the comment to delete"
                    }
                },
                "required": ["fileKey", "comment_id"]
            }),
        ),
        // Projects
        tool(
            "get_team_projects",
            "Get projects for a team",
            team_listing_schema(),
        ),
        tool(
            "get_project_files",
            "Get files for a project",
            json!({
                "type": "object",
                "properties": {
                    "project_id": {
                        "type": "string",
                        "description": "The project ID"
                    },
                    "page_size": {
                        "type": "number",
                        "description": "Optional. Number of items per page"
                    },
                    "cursor": {
                        "type": "string",
                        "description": "Optional. Cursor for pagination"
                    },
                    "branch_data": {
                        "type": "boolean",
                        "description": "Optional. Include branch data if true"
                    }
                },
                "required": ["project_id"]
            }),
        ),
        // Components and Styles
        tool(
            "get_team_components",
            "Get components for a team",
            team_listing_schema(),
        ),
        tool(
            "get_file_components",
            "Get components from a file",
            json!({
                "type": "object",
                "properties": {
                    "fileKey": file_key("The key of the file to get components from")
                },
                "required": ["fileKey"]
            }),
        ),
        tool(
            "get_component",
            "Get a component by key",
            json!({
                "type": "object",
                "properties": {
                    "key": {
                        "type": "string",
                        "description": "The component key"
                    }
                },
                "required": ["key"]
            }),
        ),
        tool(
            "get_team_component_sets",
            "Get component sets for a team",
            team_listing_schema(),
        ),
        tool(
            "get_team_styles",
            "Get styles for a team",
            team_listing_schema(),
        ),
        tool(
            "get_file_styles",
            "Get styles from a file",
            json!({
                "type": "object",
                "properties": {
                    "fileKey": file_key("The key of the file to get styles from")
                },
                "required": ["fileKey"]
            }),
        ),
        tool(
            "get_style",
            "Get a style by key",
            json!({
                "type": "object",
                "properties": {
                    "key": {
                        "type": "string",
                        "description": "The style key"
                    }
                },
                "required": ["key"]
            }),
        ),
    ]
}
