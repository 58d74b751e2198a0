//! MCP Server for the Figma REST API
//!
//! This crate exposes a subset of the Figma REST API as Model Context
//! Protocol tools, so an MCP client (Claude Desktop, Cursor, ...) can read
//! files, nodes, images, comments, projects, components and styles.
//!
//! # Architecture
//!
//! ```text
//! [ MCP Client ]
//!        | (JSON-RPC over stdio)
//!        v
//! [ figma-mcp: server -> handlers (tool router) ]
//!        |
//!        v
//! [ figma-api: routes -> FigmaClient -> AuthManager ]
//!        |                                  |
//!        v                                  v
//! [ api.figma.com/v1 ]        [ figma-config: ~/.mcp-figma/config.json ]
//! ```
//!
//! # Tools
//!
//! - Credentials: `set_api_key`, `check_api_key`
//! - Files: `get_file`, `get_file_nodes`, `get_image`, `get_image_fills`
//! - Comments: `get_comments`, `post_comment`, `delete_comment`
//! - Projects: `get_team_projects`, `get_project_files`
//! - Components and styles: `get_team_components`, `get_file_components`,
//!   `get_component`, `get_team_component_sets`, `get_team_styles`,
//!   `get_file_styles`, `get_style`

pub mod context;
pub mod error;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;

pub use context::FigmaContext;
pub use error::{Error, Result};
pub use server::FigmaMcpServer;
pub use tools::{
    ToolContent, ToolDefinition, ToolResult, catalog, find_tool, get_tool_definitions,
};
