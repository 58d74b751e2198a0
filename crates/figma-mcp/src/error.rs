//! Error types for the MCP server

use thiserror::Error;

/// Result type alias for MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// JSON-RPC 2.0 error codes used by the server.
pub mod codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Errors that can occur during MCP server operations
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the Figma API layer
    #[error(transparent)]
    Api(#[from] figma_api::Error),

    /// Missing or malformed tool arguments
    #[error("{message}")]
    InvalidArguments { message: String },

    /// Unknown tool requested
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    /// Stable category name, reported in the error's `data.kind`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArguments { .. } => "InvalidArguments",
            Self::UnknownTool(_) => "UnknownTool",
            Self::Api(api) => match api {
                figma_api::Error::NotConfigured => "NotConfigured",
                figma_api::Error::Upstream { .. } => "UpstreamError",
                figma_api::Error::InvalidArguments { .. } => "InvalidArguments",
                figma_api::Error::Persist(_) | figma_api::Error::Http(_) => "InternalError",
            },
            Self::Json(_) | Self::Io(_) => "InternalError",
        }
    }

    /// JSON-RPC error code for this error.
    pub fn code(&self) -> i32 {
        match self.kind() {
            "InvalidArguments" | "NotConfigured" => codes::INVALID_PARAMS,
            "UnknownTool" => codes::METHOD_NOT_FOUND,
            _ => codes::INTERNAL_ERROR,
        }
    }

    /// Message shown to the client.
    ///
    /// Unexpected failures are reported as `Internal error: <original>`.
    pub fn client_message(&self) -> String {
        match self {
            Self::Json(_) | Self::Io(_) => format!("Internal error: {self}"),
            Self::Api(figma_api::Error::Persist(_) | figma_api::Error::Http(_)) => {
                format!("Internal error: {self}")
            }
            _ => self.to_string(),
        }
    }
}
