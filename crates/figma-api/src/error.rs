//! Error types for Figma API access

use thiserror::Error;

/// Result type alias for Figma API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving credentials or talking to Figma
#[derive(Debug, Error)]
pub enum Error {
    /// No token in memory and none persisted
    #[error("No Figma API key provided. Use the set_api_key tool first.")]
    NotConfigured,

    /// Non-2xx response or transport failure
    #[error("Figma API error: {message}")]
    Upstream { message: String },

    /// Arguments that cannot be mapped onto a request
    #[error("{message}")]
    InvalidArguments { message: String },

    /// The token is active in memory but could not be written to disk
    #[error("API key set for this session but could not be saved: {0}")]
    Persist(#[from] figma_config::Error),

    /// HTTP client construction failed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }
}
