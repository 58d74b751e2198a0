//! Error types for figma-config

use std::path::PathBuf;

/// Result type for figma-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing the credential file
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Failed to serialize config for {path}: {message}")]
    ConfigSerialize { path: PathBuf, message: String },

    #[error("Could not determine the home directory")]
    HomeDirUnavailable,

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
