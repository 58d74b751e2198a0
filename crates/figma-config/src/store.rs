//! The persisted credential document and where it lives

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result, io};

/// Directory under the user's home that holds the config file.
pub const CONFIG_DIR_NAME: &str = ".mcp-figma";

/// File name of the credential document.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// On-disk shape of `config.json`.
///
/// Keys this server does not know about are kept in `extra` so that saving
/// a new token never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reads and writes the single persisted credential.
///
/// Loading is forgiving: a missing or broken file means "no credential",
/// never an error for the caller. Saving reports failures.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store at the default location, `~/.mcp-figma/config.json`.
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::HomeDirUnavailable)?;
        Ok(Self::with_config_dir(home.join(CONFIG_DIR_NAME)))
    }

    /// Store inside a custom directory.
    ///
    /// Used by `--config-dir` and by tests that must not touch the real
    /// user config.
    pub fn with_config_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(CONFIG_FILE_NAME),
        }
    }

    /// Full path of the credential file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the config document, returning typed errors.
    ///
    /// A missing file is not an error: it yields an empty document.
    pub fn read_config(&self) -> Result<FigmaConfig> {
        if !self.path.is_file() {
            return Ok(FigmaConfig::default());
        }

        let content = io::read_text(&self.path)?;
        serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Load the persisted token, if any.
    pub fn load(&self) -> Option<SecretString> {
        match self.read_config() {
            Ok(config) => match config.api_key {
                Some(key) if !key.trim().is_empty() => {
                    tracing::debug!(path = ?self.path, "Loaded persisted API key");
                    Some(SecretString::from(key))
                }
                _ => {
                    tracing::debug!(path = ?self.path, "No API key in config");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load config, treating API key as absent");
                None
            }
        }
    }

    /// Persist `token` as the active credential.
    ///
    /// Other keys already in the document are preserved. A document that
    /// cannot be parsed is replaced.
    pub fn save(&self, token: &SecretString) -> Result<()> {
        let mut config = self.read_config().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Existing config is unreadable, overwriting");
            FigmaConfig::default()
        });
        config.api_key = Some(token.expose_secret().to_string());

        let content =
            serde_json::to_string_pretty(&config).map_err(|e| Error::ConfigSerialize {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        io::write_text(&self.path, &content)?;
        tracing::info!(path = ?self.path, "Saved API key");
        Ok(())
    }
}
