//! [`TestConfigDir`] for tests that persist credentials.

use std::fs;
use std::path::{Path, PathBuf};

use figma_config::{CONFIG_FILE_NAME, CredentialStore};
use serde_json::Value;
use tempfile::TempDir;

/// A temporary directory standing in for `~/.mcp-figma`.
///
/// # Example
///
/// ```rust,no_run
/// use figma_test_utils::TestConfigDir;
///
/// let dir = TestConfigDir::new();
/// dir.write_config(&serde_json::json!({"apiKey": "figd_abc"}));
/// let store = dir.store();
/// assert!(store.load().is_some());
/// ```
pub struct TestConfigDir {
    temp_dir: TempDir,
}

impl Default for TestConfigDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestConfigDir {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join(CONFIG_FILE_NAME)
    }

    /// A fresh store over this directory.
    pub fn store(&self) -> CredentialStore {
        CredentialStore::with_config_dir(self.path())
    }

    /// Write `config.json` as pretty JSON.
    pub fn write_config(&self, config: &Value) {
        self.write_raw(&serde_json::to_string_pretty(config).unwrap());
    }

    /// Write arbitrary bytes as `config.json`, e.g. to simulate corruption.
    pub fn write_raw(&self, content: &str) {
        fs::write(self.config_path(), content).unwrap();
    }

    /// Parse `config.json`.
    ///
    /// # Panics
    /// Panics if the file is missing or not JSON.
    pub fn read_config(&self) -> Value {
        let path = self.config_path();
        let text = fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read config: {}", path.display()));
        serde_json::from_str(&text)
            .unwrap_or_else(|e| panic!("Config is not JSON ({e}): {text}"))
    }

    /// Assert the persisted `apiKey`.
    pub fn assert_api_key(&self, expected: &str) {
        let config = self.read_config();
        assert_eq!(
            config.get("apiKey").and_then(Value::as_str),
            Some(expected),
            "Unexpected config: {config}"
        );
    }
}
