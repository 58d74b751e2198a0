//! Shared state handed to every tool call

use std::sync::Arc;

use figma_api::{AuthManager, FigmaClient};
use figma_config::CredentialStore;

use crate::Result;

/// Everything a tool call needs: the credential holder and the HTTP client
/// that reads from it.
///
/// Built once at startup and passed to the server. Tests build their own
/// against a temporary config directory and a mock upstream.
#[derive(Debug, Clone)]
pub struct FigmaContext {
    auth: Arc<AuthManager>,
    client: FigmaClient,
}

impl FigmaContext {
    /// Context talking to the public Figma API.
    pub fn new(store: CredentialStore) -> Result<Self> {
        let auth = Arc::new(AuthManager::new(store));
        let client = FigmaClient::new(Arc::clone(&auth))?;
        Ok(Self { auth, client })
    }

    /// Context talking to `base_url` instead of the public API.
    pub fn with_base_url(store: CredentialStore, base_url: impl Into<String>) -> Result<Self> {
        let auth = Arc::new(AuthManager::new(store));
        let client = FigmaClient::with_base_url(Arc::clone(&auth), base_url)?;
        Ok(Self { auth, client })
    }

    pub fn auth(&self) -> &AuthManager {
        &self.auth
    }

    pub fn client(&self) -> &FigmaClient {
        &self.client
    }
}
