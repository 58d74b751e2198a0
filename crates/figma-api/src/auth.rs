//! Personal access token handling
//!
//! Figma personal access tokens do not expire on a schedule the server can
//! see, so the cached token carries a synthetic one-year lifetime. The cache
//! only saves re-reading the config file on every call.

use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use figma_config::CredentialStore;
use secrecy::SecretString;

use crate::{Error, Result};

/// Lifetime stamped on every cached token.
const TOKEN_LIFETIME: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Characters revealed at each end of a masked token, at most.
const MASK_REVEAL: usize = 5;

#[derive(Clone)]
struct CachedToken {
    value: SecretString,
    expires_at: Instant,
}

impl CachedToken {
    fn new(value: SecretString) -> Self {
        Self {
            value,
            expires_at: Instant::now() + TOKEN_LIFETIME,
        }
    }

    fn is_live(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Everything the manager knows, swapped as a unit.
#[derive(Clone, Default)]
struct TokenState {
    api_key: Option<SecretString>,
    cached: Option<CachedToken>,
}

/// Resolves the token used for every Figma request.
///
/// Shared between the tool router (which sets it) and the client (which
/// reads it). Reads never observe a half-applied update: every change
/// replaces the whole state under the write lock.
pub struct AuthManager {
    store: CredentialStore,
    state: RwLock<TokenState>,
}

impl AuthManager {
    /// Create a manager, seeding the cache from the store if a token was
    /// persisted by an earlier run.
    pub fn new(store: CredentialStore) -> Self {
        let state = match store.load() {
            Some(token) => TokenState {
                api_key: Some(token.clone()),
                cached: Some(CachedToken::new(token)),
            },
            None => TokenState::default(),
        };

        Self {
            store,
            state: RwLock::new(state),
        }
    }

    /// The backing credential store.
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    /// Current token, reloading from the store on a cache miss.
    pub fn token(&self) -> Result<SecretString> {
        let snapshot = self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        if let Some(cached) = snapshot.cached.filter(CachedToken::is_live) {
            return Ok(cached.value);
        }

        if let Some(api_key) = snapshot.api_key {
            tracing::debug!("Token cache expired, re-deriving from in-memory key");
            self.swap(api_key.clone());
            return Ok(api_key);
        }

        match self.store.load() {
            Some(token) => {
                tracing::debug!(path = ?self.store.path(), "Recovered API key from config");
                self.swap(token.clone());
                Ok(token)
            }
            None => Err(Error::NotConfigured),
        }
    }

    /// Replace the active token and persist it.
    ///
    /// The in-memory swap happens first, so the new token is used for the
    /// rest of the session even when saving fails; the failure is still
    /// returned as [`Error::Persist`].
    pub fn set_token(&self, value: &str) -> Result<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::invalid_arguments("api_key must not be empty"));
        }

        let token = SecretString::from(value.to_string());
        self.swap(token.clone());
        tracing::info!(token = %mask_token(value), "API key updated");

        self.store.save(&token)?;
        Ok(())
    }

    /// Whether a token is available without touching the network.
    pub fn is_configured(&self) -> bool {
        self.token().is_ok()
    }

    fn swap(&self, token: SecretString) {
        let next = TokenState {
            api_key: Some(token.clone()),
            cached: Some(CachedToken::new(token)),
        };
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    #[cfg(test)]
    fn expire_cache(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = state.cached.as_mut() {
            cached.expires_at = Instant::now();
        }
    }
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

/// Render a token for display, hiding everything but its ends.
///
/// At most five characters are shown at each end, and never more than a
/// quarter of the token, so short secrets are fully hidden.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let reveal = MASK_REVEAL.min(chars.len() / 4);
    let head: String = chars[..reveal].iter().collect();
    let tail: String = chars[chars.len() - reveal..].iter().collect();
    format!("{head}...{tail}")
}
