//! Client-side session lifecycle for the Speakeasy mobile app's Rust
//! tooling: persisted token, derived identity, authenticated fetch.
//!
//! Two states only: unauthenticated (no valid token) and authenticated
//! (identity derived from the stored token). Logout, a malformed token and
//! a fresh install all land in the same unauthenticated state; recovery is
//! always "log in again".

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;

mod client;
mod identity;
mod store;

pub use client::ApiClient;
pub use identity::{Claims, Identity, TokenError, decode_identity};
pub use store::{FileTokenStore, MemoryTokenStore, TOKEN_KEY, TokenStore, token_store_for};

/// Process-wide session state, owned by the application root and handed to
/// consumers explicitly. Single writer: only these transition methods
/// mutate; consumers read through `current_identity`.
pub struct Session {
    store: Arc<dyn TokenStore>,
    identity: RwLock<Option<Identity>>,
}

impl Session {
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            identity: RwLock::new(None),
        }
    }

    /// App-start transition: read the persisted token and derive the
    /// identity from it. A token that fails to decode is cleared from
    /// storage and treated as "no session", never surfaced as an error.
    pub async fn restore(&self) -> Result<Option<Identity>> {
        let Some(token) = self.store.load().await? else {
            *self.identity.write().await = None;
            return Ok(None);
        };

        match decode_identity(&token) {
            Ok(identity) => {
                *self.identity.write().await = Some(identity.clone());
                Ok(Some(identity))
            }
            Err(e) => {
                tracing::debug!("Discarding stored token: {e}");
                self.store.clear().await?;
                *self.identity.write().await = None;
                Ok(None)
            }
        }
    }

    /// Install a server-confirmed identity and persist its token. The
    /// server already validated the credentials; no local decode happens
    /// here.
    pub async fn login(&self, identity: Identity, token: &str) -> Result<()> {
        self.store.save(token).await?;
        *self.identity.write().await = Some(identity);
        Ok(())
    }

    /// Drop the persisted token and revert to unauthenticated. Local state
    /// flips immediately; no server round-trip involved.
    pub async fn logout(&self) -> Result<()> {
        self.store.clear().await?;
        *self.identity.write().await = None;
        Ok(())
    }

    pub async fn current_identity(&self) -> Option<Identity> {
        self.identity.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.identity.read().await.is_some()
    }

    /// The underlying store, shared with `ApiClient` so requests read the
    /// token fresh rather than through this session's in-memory copy.
    #[must_use]
    pub fn token_store(&self) -> Arc<dyn TokenStore> {
        self.store.clone()
    }
}
