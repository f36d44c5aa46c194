use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::config::{SessionConfig, TokenStorageKind};

/// Storage key for the one active auth token per installation.
pub const TOKEN_KEY: &str = "auth_token";

/// Single-slot credential storage. Everything above this trait is
/// platform-agnostic; the variant is picked once at startup.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>>;

    async fn save(&self, token: &str) -> Result<()>;

    async fn clear(&self) -> Result<()>;
}

/// Session-scoped storage: the token lives only as long as the process,
/// like browser sessionStorage.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.token.read().await.clone())
    }

    async fn save(&self, token: &str) -> Result<()> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.write().await = None;
        Ok(())
    }
}

/// Durable on-disk storage for installed-device use, like mobile
/// AsyncStorage. One file, one token.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::data_dir().context("No platform data directory available")?;
        Ok(dir.join("speakeasy").join(TOKEN_KEY))
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(token) if token.is_empty() => Ok(None),
            Ok(token) => Ok(Some(token)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context("Failed to read stored token"),
        }
    }

    async fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create token directory")?;
        }
        tokio::fs::write(&self.path, token)
            .await
            .context("Failed to persist token")
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).context("Failed to remove stored token"),
        }
    }
}

/// Select the storage variant once, from config. Callers only ever hold the
/// trait object afterwards.
pub fn token_store_for(config: &SessionConfig) -> Result<Arc<dyn TokenStore>> {
    match config.storage {
        TokenStorageKind::Memory => Ok(Arc::new(MemoryTokenStore::new())),
        TokenStorageKind::File => {
            let path = match &config.token_path {
                Some(path) => path.clone(),
                None => FileTokenStore::default_path()?,
            };
            Ok(Arc::new(FileTokenStore::new(path)))
        }
    }
}
