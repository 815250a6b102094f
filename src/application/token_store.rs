// Durable storage for the session token
use crate::domain::session::SessionToken;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

/// Key the token is stored under.
pub const TOKEN_KEY: &str = "spaceguard_token";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("token store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode token store: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<SessionToken>, StoreError>;

    async fn save(&self, token: &SessionToken) -> Result<(), StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;
}

/// Process-lifetime store used when persistence is switched off.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<SessionToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_token(token: SessionToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<SessionToken>, StoreError> {
        Ok(self.token.lock().await.clone())
    }

    async fn save(&self, token: &SessionToken) -> Result<(), StoreError> {
        *self.token.lock().await = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.token.lock().await = None;
        Ok(())
    }
}
