// Session client - Owns the bearer token and fronts every backend call
use crate::application::mission_api::{ApiError, MissionApi};
use crate::application::token_store::{StoreError, TokenStore};
use crate::domain::mission::{HealthStatus, MetricsSnapshot, PredictRequest, PredictionResult};
use crate::domain::session::{Credentials, LoginResponse, SessionToken};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The in-memory token is seeded once from the store when the client is
/// restored. Afterwards only `login` and `logout` change it; the store is
/// never re-read.
pub struct SessionClient {
    api: Arc<dyn MissionApi>,
    store: Arc<dyn TokenStore>,
    token: RwLock<Option<SessionToken>>,
}

impl SessionClient {
    pub async fn restore(
        api: Arc<dyn MissionApi>,
        store: Arc<dyn TokenStore>,
    ) -> Result<Self, StoreError> {
        let token = store.load().await?;
        tracing::debug!("Restored session: token {}", if token.is_some() { "PRESENT" } else { "MISSING" });

        Ok(Self {
            api,
            store,
            token: RwLock::new(token),
        })
    }

    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, SessionError> {
        tracing::info!("Attempting login for {}", credentials.username);

        let response = self.api.login(credentials).await.map_err(|e| {
            tracing::warn!("Login request failed: {}", e);
            e
        })?;

        let token = SessionToken::new(response.token.clone());
        self.store.save(&token).await?;
        *self.token.write().await = Some(token);

        tracing::info!(
            "Login succeeded for {} (role {})",
            credentials.username,
            response.role.as_deref().unwrap_or("unknown")
        );
        Ok(response)
    }

    /// The stored copy goes first; if that fails the session stays intact.
    pub async fn logout(&self) -> Result<(), StoreError> {
        self.store.clear().await?;
        *self.token.write().await = None;
        tracing::info!("Session cleared");
        Ok(())
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.api.health().await
    }

    pub async fn metrics(&self) -> Result<MetricsSnapshot, ApiError> {
        let token = self.current_token().await?;
        self.api.metrics(&token).await
    }

    pub async fn predict(&self, request: &PredictRequest) -> Result<PredictionResult, ApiError> {
        let token = self.current_token().await?;
        self.api.predict(&token, request).await
    }

    async fn current_token(&self) -> Result<SessionToken, ApiError> {
        self.token.read().await.clone().ok_or(ApiError::NoToken)
    }
}
