// Backend trait for the mission API
use crate::domain::mission::{HealthStatus, MetricsSnapshot, PredictRequest, PredictionResult};
use crate::domain::session::{Credentials, LoginResponse, SessionToken};
use async_trait::async_trait;
use thiserror::Error;

/// Uniform failure signal for every backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    #[error("request timed out")]
    Timeout,

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("not logged in")]
    NoToken,
}

#[async_trait]
pub trait MissionApi: Send + Sync {
    /// POST /login
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    /// GET /health
    async fn health(&self) -> Result<HealthStatus, ApiError>;

    /// GET /metrics with a bearer token
    async fn metrics(&self, token: &SessionToken) -> Result<MetricsSnapshot, ApiError>;

    /// POST /predict with a bearer token
    async fn predict(
        &self,
        token: &SessionToken,
        request: &PredictRequest,
    ) -> Result<PredictionResult, ApiError>;
}
