// Test doubles for the application layer
use crate::application::dashboard_poller::SampleSource;
use crate::application::mission_api::{ApiError, MissionApi};
use crate::application::token_store::{StoreError, TokenStore};
use crate::domain::mission::{HealthStatus, MetricsSnapshot, PredictRequest, PredictionResult};
use crate::domain::session::{Credentials, LoginResponse, SessionToken};
use async_trait::async_trait;
use std::io::{Error as IoError, ErrorKind};
use std::sync::Mutex;
use std::time::Duration;

/// Scripted backend: accepts one credential pair and serves fixed payloads.
pub struct StubApi {
    pub username: String,
    pub password: String,
    pub token: String,
    pub health: Option<HealthStatus>,
    pub metrics: Option<MetricsSnapshot>,
    /// Applied to health and metrics calls.
    pub delay: Duration,
    calls: Mutex<Vec<String>>,
    seen_tokens: Mutex<Vec<String>>,
}

impl StubApi {
    pub fn accepting(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            token: "stub-token".to_string(),
            health: Some(HealthStatus {
                status: "ready".to_string(),
                model_loaded: Some(true),
            }),
            metrics: Some(MetricsSnapshot {
                threshold: Some(0.005),
                mean_mse: Some(0.0021),
                ..Default::default()
            }),
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
            seen_tokens: Mutex::new(Vec::new()),
        }
    }

    pub fn offline(mut self) -> Self {
        self.health = None;
        self.metrics = None;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn seen_tokens(&self) -> Vec<String> {
        self.seen_tokens.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn record_token(&self, token: &SessionToken) {
        self.seen_tokens.lock().unwrap().push(token.as_str().to_string());
    }
}

#[async_trait]
impl MissionApi for StubApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.record("login");
        if credentials.username == self.username && credentials.password == self.password {
            Ok(LoginResponse {
                token: self.token.clone(),
                role: Some("ADMIN".to_string()),
            })
        } else {
            Err(ApiError::Unauthorized("Invalid credentials".to_string()))
        }
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.record("health");
        tokio::time::sleep(self.delay).await;
        self.health
            .clone()
            .ok_or_else(|| ApiError::Unreachable("connection refused".to_string()))
    }

    async fn metrics(&self, token: &SessionToken) -> Result<MetricsSnapshot, ApiError> {
        self.record("metrics");
        self.record_token(token);
        tokio::time::sleep(self.delay).await;
        self.metrics
            .clone()
            .ok_or_else(|| ApiError::Unreachable("connection refused".to_string()))
    }

    async fn predict(
        &self,
        token: &SessionToken,
        request: &PredictRequest,
    ) -> Result<PredictionResult, ApiError> {
        self.record("predict");
        self.record_token(token);
        Ok(PredictionResult {
            is_anomaly: Some(false),
            anomaly_score: Some(request.data.len() as f64),
            ..Default::default()
        })
    }
}

/// Replays a fixed list of values, wrapping around at the end.
pub struct ScriptedSource {
    values: Vec<f64>,
    next: usize,
}

impl ScriptedSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, next: 0 }
    }
}

impl SampleSource for ScriptedSource {
    fn next_value(&mut self) -> f64 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }

    fn label(&self) -> &'static str {
        "SCRIPTED"
    }
}

/// Token store on a read-only volume: loads work, every write fails.
pub struct BrokenTokenStore {
    initial: Option<SessionToken>,
}

impl BrokenTokenStore {
    pub fn empty() -> Self {
        Self { initial: None }
    }

    pub fn holding(token: SessionToken) -> Self {
        Self {
            initial: Some(token),
        }
    }

    fn denied() -> StoreError {
        StoreError::Io(IoError::new(ErrorKind::PermissionDenied, "read-only volume"))
    }
}

#[async_trait]
impl TokenStore for BrokenTokenStore {
    async fn load(&self) -> Result<Option<SessionToken>, StoreError> {
        Ok(self.initial.clone())
    }

    async fn save(&self, _token: &SessionToken) -> Result<(), StoreError> {
        Err(Self::denied())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        Err(Self::denied())
    }
}
