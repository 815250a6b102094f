// HTTP implementation of the mission API
use crate::application::mission_api::{ApiError, MissionApi};
use crate::domain::mission::{HealthStatus, MetricsSnapshot, PredictRequest, PredictionResult};
use crate::domain::session::{Credentials, LoginResponse, SessionToken};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpMissionApi {
    client: reqwest::Client,
    base_url: String,
}

/// Error body shape used by the backend: `{"message": ...}` or `{"error": ...}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl HttpMissionApi {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body);
            if status == StatusCode::UNAUTHORIZED {
                return Err(ApiError::Unauthorized(message));
            }
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: message,
            });
        }

        let bytes = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_decode() {
        ApiError::Malformed(e.to_string())
    } else {
        ApiError::Unreachable(e.to_string())
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl MissionApi for HttpMissionApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let request = self.client.post(self.url("/login")).json(credentials);
        let response: LoginResponse = self.execute(request).await?;
        tracing::debug!("Login response received for {}", credentials.username);
        Ok(response)
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.execute(self.client.get(self.url("/health"))).await
    }

    async fn metrics(&self, token: &SessionToken) -> Result<MetricsSnapshot, ApiError> {
        let request = self
            .client
            .get(self.url("/metrics"))
            .bearer_auth(token.as_str());
        self.execute(request).await
    }

    async fn predict(
        &self,
        token: &SessionToken,
        request: &PredictRequest,
    ) -> Result<PredictionResult, ApiError> {
        let request = self
            .client
            .post(self.url("/predict"))
            .bearer_auth(token.as_str())
            .json(request);
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    const TOKEN: &str = "mock-jwt";

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("Bearer {}", TOKEN))
            .unwrap_or(false)
    }

    async fn login(Json(body): Json<Value>) -> axum::response::Response {
        if body["username"] == "admin" && body["password"] == "alpha9" {
            Json(json!({"token": TOKEN, "role": "ADMIN"})).into_response()
        } else {
            (
                axum::http::StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Invalid credentials"})),
            )
                .into_response()
        }
    }

    async fn metrics(headers: HeaderMap) -> axum::response::Response {
        if !authorized(&headers) {
            return (
                axum::http::StatusCode::UNAUTHORIZED,
                Json(json!({"message": "Token is missing!"})),
            )
                .into_response();
        }
        Json(json!({"threshold": 0.005, "window_size": 50, "channel": "P-1"})).into_response()
    }

    async fn predict(headers: HeaderMap, Json(body): Json<Value>) -> axum::response::Response {
        if !authorized(&headers) {
            return axum::http::StatusCode::UNAUTHORIZED.into_response();
        }
        let rows = body["data"].as_array().map(|a| a.len()).unwrap_or(0);
        if rows == 0 {
            return (
                axum::http::StatusCode::BAD_REQUEST,
                Json(json!({"error": "No data provided"})),
            )
                .into_response();
        }
        Json(json!({
            "reconstruction_error": 0.0042,
            "is_anomaly": false,
            "severity": "LOW",
            "anomaly_score": rows as f64,
        }))
        .into_response()
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn backend() -> HttpMissionApi {
        let app = Router::new()
            .route("/login", post(login))
            .route(
                "/health",
                get(|| async { Json(json!({"status": "ready", "model_loaded": false})) }),
            )
            .route("/metrics", get(metrics))
            .route("/predict", post(predict));
        let base = serve(app).await;
        HttpMissionApi::new(&format!("{}/", base), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let api = backend().await;
        let response = api
            .login(&Credentials::from_input("admin", "alpha9"))
            .await
            .unwrap();
        assert_eq!(response.token, TOKEN);
        assert_eq!(response.role.as_deref(), Some("ADMIN"));
    }

    #[tokio::test]
    async fn test_login_rejected() {
        let api = backend().await;
        let err = api
            .login(&Credentials::from_input("admin", "beta"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(ref m) if m == "Invalid credentials"));
    }

    #[tokio::test]
    async fn test_health() {
        let api = backend().await;
        let health = api.health().await.unwrap();
        assert_eq!(health.status, "ready");
        assert_eq!(health.model_loaded, Some(false));
    }

    #[tokio::test]
    async fn test_metrics_sends_bearer_token() {
        let api = backend().await;

        let metrics = api.metrics(&SessionToken::new(TOKEN)).await.unwrap();
        assert_eq!(metrics.threshold, Some(0.005));
        assert_eq!(metrics.window_size, Some(50));

        let err = api.metrics(&SessionToken::new("stale")).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(ref m) if m == "Token is missing!"));
    }

    #[tokio::test]
    async fn test_predict() {
        let api = backend().await;
        let token = SessionToken::new(TOKEN);

        let result = api
            .predict(&token, &PredictRequest::from_readings(&[0.1, 0.2, 0.3]))
            .await
            .unwrap();
        assert_eq!(result.anomaly_score, Some(3.0));
        assert_eq!(result.is_anomaly, Some(false));

        let err = api
            .predict(&token, &PredictRequest::from_readings(&[]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 400, ref body } if body == "No data provided"));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let app = Router::new().route("/health", get(|| async { "all systems nominal" }));
        let api = HttpMissionApi::new(&serve(app).await, Duration::from_secs(5)).unwrap();

        assert!(matches!(api.health().await, Err(ApiError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpMissionApi::new(&format!("http://{}", addr), Duration::from_secs(5)).unwrap();
        assert!(matches!(api.health().await, Err(ApiError::Unreachable(_))));
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let app = Router::new().route(
            "/health",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({"status": "ready"}))
            }),
        );
        let base = serve(app).await;

        let api = HttpMissionApi::new(&base, Duration::from_millis(100)).unwrap();
        assert!(matches!(api.health().await, Err(ApiError::Timeout)));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"message":"Could not verify"}"#), "Could not verify");
        assert_eq!(error_message(r#"{"error":"Model not loaded"}"#), "Model not loaded");
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
    }
}
