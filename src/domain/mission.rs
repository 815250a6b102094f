// Backend payloads: health, model metrics and predictions
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: Option<bool>,
}

/// Model metrics reported by the backend. Only `threshold` is always present.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MetricsSnapshot {
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub mean_mse: Option<f64>,
    #[serde(default)]
    pub window_size: Option<u32>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub authorized_user: Option<String>,
}

impl MetricsSnapshot {
    /// "Model Dev" header value: threshold scaled by ten.
    pub fn model_deviation(&self) -> String {
        match self.threshold {
            Some(t) if t != 0.0 => format!("{:.2}", t * 10.0),
            _ => "0.00".to_string(),
        }
    }

    pub fn base_mse(&self) -> String {
        match self.mean_mse {
            Some(m) if m != 0.0 => format!("{:.4}", m),
            _ => "0.000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    pub data: Vec<Vec<f64>>,
}

impl PredictRequest {
    /// Single-feature window, one row per reading.
    pub fn from_readings(readings: &[f64]) -> Self {
        Self {
            data: readings.iter().map(|v| vec![*v]).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionResult {
    #[serde(default)]
    pub reconstruction_error: Option<f64>,
    #[serde(default)]
    pub is_anomaly: Option<bool>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub anomaly_score: Option<f64>,
    #[serde(default)]
    pub contributions: Option<serde_json::Value>,
}
