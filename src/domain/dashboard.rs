// Dashboard domain model
use super::mission::{HealthStatus, MetricsSnapshot};
use super::telemetry::{Assessment, SampleWindow, Severity, TelemetrySample};
use super::view::Tab;

/// Status shown until the backend answers.
pub const OFFLINE: &str = "OFFLINE";

/// Fixed uptime readout in the header.
pub const UPTIME: &str = "142:12:09";

/// Per-core load shown in the processor affinity panel.
pub const CORE_LOAD: [u32; 3] = [78, 45, 92];

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub id: u32,
    pub severity: Severity,
    pub message: String,
    pub time: String,
}

impl Alert {
    pub fn new(id: u32, severity: Severity, message: &str, time: &str) -> Self {
        Self {
            id,
            severity,
            message: message.to_string(),
            time: time.to_string(),
        }
    }
}

fn seeded_alerts() -> Vec<Alert> {
    vec![
        Alert::new(1, Severity::Critical, "HEATER-1 TEMP OUTSIDE BOUNDS", "12:45:01"),
        Alert::new(2, Severity::Warning, "BATTERY CHARGE RATE FLUCTUATING", "12:44:32"),
    ]
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub status: String,
    pub metrics: MetricsSnapshot,
    pub window: SampleWindow,
    pub current: Assessment,
    pub alerts: Vec<Alert>,
    pub tab: Tab,
    /// Visible reason the backend values are stale, if any call failed.
    pub backend_notice: Option<String>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            status: OFFLINE.to_string(),
            metrics: MetricsSnapshot::default(),
            window: SampleWindow::default(),
            current: Assessment {
                severity: Severity::Safe,
                score: 0,
            },
            alerts: seeded_alerts(),
            tab: Tab::Overview,
            backend_notice: None,
        }
    }

    pub fn record_sample(&mut self, sample: TelemetrySample) -> Assessment {
        let assessment = Assessment::of(sample.value);
        self.window.push(sample);
        self.current = assessment;
        assessment
    }

    pub fn set_health(&mut self, health: HealthStatus) {
        self.status = health.status.to_uppercase();
    }

    pub fn set_metrics(&mut self, metrics: MetricsSnapshot) {
        self.metrics = metrics;
    }

    /// Keep prior values and surface why they could not be refreshed.
    pub fn note_backend_failure(&mut self, what: &str, reason: &str) {
        let notice = format!("{} unavailable: {}", what, reason);
        self.backend_notice = Some(match self.backend_notice.take() {
            Some(previous) => format!("{}; {}", previous, notice),
            None => notice,
        });
    }

    /// Radar contacts: a single centered blip while the threat is raised.
    pub fn radar_contacts(&self) -> Vec<(u32, u32)> {
        if self.current.severity == Severity::Safe {
            Vec::new()
        } else {
            vec![(50, 50)]
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}
