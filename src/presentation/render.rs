// Text rendering of the console screens
use crate::domain::analytics::{DISTRIBUTION, LOSS_CURVE, SCORES, SYSTEM_SPECS};
use crate::domain::dashboard::{CORE_LOAD, Dashboard, UPTIME};
use crate::domain::mission::PredictionResult;
use crate::domain::telemetry::{Assessment, SampleWindow, TelemetrySample};
use crate::domain::view::{LoginForm, Tab};
use std::fmt::Write;

const SPARK: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn landing(logged_in: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== SPACEGUARD ===");
    let _ = writeln!(out, "System Specifications");
    for (name, value) in SYSTEM_SPECS {
        let _ = writeln!(out, "  {:<16}{}", name, value);
    }
    let hint = if logged_in {
        "launch to enter the dashboard, logout to end the session"
    } else {
        "launch to authenticate"
    };
    let _ = writeln!(out, "[{}]", hint);
    out
}

pub fn login(form: &LoginForm) -> String {
    let service_id = if form.username.is_empty() {
        "admin".to_string()
    } else {
        form.username.clone()
    };
    format!(
        "=== IDENTITY ===\n  Service ID  {}\n  Access Key  {}\n[auth <service-id> <access-key> to authenticate, abort to cancel]\n",
        service_id,
        "*".repeat(form.password.len()),
    )
}

pub fn dashboard(dashboard: &Dashboard, source_label: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "=== SPACEGUARD DASHBOARD ===  status {}  uptime {}  model dev {}",
        dashboard.status,
        UPTIME,
        dashboard.metrics.model_deviation()
    );
    if let Some(notice) = &dashboard.backend_notice {
        let _ = writeln!(out, "!! {}", notice);
    }

    match dashboard.tab {
        Tab::Overview => overview(&mut out, dashboard, source_label),
        Tab::Analytics => analytics(&mut out),
        Tab::Sensors | Tab::History => {
            let _ = writeln!(out, "{} MODULE", dashboard.tab.as_str().to_uppercase());
            let _ = writeln!(out, "ACCESSING DATA STREAM ALPHA-7... PLEASE STAND BY");
        }
    }

    let _ = writeln!(out, "[tab: {}]  exit to leave", dashboard.tab);
    out
}

fn overview(out: &mut String, dashboard: &Dashboard, source_label: &str) {
    let _ = writeln!(out, "-- System Alerts");
    for alert in &dashboard.alerts {
        let _ = writeln!(out, "  {:<8} {}  {}", alert.severity, alert.time, alert.message);
    }

    let _ = writeln!(out, "-- Processor Affinity");
    for (core, load) in CORE_LOAD.iter().enumerate() {
        let _ = writeln!(out, "  Core {}  {:>3}%", core, load);
    }

    let contacts = dashboard.radar_contacts();
    if contacts.is_empty() {
        let _ = writeln!(out, "-- Radar  clear");
    } else {
        let positions: Vec<String> = contacts.iter().map(|(x, y)| format!("({},{})", x, y)).collect();
        let _ = writeln!(out, "-- Radar  contact at {}", positions.join(" "));
    }

    let _ = writeln!(
        out,
        "-- Anomaly Score {}  Base MSE {}  System Threat {}",
        dashboard.current.score,
        dashboard.metrics.base_mse(),
        dashboard.current.severity
    );
    let _ = writeln!(out, "-- Telemetry X-9 [{}]", source_label);
    let _ = writeln!(out, "  {}", sparkline(&dashboard.window));
}

fn analytics(out: &mut String) {
    let _ = writeln!(out, "-- Neural Analytics: training loss (LSTM-AE)");
    let _ = writeln!(out, "  {:>5}  {:>6}  {:>6}", "epoch", "loss", "val");
    for point in LOSS_CURVE {
        let _ = writeln!(out, "  {:>5}  {:>6.3}  {:>6.3}", point.epoch, point.loss, point.val_loss);
    }
    let _ = writeln!(out, "-- Anomaly Distribution");
    for share in DISTRIBUTION {
        let _ = writeln!(out, "  {:<8}{:>3}%", share.name, share.percent);
    }
    let _ = writeln!(
        out,
        "-- Precision {:.3}  Recall {:.3}  F1-Score {:.3}",
        SCORES.precision, SCORES.recall, SCORES.f1
    );
}

/// One bar per retained sample, scaled over 0..100.
pub fn sparkline(window: &SampleWindow) -> String {
    if window.is_empty() {
        return "(waiting for telemetry)".to_string();
    }
    window
        .iter()
        .map(|s| {
            let idx = ((s.value.clamp(0.0, 99.999) / 100.0) * SPARK.len() as f64) as usize;
            SPARK[idx.min(SPARK.len() - 1)]
        })
        .collect()
}

pub fn tick(sample: &TelemetrySample, assessment: &Assessment) -> String {
    format!(
        "{}  value {:>6.2}  score {:>3}  {}\n",
        sample.time, sample.value, assessment.score, assessment.severity
    )
}

pub fn prediction(result: &PredictionResult) -> String {
    let mut out = String::from("prediction:");
    if let Some(score) = result.anomaly_score {
        let _ = write!(out, " score {:.2}", score);
    }
    if let Some(error) = result.reconstruction_error {
        let _ = write!(out, " reconstruction error {:.6}", error);
    }
    if let Some(anomaly) = result.is_anomaly {
        let _ = write!(out, " anomaly {}", if anomaly { "YES" } else { "no" });
    }
    if let Some(severity) = &result.severity {
        let _ = write!(out, " severity {}", severity);
    }
    if let Some(contributions) = result.contributions.as_ref().filter(|c| !c.is_null()) {
        let _ = write!(out, "\n  contributions {}", contributions);
    }
    out.push('\n');
    out
}
