// Dashboard poller - Bootstrap fetch plus the synthetic telemetry loop
use crate::application::mission_api::ApiError;
use crate::application::session_service::SessionClient;
use crate::domain::dashboard::Dashboard;
use crate::domain::mission::{HealthStatus, MetricsSnapshot};
use crate::domain::telemetry::{Assessment, TelemetrySample};
use futures::{Stream, StreamExt};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_stream::wrappers::IntervalStream;

const EVENT_BUFFER: usize = 32;

/// Produces the raw value behind each telemetry tick.
pub trait SampleSource: Send + 'static {
    fn next_value(&mut self) -> f64;

    /// Shown on the dashboard so simulated data is never mistaken for model output.
    fn label(&self) -> &'static str;
}

/// Uniform random values in [0, 100). This is a simulation, not model output.
pub struct SimulatedSource {
    rng: StdRng,
}

impl SimulatedSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl SampleSource for SimulatedSource {
    fn next_value(&mut self) -> f64 {
        self.rng.gen_range(0.0..100.0)
    }

    fn label(&self) -> &'static str {
        "SIMULATED"
    }
}

#[derive(Debug)]
pub enum DashboardEvent {
    Health(Result<HealthStatus, ApiError>),
    Metrics(Result<MetricsSnapshot, ApiError>),
    Sample(TelemetrySample),
}

/// What changed after applying one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Update {
    Backend,
    Sample(TelemetrySample, Assessment),
}

/// One sample per period, the first one a full period after the stream is polled.
pub fn telemetry_stream(
    mut source: Box<dyn SampleSource>,
    period: Duration,
) -> impl Stream<Item = TelemetrySample> + Send {
    async_stream::stream! {
        let start = tokio::time::Instant::now() + period;
        let mut interval = tokio::time::interval_at(start, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticks = IntervalStream::new(interval);

        while ticks.next().await.is_some() {
            yield TelemetrySample::now(source.next_value());
        }
    }
}

#[derive(Clone)]
pub struct DashboardPoller {
    session: Arc<SessionClient>,
    tick_interval: Duration,
}

impl DashboardPoller {
    pub fn new(session: Arc<SessionClient>, tick_interval: Duration) -> Self {
        Self {
            session,
            tick_interval,
        }
    }

    /// Start both dashboard tasks. They live exactly as long as the returned handle.
    pub fn mount(&self, source: Box<dyn SampleSource>) -> DashboardHandle {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let source_label = source.label();

        tracing::info!(
            "Mounting dashboard: telemetry source {}, tick {:?}",
            source_label,
            self.tick_interval
        );

        let bootstrap = tokio::spawn(bootstrap(
            self.session.clone(),
            tx.clone(),
            shutdown_rx.clone(),
        ));
        let telemetry = tokio::spawn(telemetry_loop(
            source,
            self.tick_interval,
            tx,
            shutdown_rx,
        ));

        DashboardHandle {
            dashboard: Dashboard::new(),
            source_label,
            events: rx,
            shutdown: shutdown_tx,
            tasks: vec![bootstrap, telemetry],
        }
    }
}

async fn bootstrap(
    session: Arc<SessionClient>,
    tx: mpsc::Sender<DashboardEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    let work = async {
        let health = session.health().await;
        if tx.send(DashboardEvent::Health(health)).await.is_err() {
            return;
        }
        let metrics = session.metrics().await;
        let _ = tx.send(DashboardEvent::Metrics(metrics)).await;
    };

    // Dropping `work` cancels whichever request is still in flight.
    tokio::select! {
        _ = work => tracing::debug!("Dashboard bootstrap finished"),
        _ = shutdown.changed() => tracing::debug!("Dashboard bootstrap cancelled"),
    }
}

async fn telemetry_loop(
    source: Box<dyn SampleSource>,
    period: Duration,
    tx: mpsc::Sender<DashboardEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    let samples = telemetry_stream(source, period);
    tokio::pin!(samples);

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            sample = samples.next() => match sample {
                Some(sample) => {
                    if tx.send(DashboardEvent::Sample(sample)).await.is_err() {
                        break;
                    }
                }
                None => break,
            },
        }
    }

    tracing::debug!("Telemetry loop stopped");
}

/// Owns the dashboard state; the only place dashboard events are applied.
pub struct DashboardHandle {
    dashboard: Dashboard,
    source_label: &'static str,
    events: mpsc::Receiver<DashboardEvent>,
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl DashboardHandle {
    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    pub fn source_label(&self) -> &'static str {
        self.source_label
    }

    /// Wait for the next event and apply it. `None` once both tasks have ended.
    pub async fn pump(&mut self) -> Option<Update> {
        let event = self.events.recv().await?;
        Some(self.apply(event))
    }

    fn apply(&mut self, event: DashboardEvent) -> Update {
        match event {
            DashboardEvent::Health(Ok(health)) => {
                self.dashboard.set_health(health);
                Update::Backend
            }
            DashboardEvent::Health(Err(e)) => {
                tracing::warn!("Error fetching health: {}", e);
                self.dashboard.note_backend_failure("health", &e.to_string());
                Update::Backend
            }
            DashboardEvent::Metrics(Ok(metrics)) => {
                self.dashboard.set_metrics(metrics);
                Update::Backend
            }
            DashboardEvent::Metrics(Err(e)) => {
                tracing::warn!("Error fetching metrics: {}", e);
                self.dashboard.note_backend_failure("metrics", &e.to_string());
                Update::Backend
            }
            DashboardEvent::Sample(sample) => {
                let assessment = self.dashboard.record_sample(sample.clone());
                Update::Sample(sample, assessment)
            }
        }
    }

    /// Stop both tasks and wait for them. Nothing sent afterwards reaches the state.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown.send(true);
        self.events.close();

        for task in std::mem::take(&mut self.tasks) {
            if let Err(e) = task.await {
                tracing::warn!("Dashboard task ended abnormally: {}", e);
            }
        }
        tracing::info!("Dashboard unmounted");
    }
}

impl Drop for DashboardHandle {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}
