// Console application state: the controller plus the mounted dashboard, if any
use crate::application::dashboard_poller::{
    DashboardHandle, DashboardPoller, SimulatedSource, Update,
};
use crate::application::view_controller::{LoginOutcome, ViewController};
use crate::domain::mission::PredictRequest;
use crate::domain::view::{Tab, View};
use crate::presentation::command::{Command, HELP};
use crate::presentation::render;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Print(String),
    Quit,
}

pub struct AppState {
    controller: ViewController,
    poller: DashboardPoller,
    dashboard: Option<DashboardHandle>,
}

impl AppState {
    pub fn new(controller: ViewController, poller: DashboardPoller) -> Self {
        Self {
            controller,
            poller,
            dashboard: None,
        }
    }

    #[cfg(test)]
    pub fn controller(&self) -> &ViewController {
        &self.controller
    }

    #[cfg(test)]
    pub fn dashboard(&self) -> Option<&DashboardHandle> {
        self.dashboard.as_ref()
    }

    /// The overlay covers whatever view is underneath.
    pub fn screen(&self) -> String {
        let state = self.controller.state();
        if state.show_login {
            return render::login(self.controller.form());
        }
        match (state.view, &self.dashboard) {
            (View::Dashboard, Some(handle)) => {
                render::dashboard(handle.dashboard(), handle.source_label())
            }
            _ => render::landing(state.logged_in),
        }
    }

    pub async fn handle(&mut self, command: Command) -> Outcome {
        let state = self.controller.state();

        let message = match command {
            Command::Help => Some(HELP.to_string()),
            Command::Quit => return Outcome::Quit,
            Command::Show => None,
            Command::Launch if state.show_login => {
                Some("login form is open: auth or abort".to_string())
            }
            Command::Launch => {
                self.controller.request_launch();
                None
            }
            Command::Auth { .. } | Command::Abort if !state.show_login => {
                Some("no login form open: use launch".to_string())
            }
            Command::Auth { username, password } => {
                match self.controller.submit_credentials(&username, &password).await {
                    LoginOutcome::Accepted => None,
                    LoginOutcome::Rejected(reason) => Some(reason),
                }
            }
            Command::Abort => {
                self.controller.cancel_login();
                None
            }
            Command::Exit | Command::Tab(_) if state.view != View::Dashboard => {
                Some("not on the dashboard".to_string())
            }
            Command::Exit => {
                self.controller.exit_dashboard();
                None
            }
            Command::Tab(tab) => {
                self.select_tab(tab);
                None
            }
            Command::Logout => match self.controller.logout().await {
                Ok(()) => None,
                Err(e) => Some(format!("logout failed, still signed in: {}", e)),
            },
            Command::Predict(values) => return Outcome::Print(self.predict(&values).await),
        };

        self.reconcile().await;

        let mut out = String::new();
        if let Some(message) = message {
            out.push_str(&message);
            out.push('\n');
        }
        out.push_str(&self.screen());
        Outcome::Print(out)
    }

    fn select_tab(&mut self, tab: Tab) {
        if let Some(handle) = self.dashboard.as_mut() {
            handle.dashboard_mut().tab = tab;
        }
    }

    async fn predict(&self, values: &[f64]) -> String {
        let request = PredictRequest::from_readings(values);
        match self.controller.session().predict(&request).await {
            Ok(result) => render::prediction(&result),
            Err(e) => {
                tracing::warn!("Error predicting anomaly: {}", e);
                format!("prediction failed: {}\n", e)
            }
        }
    }

    /// Mount or tear down the dashboard tasks so they match the current view.
    async fn reconcile(&mut self) {
        let on_dashboard = self.controller.state().view == View::Dashboard;
        match (on_dashboard, self.dashboard.is_some()) {
            (true, false) => {
                let handle = self.poller.mount(Box::new(SimulatedSource::from_entropy()));
                self.dashboard = Some(handle);
            }
            (false, true) => {
                if let Some(handle) = self.dashboard.take() {
                    handle.shutdown().await;
                }
            }
            _ => {}
        }
    }

    /// Next applied dashboard event. Never resolves while no dashboard is mounted.
    pub async fn next_update(&mut self) -> Option<Update> {
        match self.dashboard.as_mut() {
            Some(handle) => handle.pump().await,
            None => std::future::pending().await,
        }
    }

    /// Whether tick lines should be streamed to the console.
    pub fn wants_ticks(&self) -> bool {
        let state = self.controller.state();
        !state.show_login
            && self
                .dashboard
                .as_ref()
                .map(|h| h.dashboard().tab == Tab::Overview)
                .unwrap_or(false)
    }

    pub async fn close(mut self) {
        if let Some(handle) = self.dashboard.take() {
            handle.shutdown().await;
        }
    }
}
