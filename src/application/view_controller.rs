// View controller - Routes user intent to screen transitions
use crate::application::session_service::{SessionClient, SessionError};
use crate::application::token_store::StoreError;
use crate::domain::session::Credentials;
use crate::domain::view::{LoginForm, View, ViewState};
use std::sync::Arc;

pub const REJECTION_MESSAGE: &str = "Invalid Mission Credentials";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted,
    Rejected(String),
}

pub struct ViewController {
    session: Arc<SessionClient>,
    state: ViewState,
    form: LoginForm,
}

impl ViewController {
    /// Starts on the landing page; a token restored from storage counts as logged in.
    pub async fn new(session: Arc<SessionClient>) -> Self {
        let logged_in = session.has_token().await;
        Self {
            session,
            state: ViewState::new(logged_in),
            form: LoginForm::default(),
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn session(&self) -> &Arc<SessionClient> {
        &self.session
    }

    pub fn request_launch(&mut self) {
        if self.state.logged_in {
            self.state.view = View::Dashboard;
        } else {
            self.state.show_login = true;
        }
    }

    pub async fn submit_credentials(&mut self, username: &str, password: &str) -> LoginOutcome {
        self.form.username = username.to_string();
        self.form.password = password.to_string();

        let credentials = Credentials::from_input(username, password);
        if !credentials.is_complete() {
            return LoginOutcome::Rejected("Service ID and Access Key are required".to_string());
        }

        match self.session.login(&credentials).await {
            Ok(_) => {
                self.state.logged_in = true;
                self.state.show_login = false;
                self.state.view = View::Dashboard;
                self.form.clear();
                LoginOutcome::Accepted
            }
            Err(SessionError::Api(_)) => LoginOutcome::Rejected(REJECTION_MESSAGE.to_string()),
            Err(SessionError::Store(e)) => {
                tracing::error!("Login accepted but token could not be stored: {}", e);
                LoginOutcome::Rejected(format!("Session could not be saved: {}", e))
            }
        }
    }

    pub fn cancel_login(&mut self) {
        self.state.show_login = false;
        self.form.clear();
    }

    pub fn exit_dashboard(&mut self) {
        self.state.view = View::Landing;
    }

    /// Leaves the view untouched when the stored token could not be removed.
    pub async fn logout(&mut self) -> Result<(), StoreError> {
        self.session.logout().await?;
        self.state.logged_in = false;
        self.state.show_login = false;
        self.state.view = View::Landing;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{BrokenTokenStore, StubApi};
    use crate::application::token_store::{MemoryTokenStore, TokenStore};
    use crate::domain::session::SessionToken;

    async fn controller(store: Arc<MemoryTokenStore>) -> (ViewController, Arc<StubApi>) {
        let api = Arc::new(StubApi::accepting("admin", "alpha9"));
        let session = SessionClient::restore(api.clone(), store).await.unwrap();
        (ViewController::new(Arc::new(session)).await, api)
    }

    #[tokio::test]
    async fn test_launch_without_login_opens_overlay() {
        let (mut vc, _) = controller(Arc::new(MemoryTokenStore::new())).await;

        vc.request_launch();
        assert!(vc.state().show_login);
        assert_eq!(vc.state().view, View::Landing);

        vc.request_launch();
        assert_eq!(vc.state().view, View::Landing);
    }

    #[tokio::test]
    async fn test_failed_login_leaves_state() {
        let store = Arc::new(MemoryTokenStore::new());
        let (mut vc, _) = controller(store.clone()).await;
        vc.request_launch();
        let before = vc.state();

        let outcome = vc.submit_credentials("admin", "nope").await;

        assert_eq!(outcome, LoginOutcome::Rejected(REJECTION_MESSAGE.to_string()));
        assert_eq!(vc.state(), before);
        assert!(!vc.state().logged_in);
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_successful_login_opens_dashboard() {
        let store = Arc::new(MemoryTokenStore::new());
        let (mut vc, api) = controller(store.clone()).await;
        vc.request_launch();

        let outcome = vc.submit_credentials(" admin ", "alpha9").await;

        assert_eq!(outcome, LoginOutcome::Accepted);
        assert_eq!(
            vc.state(),
            ViewState {
                logged_in: true,
                view: View::Dashboard,
                show_login: false,
            }
        );
        assert_eq!(store.load().await.unwrap(), Some(SessionToken::new(api.token.clone())));
    }

    #[tokio::test]
    async fn test_blank_credentials_rejected_locally() {
        let (mut vc, api) = controller(Arc::new(MemoryTokenStore::new())).await;
        vc.request_launch();

        let outcome = vc.submit_credentials("  ", "alpha9").await;

        assert!(matches!(outcome, LoginOutcome::Rejected(_)));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_clears_overlay_and_form() {
        let (mut vc, api) = controller(Arc::new(MemoryTokenStore::new())).await;
        vc.request_launch();
        vc.submit_credentials("admin", "nope").await;
        assert_eq!(vc.form().username, "admin");

        vc.cancel_login();

        assert!(!vc.state().show_login);
        assert_eq!(vc.form(), &LoginForm::default());
        assert_eq!(api.calls(), vec!["login".to_string()]);
    }

    #[tokio::test]
    async fn test_exit_keeps_login() {
        let (mut vc, _) = controller(Arc::new(MemoryTokenStore::new())).await;
        vc.request_launch();
        vc.submit_credentials("admin", "alpha9").await;

        vc.exit_dashboard();
        assert_eq!(vc.state().view, View::Landing);
        assert!(vc.state().logged_in);

        vc.request_launch();
        assert_eq!(vc.state().view, View::Dashboard);
        assert!(!vc.state().show_login);
    }

    #[tokio::test]
    async fn test_restored_token_counts_as_logged_in() {
        let store = Arc::new(MemoryTokenStore::with_token(SessionToken::new("saved")));
        let (mut vc, _) = controller(store).await;

        assert!(vc.state().logged_in);
        vc.request_launch();
        assert_eq!(vc.state().view, View::Dashboard);
    }

    async fn controller_over(store: Arc<BrokenTokenStore>) -> ViewController {
        let api = Arc::new(StubApi::accepting("admin", "alpha9"));
        let session = SessionClient::restore(api, store).await.unwrap();
        ViewController::new(Arc::new(session)).await
    }

    #[tokio::test]
    async fn test_unsaved_token_is_not_a_login() {
        let mut vc = controller_over(Arc::new(BrokenTokenStore::empty())).await;
        vc.request_launch();
        let before = vc.state();

        let outcome = vc.submit_credentials("admin", "alpha9").await;

        assert!(matches!(outcome, LoginOutcome::Rejected(ref m) if m.starts_with("Session could not be saved")));
        assert_eq!(vc.state(), before);
        assert!(!vc.state().logged_in);
        assert!(!vc.session().has_token().await);
    }

    #[tokio::test]
    async fn test_failed_logout_stays_logged_in() {
        let store = Arc::new(BrokenTokenStore::holding(SessionToken::new("saved")));
        let mut vc = controller_over(store).await;
        vc.request_launch();

        assert!(vc.logout().await.is_err());

        assert!(vc.state().logged_in);
        assert_eq!(vc.state().view, View::Dashboard);
        assert!(vc.session().has_token().await);
    }

    #[tokio::test]
    async fn test_logout_returns_to_landing() {
        let store = Arc::new(MemoryTokenStore::with_token(SessionToken::new("saved")));
        let (mut vc, _) = controller(store.clone()).await;
        vc.request_launch();

        vc.logout().await.unwrap();

        assert_eq!(vc.state(), ViewState::new(false));
        assert_eq!(store.load().await.unwrap(), None);
    }
}
