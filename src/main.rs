// Main entry point - Dependency injection and console setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_poller::DashboardPoller;
use crate::application::session_service::SessionClient;
use crate::application::token_store::{MemoryTokenStore, TokenStore};
use crate::application::view_controller::ViewController;
use crate::infrastructure::config::load_config;
use crate::infrastructure::file_token_store::FileTokenStore;
use crate::infrastructure::http_api::HttpMissionApi;
use crate::presentation::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_config()?;

    // Initialize tracing; stdout belongs to the console screens
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Create backend client and token storage (infrastructure layer)
    let api = Arc::new(HttpMissionApi::new(
        &config.api.base_url,
        config.api.request_timeout(),
    )?);
    let store: Arc<dyn TokenStore> = if config.session.persist_token {
        let path = config.session.resolved_token_path();
        tracing::debug!("Session token file: {}", path.display());
        Arc::new(FileTokenStore::new(path))
    } else {
        Arc::new(MemoryTokenStore::new())
    };

    // Create session, controller and poller (application layer)
    let session = Arc::new(SessionClient::restore(api, store).await?);
    let controller = ViewController::new(session.clone()).await;
    let poller = DashboardPoller::new(session, config.poller.tick_interval());

    tracing::info!("Starting SpaceGuard console against {}", config.api.base_url);

    // Run console (presentation layer)
    presentation::console::run(AppState::new(controller, poller)).await
}
