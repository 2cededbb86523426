//! Contact Manager - Main entry point
//!
//! Serves the contact endpoints and the `/hub` change-notification WebSocket.

use anyhow::Result;
use contact_manager::repositories::{
    ContactRepository, InMemoryContactRepository, JsonFileContactRepository,
};
use contact_manager::services::{ContactService, ContactServiceImpl};
use contact_manager::{AppState, ChangeHub, Config, MetricsTracker, Notifier};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Initialize logging (stderr), RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Configuration loaded successfully");

    // Initialize the store
    let repository: Arc<dyn ContactRepository> = match &config.data_file {
        Some(path) => match JsonFileContactRepository::open(path.clone()).await {
            Ok(repo) => Arc::new(repo),
            Err(e) => {
                error!("Failed to open contact store {}: {}", path.display(), e);
                return Err(e.into());
            }
        },
        None => {
            info!("No CONTACTS_DATA_FILE set, contacts are kept in memory");
            Arc::new(InMemoryContactRepository::new())
        }
    };

    // The change hub lives for the whole process and is drained on shutdown
    let metrics = MetricsTracker::new();
    let hub = Arc::new(ChangeHub::with_metrics(metrics.clone()));
    let notifier = hub.clone() as Arc<dyn Notifier>;

    let service = Arc::new(ContactServiceImpl::new(
        repository,
        notifier.clone(),
        metrics.clone(),
    )) as Arc<dyn ContactService>;

    let state = AppState::new(service, notifier, metrics.clone(), &config);

    info!(
        "Client queue capacity: {}, send timeout: {}s",
        config.client_queue_capacity, config.client_send_timeout_secs
    );

    contact_manager::server::run_server(&config, state, hub).await?;

    info!("{}", metrics.summary());
    info!("Contact Manager shutdown complete");
    Ok(())
}
