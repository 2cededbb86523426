//! HTTP and WebSocket server for the Contact Manager.
//!
//! JSON endpoints for the contact workflows, plus `/hub`, the WebSocket
//! endpoint through which browsers join the change notifier.

pub mod handlers;
pub mod hub;

use crate::config::Config;
use crate::notifier::{ChangeHub, Notifier};
use crate::observability::MetricsTracker;
use crate::services::ContactService;
use anyhow::Result;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn ContactService>,
    pub notifier: Arc<dyn Notifier>,
    pub metrics: MetricsTracker,
    /// Pending signals buffered per hub client
    pub client_queue_capacity: usize,
    /// Upper bound on writing one frame to a hub client
    pub client_send_timeout: Duration,
}

impl AppState {
    pub fn new(
        service: Arc<dyn ContactService>,
        notifier: Arc<dyn Notifier>,
        metrics: MetricsTracker,
        config: &Config,
    ) -> Self {
        Self {
            service,
            notifier,
            metrics,
            client_queue_capacity: config.client_queue_capacity,
            client_send_timeout: config.client_send_timeout(),
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/contacts",
            get(handlers::list_contacts).post(handlers::save_contact),
        )
        .route("/contacts/new", get(handlers::new_contact))
        .route(
            "/contacts/{id}",
            get(handlers::edit_contact).delete(handlers::delete_contact),
        )
        .route("/hub", get(hub::hub_handler))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown` resolves.
///
/// The hub is drained as soon as shutdown starts, which closes every hub
/// connection so the server can finish.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    hub: Arc<ChangeHub>,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let app = build_router(state);

    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("Shutdown requested, draining change hub");
            hub.drain();
        })
        .await?;

    Ok(())
}

/// Bind the configured address and run until Ctrl-C.
pub async fn run_server(config: &Config, state: AppState, hub: Arc<ChangeHub>) -> Result<()> {
    let listener = TcpListener::bind(config.listen_addr).await?;
    serve(listener, state, hub, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
