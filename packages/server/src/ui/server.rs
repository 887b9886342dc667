//! Server execution logic.

use std::{future::Future, sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        http::{create_session, get_room_detail, get_rooms, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Registry polling interval while draining connections on shutdown
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(20);

pub type ServerError = Box<dyn std::error::Error + Send + Sync>;

/// WebSocket chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state, Duration::from_secs(1));
/// server.run("127.0.0.1", 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    /// Upper bound for waiting on live connections after shutdown starts
    shutdown_timeout: Duration,
}

impl Server {
    pub fn new(state: AppState, shutdown_timeout: Duration) -> Self {
        Self {
            state: Arc::new(state),
            shutdown_timeout,
        }
    }

    /// Build the router with every endpoint
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws/{room_id}", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/sessions", post(create_session))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: &str, port: u16) -> Result<(), ServerError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws/{{room_id}}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on `listener` until `signal` resolves, then close every live
    /// connection and wait for the registry to drain.
    pub async fn serve<F>(self, listener: TcpListener, signal: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        let shutdown = self.state.shutdown.clone();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                signal.await;
                tracing::info!("Shutdown requested, closing connections");
                shutdown.cancel();
            })
            .await?;

        // Upgraded WebSocket connections outlive the HTTP server
        self.state.shutdown.cancel();
        self.drain().await;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    async fn drain(&self) {
        let registry = self.state.registry.clone();
        let drained = tokio::time::timeout(self.shutdown_timeout, async move {
            while !registry.is_empty().await {
                tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
            }
        })
        .await;

        if drained.is_err() {
            tracing::warn!(
                "{} connection(s) still open after {:?}",
                self.state.registry.len().await,
                self.shutdown_timeout
            );
        }
    }
}
