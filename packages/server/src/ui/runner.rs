//! Router construction and server lifecycle.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    infrastructure::{ChannelBroadcaster, InMemorySessionRepository},
    ui::{
        handler::{current_poll, health_check, poll_history, websocket_handler},
        signal::shutdown_signal,
        state::AppState,
    },
    usecase::SessionFacade,
};

/// Build a fresh session and its shared state.
pub fn create_state() -> Arc<AppState> {
    let repository = Arc::new(InMemorySessionRepository::default());
    let broadcaster = Arc::new(ChannelBroadcaster::new());
    Arc::new(AppState {
        facade: SessionFacade::new(repository, broadcaster.clone()),
        broadcaster,
    })
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/current-poll", get(current_poll))
        .route("/api/poll-history", get(poll_history))
        .route("/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = create_router(create_state());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Bind to the configured address and serve until Ctrl+C or SIGTERM.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(address = %listener.local_addr()?, "classroom server listening");
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);
    tracing::info!("HTTP API: http://{}/api/health", addr);

    serve(listener, shutdown_signal()).await
}
