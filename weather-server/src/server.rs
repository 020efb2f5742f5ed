//! HTTP surface: every request is a tool call envelope.

use anyhow::Context;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use weather_tools::{Config, Dispatcher, provider::provider_from_config};

#[derive(Debug, Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

/// Any method on any path is routed to the dispatcher.
pub fn create_router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .fallback(handle_tool_call)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { dispatcher })
}

async fn handle_tool_call(State(state): State<AppState>, body: Bytes) -> Response {
    let reply = state.dispatcher.dispatch(&body).await;
    (reply.status, Json(reply.body)).into_response()
}

pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let provider = provider_from_config(config)?;
    let router = create_router(Dispatcher::new(provider));

    let listener = TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;

    info!(
        bind = %config.bind,
        upstream = %config.base_url,
        "weather-server v{} listening",
        env!("CARGO_PKG_VERSION")
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
