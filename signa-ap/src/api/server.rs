//! HTTP server setup and routing
//!
//! Sets up the Axum HTTP server with routes for translation, playback state
//! and SSE.

use crate::error::{Error, Result};
use crate::playback::PlaybackEngine;
use crate::state::SharedState;
use crate::transcribe::Transcriber;
use axum::{
    routing::{get, post},
    Router,
};
use signa_common::GlossTranslator;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application context passed to all handlers
#[derive(Clone)]
pub struct AppContext {
    pub state: Arc<SharedState>,
    pub engine: Arc<PlaybackEngine>,
    pub translator: Arc<GlossTranslator>,
    /// `None` when no capture command is configured; `/listen` then reports 503
    pub transcriber: Option<Arc<dyn Transcriber>>,
}

/// Build the router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        // Health endpoint
        .route("/health", get(super::handlers::health))
        .route("/build_info", get(super::handlers::get_build_info))

        // Translation
        .route("/listen", get(super::handlers::listen))
        .route("/translate", post(super::handlers::translate))

        // Playback
        .route("/playback/state", get(super::handlers::get_playback_state))

        // SSE event stream
        .route("/events", get(super::sse::event_stream))

        // Attach application context
        .with_state(ctx)

        .layer(TraceLayer::new_for_http())

        // Frontend is served from another origin
        .layer(CorsLayer::permissive())
}

/// Run HTTP API server until `shutdown` resolves
pub async fn run<F>(port: u16, ctx: AppContext, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(ctx);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Http(format!("Failed to bind to {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::Http(format!("Server error: {}", e)))?;

    Ok(())
}
