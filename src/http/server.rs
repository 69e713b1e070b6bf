//! # HTTP Server
//!
//! Builds the router (API routes, static files, CORS, body cap, tracing) and
//! runs it until Ctrl-C.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::config::ServerConfig;
use super::routes::{note_routes, AppState};
use crate::error::Result;
use crate::storage::NoteStore;

const ENDPOINTS: &[&str] = &[
    "GET    /api/notes",
    "GET    /api/notes/admin/all",
    "GET    /api/notes/{code}",
    "GET    /api/notes/owner/{clientId}",
    "POST   /api/notes",
    "POST   /api/notes/{code}/replies",
    "DELETE /api/notes/{code}",
];

/// Build the full application router
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", note_routes(state))
        .fallback_service(ServeDir::new(config.static_dir()))
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(RequestBodyLimitLayer::new(config.body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Serve `store` on the configured address until Ctrl-C
pub async fn serve(config: ServerConfig, store: NoteStore) -> Result<()> {
    let addr = config.socket_addr();
    let app = build_router(AppState::new(store), &config);

    let listener = TcpListener::bind(&addr).await?;

    info!(%addr, root = %config.root_dir.display(), "Snow Notes server listening");
    for endpoint in ENDPOINTS {
        info!("  {}", endpoint);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
