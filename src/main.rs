//! Graph View Server - Binary Entry Point
//!
//! Serves the render-ready graph for a memory snapshot file over HTTP and
//! WebSocket.

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use memory_graph_view::api::{create_router, AppState};
use memory_graph_view::config::ServerConfig;
use memory_graph_view::view::{FileSource, ViewController};
use memory_graph_view::GraphViewResult;

#[tokio::main]
async fn main() -> GraphViewResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("memory_graph_view=info")),
        )
        .init();

    let config = ServerConfig::from_env();
    info!(path = %config.file_path.display(), "Starting graph view server");

    let source = Arc::new(FileSource::new(config.file_path.clone()));
    let controller = Arc::new(ViewController::with_settings(source, config.view_settings()));

    // Start with whatever is on disk; a failed first load is not fatal
    if let Err(e) = controller.refresh().await {
        warn!(error = %e, "Initial graph load failed");
    }

    let app = create_router(Arc::new(AppState::new(controller)));
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %config.bind_addr(), "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
