//! d3bugr Docs API Server
//!
//! Serves the documentation catalog over HTTP.
//!
//! Usage:
//!   cargo run
//!
//! Environment:
//!   PORT / D3BUGR_PORT              - Server port (default: 8080)
//!   D3BUGR_HOST                     - Server host (default: 0.0.0.0)
//!   D3BUGR_DOCS_DIR                 - Docs directory (default: docs)
//!   D3BUGR_REQUEST_TIMEOUT_SECS     - Per-request timeout (default: 600)
//!   D3BUGR_MAX_CONCURRENT_REQUESTS  - In-flight request cap (default: 512)
//!   D3BUGR_MCP_PREFIX               - MCP tool prefix (default: mcp__d3bugr__)
//!   RUST_LOG                        - Log filter (default: info)

use d3bugr_docs::utils::constants::{APP_NAME, APP_VERSION, META_KEY};
use d3bugr_docs::{create_router, AppState, DocCatalog, DocumentKind, ServerConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    info!("🚀 {} v{}", APP_NAME, APP_VERSION);

    let config = ServerConfig::from_env()?;
    let addr = config.socket_addr()?;

    // Load documentation
    let catalog = DocCatalog::load(&config.docs_dir, config.mcp_prefix.clone())?;
    for key in catalog.keys() {
        if let Some(kind) = catalog.kind_of(key) {
            debug!("   {} {} ({})", kind.emoji(), key, kind.as_str());
        }
    }
    if catalog.kind_of(META_KEY) != Some(DocumentKind::Meta) {
        warn!(
            "⚠️ No meta.json in {}; /meta and /context will be empty",
            config.docs_dir.display()
        );
    }
    info!(
        "📚 {} documents, {} services from {}",
        catalog.len(),
        catalog.service_count(),
        config.docs_dir.display()
    );

    let state = Arc::new(AppState::new(catalog, config));
    let app = create_router(state.clone());

    info!("🌐 Listening on http://{}", addr);
    info!("");
    info!("Endpoints:");
    info!("  GET  /                  - Full documentation");
    info!("  GET  /meta              - Meta info and LLM context");
    info!("  GET  /context           - LLM context (what/why/when)");
    info!("  GET  /workflow          - Hunting workflow phases");
    info!("  GET  /services          - Services with metadata");
    info!("  GET  /services/:service - Full docs for one service");
    info!("  GET  /endpoints         - All endpoints across services");
    info!("  GET  /mcp               - MCP tool mappings");
    info!("  GET  /examples          - Usage examples");
    info!("  GET  /categories        - Services by category");
    info!("  GET  /llm/full          - Complete docs for LLM context");
    info!("  GET  /llm/compact       - Compact reference");
    info!("  GET  /health            - Health check");
    info!("");
    info!("Press Ctrl+C for graceful shutdown");

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("🛑 Shutdown complete after {}s uptime", state.uptime_seconds());

    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received, draining in-flight requests...");
}
