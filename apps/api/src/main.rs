//! # Tienda API
//!
//! HTTP server for the product catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tienda API Server                               │
//! │                                                                         │
//! │  Client ───► axum (/api) ───► Handlers ───► ProductRepository ───►     │
//! │                  │                │              PostgreSQL             │
//! │                  │                └───► FileStore ───► local disk       │
//! │                  └── TraceLayer (request logging)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod files;
mod handlers;
mod routes;
mod state;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tienda_db::{Database, PgConfig};

use crate::config::Config;
use crate::files::FileStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (RUST_LOG wins; info otherwise)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Pick up .env if present; a missing file is fine.
    let _ = dotenvy::dotenv();

    info!("Starting Tienda API server...");

    // Load configuration
    let config = Config::load()?;
    info!(
        port = config.port,
        host_api = %config.host_api,
        static_dir = %config.static_dir,
        "Configuration loaded"
    );

    // Connect to database (runs migrations)
    let db = Database::connect(PgConfig::new(&config.database_url)).await?;
    info!("Connected to PostgreSQL, migrations applied");

    // Prepare the file store root
    let file_store = FileStore::new(&config.static_dir);
    file_store.ensure_root().await?;
    info!("File store ready");

    // Build the application
    let addr = config.bind_addr();
    let state = AppState::new(db.clone(), file_store, config);
    let app = routes::router(state);

    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    db.close().await;

    Ok(())
}

/// Completes on Ctrl-C (or SIGTERM on Unix), triggering graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
