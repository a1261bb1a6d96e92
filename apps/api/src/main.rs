//! # Inventa API Server
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        API Server Startup                               │
//! │                                                                         │
//! │  1. tracing-subscriber (RUST_LOG or "info,inventa_*=debug")             │
//! │  2. ApiConfig::load()  defaults → api.toml → INVENTA_* env              │
//! │  3. Store::open(data_dir)                                               │
//! │  4. bind + axum::serve with graceful shutdown (Ctrl+C / SIGTERM)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context;
use inventa_api::{router, ApiConfig, AppState};
use inventa_store::{Store, StoreConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,inventa_api=debug,inventa_store=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_target(true)
        .init();

    info!("Starting Inventa API server...");

    let config = ApiConfig::load().context("loading configuration")?;
    info!(
        data_dir = %config.data_dir.display(),
        bind = %config.bind_address(),
        import_error_limit = config.import_error_limit,
        "Configuration loaded"
    );

    let store = Store::open(StoreConfig::new(&config.data_dir))
        .await
        .context("opening data directory")?;

    let addr = config.bind_address();
    let app = router(AppState::new(store, config));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
