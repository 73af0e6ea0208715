//! HTTP server for the tree-service pricing engine.
//!
//! Environment:
//! - `TREECOST_CONFIG`: configuration directory (default `./config/tree_service`)
//! - `TREECOST_ADDR`: listen address (default `0.0.0.0:8080`)
//! - `RUST_LOG`: log filter (default `info`)

use std::future::Future;
use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tree_pricing_engine::api::{AppState, create_router};
use tree_pricing_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/tree_service";
const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir =
        std::env::var("TREECOST_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        engine = %config.engine().name,
        version = %config.engine().version,
        cost_model = config.default_cost_model().id(),
        "Configuration loaded"
    );

    let addr: SocketAddr = std::env::var("TREECOST_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    let app = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await;
}

/// Resolves when `signal` fires. If the listener cannot be installed the
/// server keeps running rather than shutting down at startup.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
