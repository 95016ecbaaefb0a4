//! rigscan-api - Hardware analysis and recommendation microservice
//!
//! Ingests hardware snapshots from client agents, persists them, and serves
//! reports with streamed, LLM-generated optimization recommendations.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rigscan_api::config;
use rigscan_api::llm::GroqGenerator;
use rigscan_api::store::SqliteStore;
use rigscan_api::AppState;

/// Command-line arguments for rigscan-api
#[derive(Parser, Debug)]
#[command(name = "rigscan-api")]
#[command(about = "Hardware analysis and recommendation service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5780", env = "RIGSCAN_PORT")]
    port: u16,

    /// Path to the SQLite database file
    #[arg(short, long, env = "RIGSCAN_DATABASE")]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rigscan_api=info,rigscan_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting RigScan API v{}", env!("CARGO_PKG_VERSION"));

    let config = config::resolve(args.port, args.database);

    let store = SqliteStore::connect(&config.database_path)
        .await
        .context("Failed to open analysis database")?;
    info!("Database connection established");

    if config.groq_api_key.is_none() {
        warn!(
            "No Groq API key configured ({} or the settings file); \
             recommendation requests will fail until one is set",
            config::GROQ_API_KEY_ENV
        );
    }
    let generator = GroqGenerator::new(config.groq_api_key, config.groq_model);

    let state = AppState::new(Arc::new(store), Arc::new(generator));
    let app = rigscan_api::build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
