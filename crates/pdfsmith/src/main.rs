//! pdfsmith - HTTP service for uploading PDF documents and applying
//! text replacements behind token authentication

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;

use config::Config;
use pdfsmith_api::{AppState, create_router};
use pdfsmith_auth::TokenService;
use pdfsmith_storage::LocalDocumentStore;
use pdfsmith_users::FileUserStore;

/// pdfsmith - PDF document service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Bind address
    #[arg(long, env = "PDFSMITH_BIND")]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "PDFSMITH_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config)?;

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting pdfsmith v{}", env!("CARGO_PKG_VERSION"));

    // Token signing secret: environment wins over the config file
    let jwt_secret =
        std::env::var("PDFSMITH_JWT_SECRET").unwrap_or_else(|_| config.auth.jwt_secret.clone());
    if jwt_secret == config::default_jwt_secret() {
        warn!(
            "Using the built-in token signing secret; set PDFSMITH_JWT_SECRET before running in production"
        );
    }

    // Initialize stores under the storage root
    let storage_root = Path::new(&config.storage.path);
    let users = Arc::new(FileUserStore::new(storage_root.join("users.jsonl")).await?);
    let documents = Arc::new(LocalDocumentStore::new(storage_root.join("documents")).await?);

    // Initialize token service
    let tokens = Arc::new(TokenService::new(
        &jwt_secret,
        config.auth.token_ttl_minutes,
    ));

    // Create application state
    let state = AppState::new(users, documents, tokens);

    // Create router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Determine bind address
    let bind_addr = args.bind.unwrap_or(config.server.bind_address);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind_addr, port).parse()?;

    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Initialize logging
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    info!("Shutdown signal received");
}
