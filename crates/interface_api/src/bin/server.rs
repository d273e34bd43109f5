//! Lost & Found Core - API Server Binary
//!
//! This binary starts the HTTP API server for the lost-and-found board.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin lostfound-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=8080 DATABASE_URL=postgres://... cargo run --bin lostfound-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - JWT signing secret (required in production)
//! * `API_JWT_EXPIRATION_SECS` - JWT token expiration in seconds (default: 3600)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_CDN_UPLOAD_URL` - Image CDN unsigned-upload endpoint
//! * `API_CDN_UPLOAD_PRESET` - Image CDN upload preset

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_claims::{ClaimEngine, ClaimStore};
use domain_posts::adapters::{ImageCdnConfig, ImageCdnStore};
use domain_posts::{PostService, PostStore};
use core_kernel::ObjectStore;
use infra_db::{create_pool, DatabaseConfig, PostgresClaimStore, PostgresPostStore};
use interface_api::{config::ApiConfig, create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, establishes the database
/// connection, wires the store adapters into the services, and starts the
/// HTTP server.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config()?;

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Lost & Found API Server"
    );

    let pool = create_pool(
        DatabaseConfig::new(config.database_url.clone()),
    )
    .await?;

    verify_database(&pool).await?;

    // Store adapters are constructed here and injected; no global state
    let post_store: Arc<dyn PostStore> = Arc::new(PostgresPostStore::new(pool.clone()));
    let claim_store: Arc<dyn ClaimStore> = Arc::new(PostgresClaimStore::new(pool.clone()));
    let object_store: Arc<dyn ObjectStore> = Arc::new(ImageCdnStore::new(ImageCdnConfig {
        upload_url: config.cdn_upload_url.clone(),
        upload_preset: config.cdn_upload_preset.clone(),
        timeout_secs: 30,
    })?);

    let state = AppState {
        posts: Arc::new(PostService::new(post_store.clone(), object_store.clone())),
        claims: Arc::new(ClaimEngine::new(claim_store, post_store, object_store)),
        pool,
        config: config.clone(),
    };

    let app = create_router(state);

    let addr: SocketAddr = config.server_addr().parse()?;
    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables, falling back to
/// individual variables and defaults.
fn load_config() -> Result<ApiConfig, Box<dyn std::error::Error>> {
    let config = ApiConfig::from_env().unwrap_or_else(|_| ApiConfig {
        host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
        port: std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080),
        jwt_secret: std::env::var("API_JWT_SECRET")
            .unwrap_or_else(|_| "dev-secret-change-in-production".to_string()),
        jwt_expiration_secs: std::env::var("API_JWT_EXPIRATION_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3600),
        database_url: std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("API_DATABASE_URL"))
            .unwrap_or_else(|_| "postgres://localhost/lostfound".to_string()),
        log_level: std::env::var("API_LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string()),
        cdn_upload_url: std::env::var("API_CDN_UPLOAD_URL").unwrap_or_default(),
        cdn_upload_preset: std::env::var("API_CDN_UPLOAD_PRESET").unwrap_or_default(),
    });

    Ok(config)
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Verifies database connectivity before serving.
///
/// Schema migrations are applied externally from
/// `crates/infra_db/migrations/`; this only confirms the pool works.
async fn verify_database(pool: &sqlx::PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Verifying database connectivity...");

    sqlx::query("SELECT 1").execute(pool).await?;

    tracing::info!("Database ready");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
