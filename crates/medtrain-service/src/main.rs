//! MedTrain Service - HTTP API for the medical-device training catalog
//!
//! This is the main entry point for the medtrain service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medtrain_service::{create_router, AppState, ServiceConfig};
use medtrain_store::SqliteStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,medtrain=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MedTrain Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        database_path = %config.database_path,
        upload_dir = %config.upload_dir,
        ai_configured = %config.groq_api_key.is_some(),
        require_admin_session = %config.require_admin_session,
        "Service configuration loaded"
    );

    // Open the catalog database (migrates and seeds on first run)
    let store = SqliteStore::open(&config.database_path).await?;

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    // Build app state
    let state = AppState::new(Arc::new(store), config.clone());

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
