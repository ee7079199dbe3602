//! Labtrack Server - Laboratory Management
//!
//! REST API over the lab's shared workbook.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use labtrack_server::{
    api,
    config::{AppConfig, StoreBackend},
    repository::{
        sheets::SheetsStore,
        store::{MemoryStore, TableStore},
        Repository,
    },
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("labtrack_server={},tower_http=debug", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Labtrack Server v{}", env!("CARGO_PKG_VERSION"));

    let store = build_store(&config)?;

    // Create repository and services
    let repository = Repository::new(store, &config.store);
    let services = Services::new(repository);

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = api::router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Pick the table store backend; the workbook itself is reached lazily
fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn TableStore>> {
    match config.store.backend {
        StoreBackend::Sheets => {
            let store = SheetsStore::new(config.sheets.clone())
                .context("Failed to build the Sheets client")?;
            tracing::info!("Using workbook '{}'", config.sheets.workbook);
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            let store = match &config.store.seed_file {
                Some(path) => MemoryStore::from_seed_file(path)
                    .with_context(|| format!("Failed to seed from {}", path.display()))?,
                None => MemoryStore::new(),
            };
            tracing::warn!("Using in-memory store; changes are lost on restart");
            Ok(Arc::new(store))
        }
    }
}
