mod backend;
mod config;
mod errors;
mod format;
mod models;
mod routes;
mod state;
mod storage;
mod views;

#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::backend::BackendClient;
use crate::config::{Config, StorageLocation};
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::{AppStorage, FileStore, KeyValueStore, MemoryStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobmatch v{}", env!("CARGO_PKG_VERSION"));

    let backend = BackendClient::new(config.backend_url.clone(), config.backend_token.clone())?;
    info!(
        "Backend client initialized ({}, token {})",
        backend.base_url(),
        if config.backend_token.is_some() {
            "configured"
        } else {
            "not configured"
        }
    );

    let store: Arc<dyn KeyValueStore> = match &config.storage {
        StorageLocation::Directory(dir) => Arc::new(FileStore::open(dir).await?),
        StorageLocation::Memory => {
            warn!("Using in-memory storage; history is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };
    let storage = AppStorage::new(store);

    let state = AppState { backend, storage };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
