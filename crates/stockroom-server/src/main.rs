use anyhow::{Context, Result};
use std::sync::Arc;
use stockroom::{Config, FileStorage, InventoryStore};
use stockroom_server::{router, AppState};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path =
        std::env::var("STOCKROOM_CONFIG").unwrap_or_else(|_| "stockroom.toml".to_string());
    let config = Config::load(&config_path)?.with_overrides(|key| std::env::var(key).ok())?;

    info!(
        "{} starting, data in {:?}",
        config.project.name, config.storage.data_dir
    );

    let storage = Arc::new(FileStorage::new(&config.storage.data_dir));
    let store = InventoryStore::open(storage, config.storage.keys())
        .context("Failed to load inventory snapshots")?;

    let state = AppState::new(store);
    let app = router(state.clone());

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    match Arc::try_unwrap(state.store) {
        Ok(lock) => lock.into_inner().close()?,
        Err(shared) => {
            warn!("Inventory still shared at shutdown, flushing in place");
            shared.read().await.flush()?;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
