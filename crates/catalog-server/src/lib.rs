//! catalog-server: HTTP API server for the item catalog.
//!
//! This crate ties the item store and image store together into a running
//! server application. It provides:
//!
//! - Axum-based HTTP API for listing, adding, and searching items
//! - Content-addressed image storage with a default-image fallback
//! - Request ID, CORS, and tracing middleware
//! - Graceful shutdown via signal handling

pub mod context;
pub mod error;
pub mod images;
pub mod middleware;
pub mod router;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use catalog_core::config::{Config, StorageConfig, StoreBackend};
use catalog_db::{ItemStore, MemoryItemStore, SqliteItemStore};

use crate::context::AppContext;
use crate::images::ImageStore;

/// Construct the item store backend named by the storage config.
///
/// For SQLite the database's parent directory is created if needed and
/// migrations are run before the store is returned.
pub fn build_item_store(storage: &StorageConfig) -> catalog_core::Result<Arc<dyn ItemStore>> {
    match storage.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory item store");
            Ok(Arc::new(MemoryItemStore::new()))
        }
        StoreBackend::Sqlite => {
            let db_path = &storage.db_path;
            let existed = db_path.exists();
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                    tracing::info!("Created database directory {}", parent.display());
                }
            }

            let db_str = db_path.to_string_lossy();
            let pool = catalog_db::pool::init_pool(&db_str)?;
            if existed {
                tracing::info!("Database opened (existing) at {db_str}");
            } else {
                tracing::info!("Database created (new) at {db_str}");
            }
            Ok(Arc::new(SqliteItemStore::new(pool)))
        }
    }
}

/// Start the catalog server.
///
/// This is the main entry point. It builds the stores, prepares the image
/// directory, constructs the [`AppContext`], and serves HTTP until a
/// shutdown signal is received.
pub async fn start(config: Config) -> catalog_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let items = build_item_store(&config.storage)?;

    let images = ImageStore::new(&config.storage.image_dir);
    images.ensure_layout()?;
    tracing::info!("Storing images in {}", images.dir().display());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| catalog_core::Error::Internal(format!("Invalid server address: {e}")))?;

    let backend = items.backend();
    let ctx = AppContext::new(items, images, config);
    let app = router::build_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| catalog_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!(backend, "http server started on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
