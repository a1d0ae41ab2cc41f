//! Application context shared by all route handlers.
//!
//! [`AppContext`] is handed to handlers via Axum state. It wraps the item
//! store, image store, and configuration snapshot in `Arc`s.

use std::sync::Arc;

use catalog_core::config::Config;
use catalog_db::ItemStore;

use crate::images::ImageStore;

/// Application context shared by all request handlers (via Axum state).
///
/// This is cheaply cloneable because it only holds `Arc`s.
#[derive(Clone)]
pub struct AppContext {
    /// Item persistence backend selected at startup.
    pub items: Arc<dyn ItemStore>,
    /// Content-addressed image storage.
    pub images: Arc<ImageStore>,
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
}

impl AppContext {
    pub fn new(items: Arc<dyn ItemStore>, images: ImageStore, config: Config) -> Self {
        Self {
            items,
            images: Arc::new(images),
            config: Arc::new(config),
        }
    }
}
