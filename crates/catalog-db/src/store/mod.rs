//! The item store capability and its backends.

mod memory;
mod sqlite;

use catalog_core::{Item, ItemId, NewItem, Result};

pub use memory::MemoryItemStore;
pub use sqlite::SqliteItemStore;

/// Persistence for catalog items.
///
/// Implementations must be safe to share across threads (`Send + Sync`);
/// the server holds one behind an `Arc<dyn ItemStore>` chosen at startup.
pub trait ItemStore: Send + Sync {
    /// Human-readable name identifying this backend.
    fn backend(&self) -> &'static str;

    /// Persist a new item and return it with its store-assigned id.
    fn insert(&self, item: NewItem) -> Result<Item>;

    /// Return every item, each exactly once, in id order.
    ///
    /// Image names are bare filenames. An empty store yields an empty vector.
    fn list_all(&self) -> Result<Vec<Item>>;

    /// Look up a single item.
    fn get(&self, id: ItemId) -> Result<Option<Item>>;

    /// Items whose name contains `keyword` (ASCII case-insensitive), in id order.
    fn search(&self, keyword: &str) -> Result<Vec<Item>>;
}
