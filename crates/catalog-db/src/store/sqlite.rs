//! SQLite-backed item store.

use catalog_core::{Item, ItemId, NewItem, Result};

use super::ItemStore;
use crate::pool::{get_conn, DbPool};
use crate::queries::items;

/// [`ItemStore`] over an r2d2 SQLite pool.
///
/// The pool runs migrations when it is created, so the `items` table is
/// guaranteed to exist before any operation here runs.
#[derive(Clone)]
pub struct SqliteItemStore {
    pool: DbPool,
}

impl SqliteItemStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl ItemStore for SqliteItemStore {
    fn backend(&self) -> &'static str {
        "sqlite"
    }

    fn insert(&self, item: NewItem) -> Result<Item> {
        let conn = get_conn(&self.pool)?;
        items::create_item(&conn, item).inspect_err(|e| {
            tracing::error!(error = %e, "Could not insert item");
        })
    }

    fn list_all(&self) -> Result<Vec<Item>> {
        let conn = get_conn(&self.pool)?;
        items::list_items(&conn)
    }

    fn get(&self, id: ItemId) -> Result<Option<Item>> {
        let conn = get_conn(&self.pool)?;
        items::get_item(&conn, id)
    }

    fn search(&self, keyword: &str) -> Result<Vec<Item>> {
        let conn = get_conn(&self.pool)?;
        items::search_items(&conn, keyword)
    }
}
