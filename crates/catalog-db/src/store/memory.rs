//! In-memory item store.

use catalog_core::{Item, ItemId, NewItem, Result};
use parking_lot::RwLock;

use super::ItemStore;

/// [`ItemStore`] kept entirely in process memory.
///
/// Items are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    items: Vec<Item>,
    last_id: i64,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemStore for MemoryItemStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn insert(&self, item: NewItem) -> Result<Item> {
        let mut inner = self.inner.write();
        inner.last_id += 1;
        let item = item.into_item(ItemId::from(inner.last_id));
        inner.items.push(item.clone());
        Ok(item)
    }

    fn list_all(&self) -> Result<Vec<Item>> {
        Ok(self.inner.read().items.clone())
    }

    fn get(&self, id: ItemId) -> Result<Option<Item>> {
        Ok(self.inner.read().items.iter().find(|i| i.id == id).cloned())
    }

    fn search(&self, keyword: &str) -> Result<Vec<Item>> {
        let needle = keyword.to_ascii_lowercase();
        Ok(self
            .inner
            .read()
            .items
            .iter()
            .filter(|i| i.name.to_ascii_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn concurrent_inserts_get_unique_ids() {
        let store = Arc::new(MemoryItemStore::new());
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .insert(NewItem::new(format!("item {n}"), "c", "x.jpg"))
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }
}
