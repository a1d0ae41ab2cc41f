//! Catalog item model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Store-assigned identifier for a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    /// Return the inner integer value.
    #[must_use]
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ItemId> for i64 {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

/// A persisted catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    /// Bare filename of the stored image, relative to the image directory.
    pub image_name: String,
}

/// Insert payload for a new item; the id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub image_name: String,
}

impl NewItem {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        image_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            image_name: image_name.into(),
        }
    }

    /// Attach a store-assigned id.
    pub fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            category: self.category,
            image_name: public_image_name(&self.image_name),
        }
    }
}

/// Reduce a stored image reference to its bare filename.
///
/// Image references handed to clients never carry a directory component,
/// whatever layout the store used when the row was written.
pub fn public_image_name(stored: &str) -> String {
    Path::new(stored)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| stored.to_string())
}
