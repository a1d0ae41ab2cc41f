//! Item insert, list, lookup, and search operations.

use catalog_core::{public_image_name, Error, Item, ItemId, NewItem, Result};
use rusqlite::Connection;

/// Column list used in SELECT statements.
const COLS: &str = "id, name, category, image_name";

/// Build an [`Item`] from a row selected with [`COLS`].
fn item_from_row(row: &rusqlite::Row) -> rusqlite::Result<Item> {
    let image_name: String = row.get(3)?;
    Ok(Item {
        id: ItemId::from(row.get::<_, i64>(0)?),
        name: row.get(1)?,
        category: row.get(2)?,
        image_name: public_image_name(&image_name),
    })
}

/// Insert a new item and return it with its assigned id.
pub fn create_item(conn: &Connection, item: NewItem) -> Result<Item> {
    conn.execute(
        "INSERT INTO items (name, category, image_name) VALUES (?1, ?2, ?3)",
        rusqlite::params![item.name, item.category, item.image_name],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    let id = ItemId::from(conn.last_insert_rowid());
    Ok(item.into_item(id))
}

/// List every item in id order.
pub fn list_items(conn: &Connection) -> Result<Vec<Item>> {
    let q = format!("SELECT {COLS} FROM items ORDER BY id ASC");
    let mut stmt = conn.prepare(&q).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([], item_from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Get an item by ID.
pub fn get_item(conn: &Connection, id: ItemId) -> Result<Option<Item>> {
    let q = format!("SELECT {COLS} FROM items WHERE id = ?1");
    let result = conn.query_row(&q, [id.get()], item_from_row);
    match result {
        Ok(i) => Ok(Some(i)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e.to_string())),
    }
}

/// Search items whose name contains `keyword`.
///
/// `%`, `_` and `\` in the keyword match literally.
pub fn search_items(conn: &Connection, keyword: &str) -> Result<Vec<Item>> {
    let pattern = format!("%{}%", escape_like(keyword));
    let q = format!(
        "SELECT {COLS} FROM items WHERE name LIKE ?1 ESCAPE '\\' ORDER BY id ASC"
    );
    let mut stmt = conn.prepare(&q).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([pattern], item_from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
