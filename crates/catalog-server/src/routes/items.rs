//! Item listing, creation, lookup, and search handlers.

use axum::extract::{Multipart, Path, Query, State};
use axum::Json;
use catalog_core::{Error, Item, ItemId, NewItem};
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::AppError;

/// Envelope for item collections.
#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<Item>,
}

/// Confirmation returned after an item is stored.
#[derive(Debug, Serialize)]
pub struct AddItemResponse {
    pub message: String,
}

/// Query parameters for keyword search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub keyword: Option<String>,
}

/// Parsed and validated multipart body of an add-item request.
#[derive(Debug)]
struct AddItemRequest {
    name: String,
    category: String,
    image: Vec<u8>,
}

/// Read the `name`, `category`, and `image` parts of an add-item request.
///
/// Any extraction failure, a missing image file part, or an empty name or
/// category is a validation error. Unknown parts, and an `image` part sent
/// as a plain field without a file name, are ignored.
async fn parse_add_item_request(mut multipart: Multipart) -> Result<AddItemRequest, Error> {
    let mut name = None;
    let mut category = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("invalid multipart request: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => {
                name = Some(field.text().await.map_err(|e| {
                    Error::Validation(format!("failed to read name: {e}"))
                })?)
            }
            "category" => {
                category = Some(field.text().await.map_err(|e| {
                    Error::Validation(format!("failed to read category: {e}"))
                })?)
            }
            "image" if field.file_name().is_some() => {
                image = Some(field.bytes().await.map_err(|e| {
                    Error::Validation(format!("failed to load image: {e}"))
                })?)
            }
            "image" => tracing::debug!("Ignoring 'image' field without a file name"),
            other => tracing::debug!("Ignoring unexpected form field '{other}'"),
        }
    }

    let image = image.ok_or_else(|| Error::Validation("image is required".into()))?;

    let name = name.unwrap_or_default();
    if name.is_empty() {
        return Err(Error::Validation("name is required".into()));
    }
    let category = category.unwrap_or_default();
    if category.is_empty() {
        return Err(Error::Validation("category is required".into()));
    }

    Ok(AddItemRequest {
        name,
        category,
        image: image.to_vec(),
    })
}

/// GET /items
pub async fn list_items(State(ctx): State<AppContext>) -> Result<Json<ItemsResponse>, AppError> {
    let items = ctx.items.list_all()?;
    Ok(Json(ItemsResponse { items }))
}

/// POST /items
pub async fn add_item(
    State(ctx): State<AppContext>,
    multipart: Multipart,
) -> Result<Json<AddItemResponse>, AppError> {
    let req = parse_add_item_request(multipart).await?;

    let image_name = ctx.images.store(&req.image)?;

    let message = format!("item received: {}", req.name);
    tracing::info!("{message}");

    let item = ctx
        .items
        .insert(NewItem::new(req.name, req.category, image_name))?;
    tracing::debug!(id = %item.id, image = %item.image_name, "Item stored");

    Ok(Json(AddItemResponse { message }))
}

/// GET /items/{id}
pub async fn get_item(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<Item>, AppError> {
    let item_id: ItemId = id
        .parse()
        .map_err(|_| Error::Validation(format!("invalid item id: {id}")))?;

    let item = ctx
        .items
        .get(item_id)?
        .ok_or_else(|| Error::not_found("item", item_id))?;

    Ok(Json(item))
}

/// GET /search?keyword=...
pub async fn search_items(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ItemsResponse>, AppError> {
    let keyword = params
        .keyword
        .filter(|k| !k.is_empty())
        .ok_or_else(|| Error::Validation("keyword is required".into()))?;

    let items = ctx.items.search(&keyword)?;
    Ok(Json(ItemsResponse { items }))
}
