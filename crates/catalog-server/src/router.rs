//! Axum router construction.
//!
//! Builds the application router with all routes and middleware layers.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::context::AppContext;
use crate::middleware::cors::cors_layer;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = cors_layer(&ctx.config.server.front_url);
    let body_limit = DefaultBodyLimit::max(ctx.config.server.max_upload_bytes);

    Router::new()
        .route("/", get(routes::health::hello))
        // Items
        .route(
            "/items",
            get(routes::items::list_items).post(routes::items::add_item),
        )
        .route("/items/{id}", get(routes::items::get_item))
        .route("/search", get(routes::items::search_items))
        // Images
        .route("/images/", get(routes::images::get_image))
        .route("/images/{filename}", get(routes::images::get_image))
        .route("/image/", get(routes::images::get_image))
        .route("/image/{filename}", get(routes::images::get_image))
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
