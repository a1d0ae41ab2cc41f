//! Root greeting handler.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub message: String,
}

/// GET /
pub async fn hello() -> Json<HelloResponse> {
    Json(HelloResponse {
        message: "Hello, world!".into(),
    })
}
