//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which wires an in-memory SQLite item store and a
//! temporary image directory into a full [`AppContext`]. Requests can be
//! driven through the router with [`TestHarness::send`], or over a real
//! socket via [`TestHarness::with_server`].

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use catalog_core::config::Config;
use catalog_db::pool::init_memory_pool;
use catalog_db::{ItemStore, SqliteItemStore};
use catalog_server::context::AppContext;
use catalog_server::images::ImageStore;
use catalog_server::router::build_router;

pub const BOUNDARY: &str = "catalog-test-boundary";

/// Test harness wrapping a fully-constructed [`AppContext`].
pub struct TestHarness {
    pub ctx: AppContext,
    pub router: Router,
    // Keeps the image directory alive for the harness lifetime.
    _image_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new harness with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a new harness with a custom configuration. The image directory
    /// in `config` is replaced by a fresh temporary directory.
    pub fn with_config(mut config: Config) -> Self {
        let image_dir = tempfile::tempdir().expect("failed to create image dir");
        config.storage.image_dir = image_dir.path().to_path_buf();

        let pool = init_memory_pool().expect("failed to create in-memory pool");
        let items: Arc<dyn ItemStore> = Arc::new(SqliteItemStore::new(pool));
        let images = ImageStore::new(image_dir.path());
        images.ensure_layout().expect("failed to prepare image dir");

        let ctx = AppContext::new(items, images, config);
        let router = build_router(ctx.clone());

        Self {
            ctx,
            router,
            _image_dir: image_dir,
        }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new();
        let app = harness.router.clone();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    /// Send a request through the router.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// GET `uri` and return status plus body bytes.
    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let resp = self
            .send(Request::get(uri).body(Body::empty()).unwrap())
            .await;
        let status = resp.status();
        (status, body_bytes(resp.into_body()).await)
    }

    /// GET `uri` and parse the body as JSON.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let (status, body) = self.get(uri).await;
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    /// POST a multipart form to `/items`.
    pub async fn post_item(&self, parts: &[Part<'_>]) -> (StatusCode, Vec<u8>) {
        let request = Request::post("/items")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        let resp = self.send(request).await;
        let status = resp.status();
        (status, body_bytes(resp.into_body()).await)
    }

    /// Number of files in the image directory, excluding the default image.
    pub fn stored_image_count(&self) -> usize {
        std::fs::read_dir(self.ctx.images.dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != catalog_server::images::DEFAULT_IMAGE)
            .count()
    }
}

/// One part of a multipart form.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

/// Encode `parts` as a `multipart/form-data` body using [`BOUNDARY`].
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: image/jpeg\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn body_bytes(body: Body) -> Vec<u8> {
    body.collect().await.unwrap().to_bytes().to_vec()
}

/// Lowercase hex SHA-256 of `data` with the stored image extension.
pub fn expected_image_name(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    format!("{}.jpg", hex::encode(Sha256::digest(data)))
}
