//! Cross-origin policy for the web front-end.

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Methods the front-end is allowed to use.
const ALLOWED_METHODS: [Method; 4] = [Method::GET, Method::HEAD, Method::POST, Method::OPTIONS];

/// Build a CORS layer that admits only `front_url`.
///
/// An unparseable or empty origin yields a layer that admits no origin.
pub fn cors_layer(front_url: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(ALLOWED_METHODS)
        .allow_headers(Any);

    match HeaderValue::from_str(front_url) {
        Ok(origin) if !front_url.is_empty() => layer.allow_origin(origin),
        _ => {
            tracing::warn!("Invalid front-end origin '{front_url}'; CORS disabled");
            layer
        }
    }
}
