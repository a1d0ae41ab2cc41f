//! Image serving route handler.

use std::path::Path as FsPath;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use catalog_core::Error;
use tokio_util::io::ReaderStream;

use crate::context::AppContext;
use crate::error::AppError;
use crate::images::DEFAULT_IMAGE;

/// GET /images/{filename} and GET /image/{filename}
///
/// Unsafe or non-image names are rejected with 400. A well-formed name that
/// does not exist is answered with the default image.
pub async fn get_image(
    State(ctx): State<AppContext>,
    filename: Option<Path<String>>,
) -> Result<Response, AppError> {
    let filename = match filename {
        Some(Path(name)) if !name.is_empty() => name,
        _ => return Err(Error::Validation("filename is required".into()).into()),
    };

    let path = match ctx.images.resolve(&filename) {
        Ok(path) => path,
        Err(Error::ImageNotFound { path }) => {
            tracing::debug!(path = %path.display(), "image not found; serving default");
            ctx.images.default_image_path()
        }
        Err(e) => return Err(e.into()),
    };

    let file = match tokio::fs::File::open(&path).await {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::not_found("image", DEFAULT_IMAGE).into());
        }
        Err(e) => return Err(Error::from(e).into()),
    };

    tracing::info!(path = %path.display(), "returned image");

    let body = Body::from_stream(ReaderStream::new(file));
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type_for(&path))],
        body,
    )
        .into_response())
}

/// Infer the response content type from a file extension.
fn content_type_for(path: &FsPath) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
