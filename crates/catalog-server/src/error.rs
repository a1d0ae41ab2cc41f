//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`catalog_core::Error`] so that route
//! handlers can return `Result<T, AppError>` directly.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: catalog_core::Error,
}

impl AppError {
    pub fn new(inner: catalog_core::Error) -> Self {
        Self { inner }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.inner.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<catalog_core::Error> for AppError {
    fn from(e: catalog_core::Error) -> Self {
        Self::new(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                "Server error in API handler"
            );
        } else {
            tracing::warn!(status = %status, error = %self.inner, "Rejected request");
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.inner.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn validation_produces_400_with_plain_message() {
        let err = AppError::new(catalog_core::Error::Validation("name is required".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"name is required");
    }

    #[test]
    fn not_found_produces_404() {
        let err = AppError::new(catalog_core::Error::not_found("item", 7));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_produces_500() {
        let err = AppError::new(catalog_core::Error::database("disk I/O error"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
