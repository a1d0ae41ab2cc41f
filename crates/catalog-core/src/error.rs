//! Unified error type for the catalog backend.
//!
//! All crates funnel their failures into [`Error`], which carries enough context
//! for API handlers to derive an HTTP status code via [`Error::http_status`].

use std::fmt;
use std::path::PathBuf;

/// Unified error type covering all failure modes in the catalog.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Client-supplied input was malformed or incomplete.
    #[error("{0}")]
    Validation(String),

    /// A requested image path escapes the image directory or has a
    /// non-image extension.
    #[error("invalid image path: {0}")]
    InvalidPath(String),

    /// The requested entity could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "item").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// A well-formed image path that does not exist on disk.
    ///
    /// Carries the resolved path so callers can log it before falling back
    /// to the default image.
    #[error("image not found: {}", path.display())]
    ImageNotFound {
        /// The resolved (but absent) path inside the image directory.
        path: PathBuf,
    },

    /// A database operation failed.
    #[error("database error: {source}")]
    Database {
        /// The underlying database error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// An I/O operation failed.
    #[error("io error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::InvalidPath(_) => 400,
            Error::NotFound { .. } => 404,
            Error::ImageNotFound { .. } => 404,
            Error::Database { .. } => 500,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Database`].
    pub fn database(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Database {
            source: source.into(),
        }
    }

    /// Whether this is the soft-miss image lookup failure.
    pub fn is_image_not_found(&self) -> bool {
        matches!(self, Error::ImageNotFound { .. })
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
