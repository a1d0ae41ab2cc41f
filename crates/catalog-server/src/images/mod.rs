//! Content-addressed image storage.
//!
//! Uploaded images are written under the configured image directory using
//! the SHA-256 of their bytes as the filename, and resolved back from
//! client-supplied names with path confinement and a default-image fallback.

mod storage;

pub use storage::{ImageStore, DEFAULT_IMAGE, IMAGE_EXTENSION};
