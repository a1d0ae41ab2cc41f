//! Filesystem-level image storage with content-hash naming.

use std::io::Cursor;
use std::path::{Component, Path, PathBuf};

use catalog_core::{Error, Result};
use image::ImageFormat;
use sha2::{Digest, Sha256};

/// Extension appended to every stored image.
pub const IMAGE_EXTENSION: &str = "jpg";

/// Filename served when a requested image does not exist.
pub const DEFAULT_IMAGE: &str = "default.jpg";

/// Suffixes a requested name must end with.
const ACCEPTED_SUFFIXES: &[&str] = &[".jpg", ".jpeg"];

/// Edge length of the generated placeholder image.
const PLACEHOLDER_SIZE: u32 = 64;

/// Filesystem manager for uploaded images.
///
/// All files live directly under `dir` and are named
/// `{sha256-hex}.jpg`, so identical uploads collapse onto one file.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Create a new `ImageStore` rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory images are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the fallback image.
    pub fn default_image_path(&self) -> PathBuf {
        self.dir.join(DEFAULT_IMAGE)
    }

    /// Create the image directory and a placeholder default image if either
    /// is missing.
    pub fn ensure_layout(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let default = self.default_image_path();
        if default.exists() {
            return Ok(());
        }

        let img = image::RgbImage::from_pixel(
            PLACEHOLDER_SIZE,
            PLACEHOLDER_SIZE,
            image::Rgb([0xcc, 0xcc, 0xcc]),
        );
        let mut buf = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Jpeg)
            .map_err(|e| Error::Internal(format!("Failed to encode placeholder image: {e}")))?;
        std::fs::write(&default, buf.into_inner())?;

        tracing::info!("Created placeholder default image at {}", default.display());
        Ok(())
    }

    /// Store image bytes and return the stored filename.
    ///
    /// The bytes are written to a temporary sibling first and renamed into
    /// place, so readers never observe a partially written image. Storing
    /// the same bytes again overwrites the file with identical content.
    pub fn store(&self, data: &[u8]) -> Result<String> {
        let filename = stored_filename(data);
        let path = self.dir.join(&filename);
        let tmp = self
            .dir
            .join(format!(".{filename}.{}.tmp", uuid::Uuid::new_v4()));

        if let Err(e) = std::fs::write(&tmp, data) {
            tracing::error!(path = %tmp.display(), error = %e, "Failed to write image");
            return Err(e.into());
        }
        if let Err(e) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            tracing::error!(path = %path.display(), error = %e, "Failed to move image into place");
            return Err(e.into());
        }

        tracing::debug!(path = %path.display(), bytes = data.len(), "Stored image");
        Ok(filename)
    }

    /// Resolve a client-supplied filename to a path inside the image
    /// directory.
    ///
    /// Returns [`Error::InvalidPath`] when the name escapes the directory,
    /// is absolute or empty, or does not end with `.jpg`/`.jpeg`, and
    /// [`Error::ImageNotFound`] (carrying the computed path) when the name is
    /// acceptable but no such file exists.
    pub fn resolve(&self, requested: &str) -> Result<PathBuf> {
        let relative = normalize(requested)?;

        let accepted = relative
            .to_str()
            .is_some_and(|name| ACCEPTED_SUFFIXES.iter().any(|s| name.ends_with(s)));
        if !accepted {
            return Err(Error::InvalidPath(format!(
                "{requested} does not end with .jpg or .jpeg"
            )));
        }

        let path = self.dir.join(&relative);
        if !path.is_file() {
            return Err(Error::ImageNotFound { path });
        }

        Ok(path)
    }
}

/// Compute the stored filename for image data: `{sha256-hex}.jpg`.
fn stored_filename(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{}.{IMAGE_EXTENSION}", hex::encode(hasher.finalize()))
}

/// Collapse `.` and `..` segments of a relative name without touching the
/// filesystem, rejecting anything that would leave the base directory.
fn normalize(requested: &str) -> Result<PathBuf> {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();

    for component in Path::new(requested).components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(Error::InvalidPath(format!(
                        "{requested} escapes the image directory"
                    )));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(Error::InvalidPath(format!("{requested} is not a relative name")));
            }
        }
    }

    if parts.is_empty() {
        return Err(Error::InvalidPath(format!("{requested} names no file")));
    }

    Ok(parts.iter().collect())
}
