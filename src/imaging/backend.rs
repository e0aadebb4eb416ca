//! Image loading backend trait and shared types.
//!
//! The [`ImageBackend`] trait has a single operation, [`ImageBackend::load`]:
//! open one source file and hand back an opaque RGB bitmap ready to embed.
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests use the
//! [`MockBackend`](tests::MockBackend) below to control timing and failures.

use image::RgbImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Decode failed: {0}")]
    Decode(String),
}

impl From<image::ImageError> for BackendError {
    fn from(error: image::ImageError) -> Self {
        match error {
            image::ImageError::IoError(e) => BackendError::Io(e),
            other => BackendError::Decode(other.to_string()),
        }
    }
}

/// A fully opaque card bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct CardImage {
    pub pixels: RgbImage,
}

impl CardImage {
    pub fn new(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// Trait for image loading backends.
///
/// `Sync` so one backend can be shared by every worker of the preload pool.
pub trait ImageBackend: Sync {
    /// Decode `path` into an opaque RGB card image.
    fn load(&self, path: &Path) -> Result<CardImage, BackendError>;
}
