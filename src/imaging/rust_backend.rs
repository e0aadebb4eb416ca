//! Pure Rust loading backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, BMP, GIF) | `image::ImageReader` with content sniffing |
//! | Alpha flattening | [`flatten_onto_white`](super::operations::flatten_onto_white) |
//! | Print downsampling | `image::imageops::resize` with `Lanczos3` filter |

use super::backend::{BackendError, CardImage, ImageBackend};
use super::operations::{fit_print_resolution, flatten_onto_white};
use crate::config::SheetConfig;
use image::ImageReader;
use std::path::Path;

/// Pure Rust backend using the `image` crate.
pub struct RustBackend {
    card_mm: (f64, f64),
    max_dpi: Option<u32>,
}

impl RustBackend {
    pub fn new(config: &SheetConfig) -> Self {
        Self {
            card_mm: (config.card_width_mm, config.card_height_mm),
            max_dpi: config.max_dpi,
        }
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new(&SheetConfig::default())
    }
}

impl ImageBackend for RustBackend {
    fn load(&self, path: &Path) -> Result<CardImage, BackendError> {
        // Sniff the format from content so a mislabeled extension still decodes.
        let decoded = ImageReader::open(path)?.with_guessed_format()?.decode()?;

        let mut pixels = flatten_onto_white(&decoded);
        if let Some(dpi) = self.max_dpi {
            pixels = fit_print_resolution(pixels, self.card_mm, dpi);
        }
        Ok(CardImage::new(pixels))
    }
}
