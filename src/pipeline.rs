//! End-to-end sheet build: folder in, PDF out.
//!
//! ```text
//! 1. Scan      folder      →  sorted image paths
//! 2. Preload   paths       →  flattened RGB cards   (parallel, order kept)
//! 3. Plan      cards       →  page plans             (grid geometry)
//! 4. Write     page plans  →  cards.pdf
//! ```
//!
//! Stage 2 finishes completely before stage 3 starts; everything after the
//! preload runs on the calling thread.

use crate::config::{ConfigError, SheetConfig};
use crate::imaging::ImageBackend;
use crate::layout::GridGeometry;
use crate::pdf::{PdfError, write_pdf};
use crate::preload::{LoadedImage, preload, preload_with_backend};
use crate::render::{RenderEvent, plan_pages};
use crate::scan::{ScanError, scan_images};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: PdfError },
}

/// What a finished build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub image_count: usize,
    pub failed_count: usize,
    pub page_count: usize,
    pub output: PathBuf,
}

/// Build a sheet with the stock [`RustBackend`](crate::imaging::RustBackend).
pub fn build_sheet(
    image_folder: &Path,
    output: &Path,
    config: &SheetConfig,
    events: Option<Sender<RenderEvent>>,
) -> Result<BuildSummary, BuildError> {
    run(image_folder, output, config, events, |paths| preload(paths, config))
}

/// Build a sheet using a specific backend (allows testing with mock).
pub fn build_sheet_with_backend(
    backend: &impl ImageBackend,
    image_folder: &Path,
    output: &Path,
    config: &SheetConfig,
    events: Option<Sender<RenderEvent>>,
) -> Result<BuildSummary, BuildError> {
    run(image_folder, output, config, events, |paths| preload_with_backend(backend, paths))
}

fn run(
    image_folder: &Path,
    output: &Path,
    config: &SheetConfig,
    events: Option<Sender<RenderEvent>>,
    load: impl FnOnce(&[PathBuf]) -> Vec<LoadedImage>,
) -> Result<BuildSummary, BuildError> {
    config.validate()?;

    let paths = scan_images(image_folder)?;
    let images = load(&paths);

    let geometry = GridGeometry::new(config);
    let pages = plan_pages(&images, &geometry, events);

    write_pdf(&pages, &images, &geometry, config, output).map_err(|source| {
        BuildError::Write {
            path: output.to_path_buf(),
            source,
        }
    })?;

    Ok(BuildSummary {
        image_count: images.len(),
        failed_count: images.iter().filter(|i| !i.is_loaded()).count(),
        page_count: pages.len(),
        output: output.to_path_buf(),
    })
}
