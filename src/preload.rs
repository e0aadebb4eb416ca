//! Parallel image preloading.
//!
//! Stage 2 of the sheet pipeline. Decoding and flattening dominate the run
//! time, so every image is loaded up front on the rayon pool before any page
//! is drawn.
//!
//! ## Ordering
//!
//! Results come back in input order no matter which load finishes first:
//! `par_iter().map().collect()` over a slice is an indexed pipeline, so each
//! result is written to the slot of its input position. The renderer relies
//! on this to place cards deterministically.
//!
//! ## Failures
//!
//! A load failure never aborts the run. It is recorded as
//! [`LoadOutcome::Failed`] with its cause and later drawn as a placeholder.
//! Failures are classified (I/O vs. decode) for reporting only; nothing is
//! retried.

use crate::config::SheetConfig;
use crate::imaging::{BackendError, CardImage, ImageBackend, RustBackend};
use rayon::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};

/// Why an image could not be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The file could not be opened or read.
    Io,
    /// The bytes are not a decodable image.
    Decode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub kind: FailureKind,
    pub reason: String,
}

impl From<BackendError> for LoadFailure {
    fn from(error: BackendError) -> Self {
        let kind = match &error {
            BackendError::Io(_) => FailureKind::Io,
            BackendError::Decode(_) => FailureKind::Decode,
        };
        Self {
            kind,
            reason: error.to_string(),
        }
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded(CardImage),
    Failed(LoadFailure),
}

/// One source path with the result of loading it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub outcome: LoadOutcome,
}

impl LoadedImage {
    pub fn is_loaded(&self) -> bool {
        matches!(self.outcome, LoadOutcome::Loaded(_))
    }
}

/// Load all `paths` in parallel with the stock [`RustBackend`].
pub fn preload(paths: &[PathBuf], config: &SheetConfig) -> Vec<LoadedImage> {
    let backend = RustBackend::new(config);
    preload_with_backend(&backend, paths)
}

/// Load all `paths` in parallel using a specific backend (allows testing with mock).
///
/// The output has one entry per input path, in input order.
pub fn preload_with_backend(backend: &impl ImageBackend, paths: &[PathBuf]) -> Vec<LoadedImage> {
    paths
        .par_iter()
        .map(|path| load_one(backend, path))
        .collect()
}

fn load_one(backend: &impl ImageBackend, path: &Path) -> LoadedImage {
    let outcome = match backend.load(path) {
        Ok(card) => LoadOutcome::Loaded(card),
        Err(e) => LoadOutcome::Failed(e.into()),
    };
    LoadedImage {
        path: path.to_path_buf(),
        outcome,
    }
}
