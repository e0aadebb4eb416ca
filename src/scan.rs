//! Image folder enumeration.
//!
//! Stage 1 of the sheet pipeline. Lists the card images in a single folder,
//! producing the ordered path list every later stage works from.
//!
//! ## Rules
//!
//! - Only direct children are considered; sub-folders are not descended.
//! - An entry qualifies when its name, lowercased, ends in `.` plus one of
//!   [`SUPPORTED_EXTENSIONS`]. `Card.PNG`, `card.png` and a bare `.png` all
//!   qualify.
//! - The name alone decides. A dangling symlink or a directory named like an
//!   image is still listed, fails to load, and shows up as a placeholder
//!   card instead of silently shifting every later card.
//! - Output is sorted by file name, byte-wise. Name cards `001-…`, `002-…`
//!   to control their position on the sheet.
//!
//! A folder that is missing or unreadable is fatal to the run.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions recognized as card images.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read image folder {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Whether the file name of `path` ends in a supported image suffix.
pub fn is_supported_image(path: &Path) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy().to_lowercase();
    SUPPORTED_EXTENSIONS
        .iter()
        .any(|ext| name.strip_suffix(ext).is_some_and(|rest| rest.ends_with('.')))
}

/// List the supported images directly inside `folder`, sorted by file name.
pub fn scan_images(folder: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let read_err = |source| ScanError::ReadDir {
        path: folder.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(folder).map_err(read_err)?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(folder.to_path_buf()));
    }

    let mut images = Vec::new();
    for entry in fs::read_dir(folder).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        if is_supported_image(&path) {
            images.push(path);
        }
    }

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(images)
}
