//! Image loading in pure Rust with the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (JPEG, PNG, BMP, GIF) |
//! | **Flatten** | alpha "over" white, then drop alpha |
//! | **Downsample** | Lanczos3 to the configured print density |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for print-resolution math (unit testable)
//! - **Operations**: Pixel transforms on decoded images
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
pub mod operations;
pub mod rust_backend;

pub use backend::{BackendError, CardImage, ImageBackend};
pub use calculations::{calculate_card_pixels, calculate_print_dimensions};
pub use operations::{fit_print_resolution, flatten_onto_white};
pub use rust_backend::RustBackend;
