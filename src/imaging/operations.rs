//! Pixel operations applied to every decoded card.
//!
//! These functions combine calculations with the `image` crate's pixel work.
//! They take decoded images, never paths.

use super::calculations::calculate_print_dimensions;
use image::imageops::FilterType;
use image::{DynamicImage, Rgb, RgbImage};

/// Composite `img` over opaque white and drop the alpha channel.
///
/// Each channel becomes `c·α + 255·(1−α)`. Images without an alpha channel
/// are only converted to 8-bit RGB, so an opaque image and its flattened
/// copy are pixel-identical.
pub fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, px) in rgba.enumerate_pixels() {
        let [r, g, b, a] = px.0;
        let a = a as u32;
        let over = |c: u8| ((c as u32 * a + 255 * (255 - a) + 127) / 255) as u8;
        out.put_pixel(x, y, Rgb([over(r), over(g), over(b)]));
    }
    out
}

/// Downsample `img` so it prints at no more than `max_dpi` on a card of
/// `card_mm`. Returns the image untouched when it is already within bounds.
pub fn fit_print_resolution(img: RgbImage, card_mm: (f64, f64), max_dpi: u32) -> RgbImage {
    match calculate_print_dimensions(img.dimensions(), card_mm, max_dpi) {
        Some((w, h)) => image::imageops::resize(&img, w, h, FilterType::Lanczos3),
        None => img,
    }
}
