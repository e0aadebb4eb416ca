//! Pure calculation functions for print resolution.
//!
//! All functions here are pure and testable without any I/O or images.

/// Millimetres per inch.
const MM_PER_INCH: f64 = 25.4;

/// Pixel box a card occupies at `dpi`.
///
/// # Examples
/// ```
/// # use card_sheet::imaging::calculate_card_pixels;
/// // 59 × 86 mm at 300 dpi
/// assert_eq!(calculate_card_pixels((59.0, 86.0), 300), (697, 1016));
/// ```
pub fn calculate_card_pixels(card_mm: (f64, f64), dpi: u32) -> (u32, u32) {
    let (w_mm, h_mm) = card_mm;
    let to_px = |mm: f64| ((mm / MM_PER_INCH * dpi as f64).round() as u32).max(1);
    (to_px(w_mm), to_px(h_mm))
}

/// Dimensions to downsample a source to so it prints at no more than `dpi`.
///
/// The source is scaled to fit inside the card's pixel box keeping its
/// aspect ratio, which is how it will be placed on the page. Returns `None`
/// when the source already fits and can be embedded as-is; sources are
/// never upscaled.
pub fn calculate_print_dimensions(
    source: (u32, u32),
    card_mm: (f64, f64),
    dpi: u32,
) -> Option<(u32, u32)> {
    let (src_w, src_h) = source;
    if src_w == 0 || src_h == 0 {
        return None;
    }
    let (box_w, box_h) = calculate_card_pixels(card_mm, dpi);
    if src_w <= box_w && src_h <= box_h {
        return None;
    }

    let scale = (box_w as f64 / src_w as f64).min(box_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, box_w);
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, box_h);
    Some((w, h))
}
