//! Sheet configuration.
//!
//! All physical measurements of a sheet live in [`SheetConfig`]. The CLI
//! always runs with the stock values; library callers and tests may build
//! their own and must pass them through [`SheetConfig::validate`] (the
//! pipeline does this before any work starts).
//!
//! ## Stock Values
//!
//! ```text
//! card          59 × 86 mm      (standard trading card)
//! gap           2 mm            (cut-guide band around every card)
//! grid          3 × 3           (9 cards per page)
//! page          210 × 297 mm    (ISO A4, portrait)
//! guide stroke  0.5 pt
//! label         "image load error", 10 pt Helvetica
//! max density   300 dpi         (larger sources are downsampled)
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Physical layout of one sheet, in millimetres unless noted otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    pub card_width_mm: f64,
    pub card_height_mm: f64,
    /// Width of the band between and around cards.
    pub gap_mm: f64,
    pub columns: usize,
    pub rows: usize,
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    /// Stroke width of the cut-guide squares, in points.
    pub guide_line_width_pt: f64,
    /// Text drawn inside a cell whose image failed to load.
    pub placeholder_label: String,
    pub label_font_size_pt: f64,
    /// Images denser than this at card size are resampled down.
    /// `None` embeds every image at its source resolution.
    pub max_dpi: Option<u32>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            card_width_mm: 59.0,
            card_height_mm: 86.0,
            gap_mm: 2.0,
            columns: 3,
            rows: 3,
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            guide_line_width_pt: 0.5,
            placeholder_label: "image load error".to_string(),
            label_font_size_pt: 10.0,
            max_dpi: Some(300),
        }
    }
}

impl SheetConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("card_width_mm", self.card_width_mm),
            ("card_height_mm", self.card_height_mm),
            ("gap_mm", self.gap_mm),
            ("page_width_mm", self.page_width_mm),
            ("page_height_mm", self.page_height_mm),
            ("guide_line_width_pt", self.guide_line_width_pt),
            ("label_font_size_pt", self.label_font_size_pt),
        ];
        for (name, value) in lengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be a positive length, got {value}"
                )));
            }
        }
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::Validation(
                "columns and rows must be non-zero".into(),
            ));
        }
        if self.max_dpi == Some(0) {
            return Err(ConfigError::Validation("max_dpi must be non-zero".into()));
        }

        let cols = self.columns as f64;
        let rows = self.rows as f64;
        let grid_w = cols * self.card_width_mm + (cols + 1.0) * self.gap_mm;
        let grid_h = rows * self.card_height_mm + (rows + 1.0) * self.gap_mm;
        if grid_w > self.page_width_mm || grid_h > self.page_height_mm {
            return Err(ConfigError::Validation(format!(
                "a {}x{} grid needs {grid_w}x{grid_h} mm but the page is {}x{} mm",
                self.columns, self.rows, self.page_width_mm, self.page_height_mm
            )));
        }
        Ok(())
    }
}
