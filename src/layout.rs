//! Grid geometry for a card sheet.
//!
//! Everything here is pure arithmetic over a [`SheetConfig`]. Coordinates are
//! PDF user-space points (1/72 inch) with the origin at the lower-left corner
//! of the page and y growing upwards.
//!
//! ```text
//!  ┌──────────────────────── page ────────────────────────┐
//!  │            ▫───────▫───────▫───────▫                 │
//!  │            │ (0,0) │ (0,1) │ (0,2) │   ▫ = cut-guide │
//!  │            ▫───────▫───────▫───────▫                 │
//!  │            │ (1,0) │ (1,1) │ (1,2) │                 │
//!  │            ▫───────▫───────▫───────▫                 │
//!  │            │ (2,0) │ (2,1) │ (2,2) │                 │
//!  │            ▫───────▫───────▫───────▫                 │
//!  │  ◄ left_margin ►                                     │
//!  └──────────────────────────────────────────────────────┘
//! ```
//!
//! Cell `(row, col)` is read top-to-bottom, left-to-right: row 0 sits nearest
//! the top edge even though PDF y coordinates grow upwards.

use crate::config::SheetConfig;

/// Points per millimetre.
pub const MM_TO_PT: f64 = 72.0 / 25.4;

/// Tolerance for comparing edges that touch exactly.
const EPSILON: f64 = 1e-6;

pub fn mm_to_pt(mm: f64) -> f64 {
    mm * MM_TO_PT
}

/// Axis-aligned rectangle anchored at its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// True when the interiors intersect. Rectangles that only share an edge
    /// do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right() - EPSILON
            && other.x < self.right() - EPSILON
            && self.y < other.top() - EPSILON
            && other.y < self.top() - EPSILON
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x - EPSILON
            && other.y >= self.y - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.top() <= self.top() + EPSILON
    }
}

/// Derived, immutable sheet geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    pub columns: usize,
    pub rows: usize,
    pub card_width: f64,
    pub card_height: f64,
    pub gap: f64,
    pub page_width: f64,
    pub page_height: f64,
    pub grid_width: f64,
    pub grid_height: f64,
    pub left_margin: f64,
    pub bottom_margin: f64,
    /// Grid extent before unit conversion.
    pub grid_width_mm: f64,
    pub grid_height_mm: f64,
}

impl GridGeometry {
    pub fn new(config: &SheetConfig) -> Self {
        let cols = config.columns as f64;
        let rows = config.rows as f64;

        let grid_width_mm = cols * config.card_width_mm + (cols + 1.0) * config.gap_mm;
        let grid_height_mm = rows * config.card_height_mm + (rows + 1.0) * config.gap_mm;

        let page_width = mm_to_pt(config.page_width_mm);
        let page_height = mm_to_pt(config.page_height_mm);
        let grid_width = mm_to_pt(grid_width_mm);
        let grid_height = mm_to_pt(grid_height_mm);

        Self {
            columns: config.columns,
            rows: config.rows,
            card_width: mm_to_pt(config.card_width_mm),
            card_height: mm_to_pt(config.card_height_mm),
            gap: mm_to_pt(config.gap_mm),
            page_width,
            page_height,
            grid_width,
            grid_height,
            left_margin: (page_width - grid_width) / 2.0,
            bottom_margin: (page_height - grid_height) / 2.0,
            grid_width_mm,
            grid_height_mm,
        }
    }

    pub fn cells_per_page(&self) -> usize {
        self.columns * self.rows
    }

    /// Lower-left corner of the card area of cell `(row, col)`.
    pub fn cell_origin(&self, row: usize, col: usize) -> (f64, f64) {
        let x = self.left_margin + self.gap + col as f64 * (self.card_width + self.gap);
        let y = self.bottom_margin
            + self.gap
            + (self.rows - 1 - row) as f64 * (self.card_height + self.gap);
        (x, y)
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        let (x, y) = self.cell_origin(row, col);
        Rect {
            x,
            y,
            width: self.card_width,
            height: self.card_height,
        }
    }

    /// All card rectangles of a page in row-major reading order.
    pub fn cell_rects(&self) -> Vec<Rect> {
        (0..self.rows)
            .flat_map(|row| (0..self.columns).map(move |col| self.cell_rect(row, col)))
            .collect()
    }

    /// Cut-guide squares, one per grid-line intersection.
    ///
    /// Each square has side `gap` and fills the gap band where a vertical
    /// and a horizontal gap cross, so it never reaches into a card.
    pub fn guide_squares(&self) -> Vec<Rect> {
        let mut squares = Vec::with_capacity((self.columns + 1) * (self.rows + 1));
        for v in 0..=self.columns {
            for h in 0..=self.rows {
                squares.push(Rect {
                    x: self.left_margin + v as f64 * (self.card_width + self.gap),
                    y: self.bottom_margin + h as f64 * (self.card_height + self.gap),
                    width: self.gap,
                    height: self.gap,
                });
            }
        }
        squares
    }

    pub fn page_count(&self, total_images: usize) -> usize {
        page_count(total_images, self.cells_per_page())
    }
}

/// Number of pages needed for `total` cards; an empty run still yields
/// one page with a blank grid.
pub fn page_count(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page).max(1)
}

/// Scale a `width × height` image to fit inside `cell` keeping its aspect
/// ratio, centered in the cell.
pub fn fit_centered(width: u32, height: u32, cell: &Rect) -> Rect {
    if width == 0 || height == 0 {
        return *cell;
    }
    let scale = (cell.width / width as f64).min(cell.height / height as f64);
    let w = width as f64 * scale;
    let h = height as f64 * scale;
    Rect {
        x: cell.x + (cell.width - w) / 2.0,
        y: cell.y + (cell.height - h) / 2.0,
        width: w,
        height: h,
    }
}
