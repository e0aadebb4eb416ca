//! Page planning.
//!
//! Stage 3 of the sheet pipeline. Walks the preloaded images in order and
//! decides what goes where: which card lands in which cell, which cells get a
//! load-error placeholder, and where the cut-guides sit. The result is a list
//! of [`PagePlan`]s made of [`DrawOp`]s; turning those into PDF operators is
//! the writer's job ([`crate::pdf`]).
//!
//! ## Cell filling
//!
//! Each page has `columns × rows` cells filled in reading order (row 0 at the
//! top, left to right). For every cell, the next image is taken:
//!
//! - loaded → [`DrawOp::Card`], scaled to fit the cell and centered;
//! - failed → [`DrawOp::Placeholder`], the cell outline plus a label;
//! - none left → nothing, the cell stays blank.
//!
//! Every page then gets one [`DrawOp::Guide`] per grid-line intersection,
//! even when no image was found at all.
//!
//! ## Progress
//!
//! Progress is reported as [`RenderEvent`]s on an optional channel so the
//! planner stays free of console I/O.

use crate::layout::{GridGeometry, Rect, fit_centered};
use crate::preload::{LoadFailure, LoadOutcome, LoadedImage};
use std::path::PathBuf;
use std::sync::mpsc::Sender;

/// Horizontal inset of the placeholder label from the cell's left edge, in points.
const LABEL_INSET: f64 = 5.0;

/// A single drawing instruction on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Draw the image at `image` (index into the preloaded list) into `rect`.
    Card { image: usize, rect: Rect },
    /// Outline `cell` and write the load-error label at `label_origin`.
    Placeholder {
        cell: Rect,
        label_origin: (f64, f64),
    },
    /// Stroke a cut-guide square.
    Guide(Rect),
}

/// Everything to draw on one page, in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    pub ops: Vec<DrawOp>,
}

impl PagePlan {
    pub fn guides(&self) -> impl Iterator<Item = &Rect> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Guide(r) => Some(r),
            _ => None,
        })
    }

    pub fn card_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Card { .. }))
            .count()
    }

    pub fn placeholder_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Placeholder { .. }))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CardStatus {
    Placed,
    Placeholder(LoadFailure),
}

/// Progress reported while planning pages.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    PageStarted {
        page: usize,
        page_count: usize,
    },
    /// `index` is 1-based and counts across pages.
    CardPlaced {
        index: usize,
        total: usize,
        path: PathBuf,
        status: CardStatus,
    },
    /// No images were found; a single empty grid is produced.
    BlankSheet,
}

/// Lay `images` out over as many pages as needed.
pub fn plan_pages(
    images: &[LoadedImage],
    geometry: &GridGeometry,
    events: Option<Sender<RenderEvent>>,
) -> Vec<PagePlan> {
    let emit = |event: RenderEvent| {
        if let Some(tx) = &events {
            // A closed receiver only means nobody is watching.
            let _ = tx.send(event);
        }
    };

    let total = images.len();
    let page_count = geometry.page_count(total);
    let cells = geometry.cell_rects();
    let guides = geometry.guide_squares();

    if total == 0 {
        emit(RenderEvent::BlankSheet);
    }

    let mut next = 0;
    let mut pages = Vec::with_capacity(page_count);
    for page in 0..page_count {
        emit(RenderEvent::PageStarted {
            page: page + 1,
            page_count,
        });

        let mut ops = Vec::with_capacity(cells.len() + guides.len());
        for cell in &cells {
            let Some(item) = images.get(next) else {
                break;
            };

            let status = match &item.outcome {
                LoadOutcome::Loaded(card) => {
                    ops.push(DrawOp::Card {
                        image: next,
                        rect: fit_centered(card.width(), card.height(), cell),
                    });
                    CardStatus::Placed
                }
                LoadOutcome::Failed(failure) => {
                    ops.push(DrawOp::Placeholder {
                        cell: *cell,
                        label_origin: (cell.x + LABEL_INSET, cell.y + cell.height / 2.0),
                    });
                    CardStatus::Placeholder(failure.clone())
                }
            };
            next += 1;

            emit(RenderEvent::CardPlaced {
                index: next,
                total,
                path: item.path.clone(),
                status,
            });
        }

        ops.extend(guides.iter().copied().map(DrawOp::Guide));
        pages.push(PagePlan { ops });
    }
    pages
}
