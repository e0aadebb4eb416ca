//! # Card Sheet
//!
//! Lays a folder of card images out on printable A4 cut sheets: nine
//! 59 × 86 mm cards per page in a 3 × 3 grid, separated by 2 mm gaps with
//! small square cut-guides at every grid intersection.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! ```text
//! 1. Scan      folder   →  sorted image paths
//! 2. Preload   paths    →  opaque RGB cards        (rayon, order preserved)
//! 3. Plan      cards    →  page plans              (pure geometry)
//! 4. Write     plans    →  cards.pdf               (lopdf)
//! ```
//!
//! Only stage 2 runs in parallel. Loading is independent per image, so the
//! workers share nothing but the backend, and results are collected by input
//! position rather than completion order. Stages 3 and 4 start after every
//! image has been loaded.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — lists supported images in the folder, sorted by name |
//! | [`imaging`] | Decoding, alpha flattening onto white, print downsampling |
//! | [`preload`] | Stage 2 — parallel, order-preserving loading with per-image failures |
//! | [`layout`] | Grid geometry: cells, margins, cut-guides, page count |
//! | [`render`] | Stage 3 — assigns cards to cells and emits progress events |
//! | [`pdf`] | Stage 4 — serializes page plans to a PDF file |
//! | [`pipeline`] | Runs the four stages end to end |
//! | [`config`] | Physical sheet measurements and their validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Failures Are Cells, Not Errors
//!
//! A card that cannot be opened or decoded does not stop the run. It keeps
//! its position in the grid and is drawn as an outlined cell with an
//! "image load error" label, so the printed sheet shows exactly which file
//! needs attention. Only a missing image folder or an unwritable output file
//! is fatal.
//!
//! ## Cut-Guides Live in the Gaps
//!
//! Guides are gap-sized squares placed where the gap bands cross. They never
//! touch a card's drawing area, so trimming along them leaves no marks on
//! the cards.

pub mod config;
pub mod imaging;
pub mod layout;
pub mod output;
pub mod pdf;
pub mod pipeline;
pub mod preload;
pub mod render;
pub mod scan;
