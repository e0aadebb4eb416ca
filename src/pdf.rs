//! PDF serialization.
//!
//! Stage 4 of the sheet pipeline. Turns [`PagePlan`]s into a PDF document
//! with [`lopdf`] and writes it to disk.
//!
//! ## Document Structure
//!
//! ```text
//! Catalog
//! └── Pages (MediaBox = page size, inherited by every page)
//!     ├── Page 1
//!     │   ├── Contents   q cm Do Q … (cards), re S BT Tj ET (placeholders), re S (guides)
//!     │   └── Resources  /Font /F1 Helvetica, /XObject /Im0 … /Im8
//!     └── Page 2 …
//! ```
//!
//! Each loaded card is embedded once as a DeviceRGB, 8 bits-per-component
//! image XObject. All streams are Flate-compressed by
//! [`Document::compress`] before saving.

use crate::config::SheetConfig;
use crate::layout::{GridGeometry, Rect};
use crate::preload::{LoadOutcome, LoadedImage};
use crate::render::{DrawOp, PagePlan};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

const FONT_NAME: &str = "F1";

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Page plan references image {0}, which was not loaded")]
    MissingImage(usize),
}

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

fn image_name(index: usize) -> String {
    format!("Im{index}")
}

fn rect_operands(rect: &Rect) -> Vec<Object> {
    vec![
        real(rect.x),
        real(rect.y),
        real(rect.width),
        real(rect.height),
    ]
}

/// Content-stream operators for one page.
pub fn page_operations(plan: &PagePlan, config: &SheetConfig) -> Vec<Operation> {
    let mut ops = Vec::new();
    let mut guide_style_set = false;

    for op in &plan.ops {
        match op {
            DrawOp::Card { image, rect } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        real(rect.width),
                        real(0.0),
                        real(0.0),
                        real(rect.height),
                        real(rect.x),
                        real(rect.y),
                    ],
                ));
                ops.push(Operation::new(
                    "Do",
                    vec![Object::Name(image_name(*image).into_bytes())],
                ));
                ops.push(Operation::new("Q", vec![]));
            }
            DrawOp::Placeholder { cell, label_origin } => {
                ops.push(Operation::new("re", rect_operands(cell)));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![
                        Object::Name(FONT_NAME.as_bytes().to_vec()),
                        real(config.label_font_size_pt),
                    ],
                ));
                ops.push(Operation::new(
                    "Td",
                    vec![real(label_origin.0), real(label_origin.1)],
                ));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(config.placeholder_label.as_str())],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::Guide(square) => {
                if !guide_style_set {
                    ops.push(Operation::new("w", vec![real(config.guide_line_width_pt)]));
                    guide_style_set = true;
                }
                ops.push(Operation::new("re", rect_operands(square)));
                ops.push(Operation::new("S", vec![]));
            }
        }
    }
    ops
}

fn image_xobject(images: &[LoadedImage], index: usize) -> Result<Stream, PdfError> {
    let card = match images.get(index).map(|i| &i.outcome) {
        Some(LoadOutcome::Loaded(card)) => card,
        _ => return Err(PdfError::MissingImage(index)),
    };
    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => Object::Integer(card.width() as i64),
        "Height" => Object::Integer(card.height() as i64),
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => Object::Integer(8),
    };
    Ok(Stream::new(dict, card.pixels.as_raw().clone()))
}

/// Assemble the full document in memory.
pub fn build_document(
    pages: &[PagePlan],
    images: &[LoadedImage],
    geometry: &GridGeometry,
    config: &SheetConfig,
) -> Result<Document, PdfError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let mut kids = Vec::with_capacity(pages.len());
    for plan in pages {
        let mut xobjects = Dictionary::new();
        for op in &plan.ops {
            if let DrawOp::Card { image, .. } = op {
                let id = doc.add_object(image_xobject(images, *image)?);
                xobjects.set(image_name(*image), id);
            }
        }

        let content = Content {
            operations: page_operations(plan, config),
        };
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { FONT_NAME => font_id },
            "XObject" => xobjects,
        });
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(count),
        "MediaBox" => vec![
            real(0.0),
            real(0.0),
            real(geometry.page_width),
            real(geometry.page_height),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    Ok(doc)
}

/// Build the document and write it to `output`.
///
/// A failure part-way through may leave a truncated file behind.
pub fn write_pdf(
    pages: &[PagePlan],
    images: &[LoadedImage],
    geometry: &GridGeometry,
    config: &SheetConfig,
    output: &Path,
) -> Result<(), PdfError> {
    let mut doc = build_document(pages, images, geometry, config)?;
    let mut writer = BufWriter::new(File::create(output)?);
    doc.save_to(&mut writer)?;
    writer.flush()?;
    Ok(())
}
