//! End-to-end builds against real image files on disk.
//!
//! Each test writes a small card folder into a temp dir, runs the stock
//! pipeline, and reads the resulting PDF back with lopdf.

use card_sheet::config::SheetConfig;
use card_sheet::pipeline::{BuildError, build_sheet};
use card_sheet::render::{CardStatus, RenderEvent};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use lopdf::content::Content;
use lopdf::{Document, Object};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_png(path: &Path) {
    RgbaImage::from_pixel(30, 44, Rgba([200, 30, 30, 128]))
        .save(path)
        .unwrap();
}

fn write_jpg(path: &Path) {
    RgbImage::from_pixel(30, 44, Rgb([20, 120, 200]))
        .save(path)
        .unwrap();
}

fn card_folder(tmp: &TempDir) -> PathBuf {
    let cards = tmp.path().join("cards");
    fs::create_dir(&cards).unwrap();
    cards
}

fn page_xobject_count(doc: &Document, page_number: u32) -> usize {
    let page_id = *doc.get_pages().get(&page_number).unwrap();
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = match page.get(b"Resources").unwrap() {
        Object::Reference(id) => doc.get_dictionary(*id).unwrap(),
        Object::Dictionary(dict) => dict,
        other => panic!("unexpected resources object: {other:?}"),
    };
    match resources.get(b"XObject") {
        Ok(Object::Dictionary(xobjects)) => xobjects.len(),
        _ => 0,
    }
}

// =========================================================================
// Page counts
// =========================================================================

#[test]
fn ten_images_fill_two_pages() {
    let tmp = TempDir::new().unwrap();
    let cards = card_folder(&tmp);
    for i in 0..10 {
        let path = cards.join(format!("{i:02}.png"));
        if i % 2 == 0 {
            write_png(&path);
        } else {
            write_jpg(&path.with_extension("jpg"));
        }
    }
    let output = tmp.path().join("cards.pdf");

    let summary = build_sheet(&cards, &output, &SheetConfig::default(), None).unwrap();
    assert_eq!(summary.image_count, 10);
    assert_eq!(summary.failed_count, 0);
    assert_eq!(summary.page_count, 2);

    let doc = Document::load(&output).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
    assert_eq!(page_xobject_count(&doc, 1), 9);
    assert_eq!(page_xobject_count(&doc, 2), 1);
}

#[test]
fn nine_images_fit_on_one_page() {
    let tmp = TempDir::new().unwrap();
    let cards = card_folder(&tmp);
    for i in 0..9 {
        write_png(&cards.join(format!("{i}.png")));
    }
    let output = tmp.path().join("cards.pdf");

    let summary = build_sheet(&cards, &output, &SheetConfig::default(), None).unwrap();
    assert_eq!(summary.page_count, 1);
    assert_eq!(Document::load(&output).unwrap().get_pages().len(), 1);
}

#[test]
fn empty_folder_writes_blank_sheet() {
    let tmp = TempDir::new().unwrap();
    let cards = card_folder(&tmp);
    fs::write(cards.join("readme.txt"), "not a card").unwrap();
    let output = tmp.path().join("cards.pdf");

    let (tx, rx) = std::sync::mpsc::channel();
    let summary = build_sheet(&cards, &output, &SheetConfig::default(), Some(tx)).unwrap();
    assert_eq!(summary.image_count, 0);
    assert_eq!(summary.page_count, 1);

    let events: Vec<RenderEvent> = rx.iter().collect();
    assert!(events.iter().any(|e| matches!(e, RenderEvent::BlankSheet)));

    let doc = Document::load(&output).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
    assert_eq!(page_xobject_count(&doc, 1), 0);
}

// =========================================================================
// Failures
// =========================================================================

#[test]
fn corrupt_image_becomes_placeholder() {
    let tmp = TempDir::new().unwrap();
    let cards = card_folder(&tmp);
    write_png(&cards.join("a.png"));
    fs::write(cards.join("b.jpg"), b"definitely not a jpeg").unwrap();
    write_jpg(&cards.join("c.jpg"));
    let output = tmp.path().join("cards.pdf");

    let (tx, rx) = std::sync::mpsc::channel();
    let summary = build_sheet(&cards, &output, &SheetConfig::default(), Some(tx)).unwrap();
    assert_eq!(summary.image_count, 3);
    assert_eq!(summary.failed_count, 1);

    let statuses: Vec<(usize, bool)> = rx
        .iter()
        .filter_map(|e| match e {
            RenderEvent::CardPlaced { index, status, .. } => {
                Some((index, matches!(status, CardStatus::Placeholder(_))))
            }
            _ => None,
        })
        .collect();
    assert_eq!(statuses, vec![(1, false), (2, true), (3, false)]);

    let doc = Document::load(&output).unwrap();
    assert_eq!(page_xobject_count(&doc, 1), 2);
}

#[cfg(unix)]
#[test]
fn unreadable_entries_keep_their_cells() {
    let tmp = TempDir::new().unwrap();
    let cards = card_folder(&tmp);
    write_png(&cards.join("a.png"));
    std::os::unix::fs::symlink(cards.join("gone.png"), cards.join("b.png")).unwrap();
    fs::write(cards.join(".png"), b"junk").unwrap();
    fs::create_dir(cards.join("c.jpg")).unwrap();
    let output = tmp.path().join("cards.pdf");

    let (tx, rx) = std::sync::mpsc::channel();
    let summary = build_sheet(&cards, &output, &SheetConfig::default(), Some(tx)).unwrap();
    assert_eq!(summary.image_count, 4);
    assert_eq!(summary.failed_count, 3);

    let placed: Vec<(String, bool)> = rx
        .iter()
        .filter_map(|e| match e {
            RenderEvent::CardPlaced { path, status, .. } => Some((
                path.file_name().unwrap().to_string_lossy().into_owned(),
                matches!(status, CardStatus::Placeholder(_)),
            )),
            _ => None,
        })
        .collect();
    assert_eq!(
        placed,
        vec![
            (".png".to_string(), true),
            ("a.png".to_string(), false),
            ("b.png".to_string(), true),
            ("c.jpg".to_string(), true),
        ]
    );

    let doc = Document::load(&output).unwrap();
    assert_eq!(page_xobject_count(&doc, 1), 1);
}

#[test]
fn missing_folder_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("cards.pdf");
    let result = build_sheet(
        &tmp.path().join("nope"),
        &output,
        &SheetConfig::default(),
        None,
    );
    assert!(matches!(result, Err(BuildError::Scan(_))));
    assert!(!output.exists());
}

// =========================================================================
// Page geometry
// =========================================================================

#[test]
fn pages_are_a4() {
    let tmp = TempDir::new().unwrap();
    let cards = card_folder(&tmp);
    write_png(&cards.join("a.png"));
    let output = tmp.path().join("cards.pdf");
    build_sheet(&cards, &output, &SheetConfig::default(), None).unwrap();

    let doc = Document::load(&output).unwrap();
    let page_id = *doc.get_pages().get(&1).unwrap();
    let page = doc.get_dictionary(page_id).unwrap();
    let media_box = match page.get(b"MediaBox") {
        Ok(Object::Array(values)) => values.clone(),
        _ => {
            let parent = page.get(b"Parent").unwrap().as_reference().unwrap();
            doc.get_dictionary(parent)
                .unwrap()
                .get(b"MediaBox")
                .unwrap()
                .as_array()
                .unwrap()
                .clone()
        }
    };
    let numbers: Vec<f32> = media_box
        .iter()
        .map(|o| match o {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => *r,
            other => panic!("unexpected MediaBox entry {other:?}"),
        })
        .collect();
    assert_eq!(numbers.len(), 4);
    assert!((numbers[2] - 595.28).abs() < 0.05);
    assert!((numbers[3] - 841.89).abs() < 0.05);
}

#[test]
fn every_page_strokes_sixteen_guides() {
    let tmp = TempDir::new().unwrap();
    let cards = card_folder(&tmp);
    for i in 0..10 {
        write_jpg(&cards.join(format!("{i:02}.jpg")));
    }
    let output = tmp.path().join("cards.pdf");
    build_sheet(&cards, &output, &SheetConfig::default(), None).unwrap();

    let mut doc = Document::load(&output).unwrap();
    doc.decompress();
    for (_, page_id) in doc.get_pages() {
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        let rects = content
            .operations
            .iter()
            .filter(|op| op.operator == "re")
            .count();
        let draws = content
            .operations
            .iter()
            .filter(|op| op.operator == "Do")
            .count();
        assert_eq!(rects, 16);
        assert!(draws == 9 || draws == 1);
    }
}
