//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! ==> Building sheet from cards/
//! Page 1/2
//!     001/010 alpha.png
//!     002/010 broken.jpg
//!         image load error: Decode failed: Format error decoding Png: …
//!     …
//! Page 2/2
//!     010/010 zeta.gif
//! Generated 2 pages from 10 images (1 failed) → cards.pdf
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure and do no I/O.

use crate::pipeline::BuildSummary;
use crate::preload::FailureKind;
use crate::render::{CardStatus, RenderEvent};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// File name of `path`, falling back to the full path.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Header printed before the build starts.
pub fn format_start_header(folder: &Path) -> String {
    format!("==> Building sheet from {}", folder.display())
}

/// Format a single render progress event as display lines.
pub fn format_render_event(event: &RenderEvent) -> Vec<String> {
    match event {
        RenderEvent::PageStarted { page, page_count } => {
            vec![format!("Page {}/{}", page, page_count)]
        }
        RenderEvent::CardPlaced {
            index,
            total,
            path,
            status,
        } => {
            let mut lines = vec![format!(
                "    {}/{} {}",
                format_index(*index),
                format_index(*total),
                display_name(path)
            )];
            if let CardStatus::Placeholder(failure) = status {
                let kind = match failure.kind {
                    FailureKind::Io => "image load error (io)",
                    FailureKind::Decode => "image load error",
                };
                lines.push(format!("        {}: {}", kind, failure.reason));
            }
            lines
        }
        RenderEvent::BlankSheet => vec!["Blank sheet (no images found)".to_string()],
    }
}

/// Final line summarizing a finished run.
pub fn format_summary(summary: &BuildSummary) -> Vec<String> {
    let mut line = format!(
        "Generated {} from {}",
        plural(summary.page_count, "page"),
        plural(summary.image_count, "image")
    );
    if summary.failed_count > 0 {
        line.push_str(&format!(" ({} failed)", summary.failed_count));
    }
    line.push_str(&format!(" → {}", summary.output.display()));
    vec![line]
}

pub fn print_render_event(event: &RenderEvent) {
    for line in format_render_event(event) {
        println!("{}", line);
    }
}

pub fn print_summary(summary: &BuildSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preload::LoadFailure;
    use std::path::PathBuf;

    #[test]
    fn format_index_pads_to_three() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1234), "1234");
    }

    #[test]
    fn display_name_uses_file_name() {
        assert_eq!(display_name(Path::new("/cards/001-bolt.png")), "001-bolt.png");
        assert_eq!(display_name(Path::new("/")), "/");
    }

    #[test]
    fn start_header_names_folder() {
        assert_eq!(
            format_start_header(Path::new("cards")),
            "==> Building sheet from cards"
        );
    }

    #[test]
    fn format_page_started() {
        let lines = format_render_event(&RenderEvent::PageStarted {
            page: 2,
            page_count: 3,
        });
        assert_eq!(lines, vec!["Page 2/3"]);
    }

    #[test]
    fn format_placed_card() {
        let lines = format_render_event(&RenderEvent::CardPlaced {
            index: 7,
            total: 10,
            path: PathBuf::from("/cards/bolt.png"),
            status: CardStatus::Placed,
        });
        assert_eq!(lines, vec!["    007/010 bolt.png"]);
    }

    #[test]
    fn format_placeholder_card_shows_reason() {
        let lines = format_render_event(&RenderEvent::CardPlaced {
            index: 2,
            total: 2,
            path: PathBuf::from("/cards/broken.jpg"),
            status: CardStatus::Placeholder(LoadFailure {
                kind: FailureKind::Decode,
                reason: "Decode failed: bad marker".into(),
            }),
        });
        assert_eq!(lines[0], "    002/002 broken.jpg");
        assert_eq!(lines[1], "        image load error: Decode failed: bad marker");
    }

    #[test]
    fn progress_counter_widens_past_three_digits() {
        let lines = format_render_event(&RenderEvent::CardPlaced {
            index: 12,
            total: 1500,
            path: PathBuf::from("cards/012-ward.png"),
            status: CardStatus::Placed,
        });
        assert_eq!(lines, vec!["    012/1500 012-ward.png"]);
    }

    #[test]
    fn format_placeholder_marks_io_failures() {
        let lines = format_render_event(&RenderEvent::CardPlaced {
            index: 1,
            total: 1,
            path: PathBuf::from("locked.png"),
            status: CardStatus::Placeholder(LoadFailure {
                kind: FailureKind::Io,
                reason: "IO error: permission denied".into(),
            }),
        });
        assert_eq!(
            lines[1],
            "        image load error (io): IO error: permission denied"
        );
    }

    #[test]
    fn format_blank_sheet() {
        assert_eq!(
            format_render_event(&RenderEvent::BlankSheet),
            vec!["Blank sheet (no images found)"]
        );
    }

    #[test]
    fn summary_without_failures() {
        let summary = BuildSummary {
            image_count: 9,
            failed_count: 0,
            page_count: 1,
            output: PathBuf::from("cards.pdf"),
        };
        assert_eq!(
            format_summary(&summary),
            vec!["Generated 1 page from 9 images → cards.pdf"]
        );
    }

    #[test]
    fn summary_with_failures() {
        let summary = BuildSummary {
            image_count: 10,
            failed_count: 1,
            page_count: 2,
            output: PathBuf::from("out/deck.pdf"),
        };
        assert_eq!(
            format_summary(&summary),
            vec!["Generated 2 pages from 10 images (1 failed) → out/deck.pdf"]
        );
    }
}
