use card_sheet::config::SheetConfig;
use card_sheet::{output, pipeline};
use clap::Parser;
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Called once from the clap attribute
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "card-sheet")]
#[command(about = "Lay out a folder of card images into printable A4 cut sheets")]
#[command(long_about = "\
Lay out a folder of card images into printable A4 cut sheets

Every page holds a 3x3 grid of 59x86mm cards separated by 2mm gaps. Small
square cut-guides are drawn where the gaps cross; they never touch a card.

Input:
  cards/
  ├── 001-bolt.png       # .jpg .jpeg .png .bmp .gif, any letter case
  ├── 002-counter.jpg    # placed in file-name order, left to right, top down
  └── notes.txt          # anything else is ignored

Transparent areas are printed white. Images that cannot be read keep their
cell and are drawn as an outlined box labelled \"image load error\".")]
#[command(version = version_string())]
struct Cli {
    /// Folder containing the card images
    image_folder: PathBuf,

    /// Output PDF file
    #[arg(long, default_value = "cards.pdf")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = SheetConfig::default();

    println!("{}", output::format_start_header(&cli.image_folder));
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_render_event(&event);
        }
    });
    let result = pipeline::build_sheet(&cli.image_folder, &cli.output, &config, Some(tx));
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;

    let summary = result?;
    output::print_summary(&summary);
    Ok(())
}
