//! mntools-linecount - count files and lines by extension
//!
//! Walks a directory tree (default: the current directory) and reports how
//! many `.go` files it holds and how many lines they contain:
//!
//! ```text
//! Total Go files: 2
//! Total lines of Go code: 8
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use mntools_core::{Config, LineCounter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mntools-linecount")]
#[command(about = "Count files and lines of code by extension")]
#[command(version)]
struct Args {
    /// Directory to walk (default: current directory)
    root: Option<PathBuf>,

    /// File extension to match (default: .go)
    #[arg(short, long)]
    ext: Option<String>,

    /// Language name shown in the summary (default: Go)
    #[arg(short, long)]
    label: Option<String>,

    /// Config file to use instead of the XDG default
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    if let Some(root) = args.root {
        config.linecount.root = root;
    }
    if let Some(ext) = args.ext {
        config.linecount.extension = ext;
    }
    if let Some(label) = args.label {
        config.linecount.label = label;
    }
    config.validate().context("invalid options")?;

    let log_guard = mntools_core::logging::init(&config.logging);

    let settings = &config.linecount;
    tracing::info!(
        root = %settings.root.display(),
        extension = %settings.extension,
        log = ?log_guard.destination(),
        "mntools-linecount starting"
    );

    let totals = LineCounter::new(&settings.extension)
        .count(&settings.root)
        .with_context(|| format!("failed to count lines under {}", settings.root.display()))?;

    println!("{}", totals.render(&settings.label));

    Ok(())
}
