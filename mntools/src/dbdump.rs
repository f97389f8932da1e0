//! mntools-dbdump - print every table of the Mindnoscape database
//!
//! Lists the tables recorded in the schema catalog, then the full contents
//! of each one, to stdout. The database is opened read-only.
//!
//! Defaults to `./data/mindnoscape.db`; override with `--db` or the
//! `[database]` section of `$XDG_CONFIG_HOME/mntools/config.toml`.

use anyhow::{Context, Result};
use clap::Parser;
use mntools_core::{dump_database, Config};
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mntools-dbdump")]
#[command(about = "Print all tables and rows of a SQLite database")]
#[command(version)]
struct Args {
    /// Database file to dump (default: ./data/mindnoscape.db)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Config file to use instead of the XDG default
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    let log_guard = mntools_core::logging::init(&config.logging);

    let db_path = args.db.unwrap_or_else(|| config.database.path());
    tracing::info!(
        path = %db_path.display(),
        log = ?log_guard.destination(),
        "mntools-dbdump starting"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    dump_database(&db_path, &mut out)
        .with_context(|| format!("failed to dump database {}", db_path.display()))?;

    Ok(())
}
