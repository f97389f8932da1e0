//! # mntools-core
//!
//! Core library for the Mindnoscape developer utilities.
//!
//! This library provides:
//! - [`dump`]: read-only dumper that prints every table of a SQLite database
//! - [`linecount`]: recursive line counter for files with a given extension
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Example
//!
//! ```rust,no_run
//! use mntools_core::{dump_database, Config, LineCounter};
//!
//! let config = Config::load().expect("failed to load config");
//!
//! let mut stdout = std::io::stdout();
//! dump_database(&config.database.path(), &mut stdout).expect("dump failed");
//!
//! let totals = LineCounter::new(&config.linecount.extension)
//!     .count(&config.linecount.root)
//!     .expect("count failed");
//! println!("{}", totals.render(&config.linecount.label));
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use dump::{dump_database, DumpSummary, TableDumper};
pub use error::{Error, Result};
pub use linecount::{count_file_lines, count_lines, LineCounter, LineTotals};

// Public modules
pub mod config;
pub mod dump;
pub mod error;
pub mod linecount;
pub mod logging;
