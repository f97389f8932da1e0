//! Error types for mntools-core

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the mntools-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File contents are not valid UTF-8
    #[error("failed to decode {path:?} as UTF-8: {source}")]
    Decode {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for mntools-core
pub type Result<T> = std::result::Result<T, Error>;
