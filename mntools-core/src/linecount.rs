//! Recursive source line counter
//!
//! Walks a directory tree, picks out files whose name ends with a given
//! extension, and totals their line counts.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Accumulated counters for a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineTotals {
    /// Number of matching files
    pub files: usize,
    /// Sum of their line counts
    pub lines: usize,
}

impl LineTotals {
    /// Add one file's line count.
    pub fn add_file(&mut self, lines: usize) {
        self.files += 1;
        self.lines += lines;
    }

    /// The two summary lines, e.g. `Total Go files: 2` and
    /// `Total lines of Go code: 8`.
    pub fn render(&self, label: &str) -> String {
        format!(
            "Total {} files: {}\nTotal lines of {} code: {}",
            label, self.files, label, self.lines
        )
    }
}

/// Counts lines in every file under a root that ends with an extension.
#[derive(Debug, Clone)]
pub struct LineCounter {
    extension: String,
}

impl LineCounter {
    /// Create a counter for `extension`; `go` and `.go` are equivalent.
    pub fn new(extension: &str) -> Self {
        let extension = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{}", extension)
        };
        Self { extension }
    }

    /// The normalized extension, always with a leading dot
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Whether a file name ends with the extension.
    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name.as_encoded_bytes().ends_with(self.extension.as_bytes()))
            .unwrap_or(false)
    }

    /// Walk `root` and total every matching file.
    ///
    /// Fails on the first matching file that cannot be read or decoded.
    /// Entries that cannot be listed are skipped with a warning.
    pub fn count(&self, root: &Path) -> Result<LineTotals> {
        let mut totals = LineTotals::default();

        for path in self.discover_files(root) {
            let lines = count_file_lines(&path)?;
            tracing::debug!(path = %path.display(), lines, "Counted file");
            totals.add_file(lines);
        }

        tracing::info!(
            root = %root.display(),
            extension = %self.extension,
            files = totals.files,
            lines = totals.lines,
            "Line count complete"
        );
        Ok(totals)
    }

    /// All matching files below `root`, nested directories included.
    ///
    /// Symlinked directories are listed but not entered. Symlinks to files,
    /// dangling ones included, are returned like regular files.
    pub fn discover_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            // The root itself is never counted, only what lies below it.
            if entry.depth() == 0 || entry.file_type().is_dir() {
                continue;
            }
            // A link to a directory counts as a directory, not a file.
            if entry.path_is_symlink() && entry.path().is_dir() {
                continue;
            }
            if self.matches(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files
    }
}

/// Count lines the way universal-newline text reading splits them.
///
/// `\n`, `\r\n` and a lone `\r` each end a line. A final line without a
/// terminator still counts; empty text has zero lines.
pub fn count_lines(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut lines = 0;
    let mut i = 0;
    let mut line_open = false;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines += 1;
                line_open = false;
            }
            b'\r' => {
                lines += 1;
                line_open = false;
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
            }
            _ => line_open = true,
        }
        i += 1;
    }

    if line_open {
        lines += 1;
    }
    lines
}

/// Read `path` as UTF-8 and count its lines.
pub fn count_file_lines(path: &Path) -> Result<usize> {
    let bytes = std::fs::read(path).map_err(|e| {
        Error::Io(std::io::Error::new(
            e.kind(),
            format!("failed to read {}: {}", path.display(), e),
        ))
    })?;
    let text = String::from_utf8(bytes).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(count_lines(&text))
}
