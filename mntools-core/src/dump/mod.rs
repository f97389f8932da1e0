//! SQLite table dumper
//!
//! Opens an existing database read-only, lists every table recorded in the
//! schema catalog, and prints the full contents of each one:
//!
//! ```text
//! Tables in the database:
//! users
//!
//! Content of table 'users':
//! (1, 'alice')
//! (2, 'bob')
//! ```

pub mod render;

use crate::error::{Error, Result};
use rusqlite::types::{Value, ValueRef};
use rusqlite::{Connection, OpenFlags};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Totals from a completed dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpSummary {
    /// Number of tables printed
    pub tables: usize,
    /// Number of rows printed across all tables
    pub rows: usize,
}

/// Read-only handle on a database being dumped.
///
/// The connection is released when the dumper is dropped, so every early
/// return leaves no open handle behind. Use [`TableDumper::close`] to
/// observe close errors.
pub struct TableDumper {
    conn: Connection,
    path: PathBuf,
}

impl TableDumper {
    /// Open an existing database file.
    ///
    /// The file is never created or written; a missing file is an error.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        tracing::info!(path = %path.display(), "Opened database");

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Names of all tables in the schema catalog, in catalog order.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
    }

    /// Every row of `table`, in scan order.
    pub fn rows(&self, table: &str) -> Result<Vec<Vec<Value>>> {
        let mut rows = Vec::new();
        self.scan(table, |row| {
            rows.push(row);
            Ok(())
        })?;
        Ok(rows)
    }

    /// Write the full listing to `out`.
    pub fn dump<W: Write>(&self, out: &mut W) -> Result<DumpSummary> {
        let tables = self.table_names()?;

        writeln!(out, "Tables in the database:")?;
        for table in &tables {
            writeln!(out, "{}", table)?;
        }

        let mut summary = DumpSummary::default();
        for table in &tables {
            writeln!(out)?;
            writeln!(out, "Content of table '{}':", table)?;

            let mut row_count = 0;
            self.scan(table, |row| {
                writeln!(out, "{}", render::row(&row))?;
                row_count += 1;
                Ok(())
            })?;

            tracing::debug!(table = %table, rows = row_count, "Dumped table");
            summary.tables += 1;
            summary.rows += row_count;
        }

        out.flush()?;
        Ok(summary)
    }

    /// Close the connection, surfacing any error from SQLite.
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn.close().map_err(|(_, e)| Error::Database(e))?;
        tracing::debug!(path = %path.display(), "Closed database");
        Ok(())
    }

    fn scan<F>(&self, table: &str, mut on_row: F) -> Result<()>
    where
        F: FnMut(Vec<Value>) -> Result<()>,
    {
        let sql = format!("SELECT * FROM {}", quote_identifier(table));
        let mut stmt = self.conn.prepare(&sql)?;
        let columns = stmt.column_count();

        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let values = (0..columns)
                .map(|i| row.get_ref(i).and_then(owned_value))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            on_row(values)?;
        }
        Ok(())
    }
}

/// Open `path`, dump every table to `out`, and close the connection.
pub fn dump_database<W: Write>(path: &Path, out: &mut W) -> Result<DumpSummary> {
    let dumper = TableDumper::open(path)?;
    let summary = dumper.dump(out)?;
    dumper.close()?;

    tracing::info!(
        path = %path.display(),
        tables = summary.tables,
        rows = summary.rows,
        "Dump complete"
    );
    Ok(summary)
}

/// Copy a column value out of the row, rejecting TEXT that is not UTF-8.
fn owned_value(value: ValueRef<'_>) -> rusqlite::Result<Value> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(bytes) => Value::Text(
            std::str::from_utf8(bytes)
                .map_err(rusqlite::Error::Utf8Error)?
                .to_string(),
        ),
        ValueRef::Blob(bytes) => Value::Blob(bytes.to_vec()),
    })
}

/// Quote a name as an SQL identifier.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
