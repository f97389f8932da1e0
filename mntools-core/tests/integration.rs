//! Integration tests for the dumper and line counter
//!
//! Fixtures are built in temporary directories: SQLite databases are created
//! with rusqlite, source trees with plain files.

use mntools_core::dump::render;
use mntools_core::{dump_database, DumpSummary, Error, LineCounter, LineTotals, TableDumper};
use rusqlite::types::Value;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a database at `dir/data/mindnoscape.db` from a SQL batch
fn seed_database(dir: &Path, sql: &str) -> PathBuf {
    let path = dir.join("data").join("mindnoscape.db");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(sql).unwrap();
    path
}

fn dump_to_string(path: &Path) -> String {
    mntools_core::logging::init_test();
    let mut out = Vec::new();
    dump_database(path, &mut out).expect("dump should succeed");
    String::from_utf8(out).unwrap()
}

fn write_lines(path: &Path, count: usize) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let body: String = (0..count).map(|i| format!("line {}\n", i)).collect();
    fs::write(path, body).unwrap();
}

// ============================================
// Database dumper
// ============================================

#[test]
fn test_dump_users_scenario() {
    let dir = TempDir::new().unwrap();
    let path = seed_database(
        dir.path(),
        "CREATE TABLE users (id INTEGER, name TEXT);
         INSERT INTO users VALUES (1, 'alice'), (2, 'bob');",
    );

    let output = dump_to_string(&path);
    assert_eq!(
        output,
        "Tables in the database:\n\
         users\n\
         \n\
         Content of table 'users':\n\
         (1, 'alice')\n\
         (2, 'bob')\n"
    );
}

#[test]
fn test_dump_mindnoscape_schema() {
    let dir = TempDir::new().unwrap();
    let path = seed_database(
        dir.path(),
        "CREATE TABLE users (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             username TEXT UNIQUE NOT NULL,
             password_hash BLOB NOT NULL,
             active BOOLEAN NOT NULL DEFAULT 1
         );
         CREATE TABLE mindmaps (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             mindmap_name TEXT NOT NULL,
             owner TEXT NOT NULL,
             is_public BOOLEAN NOT NULL DEFAULT 0
         );
         CREATE TABLE nodes_1 (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             node_name TEXT NOT NULL,
             index_value TEXT NOT NULL
         );
         INSERT INTO users (username, password_hash) VALUES ('a', x'');
         INSERT INTO mindmaps (mindmap_name, owner) VALUES ('ideas', 'a');",
    );

    let output = dump_to_string(&path);
    let expected = "Tables in the database:
users
sqlite_sequence
mindmaps
nodes_1

Content of table 'users':
(1, 'a', b'', 1)

Content of table 'sqlite_sequence':
('users', 1)
('mindmaps', 1)

Content of table 'mindmaps':
(1, 'ideas', 'a', 0)

Content of table 'nodes_1':
";
    assert_eq!(output, expected);
}

#[test]
fn test_dump_summary_counts() {
    let dir = TempDir::new().unwrap();
    let path = seed_database(
        dir.path(),
        "CREATE TABLE a (x); CREATE TABLE b (y);
         INSERT INTO a VALUES (1), (2), (3);
         INSERT INTO b VALUES (NULL);",
    );

    let mut out = Vec::new();
    let summary = dump_database(&path, &mut out).unwrap();
    assert_eq!(summary, DumpSummary { tables: 2, rows: 4 });
}

#[test]
fn test_dump_does_not_modify_database() {
    let dir = TempDir::new().unwrap();
    let path = seed_database(dir.path(), "CREATE TABLE t (a); INSERT INTO t VALUES (1);");
    let before = fs::read(&path).unwrap();

    let first = dump_to_string(&path);
    let second = dump_to_string(&path);

    assert_eq!(first, second);
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_rows_and_render_agree() {
    let dir = TempDir::new().unwrap();
    let path = seed_database(
        dir.path(),
        "CREATE TABLE m (i INTEGER, r REAL, t TEXT, b BLOB, n);
         INSERT INTO m VALUES (-5, 0.5, 'x', x'41', NULL);",
    );

    let dumper = TableDumper::open(&path).unwrap();
    let rows = dumper.rows("m").unwrap();
    assert_eq!(
        rows,
        vec![vec![
            Value::Integer(-5),
            Value::Real(0.5),
            Value::Text("x".to_string()),
            Value::Blob(vec![0x41]),
            Value::Null,
        ]]
    );
    assert_eq!(render::row(&rows[0]), "(-5, 0.5, 'x', b'A', None)");
    dumper.close().unwrap();
}

#[test]
fn test_dump_missing_database_fails() {
    let dir = TempDir::new().unwrap();
    let mut out = Vec::new();
    let result = dump_database(&dir.path().join("data/mindnoscape.db"), &mut out);

    assert!(matches!(result, Err(Error::Database(_))));
    assert!(out.is_empty());
}

// ============================================
// Line counter
// ============================================

#[test]
fn test_count_go_scenario() {
    let dir = TempDir::new().unwrap();
    write_lines(&dir.path().join("a.go"), 3);
    write_lines(&dir.path().join("b.go"), 5);
    write_lines(&dir.path().join("c.txt"), 100);

    let totals = LineCounter::new(".go").count(dir.path()).unwrap();
    assert_eq!(totals, LineTotals { files: 2, lines: 8 });
    assert_eq!(
        totals.render("Go"),
        "Total Go files: 2\nTotal lines of Go code: 8"
    );
}

#[test]
fn test_count_unterminated_last_line() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("main.go"), "package main\nfunc main() {}").unwrap();

    let totals = LineCounter::new(".go").count(dir.path()).unwrap();
    assert_eq!(totals, LineTotals { files: 1, lines: 2 });
}

#[test]
fn test_count_other_extension() {
    let dir = TempDir::new().unwrap();
    write_lines(&dir.path().join("src/lib.rs"), 10);
    write_lines(&dir.path().join("src/bin/tool.rs"), 4);
    write_lines(&dir.path().join("main.go"), 7);

    let totals = LineCounter::new("rs").count(dir.path()).unwrap();
    assert_eq!(totals, LineTotals { files: 2, lines: 14 });
}

#[test]
fn test_count_missing_root_is_empty() {
    let dir = TempDir::new().unwrap();
    let totals = LineCounter::new(".go")
        .count(&dir.path().join("does-not-exist"))
        .unwrap();
    assert_eq!(totals, LineTotals::default());
}

#[test]
fn test_count_is_repeatable() {
    let dir = TempDir::new().unwrap();
    write_lines(&dir.path().join("x/y/z.go"), 12);
    write_lines(&dir.path().join("x/w.go"), 1);

    let counter = LineCounter::new(".go");
    let first = counter.count(dir.path()).unwrap();
    let second = counter.count(dir.path()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, LineTotals { files: 2, lines: 13 });
}

#[cfg(unix)]
#[test]
fn test_count_broken_symlink_aborts() {
    let dir = TempDir::new().unwrap();
    write_lines(&dir.path().join("ok.go"), 2);
    std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("dangling.go"))
        .unwrap();

    let result = LineCounter::new(".go").count(dir.path());
    assert!(matches!(result, Err(Error::Io(_))));
}
