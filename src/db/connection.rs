use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use crate::error::Result;

/// Open (or create) the library database at `path`, enable foreign keys and
/// make sure both tables exist. Safe to call on every start-up.
pub fn initialize(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(path)?;
    ensure_schema(&conn)?;
    info!(path = %path.display(), "library store ready");
    Ok(conn)
}

/// Same as [`initialize`] but backed by a private in-memory database.
pub fn initialize_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Create the `authors` and `books` tables when they are missing. Books keep a
/// plain foreign key to their author with no cascade, so SQLite refuses to
/// orphan them.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS authors (
            author_id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            birth_date TEXT,
            nationality TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS books (
            book_id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author_id INTEGER NOT NULL,
            publication_year INTEGER,
            isbn TEXT UNIQUE,
            genre TEXT,
            read_status INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY(author_id) REFERENCES authors(author_id)
        )",
        [],
    )?;

    Ok(())
}
