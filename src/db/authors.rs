use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, warn};

use crate::error::{LibraryError, Result};
use crate::models::{non_blank, Author, EntityKind, NewAuthor};

pub(crate) const AUTHOR_COLUMNS: &str = "author_id, first_name, last_name, birth_date, nationality";

pub(crate) fn author_from_row(row: &Row<'_>) -> rusqlite::Result<Author> {
    Ok(Author {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        birth_date: row.get(3)?,
        nationality: row.get(4)?,
    })
}

/// Insert a new author and hand back the stored row with its assigned id.
pub fn create_author(conn: &Connection, author: &NewAuthor) -> Result<Author> {
    let first_name = author.first_name.as_str();
    let last_name = author.last_name.as_str();
    if first_name.trim().is_empty() {
        return Err(LibraryError::validation("First name is required."));
    }
    if last_name.trim().is_empty() {
        return Err(LibraryError::validation("Last name is required."));
    }
    let nationality = non_blank(author.nationality.as_deref());

    conn.execute(
        "INSERT INTO authors (first_name, last_name, birth_date, nationality)
         VALUES (?1, ?2, ?3, ?4)",
        params![first_name, last_name, author.birth_date, nationality],
    )?;

    let id = conn.last_insert_rowid();
    debug!(author_id = id, "inserted author");
    Ok(Author {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        birth_date: author.birth_date,
        nationality,
    })
}

/// Look up a single author; `None` when the id has no row.
pub fn fetch_author(conn: &Connection, id: i64) -> Result<Option<Author>> {
    let author = conn
        .query_row(
            &format!("SELECT {AUTHOR_COLUMNS} FROM authors WHERE author_id = ?1"),
            [id],
            author_from_row,
        )
        .optional()?;
    Ok(author)
}

/// Every author in insertion order.
pub fn fetch_authors(conn: &Connection) -> Result<Vec<Author>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {AUTHOR_COLUMNS} FROM authors ORDER BY author_id"
    ))?;

    let authors = stmt
        .query_map([], author_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(authors)
}

/// Remove an author. Authors that still own books are refused rather than
/// leaving those books pointing at nothing.
pub fn delete_author(conn: &Connection, id: i64) -> Result<()> {
    let book_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM books WHERE author_id = ?1",
        [id],
        |row| row.get(0),
    )?;
    if book_count > 0 {
        warn!(author_id = id, book_count, "refused to delete referenced author");
        return Err(LibraryError::DanglingReference {
            author_id: id,
            book_count,
        });
    }

    let deleted = conn.execute("DELETE FROM authors WHERE author_id = ?1", params![id])?;

    if deleted == 0 {
        Err(LibraryError::NotFound {
            kind: EntityKind::Author,
            id,
        })
    } else {
        debug!(author_id = id, "deleted author");
        Ok(())
    }
}
