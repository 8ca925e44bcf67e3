//! Filtered lookups. Text criteria are case-insensitive substring matches,
//! numeric criteria match exactly, and every criterion that is supplied must
//! hold. A criterion left out (or empty) does not filter at all.

use rusqlite::{params, Connection};
use tracing::debug;

use crate::error::Result;
use crate::models::{Author, BookListing};

use super::authors::{author_from_row, AUTHOR_COLUMNS};
use super::books::{listing_from_row, LISTING_SELECT};

/// Escape `LIKE` wildcards so user text is matched literally. Only an empty
/// term is dropped; whitespace is part of the substring.
fn like_term(value: Option<&str>) -> Option<String> {
    value.filter(|term| !term.is_empty()).map(|term| {
        let mut escaped = String::with_capacity(term.len());
        for ch in term.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                escaped.push('\\');
            }
            escaped.push(ch);
        }
        escaped
    })
}

/// Authors whose first and/or last name contain the given text, in insertion
/// order. SQLite's `LIKE` folds ASCII case only.
pub fn search_authors(
    conn: &Connection,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<Vec<Author>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {AUTHOR_COLUMNS} FROM authors
         WHERE (?1 IS NULL OR first_name LIKE '%' || ?1 || '%' ESCAPE '\\')
           AND (?2 IS NULL OR last_name LIKE '%' || ?2 || '%' ESCAPE '\\')
         ORDER BY author_id"
    ))?;

    let authors = stmt
        .query_map(
            params![like_term(first_name), like_term(last_name)],
            author_from_row,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(
        first_name,
        last_name,
        matches = authors.len(),
        "searched authors"
    );
    Ok(authors)
}

/// Books whose title contains `title` and/or that were published in exactly
/// `publication_year`, joined with their author's name.
pub fn search_books(
    conn: &Connection,
    title: Option<&str>,
    publication_year: Option<i64>,
) -> Result<Vec<BookListing>> {
    let mut stmt = conn.prepare(&format!(
        "{LISTING_SELECT}
         WHERE (?1 IS NULL OR b.title LIKE '%' || ?1 || '%' ESCAPE '\\')
           AND (?2 IS NULL OR b.publication_year = ?2)
         ORDER BY b.book_id"
    ))?;

    let books = stmt
        .query_map(params![like_term(title), publication_year], listing_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(title, publication_year, matches = books.len(), "searched books");
    Ok(books)
}
