use rusqlite::{params, Connection, Error as SqlError, ErrorCode, OptionalExtension, Row};
use tracing::{debug, warn};

use crate::error::{LibraryError, Result};
use crate::models::{non_blank, Book, BookListing, EntityKind, NewBook};

use super::authors::fetch_author;

pub(crate) const BOOK_COLUMNS: &str =
    "b.book_id, b.title, b.author_id, b.publication_year, b.isbn, b.genre, b.read_status";

/// Join used by every listing query; the author name columns follow the
/// book columns.
pub(crate) const LISTING_SELECT: &str = "SELECT b.book_id, b.title, b.author_id, b.publication_year, b.isbn, b.genre, b.read_status,
        a.first_name, a.last_name
     FROM books b
     INNER JOIN authors a ON a.author_id = b.author_id";

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author_id: row.get(2)?,
        publication_year: row.get(3)?,
        isbn: row.get(4)?,
        genre: row.get(5)?,
        read_status: row.get(6)?,
    })
}

pub(crate) fn listing_from_row(row: &Row<'_>) -> rusqlite::Result<BookListing> {
    Ok(BookListing {
        book: book_from_row(row)?,
        author_first_name: row.get(7)?,
        author_last_name: row.get(8)?,
    })
}

/// Insert a new book. The author must already exist and a non-blank ISBN
/// must not be in use by another book.
pub fn create_book(conn: &Connection, book: &NewBook) -> Result<Book> {
    let title = book.title.as_str();
    if title.trim().is_empty() {
        return Err(LibraryError::validation("Title is required."));
    }
    if fetch_author(conn, book.author_id)?.is_none() {
        warn!(author_id = book.author_id, "book references unknown author");
        return Err(LibraryError::ConstraintViolation(format!(
            "No author found with ID {}.",
            book.author_id
        )));
    }
    let isbn = non_blank(book.isbn.as_deref());
    let genre = non_blank(book.genre.as_deref());

    conn.execute(
        "INSERT INTO books (title, author_id, publication_year, isbn, genre, read_status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            title,
            book.author_id,
            book.publication_year,
            isbn,
            genre,
            book.read_status
        ],
    )
    .map_err(|err| map_constraint(err, isbn.as_deref()))?;

    let id = conn.last_insert_rowid();
    debug!(book_id = id, author_id = book.author_id, "inserted book");
    Ok(Book {
        id,
        title: title.to_string(),
        author_id: book.author_id,
        publication_year: book.publication_year,
        isbn,
        genre,
        read_status: book.read_status,
    })
}

/// Turn SQLite constraint failures into a readable violation. The ISBN is the
/// only unique column on `books`; the author check above covers the foreign
/// key.
fn map_constraint(err: SqlError, isbn: Option<&str>) -> LibraryError {
    if matches!(err.sqlite_error_code(), Some(ErrorCode::ConstraintViolation)) {
        let message = match isbn {
            Some(isbn) => format!("A book with ISBN {isbn} already exists."),
            None => "Book violates a store constraint.".to_string(),
        };
        warn!(%err, "book insert rejected");
        LibraryError::ConstraintViolation(message)
    } else {
        err.into()
    }
}

pub fn fetch_book(conn: &Connection, id: i64) -> Result<Option<Book>> {
    let book = conn
        .query_row(
            &format!("SELECT {BOOK_COLUMNS} FROM books b WHERE b.book_id = ?1"),
            [id],
            book_from_row,
        )
        .optional()?;
    Ok(book)
}

/// Every book in insertion order.
pub fn fetch_books(conn: &Connection) -> Result<Vec<Book>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOK_COLUMNS} FROM books b ORDER BY b.book_id"
    ))?;

    let books = stmt
        .query_map([], book_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(books)
}

/// Every book together with its author's name, in insertion order.
pub fn fetch_book_listings(conn: &Connection) -> Result<Vec<BookListing>> {
    let mut stmt = conn.prepare(&format!("{LISTING_SELECT} ORDER BY b.book_id"))?;

    let listings = stmt
        .query_map([], listing_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(listings)
}

/// Books written by one author. Stands in for a back-reference on `Author`.
pub fn fetch_books_by_author(conn: &Connection, author_id: i64) -> Result<Vec<Book>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BOOK_COLUMNS} FROM books b WHERE b.author_id = ?1 ORDER BY b.book_id"
    ))?;

    let books = stmt
        .query_map([author_id], book_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(books)
}

pub fn delete_book(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn.execute("DELETE FROM books WHERE book_id = ?1", params![id])?;

    if deleted == 0 {
        Err(LibraryError::NotFound {
            kind: EntityKind::Book,
            id,
        })
    } else {
        debug!(book_id = id, "deleted book");
        Ok(())
    }
}
