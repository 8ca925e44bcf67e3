//! Kind-generic gateway over the per-table helpers, for callers that hold an
//! [`EntityKind`] rather than a concrete record type.

use rusqlite::Connection;

use crate::error::Result;
use crate::models::{Author, Book, EntityKind, NewAuthor, NewBook};

use super::authors::{create_author, delete_author, fetch_author, fetch_authors};
use super::books::{create_book, delete_book, fetch_book, fetch_books};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Author(Author),
    Book(Book),
}

impl Record {
    pub fn id(&self) -> i64 {
        match self {
            Record::Author(author) => author.id,
            Record::Book(book) => book.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewRecord {
    Author(NewAuthor),
    Book(NewBook),
}

/// Insert a record and return its assigned id.
pub fn add(conn: &Connection, record: &NewRecord) -> Result<i64> {
    match record {
        NewRecord::Author(author) => Ok(create_author(conn, author)?.id),
        NewRecord::Book(book) => Ok(create_book(conn, book)?.id),
    }
}

pub fn get_by_id(conn: &Connection, kind: EntityKind, id: i64) -> Result<Option<Record>> {
    Ok(match kind {
        EntityKind::Author => fetch_author(conn, id)?.map(Record::Author),
        EntityKind::Book => fetch_book(conn, id)?.map(Record::Book),
    })
}

pub fn delete_by_id(conn: &Connection, kind: EntityKind, id: i64) -> Result<()> {
    match kind {
        EntityKind::Author => delete_author(conn, id),
        EntityKind::Book => delete_book(conn, id),
    }
}

/// All records of one kind in insertion order.
pub fn list_all(conn: &Connection, kind: EntityKind) -> Result<Vec<Record>> {
    Ok(match kind {
        EntityKind::Author => fetch_authors(conn)?
            .into_iter()
            .map(Record::Author)
            .collect(),
        EntityKind::Book => fetch_books(conn)?.into_iter().map(Record::Book).collect(),
    })
}

pub fn count(conn: &Connection, kind: EntityKind) -> Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
    Ok(conn.query_row(&sql, [], |row| row.get(0))?)
}
