//! Record shapes that mirror the two SQLite tables. They stay plain data
//! holders; the relationship between a book and its author is the
//! `author_id` foreign key, resolved by join queries in the `db` module.

use std::fmt;

use chrono::NaiveDate;

/// The two record kinds the store knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Author,
    Book,
}

impl EntityKind {
    pub(crate) fn table(self) -> &'static str {
        match self {
            EntityKind::Author => "authors",
            EntityKind::Book => "books",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Author => f.write_str("author"),
            EntityKind::Book => f.write_str("book"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A persisted author. Authors are never edited after creation.
pub struct Author {
    /// Primary key assigned by SQLite.
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub nationality: Option<String>,
}

impl Author {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} {}", self.id, self.first_name, self.last_name)
    }
}

/// Field values for an author that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub nationality: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A persisted book. `author_id` always resolves to a stored author.
pub struct Book {
    /// Primary key assigned by SQLite.
    pub id: i64,
    pub title: String,
    pub author_id: i64,
    pub publication_year: Option<i64>,
    /// Unique across all books when present.
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub read_status: bool,
}

/// Field values for a book that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author_id: i64,
    pub publication_year: Option<i64>,
    pub isbn: Option<String>,
    pub genre: Option<String>,
    pub read_status: bool,
}

/// A book joined with the name of its author, as shown in listings and
/// search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookListing {
    pub book: Book,
    pub author_first_name: String,
    pub author_last_name: String,
}

impl BookListing {
    pub fn author_name(&self) -> String {
        format!("{} {}", self.author_first_name, self.author_last_name)
    }

    pub fn read_label(&self) -> &'static str {
        if self.book.read_status {
            "Read"
        } else {
            "Not Read"
        }
    }
}

impl fmt::Display for BookListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} - {} {}",
            self.book.id, self.book.title, self.author_first_name, self.author_last_name
        )
    }
}

/// Treat blank optional text as absent so it is stored as NULL. Anything
/// else is kept exactly as given.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}
