//! Error type shared by the storage gateway, the search layer and the seed
//! loader. Each variant maps to one failure the menu reports back to the
//! user without ending the session.

use thiserror::Error;

use crate::models::EntityKind;

pub type Result<T> = std::result::Result<T, LibraryError>;

#[derive(Debug, Error)]
pub enum LibraryError {
    /// Lookup or delete on an id that has no row.
    #[error("No {kind} found with ID {id}.")]
    NotFound { kind: EntityKind, id: i64 },

    /// Unique ISBN clash, or a book pointing at an author that does not exist.
    #[error("{0}")]
    ConstraintViolation(String),

    /// Malformed or missing user input.
    #[error("{0}")]
    Validation(String),

    /// Author still referenced by books.
    #[error("Author with ID {author_id} still has {book_count} book(s); delete those first.")]
    DanglingReference { author_id: i64, book_count: i64 },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LibraryError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
