//! Persistence split by table, plus the kind-generic gateway and the search
//! layer on top of them.

mod authors;
mod books;
mod connection;
mod records;
mod search;

#[cfg(test)]
mod tests;

pub use authors::{create_author, delete_author, fetch_author, fetch_authors};
pub use books::{
    create_book, delete_book, fetch_book, fetch_book_listings, fetch_books,
    fetch_books_by_author,
};
pub use connection::{ensure_schema, initialize, initialize_in_memory};
pub use records::{add, count, delete_by_id, get_by_id, list_all, NewRecord, Record};
pub use search::{search_authors, search_books};
