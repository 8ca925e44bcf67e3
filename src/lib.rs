//! Personal library catalog: authors and books in a local SQLite file,
//! managed through a numbered text menu.
//!
//! `db` is the storage gateway and search layer, `menu` the interactive
//! dispatcher, and `seed` loads demonstration rows.
pub mod config;
pub mod db;
pub mod error;
pub mod menu;
pub mod models;
pub mod seed;

pub use config::Config;
pub use error::{LibraryError, Result};
pub use models::{Author, Book, BookListing, EntityKind, NewAuthor, NewBook};
pub use menu::Menu;
pub use seed::{run_seed, seed_sample_data, SeedReport};
