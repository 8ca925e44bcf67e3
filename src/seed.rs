//! Demonstration data. Runs outside the interactive loop with its own
//! connection and has no idempotence guard: a second run duplicates the
//! authors and then trips over the ISBN constraint on the books.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::Connection;
use tracing::info;

use crate::db::{create_author, create_book, initialize};
use crate::error::{LibraryError, Result};
use crate::models::{NewAuthor, NewBook};

/// Ids created by one seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub author_ids: Vec<i64>,
    pub book_ids: Vec<i64>,
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| LibraryError::validation(format!("invalid date {year}-{month}-{day}")))
}

/// Insert the two sample authors, then one sample book for each of them.
pub fn seed_sample_data(conn: &Connection) -> Result<SeedReport> {
    let canfield = create_author(
        conn,
        &NewAuthor {
            first_name: "Jack".into(),
            last_name: "Canfield".into(),
            birth_date: Some(date(1944, 8, 19)?),
            nationality: Some("American".into()),
        },
    )?;
    let crutcher = create_author(
        conn,
        &NewAuthor {
            first_name: "Mark".into(),
            last_name: "Crutcher".into(),
            birth_date: Some(date(1969, 9, 10)?),
            nationality: Some("British".into()),
        },
    )?;

    let lightning_thief = create_book(
        conn,
        &NewBook {
            title: "The Lightning Thief".into(),
            author_id: canfield.id,
            publication_year: Some(1990),
            isbn: Some("0553497448".into()),
            genre: Some("Fiction".into()),
            read_status: false,
        },
    )?;
    let one_who_laughs = create_book(
        conn,
        &NewBook {
            title: "The one who laughs".into(),
            author_id: crutcher.id,
            publication_year: Some(2005),
            isbn: Some("1234567890".into()),
            genre: Some("Non-Fiction".into()),
            read_status: true,
        },
    )?;

    let report = SeedReport {
        author_ids: vec![canfield.id, crutcher.id],
        book_ids: vec![lightning_thief.id, one_who_laughs.id],
    };
    info!(?report, "sample data added");
    Ok(report)
}

/// Open the store at `path` and seed it.
pub fn run_seed(path: &Path) -> Result<SeedReport> {
    let conn = initialize(path)?;
    seed_sample_data(&conn)
}
