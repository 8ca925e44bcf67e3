use super::*;
use crate::error::{LibraryError, Result};
use crate::models::{Author, EntityKind, NewAuthor, NewBook};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rusqlite::Connection;

fn store() -> Result<Connection> {
    initialize_in_memory()
}

fn new_author(first_name: &str, last_name: &str) -> NewAuthor {
    NewAuthor {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        birth_date: None,
        nationality: None,
    }
}

fn new_book(title: &str, author_id: i64) -> NewBook {
    NewBook {
        title: title.to_string(),
        author_id,
        publication_year: None,
        isbn: None,
        genre: None,
        read_status: false,
    }
}

#[test]
fn schema_creation_is_idempotent() -> Result<()> {
    let conn = store()?;
    let author = create_author(&conn, &new_author("Herman", "Melville"))?;
    ensure_schema(&conn)?;
    ensure_schema(&conn)?;

    assert_eq!(fetch_author(&conn, author.id)?, Some(author));
    Ok(())
}

#[test]
fn added_author_reads_back_unchanged() -> Result<()> {
    let conn = store()?;
    let submitted = NewAuthor {
        first_name: "Jack".into(),
        last_name: "Canfield".into(),
        birth_date: NaiveDate::from_ymd_opt(1944, 8, 19),
        nationality: Some("American".into()),
    };

    let id = add(&conn, &NewRecord::Author(submitted.clone()))?;
    let Some(Record::Author(stored)) = get_by_id(&conn, EntityKind::Author, id)? else {
        panic!("author {id} should exist");
    };

    assert_eq!(
        stored,
        Author {
            id,
            first_name: submitted.first_name,
            last_name: submitted.last_name,
            birth_date: submitted.birth_date,
            nationality: submitted.nationality,
        }
    );
    Ok(())
}

#[test]
fn blank_required_author_name_is_rejected() -> Result<()> {
    let conn = store()?;
    let err = create_author(&conn, &new_author("  ", "Melville")).unwrap_err();
    assert!(matches!(err, LibraryError::Validation(_)));
    assert_eq!(count(&conn, EntityKind::Author)?, 0);
    Ok(())
}

#[test]
fn book_defaults_to_unread_and_stores_blank_text_as_null() -> Result<()> {
    let conn = store()?;
    let author = create_author(&conn, &new_author("Herman", "Melville"))?;
    let book = create_book(
        &conn,
        &NewBook {
            isbn: Some("   ".into()),
            genre: Some(String::new()),
            ..new_book("Moby Dick", author.id)
        },
    )?;

    let stored = fetch_book(&conn, book.id)?.expect("book should exist");
    assert!(!stored.read_status);
    assert_eq!(stored.isbn, None);
    assert_eq!(stored.genre, None);
    Ok(())
}

#[test]
fn book_with_unknown_author_is_rejected_and_not_stored() -> Result<()> {
    let conn = store()?;
    let err = create_book(&conn, &new_book("Orphan", 42)).unwrap_err();

    assert!(matches!(err, LibraryError::ConstraintViolation(_)));
    assert_eq!(count(&conn, EntityKind::Book)?, 0);
    Ok(())
}

#[test]
fn duplicate_isbn_is_rejected() -> Result<()> {
    let conn = store()?;
    let author = create_author(&conn, &new_author("Herman", "Melville"))?;
    let first = NewBook {
        isbn: Some("0553497448".into()),
        ..new_book("Moby Dick", author.id)
    };
    let second = NewBook {
        isbn: Some("0553497448".into()),
        ..new_book("Moby Dick (reprint)", author.id)
    };

    create_book(&conn, &first)?;
    let err = create_book(&conn, &second).unwrap_err();

    assert!(matches!(err, LibraryError::ConstraintViolation(ref message) if message.contains("0553497448")));
    let with_isbn: i64 = conn.query_row(
        "SELECT COUNT(*) FROM books WHERE isbn = '0553497448'",
        [],
        |row| row.get(0),
    )?;
    assert_eq!(with_isbn, 1);
    Ok(())
}

#[test]
fn books_without_isbn_do_not_collide() -> Result<()> {
    let conn = store()?;
    let author = create_author(&conn, &new_author("Herman", "Melville"))?;
    create_book(&conn, &new_book("Typee", author.id))?;
    create_book(&conn, &new_book("Omoo", author.id))?;

    assert_eq!(count(&conn, EntityKind::Book)?, 2);
    Ok(())
}

#[test]
fn deleting_missing_ids_reports_not_found() -> Result<()> {
    let conn = store()?;
    let author = create_author(&conn, &new_author("Herman", "Melville"))?;
    create_book(&conn, &new_book("Moby Dick", author.id))?;

    for kind in [EntityKind::Author, EntityKind::Book] {
        let before = count(&conn, kind)?;
        let err = delete_by_id(&conn, kind, 999).unwrap_err();
        assert!(matches!(err, LibraryError::NotFound { kind: k, id: 999 } if k == kind));
        assert_eq!(count(&conn, kind)?, before);
    }
    Ok(())
}

#[test]
fn deleting_author_with_books_is_refused() -> Result<()> {
    let conn = store()?;
    let author = create_author(&conn, &new_author("Herman", "Melville"))?;
    create_book(&conn, &new_book("Moby Dick", author.id))?;
    create_book(&conn, &new_book("Typee", author.id))?;

    let err = delete_author(&conn, author.id).unwrap_err();

    assert!(matches!(
        err,
        LibraryError::DanglingReference {
            author_id,
            book_count: 2
        } if author_id == author.id
    ));
    assert!(fetch_author(&conn, author.id)?.is_some());
    assert_eq!(fetch_books_by_author(&conn, author.id)?.len(), 2);
    Ok(())
}

#[test]
fn author_can_be_deleted_once_books_are_gone() -> Result<()> {
    let conn = store()?;
    let author = create_author(&conn, &new_author("Herman", "Melville"))?;
    let book = create_book(&conn, &new_book("Moby Dick", author.id))?;

    delete_book(&conn, book.id)?;
    delete_author(&conn, author.id)?;

    assert_eq!(get_by_id(&conn, EntityKind::Author, author.id)?, None);
    assert_eq!(get_by_id(&conn, EntityKind::Book, book.id)?, None);
    Ok(())
}

#[test]
fn listings_follow_insertion_order() -> Result<()> {
    let conn = store()?;
    let zadie = create_author(&conn, &new_author("Zadie", "Smith"))?;
    let alice = create_author(&conn, &new_author("Alice", "Munro"))?;
    create_book(&conn, &new_book("White Teeth", zadie.id))?;
    create_book(&conn, &new_book("Dear Life", alice.id))?;

    let ids: Vec<i64> = list_all(&conn, EntityKind::Author)?
        .iter()
        .map(Record::id)
        .collect();
    assert_eq!(ids, vec![zadie.id, alice.id]);

    let listings = fetch_book_listings(&conn)?;
    let rows: Vec<(String, String)> = listings
        .iter()
        .map(|listing| (listing.book.title.clone(), listing.author_name()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("White Teeth".to_string(), "Zadie Smith".to_string()),
            ("Dear Life".to_string(), "Alice Munro".to_string()),
        ]
    );
    Ok(())
}

#[test]
fn book_title_search_is_case_insensitive_substring() -> Result<()> {
    let conn = store()?;
    let author = create_author(&conn, &new_author("Jack", "Canfield"))?;
    create_book(&conn, &new_book("The Lightning Thief", author.id))?;
    create_book(&conn, &new_book("Moby Dick", author.id))?;

    let found = search_books(&conn, Some("light"), None)?;

    let titles: Vec<&str> = found.iter().map(|l| l.book.title.as_str()).collect();
    assert_eq!(titles, vec!["The Lightning Thief"]);
    assert_eq!(found[0].author_name(), "Jack Canfield");
    Ok(())
}

#[test]
fn book_search_combines_criteria() -> Result<()> {
    let conn = store()?;
    let author = create_author(&conn, &new_author("Herman", "Melville"))?;
    create_book(
        &conn,
        &NewBook {
            publication_year: Some(1851),
            ..new_book("Moby Dick", author.id)
        },
    )?;
    create_book(
        &conn,
        &NewBook {
            publication_year: Some(1846),
            ..new_book("Typee", author.id)
        },
    )?;

    assert_eq!(search_books(&conn, None, Some(1846))?.len(), 1);
    assert_eq!(search_books(&conn, Some("moby"), Some(1851))?.len(), 1);
    assert!(search_books(&conn, Some("moby"), Some(1846))?.is_empty());
    assert_eq!(search_books(&conn, None, None)?.len(), 2);
    Ok(())
}

#[test]
fn author_search_filters_on_both_names() -> Result<()> {
    let conn = store()?;
    let jack = create_author(&conn, &new_author("Jack", "Canfield"))?;
    let jackie = create_author(&conn, &new_author("Jackie", "Collins"))?;
    let mark = create_author(&conn, &new_author("Mark", "Crutcher"))?;

    let ids = |authors: Vec<Author>| authors.into_iter().map(|a| a.id).collect::<Vec<_>>();

    assert_eq!(
        ids(search_authors(&conn, Some("JACK"), None)?),
        vec![jack.id, jackie.id]
    );
    assert_eq!(
        ids(search_authors(&conn, None, Some("c"))?),
        vec![jack.id, jackie.id, mark.id]
    );
    assert_eq!(
        ids(search_authors(&conn, Some("jack"), Some("coll"))?),
        vec![jackie.id]
    );
    assert_eq!(
        ids(search_authors(&conn, None, None)?),
        vec![jack.id, jackie.id, mark.id]
    );
    assert!(search_authors(&conn, Some("zzz"), None)?.is_empty());
    Ok(())
}

#[test]
fn search_wildcards_match_literally() -> Result<()> {
    let conn = store()?;
    let author = create_author(&conn, &new_author("Ann", "O_Neil"))?;
    create_author(&conn, &new_author("Bob", "Oxneil"))?;

    let found = search_authors(&conn, None, Some("o_n"))?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, author.id);
    assert!(search_authors(&conn, Some("%"), None)?.is_empty());
    Ok(())
}

#[test]
fn padded_author_fields_read_back_as_submitted() -> Result<()> {
    let conn = store()?;
    let submitted = NewAuthor {
        first_name: " Jack".into(),
        last_name: "Canfield ".into(),
        birth_date: None,
        nationality: Some(" American".into()),
    };

    let id = add(&conn, &NewRecord::Author(submitted.clone()))?;
    let Some(Record::Author(stored)) = get_by_id(&conn, EntityKind::Author, id)? else {
        panic!("author {id} should exist");
    };

    assert_eq!(stored.first_name, submitted.first_name);
    assert_eq!(stored.last_name, submitted.last_name);
    assert_eq!(stored.nationality, submitted.nationality);
    Ok(())
}

#[test]
fn whitespace_in_search_terms_is_matched_literally() -> Result<()> {
    let conn = store()?;
    create_author(&conn, &new_author("Jack", "Canfield"))?;
    let mary = create_author(&conn, &new_author("Mary Ann", "Evans"))?;

    assert!(search_authors(&conn, Some("k "), None)?.is_empty());
    let found = search_authors(&conn, Some(" "), None)?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, mary.id);
    assert_eq!(search_authors(&conn, Some(""), None)?.len(), 2);
    Ok(())
}
