use std::io::{BufRead, Write};

use anyhow::Result;
use rusqlite::Connection;
use tracing::debug;

use crate::db::{
    create_author, create_book, delete_author, delete_book, fetch_authors, fetch_book_listings,
    fetch_books_by_author, search_authors, search_books,
};
use crate::error::LibraryError;
use crate::models::{Author, BookListing, NewAuthor, NewBook};

use super::commands::{AuthorSearch, BookSearch, MainCommand, MenuChoice};
use super::helpers::{surface_error, StatusKind};
use super::prompt::{InputClosed, Prompter};

/// Interactive library session. Owns the store connection for its lifetime
/// and always returns to the main menu after an action.
pub struct Menu<R, W> {
    conn: Connection,
    io: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(conn: Connection, input: R, output: W, colored: bool) -> Self {
        Self {
            conn,
            io: Prompter::new(input, output, colored),
        }
    }

    pub fn into_parts(self) -> (Connection, W) {
        (self.conn, self.io.into_output())
    }

    /// Drive the main menu until Exit is chosen or input runs out. Action
    /// failures are reported and the loop carries on; only output errors end
    /// it early.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(command) = self.choose::<MainCommand>()? else {
                return Ok(());
            };

            if command == MainCommand::Exit {
                self.io.status(StatusKind::Info, "Exiting. Goodbye!")?;
                return Ok(());
            }

            debug!(?command, "dispatching menu command");
            match self.dispatch(command) {
                Ok(()) => {}
                Err(err) if err.is::<InputClosed>() => return Ok(()),
                Err(err) => self.report(&err)?,
            }
        }
    }

    /// Show a numbered menu and read a choice. Invalid input is reported; the
    /// main menu is then shown again while search menus give up. `None` means
    /// no choice was made.
    fn choose<C: MenuChoice>(&mut self) -> Result<Option<C>> {
        loop {
            self.render::<C>()?;
            let input = match self.io.line(&C::prompt()) {
                Ok(input) => input,
                Err(err) if err.is::<InputClosed>() => return Ok(None),
                Err(err) => return Err(err),
            };
            match C::parse(&input) {
                Some(choice) => return Ok(Some(choice)),
                None => self.io.status(StatusKind::Error, C::invalid_message())?,
            }
            if !C::REPEAT_ON_INVALID {
                return Ok(None);
            }
        }
    }

    fn render<C: MenuChoice>(&mut self) -> Result<()> {
        self.io.say(C::TITLE)?;
        for (index, option) in C::OPTIONS.iter().enumerate() {
            self.io.say(format!("{}. {}", index + 1, option.label()))?;
        }
        Ok(())
    }

    fn dispatch(&mut self, command: MainCommand) -> Result<()> {
        match command {
            MainCommand::AddAuthor => self.add_author(),
            MainCommand::DeleteAuthor => self.delete_author(),
            MainCommand::ListAuthors => self.list_authors(),
            MainCommand::SearchAuthors => self.search_author_menu(),
            MainCommand::AddBook => self.add_book(),
            MainCommand::DeleteBook => self.delete_book(),
            MainCommand::ListBooks => self.list_books(),
            MainCommand::SearchBooks => self.search_book_menu(),
            MainCommand::Exit => Ok(()),
        }
    }

    fn report(&mut self, err: &anyhow::Error) -> Result<()> {
        let message = surface_error(err);
        self.io.status(StatusKind::Error, message)
    }

    fn add_author(&mut self) -> Result<()> {
        let first_name = self.io.required("First Name")?;
        let last_name = self.io.required("Last Name")?;
        let birth_date = self.io.optional_date("Birth Date (YYYY-MM-DD)")?;
        let nationality = self.io.optional("Nationality")?;

        let author = create_author(
            &self.conn,
            &NewAuthor {
                first_name,
                last_name,
                birth_date,
                nationality,
            },
        )?;
        self.io.status(
            StatusKind::Info,
            format!(
                "Author {} added successfully with ID {}.",
                author.full_name(),
                author.id
            ),
        )
    }

    fn delete_author(&mut self) -> Result<()> {
        let id = self.io.required_int("Author ID")?;
        match delete_author(&self.conn, id) {
            Ok(()) => self.io.status(
                StatusKind::Info,
                format!("Author with ID {id} deleted successfully."),
            ),
            Err(err @ LibraryError::DanglingReference { author_id, .. }) => {
                self.io.status(StatusKind::Error, err.to_string())?;
                for book in fetch_books_by_author(&self.conn, author_id)? {
                    self.io.say(format!("   {}. {}", book.id, book.title))?;
                }
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn list_authors(&mut self) -> Result<()> {
        let authors = fetch_authors(&self.conn)?;
        self.show_authors(&authors, "List of Authors:", "No authors found.")
    }

    fn show_authors(&mut self, authors: &[Author], heading: &str, empty: &str) -> Result<()> {
        if authors.is_empty() {
            return self.io.say(empty);
        }
        self.io.say(heading)?;
        for author in authors {
            self.io.say(author.to_string())?;
        }
        Ok(())
    }

    fn search_author_menu(&mut self) -> Result<()> {
        let Some(choice) = self.choose::<AuthorSearch>()? else {
            return Ok(());
        };
        let authors = match choice {
            AuthorSearch::FirstName => {
                let first_name = self.io.required("Enter the first name to search")?;
                search_authors(&self.conn, Some(&first_name), None)?
            }
            AuthorSearch::LastName => {
                let last_name = self.io.required("Enter the last name to search")?;
                search_authors(&self.conn, None, Some(&last_name))?
            }
            AuthorSearch::Back => {
                return self.io.say("Returning to the main menu.");
            }
        };
        self.show_authors(
            &authors,
            "List of Matching Authors:",
            "No matching authors found.",
        )
    }

    fn add_book(&mut self) -> Result<()> {
        let title = self.io.required("Title")?;
        let isbn = self.io.optional("ISBN")?;
        let publication_year = self.io.optional_int("Publication Year")?;
        let genre = self.io.optional("Genre")?;
        let read_status = self.io.flag("Read Status (y/n)")?;
        let author_id = self.io.required_int("Author ID")?;

        let book = create_book(
            &self.conn,
            &NewBook {
                title,
                author_id,
                publication_year,
                isbn,
                genre,
                read_status,
            },
        )?;
        self.io.status(
            StatusKind::Info,
            format!("Book '{}' added successfully with ID {}.", book.title, book.id),
        )
    }

    fn delete_book(&mut self) -> Result<()> {
        let id = self.io.required_int("Book ID")?;
        delete_book(&self.conn, id)?;
        self.io.status(
            StatusKind::Info,
            format!("Book with ID {id} deleted successfully."),
        )
    }

    fn list_books(&mut self) -> Result<()> {
        let books = fetch_book_listings(&self.conn)?;
        if books.is_empty() {
            return self.io.say("No books found.");
        }
        self.io.say("List of Books:")?;
        for listing in &books {
            self.io.say(listing.to_string())?;
            self.io.say(format!(
                "   Genre: {}",
                listing.book.genre.as_deref().unwrap_or("-")
            ))?;
            self.io
                .say(format!("   Read Status: {}", listing.read_label()))?;
        }
        Ok(())
    }

    fn search_book_menu(&mut self) -> Result<()> {
        let Some(choice) = self.choose::<BookSearch>()? else {
            return Ok(());
        };
        let books = match choice {
            BookSearch::Title => {
                let title = self.io.required("Enter the title to search")?;
                search_books(&self.conn, Some(&title), None)?
            }
            BookSearch::PublicationYear => {
                let year = self
                    .io
                    .required_int("Enter the publication year to search")?;
                search_books(&self.conn, None, Some(year))?
            }
            BookSearch::Back => {
                return self.io.say("Returning to the main menu.");
            }
        };
        self.show_matching_books(&books)
    }

    fn show_matching_books(&mut self, books: &[BookListing]) -> Result<()> {
        if books.is_empty() {
            return self.io.say("No matching books found.");
        }
        self.io.say("List of Matching Books:")?;
        for listing in books {
            self.io.say(listing.to_string())?;
        }
        Ok(())
    }
}
