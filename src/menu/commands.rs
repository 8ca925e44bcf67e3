//! The numbered choices of each menu. Every menu is an enum whose variant
//! order is its numbering, so dispatch is an exhaustive `match`.

/// A menu whose options are numbered from 1 in declaration order.
pub trait MenuChoice: Copy + Sized + 'static {
    const TITLE: &'static str;
    const OPTIONS: &'static [Self];
    /// Whether an invalid choice shows this menu again or gives up on it.
    const REPEAT_ON_INVALID: bool = true;

    fn label(self) -> &'static str;

    /// Map user input to an option. Non-numeric and out-of-range input yield
    /// `None`.
    fn parse(input: &str) -> Option<Self> {
        let choice = input.trim().parse::<usize>().ok()?;
        choice
            .checked_sub(1)
            .and_then(|index| Self::OPTIONS.get(index))
            .copied()
    }

    fn prompt() -> String {
        format!("Enter your choice (1-{})", Self::OPTIONS.len())
    }

    fn invalid_message() -> String {
        format!(
            "Invalid choice. Please enter a number between 1 and {}.",
            Self::OPTIONS.len()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainCommand {
    AddAuthor,
    DeleteAuthor,
    ListAuthors,
    SearchAuthors,
    AddBook,
    DeleteBook,
    ListBooks,
    SearchBooks,
    Exit,
}

impl MenuChoice for MainCommand {
    const TITLE: &'static str = "Book Library Management System";
    const OPTIONS: &'static [Self] = &[
        MainCommand::AddAuthor,
        MainCommand::DeleteAuthor,
        MainCommand::ListAuthors,
        MainCommand::SearchAuthors,
        MainCommand::AddBook,
        MainCommand::DeleteBook,
        MainCommand::ListBooks,
        MainCommand::SearchBooks,
        MainCommand::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            MainCommand::AddAuthor => "Add Author",
            MainCommand::DeleteAuthor => "Delete Author",
            MainCommand::ListAuthors => "List Authors",
            MainCommand::SearchAuthors => "Search Author",
            MainCommand::AddBook => "Add Book",
            MainCommand::DeleteBook => "Delete Book",
            MainCommand::ListBooks => "List Books",
            MainCommand::SearchBooks => "Search Book",
            MainCommand::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorSearch {
    FirstName,
    LastName,
    Back,
}

impl MenuChoice for AuthorSearch {
    const TITLE: &'static str = "Search Author Options:";
    const REPEAT_ON_INVALID: bool = false;
    const OPTIONS: &'static [Self] = &[
        AuthorSearch::FirstName,
        AuthorSearch::LastName,
        AuthorSearch::Back,
    ];

    fn label(self) -> &'static str {
        match self {
            AuthorSearch::FirstName => "Search by First Name",
            AuthorSearch::LastName => "Search by Last Name",
            AuthorSearch::Back => "Back to Main Menu",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookSearch {
    Title,
    PublicationYear,
    Back,
}

impl MenuChoice for BookSearch {
    const TITLE: &'static str = "Search Book Options:";
    const REPEAT_ON_INVALID: bool = false;
    const OPTIONS: &'static [Self] = &[
        BookSearch::Title,
        BookSearch::PublicationYear,
        BookSearch::Back,
    ];

    fn label(self) -> &'static str {
        match self {
            BookSearch::Title => "Search by Title",
            BookSearch::PublicationYear => "Search by Publication Year",
            BookSearch::Back => "Back to Main Menu",
        }
    }
}
