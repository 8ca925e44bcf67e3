//! Numbered text menu over standard input and output.

mod app;
mod commands;
mod helpers;
mod prompt;


pub use app::Menu;
pub use commands::{AuthorSearch, BookSearch, MainCommand, MenuChoice};
pub use helpers::StatusKind;
pub use prompt::{parse_date, parse_flag, parse_int, InputClosed, Prompter};
