use anyhow::Error;
use crossterm::style::{style, Color, Stylize};

/// Severity of a status line written after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn color(self) -> Color {
        match self {
            StatusKind::Info => Color::Green,
            StatusKind::Error => Color::Red,
        }
    }
}

/// Render a status line, coloured only when writing to a terminal.
pub(crate) fn status_line(kind: StatusKind, text: &str, colored: bool) -> String {
    if colored {
        style(text).with(kind.color()).to_string()
    } else {
        text.to_string()
    }
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}
