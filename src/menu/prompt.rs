//! Line-oriented prompting over any `BufRead`/`Write` pair. Field parsers
//! are free functions so they can be checked without a terminal.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use thiserror::Error;

use crate::error::LibraryError;

use super::helpers::{status_line, StatusKind};

/// Raised when standard input reaches end of file.
#[derive(Debug, Error)]
#[error("input closed")]
pub struct InputClosed;

pub struct Prompter<R, W> {
    input: R,
    output: W,
    colored: bool,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, colored: bool) -> Self {
        Self {
            input,
            output,
            colored,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref()).context("failed to write output")
    }

    pub fn status(&mut self, kind: StatusKind, text: impl AsRef<str>) -> Result<()> {
        let line = status_line(kind, text.as_ref(), self.colored);
        self.say(line)
    }

    /// Show `label: ` and read one line, trimmed.
    pub fn line(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}: ").context("failed to write prompt")?;
        self.output.flush().context("failed to flush prompt")?;

        let mut buf = String::new();
        let read = self
            .input
            .read_line(&mut buf)
            .context("failed to read input")?;
        if read == 0 {
            return Err(InputClosed.into());
        }
        Ok(buf.trim().to_string())
    }

    /// Ask until a non-blank answer is given.
    pub fn required(&mut self, label: &str) -> Result<String> {
        loop {
            let value = self.line(label)?;
            if !value.is_empty() {
                return Ok(value);
            }
            self.status(StatusKind::Error, format!("{label} is required."))?;
        }
    }

    pub fn optional(&mut self, label: &str) -> Result<Option<String>> {
        let value = self.line(label)?;
        Ok((!value.is_empty()).then_some(value))
    }

    pub fn optional_date(&mut self, label: &str) -> Result<Option<NaiveDate>> {
        match self.optional(label)? {
            Some(value) => Ok(Some(parse_date(label, &value)?)),
            None => Ok(None),
        }
    }

    pub fn required_int(&mut self, label: &str) -> Result<i64> {
        let value = self.required(label)?;
        Ok(parse_int(label, &value)?)
    }

    pub fn optional_int(&mut self, label: &str) -> Result<Option<i64>> {
        match self.optional(label)? {
            Some(value) => Ok(Some(parse_int(label, &value)?)),
            None => Ok(None),
        }
    }

    /// Blank means `false`.
    pub fn flag(&mut self, label: &str) -> Result<bool> {
        match self.optional(label)? {
            Some(value) => Ok(parse_flag(label, &value)?),
            None => Ok(false),
        }
    }
}

pub fn parse_date(label: &str, value: &str) -> Result<NaiveDate, LibraryError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        LibraryError::validation(format!("{label} must be a date in YYYY-MM-DD format."))
    })
}

pub fn parse_int(label: &str, value: &str) -> Result<i64, LibraryError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| LibraryError::validation(format!("{label} must be an integer.")))
}

pub fn parse_flag(label: &str, value: &str) -> Result<bool, LibraryError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "t" | "1" | "on" => Ok(true),
        "n" | "no" | "false" | "f" | "0" | "off" => Ok(false),
        _ => Err(LibraryError::validation(format!(
            "{label} must be yes or no."
        ))),
    }
}
