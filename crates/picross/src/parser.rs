//! Textual puzzle format.
//!
//! ```text
//! 1          <- column clues, left to right
//! 2
//! 0          <- a lone 0 is an empty clue
//!            <- blank separator
//! 1 1        <- row clues, top to bottom
//! 1
//! ```
//!
//! Values on a line may be separated by spaces or commas. A trailing blank
//! line before the end of input is allowed.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, FormatError, FormatErrorKind, Result};
use crate::puzzle::Puzzle;
use crate::runs::Clue;

/// Which block of the input we are reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Columns,
    Rows,
    Done,
}

/// Split `text` into its column clues and row clues.
pub(crate) fn parse_clue_blocks(text: &str) -> Result<(Vec<Clue>, Vec<Clue>), FormatError> {
    let mut section = Section::Columns;
    let mut columns = Vec::new();
    let mut rows = Vec::new();
    let mut line_count = 0;

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        line_count = line_no;
        let line = line.trim();

        match section {
            Section::Columns if line.is_empty() => {
                if columns.is_empty() {
                    return Err(FormatError::new(line_no, FormatErrorKind::MissingColumns));
                }
                section = Section::Rows;
            }
            Section::Columns => columns.push(parse_clue_line(line, line_no)?),
            Section::Rows if line.is_empty() => {
                if rows.is_empty() {
                    return Err(FormatError::new(line_no, FormatErrorKind::MissingRows));
                }
                section = Section::Done;
            }
            Section::Rows => rows.push(parse_clue_line(line, line_no)?),
            Section::Done if line.is_empty() => (),
            Section::Done => {
                return Err(FormatError::new(line_no, FormatErrorKind::TrailingContent));
            }
        }
    }

    if columns.is_empty() {
        return Err(FormatError::new(1, FormatErrorKind::MissingColumns));
    }
    if rows.is_empty() {
        return Err(FormatError::new(line_count + 1, FormatErrorKind::MissingRows));
    }

    log::debug!(
        target: "parser",
        "Parsed {} column clues and {} row clues from {line_count} lines",
        columns.len(),
        rows.len()
    );
    Ok((columns, rows))
}

/// Parse one non-blank clue line.
fn parse_clue_line(line: &str, line_no: usize) -> Result<Clue, FormatError> {
    let tokens: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect();

    match tokens.as_slice() {
        [] => Err(FormatError::new(line_no, FormatErrorKind::EmptyLine)),
        ["0"] => Ok(Clue::new()),
        _ => tokens
            .iter()
            .map(|&token| parse_clue_value(token, line_no))
            .collect(),
    }
}

fn parse_clue_value(token: &str, line_no: usize) -> Result<usize, FormatError> {
    let invalid = || FormatError::new(line_no, FormatErrorKind::InvalidToken(token.to_string()));
    let value = token.parse::<i64>().map_err(|_| invalid())?;
    if value < 1 {
        return Err(FormatError::new(line_no, FormatErrorKind::NonPositive(value)));
    }
    usize::try_from(value).map_err(|_| invalid())
}

impl FromStr for Puzzle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Writes the textual format, so that parsing the output gives back an equal
/// puzzle.
impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for clue in self.column_clues() {
            write_clue_line(f, clue)?;
        }
        writeln!(f)?;
        for clue in self.row_clues() {
            write_clue_line(f, clue)?;
        }
        Ok(())
    }
}

fn write_clue_line(f: &mut fmt::Formatter<'_>, clue: &[usize]) -> fmt::Result {
    match clue.split_first() {
        None => writeln!(f, "0"),
        Some((first, rest)) => {
            write!(f, "{first}")?;
            for value in rest {
                write!(f, " {value}")?;
            }
            writeln!(f)
        }
    }
}
