//! Error types shared by every constructor and accessor.

use thiserror::Error;

use crate::puzzle::Line;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error produced when building or querying a puzzle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A structural precondition was violated (bad dimensions, non-positive
    /// clue value, ragged grid, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A line index was outside the puzzle or grid.
    #[error("{line} is out of range (there are {len})")]
    IndexOutOfRange { line: Line, len: usize },
    /// Malformed textual input.
    #[error(transparent)]
    Format(#[from] FormatError),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Whether this is an invalid-argument error. Format errors count, since
    /// they are invalid arguments that happen to come from text.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_) | Error::Format(_))
    }
}

/// Malformed textual puzzle or grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct FormatError {
    /// 1-based line number where the problem was found.
    pub line: usize,
    pub kind: FormatErrorKind,
}

impl FormatError {
    pub(crate) fn new(line: usize, kind: FormatErrorKind) -> Self {
        Self { line, kind }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatErrorKind {
    #[error("no column clues before the blank separator line")]
    MissingColumns,
    #[error("no row clues after the blank separator line")]
    MissingRows,
    #[error("clue value {0} is not positive (use a lone `0` for an empty clue)")]
    NonPositive(i64),
    #[error("`{0}` is not an integer")]
    InvalidToken(String),
    #[error("line contains separators but no clue values")]
    EmptyLine,
    #[error("unexpected content after the row clues")]
    TrailingContent,
    #[error("`{0}` is not a grid cell")]
    InvalidCell(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_is_invalid_argument() {
        let err = Error::from(FormatError::new(3, FormatErrorKind::MissingRows));
        assert!(err.is_invalid_argument());
        assert!(Error::invalid("width must be at least 1").is_invalid_argument());

        let out_of_range = Error::IndexOutOfRange {
            line: Line::Row(4),
            len: 2,
        };
        assert!(!out_of_range.is_invalid_argument());
    }

    #[test]
    fn test_error_messages() {
        let err = Error::from(FormatError::new(2, FormatErrorKind::NonPositive(-2)));
        assert_eq!(
            err.to_string(),
            "line 2: clue value -2 is not positive (use a lone `0` for an empty clue)"
        );

        let err = Error::IndexOutOfRange {
            line: Line::Column(5),
            len: 3,
        };
        assert_eq!(err.to_string(), "column 5 is out of range (there are 3)");
    }
}
