//! Boolean pixel grid: a known solution or a candidate to verify.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, FormatError, FormatErrorKind, Result};
use crate::puzzle::Line;

/// A `width × height` matrix of filled (`true`) and empty (`false`) cells,
/// stored row-major.
///
/// Unlike a [`Puzzle`](crate::Puzzle), a grid may have a zero dimension; such
/// a grid is never a solution to anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<bool>>", into = "Vec<Vec<bool>>")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-empty grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Build a grid from its rows, top to bottom. All rows must have the same
    /// length.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(Error::invalid(format!(
                    "row {y} has {} cells but row 0 has {width}",
                    row.len()
                )));
            }
            cells.extend(row);
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parse a grid drawn as text, one line per row.
    ///
    /// `#`, `1` and `X` are filled; `.`, `0`, `_` and `-` are empty. Trailing
    /// whitespace and trailing blank lines are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines: Vec<&str> = text.lines().map(str::trim_end).collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        let rows = lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                line.chars()
                    .map(|c| match c {
                        '#' | '1' | 'X' => Ok(true),
                        '.' | '0' | '_' | '-' => Ok(false),
                        _ => Err(FormatError::new(i + 1, FormatErrorKind::InvalidCell(c))),
                    })
                    .collect::<Result<Vec<bool>, FormatError>>()
            })
            .collect::<Result<Vec<_>, FormatError>>()?;

        Self::from_rows(rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at column `x`, row `y`, or `None` if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Set the cell at column `x`, row `y`.
    pub fn set(&mut self, x: usize, y: usize, filled: bool) -> Result<()> {
        if x >= self.width {
            return Err(Error::IndexOutOfRange {
                line: Line::Column(x),
                len: self.width,
            });
        }
        if y >= self.height {
            return Err(Error::IndexOutOfRange {
                line: Line::Row(y),
                len: self.height,
            });
        }
        self.cells[y * self.width + x] = filled;
        Ok(())
    }

    /// Cells of row `y`, left to right. Empty if `y` is out of bounds.
    pub fn row(&self, y: usize) -> impl Iterator<Item = bool> + '_ {
        let row: &[bool] = if y < self.height {
            &self.cells[y * self.width..(y + 1) * self.width]
        } else {
            &[]
        };
        row.iter().copied()
    }

    /// Cells of column `x`, top to bottom. Empty if `x` is out of bounds.
    pub fn column(&self, x: usize) -> impl Iterator<Item = bool> + '_ {
        let (start, len) = if x < self.width {
            (x, self.height)
        } else {
            (0, 0)
        };
        self.cells
            .iter()
            .skip(start)
            .step_by(self.width.max(1))
            .take(len)
            .copied()
    }

    /// Number of filled cells.
    pub fn count_filled(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

impl TryFrom<Vec<Vec<bool>>> for Grid {
    type Error = Error;

    fn try_from(rows: Vec<Vec<bool>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<bool>> {
    fn from(grid: Grid) -> Self {
        (0..grid.height).map(|y| grid.row(y).collect()).collect()
    }
}

impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for filled in self.row(y) {
                f.write_str(if filled { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
