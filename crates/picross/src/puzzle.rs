//! The puzzle model: grid dimensions plus one clue per column and per row.
//!
//! A [`Puzzle`] is a plain owned value. Its dimensions are fixed at
//! construction; individual clues can be replaced wholesale through the
//! validating setters but are only ever handed out as read-only slices, so
//! every stored clue value stays positive.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::parser;
use crate::runs::{run_lengths, Clue};

/// A single row or column of a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Line {
    Column(usize),
    Row(usize),
}

impl Line {
    pub fn index(self) -> usize {
        match self {
            Line::Column(i) | Line::Row(i) => i,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Column(i) => write!(f, "column {i}"),
            Line::Row(i) => write!(f, "row {i}"),
        }
    }
}

/// A Picross/Nonogram puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PuzzleData", into = "PuzzleData")]
pub struct Puzzle {
    width: usize,
    height: usize,
    column_clues: Vec<Clue>,
    row_clues: Vec<Clue>,
}

impl Puzzle {
    /// Create a `width × height` puzzle with every clue empty.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width < 1 || height < 1 {
            return Err(Error::invalid(format!(
                "puzzle dimensions must be at least 1×1, got {width}×{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            column_clues: vec![Clue::new(); width],
            row_clues: vec![Clue::new(); height],
        })
    }

    /// Placeholder puzzle used before a real one is loaded: 1×1, no clues.
    pub fn empty() -> Self {
        Self {
            width: 1,
            height: 1,
            column_clues: vec![Clue::new()],
            row_clues: vec![Clue::new()],
        }
    }

    /// Build a puzzle from explicit clues. The width is the number of column
    /// clues and the height the number of row clues.
    pub fn from_clues(column_clues: Vec<Vec<usize>>, row_clues: Vec<Vec<usize>>) -> Result<Self> {
        Self::from_clue_lists(
            column_clues.into_iter().map(Clue::from_vec).collect(),
            row_clues.into_iter().map(Clue::from_vec).collect(),
        )
    }

    /// Parse the textual puzzle format.
    ///
    /// A block of column clues, a blank line, then a block of row clues. Each
    /// clue line holds positive integers separated by spaces or commas; a lone
    /// `0` stands for an empty clue.
    pub fn parse(text: &str) -> Result<Self> {
        let (column_clues, row_clues) = parser::parse_clue_blocks(text)?;
        Self::from_clue_lists(column_clues, row_clues)
    }

    /// Derive the clues of a known solution. The resulting puzzle always has
    /// at least one solution: `solution` itself.
    pub fn from_solution(solution: &Grid) -> Result<Self> {
        if solution.width() == 0 || solution.height() == 0 {
            return Err(Error::invalid(format!(
                "solution grid must be at least 1×1, got {}×{}",
                solution.width(),
                solution.height()
            )));
        }
        let column_clues = (0..solution.width())
            .map(|x| run_lengths(solution.column(x)))
            .collect();
        let row_clues = (0..solution.height())
            .map(|y| run_lengths(solution.row(y)))
            .collect();
        log::debug!(
            target: "puzzle",
            "Derived {}×{} puzzle from solution with {} filled cells",
            solution.width(),
            solution.height(),
            solution.count_filled()
        );
        Self::from_clue_lists(column_clues, row_clues)
    }

    /// Single constructor every other path funnels through.
    pub(crate) fn from_clue_lists(column_clues: Vec<Clue>, row_clues: Vec<Clue>) -> Result<Self> {
        if column_clues.is_empty() || row_clues.is_empty() {
            return Err(Error::invalid(format!(
                "puzzle needs at least one column and one row, got {} columns and {} rows",
                column_clues.len(),
                row_clues.len()
            )));
        }
        for (i, clue) in column_clues.iter().enumerate() {
            check_positive(Line::Column(i), clue)?;
        }
        for (j, clue) in row_clues.iter().enumerate() {
            check_positive(Line::Row(j), clue)?;
        }
        Ok(Self {
            width: column_clues.len(),
            height: row_clues.len(),
            column_clues,
            row_clues,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Clue of column `index`, top to bottom.
    pub fn column_clue(&self, index: usize) -> Result<&[usize]> {
        self.clue(Line::Column(index))
    }

    /// Clue of row `index`, left to right.
    pub fn row_clue(&self, index: usize) -> Result<&[usize]> {
        self.clue(Line::Row(index))
    }

    pub fn clue(&self, line: Line) -> Result<&[usize]> {
        let (clues, index) = match line {
            Line::Column(i) => (&self.column_clues, i),
            Line::Row(j) => (&self.row_clues, j),
        };
        clues
            .get(index)
            .map(Clue::as_slice)
            .ok_or(Error::IndexOutOfRange {
                line,
                len: clues.len(),
            })
    }

    /// Column clues, left to right.
    pub fn column_clues(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        self.column_clues.iter().map(Clue::as_slice)
    }

    /// Row clues, top to bottom.
    pub fn row_clues(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        self.row_clues.iter().map(Clue::as_slice)
    }

    /// Every line of the puzzle: all columns, then all rows.
    pub fn lines(&self) -> impl Iterator<Item = Line> {
        (0..self.width)
            .map(Line::Column)
            .chain((0..self.height).map(Line::Row))
    }

    /// Replace the clue of column `index`.
    pub fn set_column_clue(&mut self, index: usize, clue: &[usize]) -> Result<()> {
        self.set_clue(Line::Column(index), clue)
    }

    /// Replace the clue of row `index`.
    pub fn set_row_clue(&mut self, index: usize, clue: &[usize]) -> Result<()> {
        self.set_clue(Line::Row(index), clue)
    }

    /// Replace the clue of `line` wholesale. Every value must be at least 1;
    /// an empty slice means the line has no filled cells. On error the
    /// puzzle is left untouched.
    pub fn set_clue(&mut self, line: Line, clue: &[usize]) -> Result<()> {
        check_positive(line, clue)?;
        let (clues, index) = match line {
            Line::Column(i) => (&mut self.column_clues, i),
            Line::Row(j) => (&mut self.row_clues, j),
        };
        let len = clues.len();
        let slot = clues
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { line, len })?;
        *slot = Clue::from_slice(clue);
        log::trace!(target: "puzzle", "Set {line} clue to {clue:?}");
        Ok(())
    }

    /// Whether `candidate` satisfies every clue of this puzzle.
    ///
    /// This checks *a* solution, not *the* solution: an ambiguous puzzle may
    /// have several grids that pass. A grid of the wrong size is never a
    /// solution.
    pub fn verify_solution(&self, candidate: &Grid) -> bool {
        self.dimensions_match(candidate)
            && self
                .lines()
                .all(|line| self.line_matches(candidate, line))
    }

    /// Every line whose runs in `candidate` differ from its clue, columns
    /// first. Returns `None` if `candidate` has the wrong dimensions.
    pub fn mismatched_lines(&self, candidate: &Grid) -> Option<Vec<Line>> {
        if !self.dimensions_match(candidate) {
            log::debug!(
                target: "puzzle",
                "Candidate is {}×{} but puzzle is {}×{}",
                candidate.width(),
                candidate.height(),
                self.width,
                self.height
            );
            return None;
        }
        Some(
            self.lines()
                .filter(|&line| !self.line_matches(candidate, line))
                .collect(),
        )
    }

    fn dimensions_match(&self, candidate: &Grid) -> bool {
        candidate.width() == self.width && candidate.height() == self.height
    }

    fn line_matches(&self, candidate: &Grid, line: Line) -> bool {
        match line {
            Line::Column(i) => run_lengths(candidate.column(i)) == self.column_clues[i],
            Line::Row(j) => run_lengths(candidate.row(j)) == self.row_clues[j],
        }
    }
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::empty()
    }
}

fn check_positive(line: Line, clue: &[usize]) -> Result<()> {
    match clue.iter().find(|&&value| value < 1) {
        Some(value) => Err(Error::invalid(format!(
            "{line} clue {clue:?} contains {value}; clue values must be at least 1"
        ))),
        None => Ok(()),
    }
}

/// Serialized form of a puzzle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PuzzleData {
    width: usize,
    height: usize,
    column_clues: Vec<Clue>,
    row_clues: Vec<Clue>,
}

impl TryFrom<PuzzleData> for Puzzle {
    type Error = Error;

    fn try_from(data: PuzzleData) -> Result<Self> {
        if data.column_clues.len() != data.width || data.row_clues.len() != data.height {
            return Err(Error::invalid(format!(
                "declared size {}×{} does not match {} column clues and {} row clues",
                data.width,
                data.height,
                data.column_clues.len(),
                data.row_clues.len()
            )));
        }
        Self::from_clue_lists(data.column_clues, data.row_clues)
    }
}

impl From<Puzzle> for PuzzleData {
    fn from(puzzle: Puzzle) -> Self {
        Self {
            width: puzzle.width,
            height: puzzle.height,
            column_clues: puzzle.column_clues,
            row_clues: puzzle.row_clues,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid(text: &str) -> Grid {
        Grid::parse(text).unwrap()
    }

    #[test]
    fn test_new_is_blank() {
        let puzzle = Puzzle::new(3, 2).unwrap();
        assert_eq!(puzzle.width(), 3);
        assert_eq!(puzzle.height(), 2);
        assert!(puzzle.column_clues().all(<[usize]>::is_empty));
        assert!(puzzle.row_clues().all(<[usize]>::is_empty));
        assert_eq!(puzzle.column_clues().len(), 3);
        assert_eq!(puzzle.row_clues().len(), 2);
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(Puzzle::new(0, 3).unwrap_err().is_invalid_argument());
        assert!(Puzzle::new(3, 0).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_empty_placeholder() {
        let puzzle = Puzzle::default();
        assert_eq!(puzzle, Puzzle::new(1, 1).unwrap());
        assert!(puzzle.verify_solution(&Grid::new(1, 1)));
    }

    #[test]
    fn test_from_clues() {
        let puzzle = Puzzle::from_clues(vec![vec![1], vec![2], vec![]], vec![vec![1, 1], vec![1]]).unwrap();
        assert_eq!(puzzle.width(), 3);
        assert_eq!(puzzle.height(), 2);
        assert_eq!(puzzle.column_clue(1).unwrap(), &[2]);
        assert_eq!(puzzle.row_clue(0).unwrap(), &[1, 1]);

        let err = Puzzle::from_clues(vec![vec![1, 0]], vec![vec![1]]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(Puzzle::from_clues(vec![], vec![vec![1]]).is_err());
    }

    #[test]
    fn test_from_solution() {
        let solution = grid("##.#\n....\n.##.\n");
        let puzzle = Puzzle::from_solution(&solution).unwrap();
        assert_eq!(puzzle.width(), 4);
        assert_eq!(puzzle.height(), 3);
        assert_eq!(puzzle.row_clue(0).unwrap(), &[2, 1]);
        assert!(puzzle.row_clue(1).unwrap().is_empty());
        assert_eq!(puzzle.row_clue(2).unwrap(), &[2]);
        assert_eq!(puzzle.column_clue(0).unwrap(), &[1]);
        assert_eq!(puzzle.column_clue(1).unwrap(), &[1, 1]);
        assert_eq!(puzzle.column_clue(3).unwrap(), &[1]);
        assert!(puzzle.verify_solution(&solution));
    }

    #[test]
    fn test_from_solution_rejects_degenerate_grid() {
        assert!(Puzzle::from_solution(&Grid::new(0, 0)).is_err());
        assert!(Puzzle::from_solution(&Grid::new(3, 0)).is_err());
        assert!(Puzzle::from_solution(&Grid::new(0, 3)).is_err());
    }

    #[test]
    fn test_out_of_range_clue() {
        let puzzle = Puzzle::new(2, 3).unwrap();
        assert_eq!(
            puzzle.column_clue(2),
            Err(Error::IndexOutOfRange {
                line: Line::Column(2),
                len: 2
            })
        );
        assert_eq!(
            puzzle.row_clue(3),
            Err(Error::IndexOutOfRange {
                line: Line::Row(3),
                len: 3
            })
        );
    }

    #[test]
    fn test_setters_overwrite() {
        let mut puzzle = Puzzle::new(2, 2).unwrap();
        puzzle.set_row_clue(1, &[1]).unwrap();
        assert_eq!(puzzle.row_clue(1).unwrap(), &[1]);
        puzzle.set_row_clue(1, &[1]).unwrap();
        assert_eq!(puzzle.row_clue(1).unwrap(), &[1]);
        puzzle.set_row_clue(1, &[2]).unwrap();
        assert_eq!(puzzle.row_clue(1).unwrap(), &[2]);
        puzzle.set_column_clue(0, &[]).unwrap();
        assert!(puzzle.column_clue(0).unwrap().is_empty());
    }

    #[test]
    fn test_setters_reject_bad_input_without_mutating() {
        let mut puzzle = Puzzle::new(2, 2).unwrap();
        puzzle.set_column_clue(0, &[2]).unwrap();

        let err = puzzle.set_column_clue(0, &[0]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(puzzle.column_clue(0).unwrap(), &[2]);

        let err = puzzle.set_row_clue(5, &[1]).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { .. }));
    }

    #[test]
    fn test_verify_dimension_mismatch_is_false() {
        let puzzle = Puzzle::from_solution(&grid("#.\n.#\n")).unwrap();
        assert!(!puzzle.verify_solution(&grid("#..\n.#.\n")));
        assert!(!puzzle.verify_solution(&grid("#.\n.#\n..\n")));
        assert!(!puzzle.verify_solution(&Grid::new(0, 0)));
        assert_eq!(puzzle.mismatched_lines(&Grid::new(3, 2)), None);
    }

    #[test]
    fn test_verify_accepts_alternate_solution() {
        // Both diagonals have the same clues.
        let puzzle = Puzzle::from_solution(&grid("#.\n.#\n")).unwrap();
        assert!(puzzle.verify_solution(&grid(".#\n#.\n")));
    }

    #[test]
    fn test_verify_rejects_split_and_merged_runs() {
        let solution = grid("###.\n....\n#.##\n");
        let puzzle = Puzzle::from_solution(&solution).unwrap();

        // Splits the run of three in row 0.
        let split = grid("#.#.\n....\n#.##\n");
        assert!(!puzzle.verify_solution(&split));

        // Merges the two runs of row 2.
        let merged = grid("###.\n....\n####\n");
        assert!(!puzzle.verify_solution(&merged));
        assert_eq!(
            puzzle.mismatched_lines(&merged),
            Some(vec![Line::Column(1), Line::Row(2)])
        );
    }

    #[test]
    fn test_verify_unchanged_signature_still_passes() {
        // Setting a cell to its current value leaves every run intact.
        let solution = grid("##.\n..#\n");
        let puzzle = Puzzle::from_solution(&solution).unwrap();
        let mut candidate = solution.clone();
        candidate.set(2, 0, false).unwrap();
        assert!(puzzle.verify_solution(&candidate));
        assert_eq!(puzzle.mismatched_lines(&candidate), Some(vec![]));
    }

    #[test]
    fn test_json_roundtrip() {
        let puzzle = Puzzle::parse("1\n2\n0\n\n1 1\n1\n").unwrap();
        let json = serde_json::to_string(&puzzle).unwrap();
        assert_eq!(
            json,
            r#"{"width":3,"height":2,"columnClues":[[1],[2],[]],"rowClues":[[1,1],[1]]}"#
        );
        assert_eq!(serde_json::from_str::<Puzzle>(&json).unwrap(), puzzle);
    }

    #[test]
    fn test_json_rejects_inconsistent_puzzle() {
        let wrong_width = r#"{"width":2,"height":1,"columnClues":[[1]],"rowClues":[[1]]}"#;
        assert!(serde_json::from_str::<Puzzle>(wrong_width).is_err());
        let zero_clue = r#"{"width":1,"height":1,"columnClues":[[0]],"rowClues":[[1]]}"#;
        assert!(serde_json::from_str::<Puzzle>(zero_clue).is_err());
    }

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1..8usize, 1..8usize).prop_flat_map(|(width, height)| {
            proptest::collection::vec(proptest::collection::vec(any::<bool>(), width), height)
                .prop_map(|rows| Grid::from_rows(rows).unwrap())
        })
    }

    proptest! {
        #[test]
        fn proptest_derived_puzzle_accepts_its_solution(solution in arb_grid()) {
            let puzzle = Puzzle::from_solution(&solution).unwrap();
            prop_assert!(puzzle.verify_solution(&solution));
            prop_assert!(puzzle.column_clues().flatten().all(|&v| v >= 1));
            prop_assert!(puzzle.row_clues().flatten().all(|&v| v >= 1));
        }

        #[test]
        fn proptest_text_roundtrip(solution in arb_grid()) {
            let puzzle = Puzzle::from_solution(&solution).unwrap();
            prop_assert_eq!(Puzzle::parse(&puzzle.to_string()).unwrap(), puzzle);
        }
    }
}
